use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppJson;

pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.auth.clone());

    // la verificación bcrypt consume CPU
    let response = tokio::task::spawn_blocking(move || controller.login(request))
        .await
        .map_err(|e| AppError::Internal(format!("Login task failed: {}", e)))??;

    Ok(Json(response))
}
