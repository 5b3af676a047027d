use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::truck_controller::TruckController;
use crate::dto::truck_dto::{CreateTruckRequest, TruckListQuery, UpdateTruckRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::truck::Truck;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppJson, AppPath, AppQuery};

/// Lecturas públicas, escrituras con token bearer
pub fn create_truck_router(state: AppState) -> Router<AppState> {
    let protected = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_trucks).merge(post(create_truck).route_layer(protected.clone())),
        )
        .route(
            "/:id",
            get(get_truck).merge(
                put(update_truck)
                    .delete(delete_truck)
                    .route_layer(protected),
            ),
        )
}

async fn list_trucks(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TruckListQuery>,
) -> Result<Json<Vec<Truck>>, AppError> {
    let controller = TruckController::new(state.trucks.clone());
    let trucks = controller.list(query).await?;
    Ok(Json(trucks))
}

async fn get_truck(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Truck>, AppError> {
    let controller = TruckController::new(state.trucks.clone());
    let truck = controller.get_by_id(id).await?;
    Ok(Json(truck))
}

async fn create_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(request): AppJson<CreateTruckRequest>,
) -> Result<(StatusCode, Json<Truck>), AppError> {
    tracing::debug!("User '{}' creating truck", user.username);
    let controller = TruckController::new(state.trucks.clone());
    let truck = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(truck)))
}

async fn update_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateTruckRequest>,
) -> Result<Json<Truck>, AppError> {
    tracing::debug!("User '{}' updating truck {}", user.username, id);
    let controller = TruckController::new(state.trucks.clone());
    let truck = controller.update(id, request).await?;
    Ok(Json(truck))
}

async fn delete_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<i64>>, AppError> {
    tracing::debug!("User '{}' deleting truck {}", user.username, id);
    let controller = TruckController::new(state.trucks.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        id,
        "Truck deleted successfully".to_string(),
    )))
}
