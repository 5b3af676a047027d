//! Rutas HTTP
//!
//! Monta el router completo de la aplicación.

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub mod auth_routes;
pub mod truck_routes;

/// Construir el router de la aplicación con todas las capas
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/trucks", truck_routes::create_truck_router(state.clone()))
        .layer(cors_layer(&state.config.cors_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "storage": state.trucks.backend(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
