pub mod operator_routes;
pub mod place_routes;
pub mod trip_routes;

use axum::{extract::State, response::Json};
use serde_json::json;

use crate::state::AppState;

/// Health check simple
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "transport_control",
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
