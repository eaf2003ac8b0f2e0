//! Health check endpoint
//!
//! Always answers 200 while the process is up; collaborator status is
//! reported in the body instead of the status code.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use diet_planner_shared::{AiStatus, DatabaseStatus, HealthResponse, ServicesStatus};

/// Create health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /api/health - Service and collaborator status
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let plans = state.plans();

    let database = if plans.database_connected().await {
        DatabaseStatus::Connected
    } else {
        DatabaseStatus::Disconnected
    };
    let ai = if plans.ai_available() {
        AiStatus::Available
    } else {
        AiStatus::NotConfigured
    };

    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        services: ServicesStatus { database, ai },
    })
}
