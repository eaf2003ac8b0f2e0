//! Diet plan API routes

use crate::error::{ApiError, ApiResult};
use crate::services::PlanError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use diet_planner_shared::{PlanRequest, PlanResponse, SaveUserDataResponse};

const GENERATE_FAILED: &str = "Failed to generate diet plan";
const SAVE_FAILED: &str = "Failed to save user data";
const DATABASE_UNAVAILABLE: &str = "Database not available";

/// Create plan routes
pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-plan", post(generate_plan))
        .route("/save-user-data", post(save_user_data))
}

/// Malformed or mistyped bodies are client errors
fn reject_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

/// Map a service failure onto the public error for this endpoint
fn map_plan_error(err: PlanError, failure: &'static str) -> ApiError {
    match err {
        PlanError::Validation(e) => e.into(),
        PlanError::StoreUnavailable => ApiError::ServiceUnavailable(DATABASE_UNAVAILABLE.to_string()),
        other => ApiError::internal(failure, other),
    }
}

/// POST /api/generate-plan - Generate a personalized diet plan
///
/// Succeeds even when text generation or persistence fails; the fallback
/// plan is returned with `aiGenerated: false`.
async fn generate_plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> ApiResult<Json<PlanResponse>> {
    let Json(req) = payload.map_err(reject_body)?;

    let response = state
        .plans()
        .generate_plan(&req)
        .await
        .map_err(|e| map_plan_error(e, GENERATE_FAILED))?;

    Ok(Json(response))
}

/// POST /api/save-user-data - Store a user profile
async fn save_user_data(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> ApiResult<Json<SaveUserDataResponse>> {
    let Json(req) = payload.map_err(reject_body)?;

    let id = state
        .plans()
        .save_user_data(&req)
        .await
        .map_err(|e| map_plan_error(e, SAVE_FAILED))?;

    Ok(Json(SaveUserDataResponse {
        message: "User data saved successfully".to_string(),
        id,
    }))
}
