//! Route definitions for the Diet Planner API
//!
//! This module organizes all API routes and applies middleware.

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

/// Plan requests are small form submissions
const MAX_BODY_BYTES: usize = 64 * 1024;

mod health;
mod plan;


pub use health::health_routes;
pub use plan::plan_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let server = state.config().server.clone();

    let mut router = Router::new().nest("/api", api_routes());
    if state.metrics.is_some() {
        router = router.route("/metrics", get(render_metrics));
    }

    router
        .fallback(route_not_found)
        // Apply middleware layers
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(cors_layer(&server))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::health_routes())
        .merge(plan::plan_routes())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if server.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// GET /metrics - Prometheus text exposition
async fn render_metrics(State(state): State<AppState>) -> Result<String, ApiError> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| ApiError::NotFound("Route not found".to_string()))
}

async fn route_not_found() -> impl IntoResponse {
    ApiError::NotFound("Route not found".to_string())
}
