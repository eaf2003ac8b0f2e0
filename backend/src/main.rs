//! Diet Planner Backend
//!
//! Generates personalized diet plans from body metrics and goals.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Plan orchestration, prompt and fallback assembly
//! - AI: Gemini text generation client
//! - Repositories: Optional PostgreSQL persistence with SQLx

use anyhow::Result;
use diet_planner_backend::{
    ai::{GeminiClient, TextGenerator},
    config, db,
    repositories::{PgPlanStore, PlanStore},
    routes,
    state::AppState,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Diet Planner Backend"
    );

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    // Connect to the database (optional - runs without persistence on failure)
    let store: Option<Arc<dyn PlanStore>> = db::connect_optional(
        config.database.url.as_deref(),
        config.database.max_connections,
        config.database.run_migrations,
    )
    .await
    .map(|pool| {
        info!("Database connection established");
        Arc::new(PgPlanStore::new(pool)) as Arc<dyn PlanStore>
    });

    // Text generation (optional - fallback plans are served without it)
    let generator = build_generator(&config.ai);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let mut state = AppState::new(config, generator, store);
    if let Some(handle) = install_metrics_recorder() {
        state = state.with_metrics(handle);
    }

    // Build application
    let app = routes::create_router(state);

    // Start server
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the Gemini client when an API key is configured
fn build_generator(config: &config::AiConfig) -> Option<Arc<dyn TextGenerator>> {
    match GeminiClient::from_config(config) {
        Ok(Some(client)) => {
            info!(model = %config.model, "Gemini text generation enabled");
            Some(Arc::new(client) as Arc<dyn TextGenerator>)
        }
        Ok(None) => {
            warn!(
                "{} not set. Diet plans will use the fallback template.",
                config::GOOGLE_API_KEY_ENV
            );
            None
        }
        Err(e) => {
            warn!("Failed to build Gemini client: {}. Diet plans will use the fallback template.", e);
            None
        }
    }
}

/// Install the global Prometheus recorder
fn install_metrics_recorder() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to install metrics recorder: {}. /metrics is disabled.", e);
            None
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "diet_planner_backend=info,tower_http=info".into()
        } else {
            "diet_planner_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push("Server port must be set explicitly");
    }

    // Check database URL is not localhost in production
    if let Some(url) = config.database.url.as_deref() {
        if url.contains("localhost") || url.contains("127.0.0.1") {
            warn!("Database URL contains localhost - ensure this is intentional for production");
        }
    }

    if config.server.allows_any_origin() {
        warn!("CORS allows any origin - set FA__SERVER__CORS_ORIGINS to restrict it");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
