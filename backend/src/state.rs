//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Collaborators are created once at startup. Every field is an `Arc` or
//! already cheap to clone.

use crate::ai::TextGenerator;
use crate::config::AppConfig;
use crate::repositories::PlanStore;
use crate::services::PlanService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Plan orchestration with its injected collaborators
    pub plans: PlanService,
    /// Prometheus render handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Either collaborator may be absent; the service degrades to the
    /// fallback plan or reports the store as unavailable.
    pub fn new(
        config: AppConfig,
        generator: Option<Arc<dyn TextGenerator>>,
        store: Option<Arc<dyn PlanStore>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            plans: PlanService::new(generator, store),
            metrics: None,
        }
    }

    /// Expose a Prometheus handle on `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the plan service
    #[inline]
    pub fn plans(&self) -> &PlanService {
        &self.plans
    }
}
