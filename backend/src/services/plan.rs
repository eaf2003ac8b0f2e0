//! Diet plan service
//!
//! Orchestrates a plan request:
//! - Validation into a typed profile
//! - BMI and goal-date calculation
//! - Text generation with a deterministic local fallback
//! - Best-effort persistence

use crate::ai::TextGenerator;
use crate::repositories::{CreatePlanRecord, PlanStore, StoreError};
use crate::services::prompt::{build_prompt, fallback_plan};
use chrono::{DateTime, NaiveDate, Utc};
use diet_planner_shared::{
    calculate_bmi_result, validate_plan_request, BmiResult, PlanRequest, PlanResponse,
    UserProfile, ValidationError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Plan service failures
#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("estimated goal date is outside the supported calendar")]
    GoalDateOutOfRange,

    #[error("database not available")]
    StoreUnavailable,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for PlanError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => PlanError::StoreUnavailable,
            other => PlanError::Store(other),
        }
    }
}

/// Generated plan text and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanText {
    pub text: String,
    pub ai_generated: bool,
}

/// Diet plan service
///
/// Collaborators are injected once at startup; either may be absent.
#[derive(Clone, Default)]
pub struct PlanService {
    generator: Option<Arc<dyn TextGenerator>>,
    store: Option<Arc<dyn PlanStore>>,
}

impl PlanService {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        store: Option<Arc<dyn PlanStore>>,
    ) -> Self {
        Self { generator, store }
    }

    /// Whether a text generator is configured
    pub fn ai_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Whether a store is configured and currently connected
    pub async fn database_connected(&self) -> bool {
        match &self.store {
            Some(store) => store.is_connected().await,
            None => false,
        }
    }

    /// Compute the metrics returned with every plan
    pub fn compute_metrics(profile: &UserProfile, reference: NaiveDate) -> Result<BmiResult, PlanError> {
        calculate_bmi_result(
            profile.current_weight,
            profile.target_weight,
            profile.height,
            reference,
        )
        .ok_or(PlanError::GoalDateOutOfRange)
    }

    /// Generate a diet plan for the request
    pub async fn generate_plan(&self, req: &PlanRequest) -> Result<PlanResponse, PlanError> {
        self.generate_plan_at(req, Utc::now()).await
    }

    /// Generate a diet plan as of `now`
    ///
    /// Validation failures return before any collaborator is called.
    /// Generation and persistence failures never fail the request.
    pub async fn generate_plan_at(
        &self,
        req: &PlanRequest,
        now: DateTime<Utc>,
    ) -> Result<PlanResponse, PlanError> {
        let profile = validate_plan_request(req)?;
        let bmi_data = Self::compute_metrics(&profile, now.date_naive())?;

        debug!(
            bmi = bmi_data.bmi,
            category = %bmi_data.category,
            goal = profile.fitness_goal.as_str(),
            "Computed plan metrics"
        );

        let plan = self.plan_text(&profile, &bmi_data).await;
        let source = if plan.ai_generated { "ai" } else { "fallback" };
        metrics::counter!("diet_plans_generated_total", "source" => source).increment(1);

        self.persist_best_effort(CreatePlanRecord::new(
            profile.clone(),
            bmi_data.clone(),
            Some(plan.text.clone()),
        ))
        .await;

        Ok(PlanResponse {
            user_data: profile,
            bmi_data,
            ai_response: plan.text,
            ai_generated: plan.ai_generated,
            timestamp: Utc::now(),
        })
    }

    /// Ask the generator for a plan, falling back to the local template
    pub async fn plan_text(&self, profile: &UserProfile, metrics: &BmiResult) -> PlanText {
        let Some(generator) = self.generator.as_ref() else {
            info!("Text generation not configured, using fallback plan");
            return PlanText {
                text: fallback_plan(profile, metrics),
                ai_generated: false,
            };
        };

        let prompt = build_prompt(profile, metrics);
        match generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => PlanText {
                text,
                ai_generated: true,
            },
            Ok(_) => {
                warn!(model = generator.model(), "Text generator returned empty text, using fallback plan");
                PlanText {
                    text: fallback_plan(profile, metrics),
                    ai_generated: false,
                }
            }
            Err(e) => {
                warn!(model = generator.model(), error = %e, "Text generation failed, using fallback plan");
                PlanText {
                    text: fallback_plan(profile, metrics),
                    ai_generated: false,
                }
            }
        }
    }

    /// Save when a connected store exists; failures are logged only
    async fn persist_best_effort(&self, record: CreatePlanRecord) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if !store.is_connected().await {
            debug!("Plan store disconnected, skipping persistence");
            return;
        }

        match store.save(record).await {
            Ok(id) => info!(plan_id = %id, "Diet plan saved"),
            Err(e) => {
                metrics::counter!("diet_plan_persist_failures_total").increment(1);
                error!(error = ?e, "Failed to save diet plan");
            }
        }
    }

    /// Store a user profile without generating a plan
    pub async fn save_user_data(&self, req: &PlanRequest) -> Result<Uuid, PlanError> {
        let profile = validate_plan_request(req)?;

        let store = self.store.as_ref().ok_or(PlanError::StoreUnavailable)?;
        if !store.is_connected().await {
            return Err(PlanError::StoreUnavailable);
        }

        let bmi_data = Self::compute_metrics(&profile, Utc::now().date_naive())?;
        let id = store
            .save(CreatePlanRecord::new(profile, bmi_data, None))
            .await?;

        metrics::counter!("user_data_saved_total").increment(1);
        info!(plan_id = %id, "User data saved");
        Ok(id)
    }
}
