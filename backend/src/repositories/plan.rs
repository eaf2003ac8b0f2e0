//! Diet plan repository for database operations

use crate::db;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diet_planner_shared::{BmiResult, UserProfile};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// Diet plan record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanRecord {
    pub id: Uuid,
    pub age: i32,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub fitness_goal: String,
    pub dietary_preference: String,
    pub sugar_intake: String,
    pub water_intake_glasses: f64,
    pub upcoming_event: Option<String>,
    pub sports_interest: Option<String>,
    pub past_fitness_issues: Option<String>,
    pub bmi: f64,
    pub bmi_category: String,
    pub estimated_goal_date: String,
    pub ai_response: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a diet plan record
///
/// The identifier and timestamp are assigned here, at save time.
#[derive(Debug, Clone)]
pub struct CreatePlanRecord {
    pub id: Uuid,
    pub profile: UserProfile,
    pub metrics: BmiResult,
    pub ai_response: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CreatePlanRecord {
    pub fn new(profile: UserProfile, metrics: BmiResult, ai_response: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            metrics,
            ai_response,
            created_at: Utc::now(),
        }
    }
}

/// Diet plan repository for database operations
pub struct PlanRepository;

impl PlanRepository {
    /// Insert a diet plan record
    pub async fn create(pool: &PgPool, input: &CreatePlanRecord) -> Result<PlanRecord> {
        let profile = &input.profile;
        let record = sqlx::query_as::<_, PlanRecord>(
            r#"
            INSERT INTO diet_plans (
                id, age, height_cm, current_weight_kg, target_weight_kg,
                fitness_goal, dietary_preference, sugar_intake, water_intake_glasses,
                upcoming_event, sports_interest, past_fitness_issues,
                bmi, bmi_category, estimated_goal_date, ai_response, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id, age, height_cm, current_weight_kg, target_weight_kg,
                      fitness_goal, dietary_preference, sugar_intake, water_intake_glasses,
                      upcoming_event, sports_interest, past_fitness_issues,
                      bmi, bmi_category, estimated_goal_date, ai_response, created_at
            "#,
        )
        .bind(input.id)
        .bind(i32::try_from(profile.age)?)
        .bind(profile.height)
        .bind(profile.current_weight)
        .bind(profile.target_weight)
        .bind(profile.fitness_goal.as_str())
        .bind(profile.dietary_preference.as_str())
        .bind(&profile.sugar_intake)
        .bind(profile.water_intake)
        .bind(&profile.upcoming_event)
        .bind(&profile.sports_interest)
        .bind(&profile.past_fitness_issues)
        .bind(input.metrics.bmi)
        .bind(input.metrics.category.as_str())
        .bind(&input.metrics.estimated_goal_date)
        .bind(&input.ai_response)
        .bind(input.created_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}

/// Persistence failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("plan store is not connected")]
    Unavailable,

    #[error("failed to write plan record")]
    Write(#[from] anyhow::Error),
}

/// Where diet plans are persisted
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Whether the store can currently accept writes
    async fn is_connected(&self) -> bool;

    /// Persist a record and return its identifier
    async fn save(&self, record: CreatePlanRecord) -> Result<Uuid, StoreError>;
}

/// PostgreSQL-backed plan store
#[derive(Clone)]
pub struct PgPlanStore {
    pool: PgPool,
}

impl PgPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn is_connected(&self) -> bool {
        !self.pool.is_closed() && db::health_check(&self.pool).await.is_ok()
    }

    async fn save(&self, record: CreatePlanRecord) -> Result<Uuid, StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable);
        }
        let saved = PlanRepository::create(&self.pool, &record).await?;
        Ok(saved.id)
    }
}
