//! API request and response types

use crate::health_metrics::BmiResult;
use chrono::{DateTime, Utc};
use serde::de::{value::StringDeserializer, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// What the user wants the plan to achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    GainWeight,
    BuildMuscle,
    Maintain,
}

impl FitnessGoal {
    /// Wire value, e.g. "lose_weight"
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::LoseWeight => "lose_weight",
            FitnessGoal::GainWeight => "gain_weight",
            FitnessGoal::BuildMuscle => "build_muscle",
            FitnessGoal::Maintain => "maintain",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FitnessGoal::LoseWeight => "Lose Weight",
            FitnessGoal::GainWeight => "Gain Weight",
            FitnessGoal::BuildMuscle => "Build Muscle",
            FitnessGoal::Maintain => "Maintain",
        }
    }
}

/// Dietary preference the plan must respect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    Vegetarian,
    NonVegetarian,
    Vegan,
    Keto,
    Paleo,
}

impl DietaryPreference {
    /// Wire value, e.g. "non_vegetarian"
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryPreference::Vegetarian => "vegetarian",
            DietaryPreference::NonVegetarian => "non_vegetarian",
            DietaryPreference::Vegan => "vegan",
            DietaryPreference::Keto => "keto",
            DietaryPreference::Paleo => "paleo",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            DietaryPreference::Vegetarian => "Vegetarian",
            DietaryPreference::NonVegetarian => "Non-Vegetarian",
            DietaryPreference::Vegan => "Vegan",
            DietaryPreference::Keto => "Keto",
            DietaryPreference::Paleo => "Paleo",
        }
    }
}

/// Plan request as submitted by the form
///
/// Every field is optional on the wire so a missing or `null` required field
/// can be reported by name. Convert with
/// [`validate_plan_request`](crate::validation::validate_plan_request).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub fitness_goal: Option<FitnessGoal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub dietary_preference: Option<DietaryPreference>,
    pub sugar_intake: Option<String>,
    pub water_intake: Option<f64>,
    pub upcoming_event: Option<String>,
    pub sports_interest: Option<String>,
    pub past_fitness_issues: Option<String>,
}

/// Read a string-valued enum, treating `null` and blank strings as absent
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            let value: StringDeserializer<D::Error> = value.into_deserializer();
            T::deserialize(value).map(Some)
        }
        _ => Ok(None),
    }
}

/// Validated user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[validate(range(min = 1, max = 150, message = "must be between 1 and 150"))]
    pub age: u32,
    /// Centimeters
    pub height: f64,
    /// Kilograms
    pub current_weight: f64,
    /// Kilograms
    pub target_weight: f64,
    pub fitness_goal: FitnessGoal,
    pub dietary_preference: DietaryPreference,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub sugar_intake: String,
    /// Glasses per day
    pub water_intake: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub upcoming_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub sports_interest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub past_fitness_issues: Option<String>,
}

/// Generated plan returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub user_data: UserProfile,
    pub bmi_data: BmiResult,
    pub ai_response: String,
    /// False when the text is the local fallback plan
    pub ai_generated: bool,
    pub timestamp: DateTime<Utc>,
}

/// Response for a stored user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveUserDataResponse {
    pub message: String,
    pub id: Uuid,
}

/// Database connectivity as reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

/// AI availability as reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiStatus {
    Available,
    #[serde(rename = "Not configured")]
    NotConfigured,
}

/// Collaborator status block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesStatus {
    pub database: DatabaseStatus,
    pub ai: AiStatus,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub services: ServicesStatus,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_request_accepts_nulls() {
        let req: PlanRequest = serde_json::from_value(json!({
            "age": 30,
            "height": null,
            "fitnessGoal": "build_muscle",
            "dietaryPreference": "non_vegetarian"
        }))
        .unwrap();

        assert_eq!(req.age, Some(30));
        assert!(req.height.is_none());
        assert_eq!(req.fitness_goal, Some(FitnessGoal::BuildMuscle));
        assert_eq!(req.dietary_preference, Some(DietaryPreference::NonVegetarian));
    }

    #[test]
    fn test_unknown_goal_rejected() {
        let result: Result<PlanRequest, _> =
            serde_json::from_value(json!({ "fitnessGoal": "get_famous" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_enums_read_as_absent() {
        let req: PlanRequest = serde_json::from_value(json!({
            "fitnessGoal": "",
            "dietaryPreference": "   "
        }))
        .unwrap();
        assert!(req.fitness_goal.is_none());
        assert!(req.dietary_preference.is_none());

        let req: PlanRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.fitness_goal.is_none());
    }

    #[test]
    fn test_ai_status_labels() {
        assert_eq!(serde_json::to_value(AiStatus::NotConfigured).unwrap(), "Not configured");
        assert_eq!(serde_json::to_value(AiStatus::Available).unwrap(), "Available");
        assert_eq!(serde_json::to_value(DatabaseStatus::Disconnected).unwrap(), "Disconnected");
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(FitnessGoal::LoseWeight.label(), "Lose Weight");
        assert_eq!(FitnessGoal::Maintain.as_str(), "maintain");
        assert_eq!(DietaryPreference::NonVegetarian.label(), "Non-Vegetarian");
    }
}
