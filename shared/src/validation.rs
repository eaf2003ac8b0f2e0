//! Input validation functions
//!
//! Turns the loosely-typed [`PlanRequest`] into a [`UserProfile`].
//! Uses both custom validators and the `validator` crate for derive macros.

use crate::errors::ValidationError;
use crate::health_metrics::calculate_bmi;
use crate::types::{PlanRequest, UserProfile};
use validator::Validate;

/// Required request fields, in the order they are checked
pub const REQUIRED_FIELDS: &[&str] = &[
    "age",
    "height",
    "currentWeight",
    "targetWeight",
    "fitnessGoal",
    "dietaryPreference",
    "sugarIntake",
    "waterIntake",
];

/// Validate that a measurement is a finite, strictly positive number
pub fn validate_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidField {
            field,
            reason: "must be a valid number".to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ValidationError::InvalidField {
            field,
            reason: "must be a positive number".to_string(),
        });
    }
    Ok(value)
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

/// Blank strings count as missing for required text fields
fn required_text(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Map a Rust field name reported by `validator` to its JSON name
pub fn json_field_name(field: &str) -> &'static str {
    match field {
        "age" => "age",
        "height" => "height",
        "current_weight" | "currentWeight" => "currentWeight",
        "target_weight" | "targetWeight" => "targetWeight",
        "fitness_goal" | "fitnessGoal" => "fitnessGoal",
        "dietary_preference" | "dietaryPreference" => "dietaryPreference",
        "sugar_intake" | "sugarIntake" => "sugarIntake",
        "water_intake" | "waterIntake" => "waterIntake",
        "upcoming_event" | "upcomingEvent" => "upcomingEvent",
        "sports_interest" | "sportsInterest" => "sportsInterest",
        "past_fitness_issues" | "pastFitnessIssues" => "pastFitnessIssues",
        _ => "request",
    }
}

fn from_validator(errors: validator::ValidationErrors) -> ValidationError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(name, errs)| {
            let reason = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "is invalid".to_string());
            (name.to_string(), reason)
        })
        .collect();
    fields.sort();

    match fields.into_iter().next() {
        Some((name, reason)) => ValidationError::InvalidField {
            field: json_field_name(&name),
            reason,
        },
        None => ValidationError::InvalidField {
            field: "request",
            reason: errors.to_string(),
        },
    }
}

/// Validate a plan request and produce the typed profile
///
/// Required fields are checked in [`REQUIRED_FIELDS`] order; the first
/// missing one is reported. Optional fields are carried over verbatim.
pub fn validate_plan_request(req: &PlanRequest) -> Result<UserProfile, ValidationError> {
    let age = required("age", req.age)?;
    let height = required("height", req.height)?;
    let current_weight = required("currentWeight", req.current_weight)?;
    let target_weight = required("targetWeight", req.target_weight)?;
    let fitness_goal = required("fitnessGoal", req.fitness_goal)?;
    let dietary_preference = required("dietaryPreference", req.dietary_preference)?;
    let sugar_intake = required_text("sugarIntake", req.sugar_intake.as_deref())?;
    let water_intake = required("waterIntake", req.water_intake)?;

    let profile = UserProfile {
        age,
        height: validate_positive("height", height)?,
        current_weight: validate_positive("currentWeight", current_weight)?,
        target_weight: validate_positive("targetWeight", target_weight)?,
        fitness_goal,
        dietary_preference,
        sugar_intake,
        water_intake: validate_positive("waterIntake", water_intake)?,
        upcoming_event: req.upcoming_event.clone(),
        sports_interest: req.sports_interest.clone(),
        past_fitness_issues: req.past_fitness_issues.clone(),
    };

    // A positive height can still be small enough to square to zero
    if !calculate_bmi(profile.current_weight, profile.height).is_finite() {
        return Err(ValidationError::InvalidField {
            field: "height",
            reason: "is too small to compute a BMI".to_string(),
        });
    }

    profile.validate().map_err(from_validator)?;
    Ok(profile)
}
