//! Health metrics calculations module
//!
//! Provides the BMI and goal-date calculations that back every diet plan.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Explicit Time**: Date estimates take the reference date as a parameter
//! 3. **Type Safety**: Categories are enums, not strings

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days assumed per kilogram of weight change when estimating a goal date
pub const DAYS_PER_KG: f64 = 15.0;

/// Upper BMI bound (exclusive) of the underweight bucket
pub const UNDERWEIGHT_BELOW: f64 = 18.5;
/// Upper BMI bound (exclusive) of the normal bucket
pub const NORMAL_BELOW: f64 = 25.0;
/// Upper BMI bound (exclusive) of the overweight bucket
pub const OVERWEIGHT_BELOW: f64 = 30.0;

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the BMI range for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, UNDERWEIGHT_BELOW),
            BmiCategory::Normal => (UNDERWEIGHT_BELOW, NORMAL_BELOW),
            BmiCategory::Overweight => (NORMAL_BELOW, OVERWEIGHT_BELOW),
            BmiCategory::Obese => (OVERWEIGHT_BELOW, f64::INFINITY),
        }
    }

    /// Label used in API payloads and prompt text
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
///
/// Height must be positive; callers validate before calling.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI into category
///
/// Each boundary belongs to the upper bucket: 18.5 is Normal, 25.0 is
/// Overweight and 30.0 is Obese.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < NORMAL_BELOW {
        BmiCategory::Normal
    } else if bmi < OVERWEIGHT_BELOW {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

// ============================================================================
// Goal Date Estimation
// ============================================================================

/// Number of days needed to move from `current_kg` to `target_kg`
///
/// `ceil(|current - target| * 15)`. Returns `None` when the inputs are not
/// finite or the result does not fit in a day count.
pub fn days_to_goal(current_kg: f64, target_kg: f64) -> Option<u64> {
    let days = ((current_kg - target_kg).abs() * DAYS_PER_KG).ceil();
    if !days.is_finite() || days > u32::MAX as f64 {
        return None;
    }
    Some(days as u64)
}

/// Estimate the date on which the target weight is reached
///
/// There is no lower bound: equal weights yield `reference` itself.
/// Returns `None` only if the estimate falls outside the supported calendar.
pub fn estimate_goal_date(current_kg: f64, target_kg: f64, reference: NaiveDate) -> Option<NaiveDate> {
    let days = days_to_goal(current_kg, target_kg)?;
    reference.checked_add_days(Days::new(days))
}

/// Format a date the long way, e.g. "January 5, 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

// ============================================================================
// Combined Result
// ============================================================================

/// BMI calculation result returned with every plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    /// BMI rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
    /// Long-form calendar date, e.g. "March 16, 2024"
    pub estimated_goal_date: String,
}

/// Round to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calculate the complete BMI result for a profile's measurements
///
/// The category is derived from the rounded BMI so the reported value and
/// its category always agree. Returns `None` when the BMI is not finite
/// or the goal date falls outside the supported calendar.
pub fn calculate_bmi_result(
    current_weight_kg: f64,
    target_weight_kg: f64,
    height_cm: f64,
    reference: NaiveDate,
) -> Option<BmiResult> {
    let bmi = round_one_decimal(calculate_bmi(current_weight_kg, height_cm));
    if !bmi.is_finite() {
        return None;
    }
    let goal_date = estimate_goal_date(current_weight_kg, target_weight_kg, reference)?;

    Some(BmiResult {
        bmi,
        category: classify_bmi(bmi),
        estimated_goal_date: format_long_date(goal_date),
    })
}
