//! Diet Planner WASM Module
//!
//! This crate provides WebAssembly bindings for the metrics calculator so
//! the browser form can preview BMI and the goal date before submitting.

use chrono::NaiveDate;
use diet_planner_shared::health_metrics;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Calculate BMI from weight (kg) and height (cm)
///
/// Returns 0 for a non-positive height so a half-filled form shows nothing.
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    health_metrics::calculate_bmi(weight_kg, height_cm)
}

/// BMI category label, e.g. "Overweight"
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64) -> String {
    health_metrics::classify_bmi(bmi).as_str().to_string()
}

/// Estimated goal date as "March 16, 2024", or empty for an invalid date
#[wasm_bindgen]
pub fn estimate_goal_date(current_kg: f64, target_kg: f64, year: i32, month: u32, day: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|reference| health_metrics::estimate_goal_date(current_kg, target_kg, reference))
        .map(health_metrics::format_long_date)
        .unwrap_or_default()
}

#[derive(Serialize)]
struct PreviewError {
    error: &'static str,
}

/// Full metrics preview as JSON, shaped like `bmiData` in the API response
#[wasm_bindgen]
pub fn bmi_preview(
    current_kg: f64,
    target_kg: f64,
    height_cm: f64,
    year: i32,
    month: u32,
    day: u32,
) -> String {
    let result = if height_cm > 0.0 {
        NaiveDate::from_ymd_opt(year, month, day).and_then(|reference| {
            health_metrics::calculate_bmi_result(current_kg, target_kg, height_cm, reference)
        })
    } else {
        None
    };

    let json = match result {
        Some(metrics) => serde_json::to_string(&metrics),
        None => serde_json::to_string(&PreviewError {
            error: "invalid measurements",
        }),
    };
    json.unwrap_or_default()
}
