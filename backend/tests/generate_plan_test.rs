//! Integration tests for plan generation

mod common;

use axum::http::StatusCode;
use common::{plan_request, MockGenerator, MockStore, TestApp};
use rstest::rstest;
use serde_json::json;

const PATH: &str = "/api/generate-plan";

#[tokio::test]
async fn test_fallback_plan_without_generator() {
    let app = TestApp::new();

    let (status, body) = app.post_json(PATH, &plan_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiGenerated"], false);
    assert_eq!(body["bmiData"]["bmi"], 24.2);
    assert_eq!(body["bmiData"]["category"], "Normal");
    assert!(body["bmiData"]["estimatedGoalDate"].is_string());
    assert!(body["aiResponse"].as_str().unwrap().contains("1500-1800"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_generated_text_is_returned() {
    let generator = MockGenerator::replying("## Weekly Meal Plan\nOats and berries.");
    let app = TestApp::with_collaborators(Some(generator.clone()), None);

    let (status, body) = app.post_json(PATH, &plan_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiGenerated"], true);
    assert_eq!(body["aiResponse"], "## Weekly Meal Plan\nOats and berries.");
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_failing_generator_uses_fallback() {
    let app = TestApp::with_collaborators(Some(MockGenerator::failing()), None);

    let (status, body) = app.post_json(PATH, &plan_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiGenerated"], false);
    assert!(!body["aiResponse"].as_str().unwrap().is_empty());
}

#[rstest]
#[case("gain_weight", "2500-2800")]
#[case("build_muscle", "2000-2200")]
#[case("maintain", "2000-2200")]
#[tokio::test]
async fn test_fallback_calories_follow_goal(#[case] goal: &str, #[case] calories: &str) {
    let app = TestApp::new();
    let mut request = plan_request();
    request["fitnessGoal"] = json!(goal);

    let (status, body) = app.post_json(PATH, &request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["aiResponse"].as_str().unwrap().contains(calories));
}

#[rstest]
#[case("age")]
#[case("height")]
#[case("currentWeight")]
#[case("targetWeight")]
#[case("fitnessGoal")]
#[case("dietaryPreference")]
#[case("sugarIntake")]
#[case("waterIntake")]
#[tokio::test]
async fn test_missing_field_is_rejected_before_collaborators(#[case] field: &str) {
    let generator = MockGenerator::replying("plan");
    let store = MockStore::connected();
    let app = TestApp::with_collaborators(Some(generator.clone()), Some(store.clone()));
    let mut request = plan_request();
    request.as_object_mut().unwrap().remove(field);

    let (status, body) = app.post_json(PATH, &request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], format!("Missing required field: {field}"));
    assert_eq!(generator.call_count(), 0);
    assert_eq!(store.saved_count(), 0);
}

#[tokio::test]
async fn test_null_field_counts_as_missing() {
    let app = TestApp::new();
    let mut request = plan_request();
    request["waterIntake"] = json!(null);

    let (status, body) = app.post_json(PATH, &request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: waterIntake");
}

#[tokio::test]
async fn test_underflowing_height_is_bad_request() {
    let store = MockStore::connected();
    let app = TestApp::with_collaborators(None, Some(store.clone()));
    let mut request = plan_request();
    request["height"] = json!(1e-200);

    let (status, body) = app.post_json(PATH, &request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid value for height: is too small to compute a BMI");
    assert_eq!(store.saved_count(), 0);
}

#[rstest]
#[case("fitnessGoal")]
#[case("dietaryPreference")]
#[tokio::test]
async fn test_blank_choice_is_missing(#[case] field: &str) {
    let app = TestApp::new();
    let mut request = plan_request();
    request[field] = json!("");

    let (status, body) = app.post_json(PATH, &request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], format!("Missing required field: {field}"));
}

#[tokio::test]
async fn test_blank_goal_does_not_hide_missing_age() {
    let app = TestApp::new();
    let mut request = plan_request();
    request.as_object_mut().unwrap().remove("age");
    request["fitnessGoal"] = json!("");

    let (status, body) = app.post_json(PATH, &request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: age");
}

#[tokio::test]
async fn test_unknown_goal_is_bad_request() {
    let app = TestApp::new();
    let mut request = plan_request();
    request["fitnessGoal"] = json!("become_famous");

    let (status, body) = app.post_json(PATH, &request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.post(PATH, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_optional_fields_round_trip() {
    let app = TestApp::new();
    let mut request = plan_request();
    request["upcomingEvent"] = json!("Sister's wedding in June");
    request["sportsInterest"] = json!("swimming, tennis");
    request["pastFitnessIssues"] = json!("lower back pain");

    let (status, body) = app.post_json(PATH, &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userData"]["upcomingEvent"], "Sister's wedding in June");
    assert_eq!(body["userData"]["sportsInterest"], "swimming, tennis");
    assert_eq!(body["userData"]["pastFitnessIssues"], "lower back pain");
    assert_eq!(body["userData"]["age"], 30);
    assert_eq!(body["userData"]["fitnessGoal"], "lose_weight");
}

#[tokio::test]
async fn test_plan_is_saved_when_store_connected() {
    let store = MockStore::connected();
    let app = TestApp::with_collaborators(None, Some(store.clone()));

    let (status, _) = app.post_json(PATH, &plan_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.saved_count(), 1);
}

#[tokio::test]
async fn test_store_failure_still_returns_plan() {
    let app = TestApp::with_collaborators(
        Some(MockGenerator::replying("plan text")),
        Some(MockStore::failing()),
    );

    let (status, body) = app.post_json(PATH, &plan_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiResponse"], "plan text");
    assert_eq!(body["bmiData"]["category"], "Normal");
}
