//! Unit tests for API types serialization/deserialization.

#![allow(clippy::unwrap_used, clippy::panic)]

use onboard::api::{
    CompleteStepRequest, DistributionJson, EmployeeResponse, HealthResponse, LoginResponse,
    ProgressResponse, RegisterRequest, StatsResponse,
};
use onboard_core::{
    EmployeeRecord, OnboardingConfig, ProgressEngine, ProgressView, Role, StatsAggregator, Status,
};
use serde_json::json;

fn record_with_steps(steps: &[u32]) -> EmployeeRecord {
    let engine = ProgressEngine::new(OnboardingConfig::default());
    let mut record = EmployeeRecord::new(
        "Ana",
        "ana@example.com",
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
        Role::Employee,
    );
    for step in steps {
        engine.complete_step(&mut record, *step);
    }
    record
}

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

// =============================================================================
// REQUEST TESTS
// =============================================================================

#[test]
fn test_complete_step_request_uses_camel_case() {
    let request: CompleteStepRequest = serde_json::from_str(r#"{"stepId": 4}"#).unwrap();
    assert_eq!(request.step_id, 4);

    assert!(serde_json::from_str::<CompleteStepRequest>(r#"{"step_id": 4}"#).is_err());
}

#[test]
fn test_register_request_is_always_an_employee() {
    let request: RegisterRequest = serde_json::from_value(json!({
        "name": "Ana",
        "email": "ana@example.com",
        "password": "pw",
        "role": "admin"
    }))
    .unwrap();

    assert_eq!(request.into_new_employee().role, Role::Employee);
}

// =============================================================================
// PROGRESS RESPONSE TESTS
// =============================================================================

#[test]
fn test_progress_response_shape() {
    let record = record_with_steps(&[1, 2, 3]);
    let response = ProgressResponse::from(ProgressView::from_record(&record));

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "progress": 50,
            "currentStep": 4,
            "completedSteps": [1, 2, 3],
            "status": "In Progress"
        })
    );
}

#[test]
fn test_status_labels() {
    let fresh = ProgressResponse::from(ProgressView::from_record(&record_with_steps(&[])));
    let json = serde_json::to_value(&fresh).unwrap();
    assert_eq!(json["status"], "Not Started");

    let legacy: ProgressResponse = serde_json::from_value(json!({
        "progress": 0,
        "currentStep": 1,
        "completedSteps": [],
        "status": "Just Started"
    }))
    .unwrap();
    assert_eq!(legacy.status, Status::NotStarted);
}

// =============================================================================
// ADMIN RESPONSE TESTS
// =============================================================================

#[test]
fn test_stats_response_shape() {
    let records: Vec<EmployeeRecord> = [10u8, 30, 60, 90]
        .into_iter()
        .map(|p| {
            let mut r = record_with_steps(&[1]);
            r.progress = p;
            r
        })
        .collect();
    let stats = StatsResponse::from(StatsAggregator::new().compute(&records));

    assert_eq!(
        serde_json::to_value(&stats).unwrap(),
        json!({
            "totalEmployees": 4,
            "completed": 0,
            "inProgress": 4,
            "averageProgress": 48,
            "progressDistribution": {
                "0-25%": 1,
                "26-50%": 1,
                "51-75%": 1,
                "76-100%": 1
            }
        })
    );
}

#[test]
fn test_distribution_round_trip_keys() {
    let parsed: DistributionJson =
        serde_json::from_str(r#"{"0-25%":3,"26-50%":2,"51-75%":1,"76-100%":0}"#).unwrap();
    assert_eq!(parsed.quarter, 3);
    assert_eq!(parsed.full, 0);
}

#[test]
fn test_employee_response_has_no_credential() {
    let record = record_with_steps(&[1, 2, 3, 4, 5, 6]);
    let json = serde_json::to_value(EmployeeResponse::from(&record)).unwrap();

    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "_id",
            "name",
            "email",
            "type",
            "startDate",
            "progress",
            "currentStep",
            "completedSteps",
            "status"
        ]
    );
    assert_eq!(json["type"], "employee");
    assert_eq!(json["_id"], record.id.to_string());
    assert_eq!(json["status"], "Completed");
    assert!(!json.to_string().contains("argon2"));
}

#[test]
fn test_login_response_shape() {
    let record = record_with_steps(&[]);
    let response = LoginResponse::new("token".to_string(), &record);
    let json = serde_json::to_value(&response).unwrap();

    let user_keys: Vec<&str> = json["user"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(user_keys, vec!["id", "name", "type"]);

    assert_eq!(json["token"], "token");
    assert_eq!(json["user"]["name"], "Ana");
    assert_eq!(json["user"]["type"], "employee");
    assert_eq!(json["user"]["id"], record.id.to_string());
}
