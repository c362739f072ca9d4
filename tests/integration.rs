//! Integration tests for the roster engine HTTP API.
//!
//! This test suite covers:
//! - Window bounds for day, week and month granularities
//! - Month rollover and night carryover
//! - Staffing validation against configured and submitted rules
//! - Period validation over every day of a window
//! - Filtering, deduplication and hour totals
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use shift_roster::api::{create_router, AppState};
use shift_roster::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_window(reference_date: &str, granularity: &str, offset: i32) -> (StatusCode, Value) {
    let body = json!({
        "reference_date": reference_date,
        "granularity": granularity,
        "offset": offset
    });
    post(create_router_for_test(), "/window", body).await
}

async fn post_validate(body: Value) -> (StatusCode, Value) {
    post(create_router_for_test(), "/validate", body).await
}

fn create_shift(id: &str, employee_id: &str, start: &str, end: &str, shift_type: &str) -> Value {
    json!({
        "id": id,
        "employee_id": employee_id,
        "start_time": start,
        "end_time": end,
        "shift_type": shift_type,
        "is_published": true
    })
}

fn create_employee(id: &str, experience_level: u32) -> Value {
    json!({
        "id": id,
        "first_name": "Test",
        "last_name": id,
        "role": "Undersköterska",
        "experience_level": experience_level
    })
}

fn rule(shift_type: &str, min_staff_count: u32, min_experience_sum: u32) -> Value {
    json!({
        "shift_type": shift_type,
        "min_staff_count": min_staff_count,
        "min_experience_sum": min_experience_sum
    })
}

fn find_result<'a>(report: &'a Value, date: &str, shift_type: &str) -> &'a Value {
    report["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["date"] == date && r["shift_type"] == shift_type)
        .unwrap_or_else(|| panic!("no result for {} {}", date, shift_type))
}

// =============================================================================
// SECTION 1: Window Calculation
// =============================================================================

#[tokio::test]
async fn test_month_window_with_night_carryover() {
    let (status, result) = post_window("2025-08-28", "month", 0).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["start_iso"], "2025-08-01T00:00:00.000Z");
    assert_eq!(result["end_iso_exclusive"], "2025-09-01T06:00:00.000Z");
    assert_eq!(result["granularity"], "month");
}

#[tokio::test]
async fn test_month_window_rolls_into_next_year() {
    let (status, result) = post_window("2024-12-31", "month", 1).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["start_iso"], "2025-01-01T00:00:00.000Z");
    assert_eq!(result["end_iso_exclusive"], "2025-02-01T06:00:00.000Z");
}

#[tokio::test]
async fn test_month_window_rolls_into_previous_year() {
    let (status, result) = post_window("2025-01-15", "month", -1).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["start_iso"], "2024-12-01T00:00:00.000Z");
    assert_eq!(result["end_iso_exclusive"], "2025-01-01T06:00:00.000Z");
}

#[tokio::test]
async fn test_february_leap_year_window() {
    let (status, result) = post_window("2024-02-10", "month", 0).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["start_iso"], "2024-02-01T00:00:00.000Z");
    assert_eq!(result["end_iso_exclusive"], "2024-03-01T06:00:00.000Z");
}

#[tokio::test]
async fn test_week_window_starts_on_monday() {
    // 2025-08-28 is a Thursday
    let (status, result) = post_window("2025-08-28", "week", 0).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["start_iso"], "2025-08-25T00:00:00.000Z");
    assert_eq!(result["end_iso_exclusive"], "2025-09-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_day_window() {
    let (status, result) = post_window("2025-08-28", "day", 0).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["start_iso"], "2025-08-28T00:00:00.000Z");
    assert_eq!(result["end_iso_exclusive"], "2025-08-29T00:00:00.000Z");
}

#[tokio::test]
async fn test_offset_defaults_to_zero() {
    let body = json!({"reference_date": "2025-08-28", "granularity": "MONTH"});
    let (status, result) = post(create_router_for_test(), "/window", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["start_iso"], "2025-08-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_invalid_reference_date_returns_400() {
    let (status, result) = post_window("2025-02-30", "month", 0).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_REFERENCE_DATE");
}

#[tokio::test]
async fn test_unsupported_granularity_returns_400() {
    let (status, result) = post_window("2025-08-28", "quarter", 0).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNSUPPORTED_GRANULARITY");
    assert!(result["message"].as_str().unwrap().contains("quarter"));
}

// =============================================================================
// SECTION 2: Staffing Validation
// =============================================================================

#[tokio::test]
async fn test_all_shift_types_satisfied() {
    let shifts = vec![
        create_shift("d1", "e1", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
        create_shift("d2", "e2", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
        create_shift("d3", "e3", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
        create_shift("v1", "e4", "2025-08-01T14:00:00Z", "2025-08-01T22:00:00Z", "evening"),
        create_shift("n1", "e5", "2025-08-01T22:00:00Z", "2025-08-02T06:00:00Z", "night"),
        create_shift("n2", "e6", "2025-08-01T22:00:00Z", "2025-08-02T06:00:00Z", "night"),
    ];
    let employees: Vec<Value> = (1..=6).map(|i| create_employee(&format!("e{}", i), 1)).collect();
    let body = json!({
        "shifts": shifts,
        "employees": employees,
        "rules": [rule("day", 2, 0), rule("evening", 1, 0), rule("night", 1, 0)]
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r["satisfied"] == true));
    assert_eq!(report["unsatisfied_count"], 0);

    // Ordered by time of day
    assert_eq!(results[0]["shift_type"], "day");
    assert_eq!(results[1]["shift_type"], "evening");
    assert_eq!(results[2]["shift_type"], "night");
    assert_eq!(results[0]["actual_staff"], 3);
}

#[tokio::test]
async fn test_single_night_below_minimum() {
    let body = json!({
        "shifts": [create_shift(
            "n1",
            "e1",
            "2025-08-01T22:00:00Z",
            "2025-08-02T06:00:00Z",
            "night",
        )],
        "employees": [create_employee("e1", 3)],
        "rules": [rule("night", 2, 0)]
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["date"], "2025-08-01");
    assert_eq!(results[0]["actual_staff"], 1);
    assert_eq!(results[0]["required_staff"], 2);
    assert_eq!(results[0]["satisfied"], false);
    assert_eq!(report["unsatisfied_count"], 1);
}

#[tokio::test]
async fn test_experience_sum_below_minimum() {
    let body = json!({
        "shifts": [
            create_shift("n1", "e1", "2025-08-01T22:00:00Z", "2025-08-02T06:00:00Z", "night"),
            create_shift("n2", "e2", "2025-08-01T22:00:00Z", "2025-08-02T06:00:00Z", "night"),
        ],
        "employees": [create_employee("e1", 1), create_employee("e2", 2)],
        "rules": [rule("night", 2, 4)]
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    let night = find_result(&report, "2025-08-01", "night");
    assert_eq!(night["actual_staff"], 2);
    assert_eq!(night["actual_experience"], 3);
    assert_eq!(night["required_experience"], 4);
    assert_eq!(night["satisfied"], false);
}

#[tokio::test]
async fn test_unknown_employee_counts_without_experience() {
    let body = json!({
        "shifts": [
            create_shift("d1", "e1", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
            create_shift("d2", "ghost", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
        ],
        "employees": [create_employee("e1", 2)],
        "rules": [rule("day", 2, 2)]
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    let day = find_result(&report, "2025-08-01", "day");
    assert_eq!(day["actual_staff"], 2);
    assert_eq!(day["actual_experience"], 2);
    assert_eq!(day["satisfied"], true);
}

#[tokio::test]
async fn test_unconfigured_shift_type_yields_no_result() {
    let body = json!({
        "shifts": [create_shift(
            "v1",
            "e1",
            "2025-08-01T14:00:00Z",
            "2025-08-01T22:00:00Z",
            "evening",
        )],
        "employees": [create_employee("e1", 2)],
        "rules": [rule("night", 1, 0)]
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    let results = report["results"].as_array().unwrap();
    // Only the configured night type, reported as unstaffed
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["shift_type"], "night");
    assert_eq!(results[0]["actual_staff"], 0);
}

#[tokio::test]
async fn test_configured_rules_apply_when_none_submitted() {
    let shifts: Vec<Value> = (1..=3)
        .map(|i| {
            create_shift(
                &format!("d{}", i),
                &format!("e{}", i),
                "2025-08-04T06:00:00Z",
                "2025-08-04T14:00:00Z",
                "day",
            )
        })
        .collect();
    let employees: Vec<Value> = (1..=3).map(|i| create_employee(&format!("e{}", i), 2)).collect();
    let body = json!({"shifts": shifts, "employees": employees});

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    let day = find_result(&report, "2025-08-04", "day");
    assert_eq!(day["required_staff"], 3);
    assert_eq!(day["required_experience"], 6);
    assert_eq!(day["satisfied"], true);
    assert_eq!(find_result(&report, "2025-08-04", "night")["satisfied"], false);
}

#[tokio::test]
async fn test_empty_schedule_returns_empty_report() {
    let body = json!({"shifts": [], "employees": []});

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(report["results"].as_array().unwrap().is_empty());
    assert!(report["hours"].as_array().unwrap().is_empty());
    assert_eq!(report["unsatisfied_count"], 0);
}

// =============================================================================
// SECTION 3: Period Validation
// =============================================================================

#[tokio::test]
async fn test_week_period_checks_every_day() {
    let body = json!({
        "shifts": [create_shift(
            "n1",
            "e1",
            "2025-08-27T22:00:00Z",
            "2025-08-28T06:00:00Z",
            "night",
        )],
        "employees": [create_employee("e1", 3)],
        "rules": [rule("night", 1, 0)],
        "period": {"reference_date": "2025-08-28", "granularity": "week"}
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 7);
    assert_eq!(results[0]["date"], "2025-08-25");
    assert_eq!(results[6]["date"], "2025-08-31");
    assert_eq!(report["unsatisfied_count"], 6);
    assert_eq!(find_result(&report, "2025-08-27", "night")["satisfied"], true);
}

#[tokio::test]
async fn test_month_period_keeps_last_night_and_drops_other_months() {
    let body = json!({
        "shifts": [
            create_shift("n31", "e1", "2025-08-31T22:00:00Z", "2025-09-01T06:00:00Z", "night"),
            create_shift("sep", "e1", "2025-09-01T22:00:00Z", "2025-09-02T06:00:00Z", "night"),
            create_shift("jul", "e2", "2025-07-31T22:00:00Z", "2025-08-01T06:00:00Z", "night"),
        ],
        "employees": [create_employee("e1", 3), create_employee("e2", 3)],
        "rules": [rule("night", 1, 0)],
        "period": {"reference_date": "2025-08-15", "granularity": "month"}
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["results"].as_array().unwrap().len(), 31);
    assert_eq!(find_result(&report, "2025-08-31", "night")["satisfied"], true);
    assert_eq!(find_result(&report, "2025-08-01", "night")["satisfied"], false);

    let hours = report["hours"].as_array().unwrap();
    assert_eq!(hours.len(), 1);
    assert_eq!(hours[0]["employee_id"], "e1");
    assert_eq!(hours[0]["shift_count"], 1);
}

#[tokio::test]
async fn test_invalid_period_returns_400() {
    let body = json!({
        "shifts": [],
        "employees": [],
        "period": {"reference_date": "next month", "granularity": "month"}
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(report["code"], "INVALID_REFERENCE_DATE");
}

// =============================================================================
// SECTION 4: Filtering, Deduplication and Hours
// =============================================================================

#[tokio::test]
async fn test_deduplicate_drops_second_shift_same_day() {
    let body = json!({
        "shifts": [
            create_shift("d1", "e1", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
            create_shift("v1", "e1", "2025-08-01T14:00:00Z", "2025-08-01T22:00:00Z", "evening"),
        ],
        "employees": [create_employee("e1", 3)],
        "rules": [rule("day", 1, 0), rule("evening", 1, 0)],
        "deduplicate": true
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(find_result(&report, "2025-08-01", "day")["actual_staff"], 1);
    assert_eq!(find_result(&report, "2025-08-01", "evening")["actual_staff"], 0);
    assert_eq!(report["hours"][0]["shift_count"], 1);
}

#[tokio::test]
async fn test_filter_by_shift_type() {
    let body = json!({
        "shifts": [
            create_shift("d1", "e1", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
            create_shift("n1", "e2", "2025-08-01T22:00:00Z", "2025-08-02T06:00:00Z", "night"),
        ],
        "employees": [create_employee("e1", 3), create_employee("e2", 3)],
        "rules": [rule("day", 1, 0), rule("night", 1, 0)],
        "filter": {"shift_type": "night"}
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(find_result(&report, "2025-08-01", "day")["actual_staff"], 0);
    assert_eq!(find_result(&report, "2025-08-01", "night")["actual_staff"], 1);
}

#[tokio::test]
async fn test_filter_by_default_department() {
    let mut elsewhere = create_shift(
        "d2",
        "e2",
        "2025-08-01T06:00:00Z",
        "2025-08-01T14:00:00Z",
        "day",
    );
    elsewhere["department"] = json!("Geriatrik");
    let body = json!({
        "shifts": [
            create_shift("d1", "e1", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
            elsewhere,
        ],
        "employees": [create_employee("e1", 3), create_employee("e2", 3)],
        "rules": [rule("day", 1, 0)],
        "filter": {"department": "Akutmottagning"}
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(find_result(&report, "2025-08-01", "day")["actual_staff"], 1);
    assert_eq!(report["hours"][0]["employee_id"], "e1");
}

#[tokio::test]
async fn test_hours_summary_totals() {
    // 2025-08-02 is a Saturday
    let body = json!({
        "shifts": [
            create_shift("n1", "e1", "2025-08-01T22:00:00Z", "2025-08-02T06:00:00Z", "night"),
            create_shift("d1", "e1", "2025-08-02T06:00:00Z", "2025-08-02T10:30:00Z", "day"),
            create_shift("d2", "e2", "2025-08-01T06:00:00Z", "2025-08-01T14:00:00Z", "day"),
        ],
        "employees": [create_employee("e1", 3), create_employee("e2", 3)],
        "rules": []
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(report["results"].as_array().unwrap().is_empty());

    let hours = report["hours"].as_array().unwrap();
    assert_eq!(hours.len(), 2);
    assert_eq!(hours[0]["employee_id"], "e1");
    assert_eq!(hours[0]["shift_count"], 2);
    assert_eq!(
        normalize_decimal(hours[0]["total_hours"].as_str().unwrap()),
        "12.5"
    );
    assert_eq!(hours[0]["night_shifts"], 1);
    assert_eq!(hours[0]["weekend_shifts"], 1);
    assert_eq!(hours[1]["employee_id"], "e2");
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_shift_ending_before_start_returns_400() {
    let body = json!({
        "shifts": [create_shift(
            "bad",
            "e1",
            "2025-08-01T14:00:00Z",
            "2025-08-01T06:00:00Z",
            "day",
        )],
        "employees": [create_employee("e1", 3)]
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(report["code"], "MALFORMED_SHIFT_RECORD");
    assert!(report["message"].as_str().unwrap().contains("bad"));
}

#[tokio::test]
async fn test_unknown_shift_type_returns_400() {
    let body = json!({
        "shifts": [create_shift(
            "s1",
            "e1",
            "2025-08-01T06:00:00Z",
            "2025-08-01T14:00:00Z",
            "graveyard",
        )],
        "employees": []
    });

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(report["code"], "MALFORMED_SHIFT_RECORD");
}

#[tokio::test]
async fn test_missing_employees_field_returns_validation_error() {
    let body = json!({"shifts": []});

    let (status, report) = post_validate(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(report["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/window")
                .body(Body::from(r#"{"reference_date":"2025-08-28","granularity":"day"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["code"], "MISSING_CONTENT_TYPE");
}
