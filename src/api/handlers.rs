//! HTTP request handlers for the roster engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_report, compute_window, deduplicate_shifts, filter_shifts, propose_fill_ins,
    validate_staffing, validate_staffing_in_window,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::StaffingReport;

use super::request::{ValidateRequest, WindowRequest};
use super::response::{ApiError, ApiErrorResponse, WindowResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/window", post(window_handler))
        .route("/validate", post(validate_handler))
        .with_state(state)
}

/// Handler for POST /window endpoint.
///
/// Returns the UTC bounds of the period containing the reference date.
async fn window_handler(
    State(state): State<AppState>,
    payload: Result<Json<WindowRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing window request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let policy = state.config().window_policy();
    match compute_window(
        &request.reference_date,
        &request.granularity,
        request.offset,
        &policy,
    ) {
        Ok(window) => {
            let body = WindowResponse::from(window);
            info!(
                correlation_id = %correlation_id,
                start = %body.start_iso,
                end_exclusive = %body.end_iso_exclusive,
                "Window computed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Window request rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /validate endpoint.
///
/// Checks the submitted shifts against the staffing rules and returns an
/// advisory report. Shortfalls are part of a successful response.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match perform_validation(&request, state.config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                shifts_count = request.shifts.len(),
                buckets = report.results.len(),
                unsatisfied = report.unsatisfied_count,
                proposed = report.proposed_shifts.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Validation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Validation failed"
            );
            error_response(err.into())
        }
    }
}

/// Runs ingestion, filtering, deduplication, validation and, when asked,
/// gap filling for one request.
fn perform_validation(
    request: &ValidateRequest,
    config: &ConfigLoader,
) -> EngineResult<StaffingReport> {
    let mut shifts = request.shift_records(&config.unit().department)?;

    if request.filter.count_active() > 0 {
        shifts = filter_shifts(&shifts, &request.filter)
            .into_iter()
            .cloned()
            .collect();
    }
    if request.deduplicate {
        shifts = deduplicate_shifts(&shifts);
    }

    let rules = match &request.rules {
        Some(rules) => rules.clone(),
        None => config.rules(),
    };

    let results = match &request.period {
        Some(period) => {
            let window = compute_window(
                &period.reference_date,
                &period.granularity,
                period.offset,
                &config.window_policy(),
            )?;
            let results =
                validate_staffing_in_window(&shifts, &rules, &request.employees, &window)?;
            shifts.retain(|shift| window.contains_shift(shift));
            results
        }
        None => validate_staffing(&shifts, &rules, &request.employees)?,
    };

    let mut report = build_report(results, &shifts);
    if request.fill_gaps {
        report.proposed_shifts =
            propose_fill_ins(&report.results, &shifts, &request.employees, config.config())?;
    }
    Ok(report)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
