//! HTTP request handlers for the Attendance Policy Evaluation Engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler decodes its request, looks up the referenced policy, runs the
//! matching pure evaluator, and returns the result as JSON.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::evaluation::{
    calculate_overtime, calculate_penalty, calculate_period_overtime, validate_clock_in,
    validate_clock_out,
};
use crate::models::TimeOfDay;
use crate::repository::PolicyRepository;

use super::request::{
    ClockEventRequest, CurrentShiftRequest, GeofenceCheckRequest, HolidayCheckRequest,
    OvertimeCalculationRequest, PenaltyCalculationRequest, PeriodOvertimeRequest,
    ScheduleRangeRequest, WorkingDaysRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/schedule/clock-in", post(clock_in_handler))
        .route("/schedule/clock-out", post(clock_out_handler))
        .route("/overtime/calculate", post(overtime_handler))
        .route("/overtime/period", post(period_overtime_handler))
        .route("/penalty/calculate", post(penalty_handler))
        .route("/holidays/check", post(holiday_check_handler))
        .route("/holidays/working-days", post(working_days_handler))
        .route("/shifts/current", post(current_shift_handler))
        .route("/shifts/schedule", post(schedule_range_handler))
        .route("/geofence/clock-in", post(geofence_clock_in_handler))
        .route("/geofence/clock-out", post(geofence_clock_out_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Decodes a JSON request body, mapping axum rejections onto the API error
/// shape.
fn decode<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    ApiError::new("VALIDATION_ERROR", body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((StatusCode::BAD_REQUEST, Json(error)).into_response())
        }
    }
}

fn engine_error(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Evaluation failed");
    let api_error: ApiErrorResponse = error.into();
    api_error.into_response()
}

fn parse_time(value: &str, correlation_id: Uuid) -> Result<TimeOfDay, Response> {
    value
        .parse()
        .map_err(|e: EngineError| engine_error(correlation_id, e))
}

/// Handler for POST /schedule/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockEventRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let time = match parse_time(&request.time, correlation_id) {
        Ok(time) => time,
        Err(response) => return response,
    };
    let policy = match state.repository().work_schedule_policy(&request.policy_id) {
        Ok(policy) => policy,
        Err(err) => return engine_error(correlation_id, err),
    };

    let result = validate_clock_in(policy, time, request.date);
    info!(
        correlation_id = %correlation_id,
        policy_id = %request.policy_id,
        is_valid = result.is_valid,
        is_late = result.is_late,
        "Clock-in validated"
    );
    Json(result).into_response()
}

/// Handler for POST /schedule/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockEventRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let time = match parse_time(&request.time, correlation_id) {
        Ok(time) => time,
        Err(response) => return response,
    };
    let policy = match state.repository().work_schedule_policy(&request.policy_id) {
        Ok(policy) => policy,
        Err(err) => return engine_error(correlation_id, err),
    };

    let result = validate_clock_out(policy, time, request.date);
    info!(
        correlation_id = %correlation_id,
        policy_id = %request.policy_id,
        is_valid = result.is_valid,
        is_early_leave = result.is_early_leave,
        "Clock-out validated"
    );
    Json(result).into_response()
}

/// Handler for POST /overtime/calculate.
async fn overtime_handler(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let policy = match state.repository().overtime_policy(&request.policy_id) {
        Ok(policy) => policy,
        Err(err) => return engine_error(correlation_id, err),
    };

    match calculate_overtime(policy, request.hours, request.overtime_type, request.hourly_rate) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                policy_id = %request.policy_id,
                amount = %result.amount,
                "Overtime calculated"
            );
            Json(result).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /overtime/period.
async fn period_overtime_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodOvertimeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let policy = match state.repository().overtime_policy(&request.policy_id) {
        Ok(policy) => policy,
        Err(err) => return engine_error(correlation_id, err),
    };

    match calculate_period_overtime(policy, &request.records, request.hourly_rate) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                policy_id = %request.policy_id,
                records = request.records.len(),
                total_amount = %summary.total_amount,
                "Period overtime aggregated"
            );
            Json(summary).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /penalty/calculate.
async fn penalty_handler(
    State(state): State<AppState>,
    payload: Result<Json<PenaltyCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let policy = match state.repository().penalty_policy(&request.policy_id) {
        Ok(policy) => policy,
        Err(err) => return engine_error(correlation_id, err),
    };

    match calculate_penalty(policy, &request.violation) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                policy_id = %request.policy_id,
                amount = %result.amount,
                should_apply = result.should_apply,
                "Penalty calculated"
            );
            Json(result).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /holidays/check.
async fn holiday_check_handler(
    State(state): State<AppState>,
    payload: Result<Json<HolidayCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = state.calendar().is_holiday(
        request.date,
        request.location.as_deref(),
        request.region.as_deref(),
        request.department.as_deref(),
    );
    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        is_holiday = result.is_holiday,
        "Holiday checked"
    );
    Json(result).into_response()
}

/// Handler for POST /holidays/working-days.
async fn working_days_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkingDaysRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = state.calendar().calculate_working_days(
        request.start_date,
        request.end_date,
        request.include_weekends,
        request.location.as_deref(),
        request.region.as_deref(),
        request.department.as_deref(),
    );
    info!(
        correlation_id = %correlation_id,
        start = %request.start_date,
        end = %request.end_date,
        working_days = result.working_days,
        "Working days aggregated"
    );
    Json(result).into_response()
}

/// Handler for POST /shifts/current.
async fn current_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<CurrentShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.scheduler().current_shift(&request.employee_id, request.date) {
        Ok(info) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                date = %request.date,
                has_shift = info.is_some(),
                "Shift resolved"
            );
            Json(info).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /shifts/schedule.
async fn schedule_range_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRangeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state
        .scheduler()
        .get_schedule(&request.employee_id, request.start_date, request.end_date)
    {
        Ok(schedule) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                days = schedule.len(),
                "Schedule resolved"
            );
            Json(schedule).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /geofence/clock-in.
async fn geofence_clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeofenceCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result =
        state
            .geofence()
            .validate_clock_in(request.latitude, request.longitude, &request.context);
    info!(
        correlation_id = %correlation_id,
        is_within = result.is_within_geofence,
        "Geofence clock-in validated"
    );
    Json(result).into_response()
}

/// Handler for POST /geofence/clock-out.
async fn geofence_clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeofenceCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result =
        state
            .geofence()
            .validate_clock_out(request.latitude, request.longitude, &request.context);
    info!(
        correlation_id = %correlation_id,
        is_within = result.is_within_geofence,
        "Geofence clock-out validated"
    );
    Json(result).into_response()
}
