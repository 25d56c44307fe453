//! HTTP API module for the Attendance Policy Evaluation Engine.
//!
//! This module provides the REST endpoints that expose each evaluator over
//! HTTP. The evaluators themselves stay pure; all request decoding, policy
//! lookup, and logging happens here.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockEventRequest, CurrentShiftRequest, GeofenceCheckRequest, HolidayCheckRequest,
    OvertimeCalculationRequest, PenaltyCalculationRequest, PeriodOvertimeRequest,
    ScheduleRangeRequest, WorkingDaysRequest,
};
pub use response::ApiError;
pub use state::AppState;
