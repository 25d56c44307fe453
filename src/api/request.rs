//! Request types for the Attendance Policy Evaluation Engine API.
//!
//! One request struct per endpoint. Time-of-day fields arrive as `HH:mm`
//! strings and are parsed by the handlers so malformed values surface as
//! validation errors, not deserialization failures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::evaluation::{EmployeeContext, OvertimeRecord, PenaltyViolation};
use crate::models::OvertimeType;

/// Request body for clock-in/clock-out validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockEventRequest {
    /// The work schedule policy to validate against.
    pub policy_id: String,
    /// The clock reading as `HH:mm`.
    pub time: String,
    /// The calendar date of the event.
    pub date: NaiveDate,
}

/// Request body for a single overtime calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeCalculationRequest {
    /// The overtime policy to apply.
    pub policy_id: String,
    /// Overtime hours worked, before rounding.
    pub hours: Decimal,
    /// The overtime category.
    pub overtime_type: OvertimeType,
    /// The employee's base hourly rate.
    pub hourly_rate: Decimal,
}

/// Request body for period overtime aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodOvertimeRequest {
    /// The overtime policy to apply.
    pub policy_id: String,
    /// The overtime records in the period.
    pub records: Vec<OvertimeRecord>,
    /// The employee's base hourly rate.
    pub hourly_rate: Decimal,
}

/// Request body for a penalty calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyCalculationRequest {
    /// The penalty policy to apply.
    pub policy_id: String,
    /// The violation to price.
    pub violation: PenaltyViolation,
}

/// Request body for a holiday check.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayCheckRequest {
    /// The date to check.
    pub date: NaiveDate,
    /// The employee's location, if any.
    #[serde(default)]
    pub location: Option<String>,
    /// The employee's region, if any.
    #[serde(default)]
    pub region: Option<String>,
    /// The employee's department, if any.
    #[serde(default)]
    pub department: Option<String>,
}

/// Request body for working-day aggregation over a range.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkingDaysRequest {
    /// First date of the range, inclusive.
    pub start_date: NaiveDate,
    /// Last date of the range, inclusive.
    pub end_date: NaiveDate,
    /// Whether weekend days count toward working days and holidays.
    #[serde(default)]
    pub include_weekends: bool,
    /// The employee's location, if any.
    #[serde(default)]
    pub location: Option<String>,
    /// The employee's region, if any.
    #[serde(default)]
    pub region: Option<String>,
    /// The employee's department, if any.
    #[serde(default)]
    pub department: Option<String>,
}

/// Request body for resolving an employee's shift on a date.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentShiftRequest {
    /// The employee to resolve.
    pub employee_id: String,
    /// The date to resolve.
    pub date: NaiveDate,
}

/// Request body for resolving an employee's schedule over a range.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRangeRequest {
    /// The employee to resolve.
    pub employee_id: String,
    /// First date of the range, inclusive.
    pub start_date: NaiveDate,
    /// Last date of the range, inclusive.
    pub end_date: NaiveDate,
}

/// Request body for geofence validation of a clock event.
#[derive(Debug, Clone, Deserialize)]
pub struct GeofenceCheckRequest {
    /// Latitude of the attendance event, in degrees.
    pub latitude: f64,
    /// Longitude of the attendance event, in degrees.
    pub longitude: f64,
    /// Employee attributes the geofence allow-lists filter on.
    #[serde(default)]
    pub context: EmployeeContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_event_request_deserializes() {
        let json = r#"{"policy_id": "ws_standard", "time": "09:20", "date": "2026-01-14"}"#;
        let request: ClockEventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.policy_id, "ws_standard");
        assert_eq!(request.time, "09:20");
    }

    #[test]
    fn test_geofence_request_defaults_context() {
        let json = r#"{"latitude": -33.8688, "longitude": 151.2093}"#;
        let request: GeofenceCheckRequest = serde_json::from_str(json).unwrap();
        assert!(request.context.department.is_none());
        assert!(request.context.employment_type.is_none());
    }

    #[test]
    fn test_working_days_request_defaults() {
        let json = r#"{"start_date": "2026-01-12", "end_date": "2026-01-18"}"#;
        let request: WorkingDaysRequest = serde_json::from_str(json).unwrap();
        assert!(!request.include_weekends);
        assert!(request.location.is_none());
    }
}
