//! Result types returned by the evaluators.
//!
//! All of these are pure value objects: the engine computes them and returns
//! them to the caller; it never persists them.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::policy::{HolidayWorkPolicy, OvertimeType, PenaltyType, PublicHoliday};
use super::shift::Shift;

/// The outcome of validating a clock-in or clock-out against a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeValidationResult {
    /// Whether the clock event is accepted at all (false on non-working days).
    pub is_valid: bool,
    /// Whether the clock-in was late past the late threshold.
    pub is_late: bool,
    /// Whether the clock-out was an early leave past the threshold.
    pub is_early_leave: bool,
    /// Minutes late, zero when on time or within grace.
    pub minutes_late: i64,
    /// Minutes left early, zero when on time or within grace.
    pub minutes_early: i64,
    /// Minutes worked past the scheduled end; informational, not a violation.
    pub overtime_minutes: i64,
    /// Human-readable explanation of the outcome.
    pub message: String,
}

impl TimeValidationResult {
    /// An accepted, violation-free result with the given message.
    pub(crate) fn accepted(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            is_late: false,
            is_early_leave: false,
            minutes_late: 0,
            minutes_early: 0,
            overtime_minutes: 0,
            message: message.into(),
        }
    }

    /// A rejected result with the given message.
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            is_late: false,
            is_early_leave: false,
            minutes_late: 0,
            minutes_early: 0,
            overtime_minutes: 0,
            message: message.into(),
        }
    }
}

/// The outcome of a single overtime calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeCalculationResult {
    /// The overtime type that was calculated.
    pub overtime_type: OvertimeType,
    /// Hours as supplied, before rounding and clamping.
    pub raw_hours: Decimal,
    /// Payable hours after rounding, minimum, and daily cap.
    pub effective_hours: Decimal,
    /// The base hourly rate used.
    pub hourly_rate: Decimal,
    /// The rule's rate multiplier.
    pub rate_multiplier: Decimal,
    /// Payable amount, rounded to 2 decimal places.
    pub amount: Decimal,
    /// True when hours were clamped to the daily cap.
    pub exceeds_limit: bool,
    /// True when the policy requires approval and raw hours exceed the threshold.
    pub requires_approval: bool,
}

/// Per-type totals within a [`PeriodOvertimeSummary`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OvertimeTypeTotal {
    /// Total payable hours of this type in the period.
    pub hours: Decimal,
    /// Total payable amount of this type in the period.
    pub amount: Decimal,
}

/// Aggregated overtime over a pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodOvertimeSummary {
    /// Totals broken down by overtime type.
    pub by_type: HashMap<OvertimeType, OvertimeTypeTotal>,
    /// Total payable hours across all types.
    pub total_hours: Decimal,
    /// Total payable amount across all types.
    pub total_amount: Decimal,
    /// Number of records in the period that require approval.
    pub records_requiring_approval: usize,
}

/// The outcome of a penalty calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyCalculationResult {
    /// The violation type the penalty covers.
    pub penalty_type: PenaltyType,
    /// Penalty amount, rounded to 2 decimal places.
    pub amount: Decimal,
    /// True when a non-zero penalty applies.
    pub should_apply: bool,
    /// False when the amount was clamped to the monthly cap.
    pub is_within_cap: bool,
    /// Human-readable explanation of the outcome.
    pub message: String,
}

/// The outcome of a holiday lookup for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayCheckResult {
    /// Whether the date is a holiday for the given context.
    pub is_holiday: bool,
    /// The holiday name, when one matched.
    pub name: Option<String>,
    /// The matched holiday's work policy.
    pub work_policy: Option<HolidayWorkPolicy>,
    /// The matched holiday's overtime rate multiplier.
    pub overtime_rate: Option<Decimal>,
}

impl HolidayCheckResult {
    /// The "not a holiday" result.
    pub(crate) fn not_holiday() -> Self {
        Self {
            is_holiday: false,
            name: None,
            work_policy: None,
            overtime_rate: None,
        }
    }

    /// Builds the positive result from a matched holiday record.
    pub(crate) fn from_holiday(holiday: &PublicHoliday) -> Self {
        Self {
            is_holiday: true,
            name: Some(holiday.name.clone()),
            work_policy: Some(holiday.work_policy),
            overtime_rate: Some(holiday.overtime_rate),
        }
    }
}

/// Day classification counts over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingDaysResult {
    /// Total days in the range, inclusive of both ends.
    pub total_days: u32,
    /// Days counted as working days.
    pub working_days: u32,
    /// Days falling on a weekend.
    pub weekend_days: u32,
    /// Days counted as holidays.
    pub holidays: u32,
    /// The holiday dates encountered, in range order.
    pub holiday_dates: Vec<NaiveDate>,
}

/// The shift resolved for an employee on a specific date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentShiftInfo {
    /// The resolved shift definition.
    pub shift: Shift,
    /// The assignment that produced the resolution.
    pub assignment_id: String,
    /// The effective shift code (rotation-resolved for rotational assignments).
    pub shift_code: String,
    /// True when the code was resolved through a rotation pattern.
    pub resolved_by_rotation: bool,
}

/// One day of an employee's schedule over a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySchedule {
    /// The calendar date.
    pub date: NaiveDate,
    /// The shift resolved for the date, if any applies.
    pub shift: Option<CurrentShiftInfo>,
}

/// The outcome of validating a coordinate against the configured geofences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceValidation {
    /// Whether the point is accepted (inside the perimeter, unenforced, or
    /// no geofence configured).
    pub is_within_geofence: bool,
    /// Measured distance to the nearest applicable geofence center, in
    /// meters. Absent when no geofence applies.
    pub distance_meters: Option<f64>,
    /// The id of the nearest applicable geofence, when one exists.
    pub geofence_id: Option<String>,
    /// Human-readable explanation of the outcome.
    pub message: String,
}
