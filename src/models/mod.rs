//! Data model for the Attendance Policy Evaluation Engine.
//!
//! This module contains the typed value objects supplied to the engine
//! (policies, holidays, shifts, assignments, geofences) and the pure result
//! types it returns. All policy records are immutable configuration
//! snapshots; the engine never creates, updates, or deletes them.

mod policy;
mod results;
mod shift;
mod time;

pub(crate) use policy::list_allows;
pub use policy::{
    FlexibleTimeWindow, GeofenceConfig, HolidayType, HolidayWorkPolicy, OvertimePolicy,
    OvertimeRule, OvertimeType, PenaltyCalculationType, PenaltyPolicy, PenaltyType,
    ProgressivePenaltyRule, PublicHoliday, WorkSchedulePolicy,
};
pub use results::{
    CurrentShiftInfo, DailySchedule, GeofenceValidation, HolidayCheckResult,
    OvertimeCalculationResult, OvertimeTypeTotal, PenaltyCalculationResult,
    PeriodOvertimeSummary, TimeValidationResult, WorkingDaysResult,
};
pub use shift::{RotationPattern, Shift, ShiftAssignment, ShiftBreak};
pub use time::{day_index, TimeOfDay};
