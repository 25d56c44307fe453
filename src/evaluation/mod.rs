//! The six policy evaluators.
//!
//! Each evaluator is a pure function (or a read-only view over a preloaded
//! snapshot) with no I/O, no shared mutable state, and no ordering
//! dependency between calls: evaluations for different employees or dates
//! can run concurrently without locking.

mod geofence;
mod holiday;
mod overtime;
mod penalty;
mod shift_schedule;
mod work_schedule;

pub use geofence::{haversine_distance, EmployeeContext, GeofenceValidator, EARTH_RADIUS_METERS};
pub use holiday::HolidayCalendar;
pub use overtime::{calculate_overtime, calculate_period_overtime, OvertimeRecord};
pub use penalty::{calculate_penalty, is_applicable, PenaltyViolation};
pub use shift_schedule::{calculate_gross_hours, ShiftScheduler};
pub use work_schedule::{validate_clock_in, validate_clock_out};
