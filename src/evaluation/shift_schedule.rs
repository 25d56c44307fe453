//! Shift resolution and schedule derivation.
//!
//! Resolves which shift applies to an employee on a date — including
//! rotating shifts — from a preloaded snapshot of shift definitions and
//! assignments, and derives gross/work hours for shift timings.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CurrentShiftInfo, DailySchedule, RotationPattern, Shift, ShiftAssignment, TimeOfDay,
};

/// Computes the gross span of a shift in hours.
///
/// When `end <= start` the shift is overnight and 24 hours are added to the
/// end before subtracting.
///
/// # Examples
///
/// ```
/// use attendance_engine::evaluation::calculate_gross_hours;
/// use rust_decimal::Decimal;
///
/// let overnight = calculate_gross_hours("22:00".parse().unwrap(), "06:00".parse().unwrap());
/// assert_eq!(overnight, Decimal::from(8));
///
/// let day = calculate_gross_hours("09:00".parse().unwrap(), "17:00".parse().unwrap());
/// assert_eq!(day, Decimal::from(8));
/// ```
pub fn calculate_gross_hours(start: TimeOfDay, end: TimeOfDay) -> Decimal {
    let start_minutes = i64::from(start.minutes());
    let mut end_minutes = i64::from(end.minutes());
    if end_minutes <= start_minutes {
        end_minutes += 24 * 60;
    }
    Decimal::from(end_minutes - start_minutes) / Decimal::from(60)
}

/// Resolves the shift code a rotation pattern lands on for a date.
///
/// `days_since_start mod cycle_days` gives the position within the cycle;
/// the sequence index is `floor(cycle_pos × len / cycle_days)`. The formula
/// is kept as-is even when `cycle_days` is not a multiple of the sequence
/// length, in which case some codes cover more days than others.
///
/// Dates before the rotation start resolve to nothing.
fn rotation_code(pattern: &RotationPattern, date: NaiveDate) -> Option<&str> {
    if pattern.sequence.is_empty() || pattern.cycle_days == 0 {
        return None;
    }
    if date < pattern.start_date {
        return None;
    }

    let days_since_start = (date - pattern.start_date).num_days();
    let cycle_days = i64::from(pattern.cycle_days);
    let cycle_pos = days_since_start % cycle_days;
    let len = i64::try_from(pattern.sequence.len()).ok()?;
    let index = usize::try_from(cycle_pos * len / cycle_days).ok()?;

    pattern.sequence.get(index).map(String::as_str)
}

/// A read-only shift resolver over preloaded shifts and assignments.
#[derive(Debug, Clone)]
pub struct ShiftScheduler {
    shifts_by_code: HashMap<String, Shift>,
    assignments: Vec<ShiftAssignment>,
}

impl ShiftScheduler {
    /// Creates a scheduler over the given shift and assignment snapshots.
    pub fn new(shifts: Vec<Shift>, assignments: Vec<ShiftAssignment>) -> Self {
        let shifts_by_code = shifts.into_iter().map(|s| (s.code.clone(), s)).collect();
        Self {
            shifts_by_code,
            assignments,
        }
    }

    /// Looks up a shift definition by code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShiftNotFound`] when no shift carries the code.
    pub fn shift_by_code(&self, code: &str) -> EngineResult<&Shift> {
        self.shifts_by_code
            .get(code)
            .ok_or_else(|| EngineError::ShiftNotFound {
                code: code.to_string(),
            })
    }

    /// Resolves the shift applying to an employee on a date.
    ///
    /// Selects the employee's assignment covering the date (within its date
    /// range, weekday listed), resolves rotational assignments through
    /// their rotation pattern, and requires the resolved shift definition
    /// itself to be live on the date (effective/expiry window plus
    /// `applicable_days`). Both the assignment check and the shift check
    /// must pass; otherwise the date has no shift — a normal `None`, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShiftNotFound`] when an assignment references
    /// a code with no shift definition.
    pub fn current_shift(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<CurrentShiftInfo>> {
        let assignment = self
            .assignments
            .iter()
            .find(|a| a.employee_id == employee_id && a.covers_date(date));

        let Some(assignment) = assignment else {
            return Ok(None);
        };

        let (code, resolved_by_rotation) = if assignment.is_rotational {
            match assignment.rotation.as_ref().and_then(|p| rotation_code(p, date)) {
                Some(code) => (code.to_string(), true),
                None => return Ok(None),
            }
        } else {
            (assignment.shift_code.clone(), false)
        };

        let shift = self.shift_by_code(&code)?;
        if !shift.is_active_on_date(date) {
            return Ok(None);
        }

        Ok(Some(CurrentShiftInfo {
            shift: shift.clone(),
            assignment_id: assignment.id.clone(),
            shift_code: code,
            resolved_by_rotation,
        }))
    }

    /// Resolves the employee's schedule for every day in `[start, end]`.
    ///
    /// A plain sequential day loop over [`Self::current_shift`]; days with
    /// no applicable shift carry `None`.
    pub fn get_schedule(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<DailySchedule>> {
        let mut schedule = Vec::new();
        let mut date = start;
        while date <= end {
            schedule.push(DailySchedule {
                date,
                shift: self.current_shift(employee_id, date)?,
            });
            date = date + Days::new(1);
        }
        Ok(schedule)
    }
}
