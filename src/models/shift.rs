//! Shift and shift-assignment record types.
//!
//! A [`Shift`] describes a named block of working time (possibly spanning
//! midnight); a [`ShiftAssignment`] binds an employee to a shift, optionally
//! through a repeating [`RotationPattern`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time::{day_index, TimeOfDay};

/// A scheduled break within a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftBreak {
    /// Human-readable break name (e.g., "lunch").
    pub name: String,
    /// When the break starts.
    pub start_time: TimeOfDay,
    /// Break length in minutes.
    pub duration_minutes: u32,
}

/// A shift definition: timing, breaks, rates, and its active window.
///
/// An overnight shift is one where `end_time <= start_time`; its duration is
/// computed by adding 24 hours to the end before subtracting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// Short code used by assignments and rotation sequences.
    pub code: String,
    /// Human-readable shift name.
    pub name: String,
    /// When the shift starts.
    pub start_time: TimeOfDay,
    /// When the shift ends. May be at or before `start_time` for overnight shifts.
    pub end_time: TimeOfDay,
    /// Scheduled breaks, in order of occurrence.
    #[serde(default)]
    pub breaks: Vec<ShiftBreak>,
    /// Total span of the shift in hours, including breaks.
    pub gross_hours: Decimal,
    /// Payable hours: `gross_hours` minus total break minutes / 60.
    pub work_hours: Decimal,
    /// Rate multiplier for hours worked on this shift.
    #[serde(default = "default_premium_rate")]
    pub premium_rate: Decimal,
    /// Weekday indices this shift runs on, 0 = Sunday through 6 = Saturday.
    pub applicable_days: Vec<u32>,
    /// First date the shift definition is active.
    pub effective_date: NaiveDate,
    /// Last date the shift definition is active; open-ended when absent.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

fn default_premium_rate() -> Decimal {
    Decimal::ONE
}

impl Shift {
    /// Returns true if this shift crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Total break minutes across all scheduled breaks.
    pub fn total_break_minutes(&self) -> u32 {
        self.breaks.iter().map(|b| b.duration_minutes).sum()
    }

    /// Recomputes payable hours from gross hours and the break list.
    ///
    /// The stored `work_hours` field is expected to equal this value; the
    /// repository boundary validates that invariant.
    pub fn derived_work_hours(&self) -> Decimal {
        self.gross_hours - Decimal::from(self.total_break_minutes()) / Decimal::from(60)
    }

    /// Returns true if the shift definition itself is live on the date:
    /// within the effective/expiry window and listed under `applicable_days`.
    pub fn is_active_on_date(&self, date: NaiveDate) -> bool {
        if date < self.effective_date {
            return false;
        }
        if let Some(expiry) = self.expiry_date {
            if date > expiry {
                return false;
            }
        }
        self.applicable_days.contains(&day_index(date))
    }
}

/// A repeating sequence of shift codes applied cyclically from a start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationPattern {
    /// Ordered shift codes cycled through.
    pub sequence: Vec<String>,
    /// Length of one full cycle in days.
    pub cycle_days: u32,
    /// The date the rotation starts; day 0 of the cycle.
    pub start_date: NaiveDate,
}

/// Binds an employee to a shift over a date range.
///
/// Two active assignments for the same employee must not have overlapping
/// date intervals; the repository boundary enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The assigned employee.
    pub employee_id: String,
    /// The assigned shift code. For rotational assignments this is the
    /// fallback code; the rotation pattern resolves the effective one.
    pub shift_code: String,
    /// First date the assignment is active.
    pub start_date: NaiveDate,
    /// Last date the assignment is active; open-ended when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Weekday indices the assignment covers, 0 = Sunday through 6 = Saturday.
    pub work_days: Vec<u32>,
    /// Whether this is a permanent assignment.
    #[serde(default)]
    pub is_permanent: bool,
    /// Whether the effective shift is resolved through a rotation pattern.
    #[serde(default)]
    pub is_rotational: bool,
    /// The rotation pattern, required when `is_rotational` is set.
    #[serde(default)]
    pub rotation: Option<RotationPattern>,
}

impl ShiftAssignment {
    /// Returns true if the assignment covers the date: the date lies within
    /// `[start_date, end_date]` and its weekday is listed in `work_days`.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        self.work_days.contains(&day_index(date))
    }
}
