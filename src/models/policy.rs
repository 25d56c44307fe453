//! Policy record types.
//!
//! These structs are the immutable configuration snapshots supplied to the
//! evaluators: work schedules, overtime rules, penalty rules, public
//! holidays, and geofences. They are validated at the repository boundary,
//! so the evaluators can assume well-formed input.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time::TimeOfDay;

/// A flexible clock-in window attached to a work schedule.
///
/// When enabled, a clock-in that misses the grace period but falls within
/// `[earliest_start, latest_start]` is still accepted as on time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleTimeWindow {
    /// The earliest accepted clock-in time.
    pub earliest_start: TimeOfDay,
    /// The latest accepted clock-in time.
    pub latest_start: TimeOfDay,
}

/// A work schedule policy: standard hours, thresholds, and grace periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSchedulePolicy {
    /// Unique identifier for the policy.
    pub id: String,
    /// Human-readable policy name.
    pub name: String,
    /// Working weekday indices, 0 = Sunday through 6 = Saturday.
    pub work_days: Vec<u32>,
    /// The scheduled start of the working day.
    pub standard_start_time: TimeOfDay,
    /// The scheduled end of the working day.
    pub standard_end_time: TimeOfDay,
    /// Unpaid break duration within the working day, in minutes.
    pub break_duration_minutes: u32,
    /// Minutes past the standard start after which a clock-in is late.
    pub late_threshold_minutes: u32,
    /// Minutes before the standard end after which a clock-out is an early leave.
    pub early_leave_threshold_minutes: u32,
    /// Tolerance around the scheduled time within which no violation is recorded.
    pub grace_period_minutes: u32,
    /// Optional flexible clock-in window.
    #[serde(default)]
    pub flexible_time: Option<FlexibleTimeWindow>,
    /// Minutes past the standard end before time counts toward overtime.
    #[serde(default)]
    pub overtime_after_minutes: u32,
}

/// The category of overtime being worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeType {
    /// Overtime on a regular working weekday.
    Weekday,
    /// Overtime on a weekend day.
    Weekend,
    /// Overtime on a public holiday.
    Holiday,
    /// Overtime outside scheduled hours on a working day.
    AfterHours,
}

impl fmt::Display for OvertimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OvertimeType::Weekday => "weekday",
            OvertimeType::Weekend => "weekend",
            OvertimeType::Holiday => "holiday",
            OvertimeType::AfterHours => "after_hours",
        };
        write!(f, "{}", label)
    }
}

/// A single overtime rule within an [`OvertimePolicy`].
///
/// At most one rule per [`OvertimeType`] is consulted per calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRule {
    /// The overtime type this rule covers.
    pub overtime_type: OvertimeType,
    /// Pay rate multiplier applied to the hourly rate.
    pub rate: Decimal,
    /// Hours below this minimum zero out entirely.
    #[serde(default)]
    pub min_hours: Option<Decimal>,
    /// Daily cap on payable overtime hours.
    #[serde(default)]
    pub max_hours_per_day: Option<Decimal>,
    /// Weekly cap on payable overtime hours.
    #[serde(default)]
    pub max_hours_per_week: Option<Decimal>,
    /// Monthly cap on payable overtime hours.
    #[serde(default)]
    pub max_hours_per_month: Option<Decimal>,
    /// Overtime minutes are floored to the nearest multiple of this value.
    #[serde(default)]
    pub rounding_minutes: Option<u32>,
}

/// An overtime policy: the rule list plus approval settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Unique identifier for the policy.
    pub id: String,
    /// Human-readable policy name.
    pub name: String,
    /// The overtime rules, at most one per type.
    pub rules: Vec<OvertimeRule>,
    /// Whether overtime above the approval threshold requires approval.
    #[serde(default)]
    pub requires_approval: bool,
    /// Raw hours above this threshold require approval.
    #[serde(default)]
    pub approval_threshold_hours: Decimal,
}

impl OvertimePolicy {
    /// Returns the rule covering the given overtime type, if configured.
    pub fn rule_for(&self, overtime_type: OvertimeType) -> Option<&OvertimeRule> {
        self.rules.iter().find(|r| r.overtime_type == overtime_type)
    }
}

/// The kind of attendance violation a penalty policy covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyType {
    /// Late clock-in.
    Late,
    /// Full-day absence.
    Absence,
    /// Early clock-out.
    EarlyLeave,
    /// Missing clock-in record.
    NoClockIn,
    /// Missing clock-out record.
    NoClockOut,
    /// General policy violation.
    Violation,
}

impl fmt::Display for PenaltyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PenaltyType::Late => "late",
            PenaltyType::Absence => "absence",
            PenaltyType::EarlyLeave => "early_leave",
            PenaltyType::NoClockIn => "no_clock_in",
            PenaltyType::NoClockOut => "no_clock_out",
            PenaltyType::Violation => "violation",
        };
        write!(f, "{}", label)
    }
}

/// How a penalty amount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyCalculationType {
    /// A fixed amount per violation.
    Fixed,
    /// A percentage of the monthly salary.
    Percentage,
    /// Minutes late converted to hours, times the hourly rate and multiplier.
    HourlyRate,
    /// The daily rate times the multiplier.
    DailyRate,
    /// Tiered by occurrence count via [`ProgressivePenaltyRule`]s.
    Progressive,
}

/// One tier of a progressive penalty.
///
/// The tier covers occurrence counts in the inclusive range
/// `[from_occurrence, to_occurrence]`; an absent `to_occurrence` means the
/// tier covers every occurrence from `from_occurrence` onward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressivePenaltyRule {
    /// First occurrence count covered by this tier.
    pub from_occurrence: u32,
    /// Last occurrence count covered, or unbounded when absent.
    #[serde(default)]
    pub to_occurrence: Option<u32>,
    /// Fixed penalty amount for this tier.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Penalty as a percentage of monthly salary for this tier.
    #[serde(default)]
    pub percentage: Option<Decimal>,
}

/// A penalty policy for one violation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyPolicy {
    /// Unique identifier for the policy.
    pub id: String,
    /// Human-readable policy name.
    pub name: String,
    /// The violation type this policy covers.
    pub penalty_type: PenaltyType,
    /// How the penalty amount is computed.
    pub calculation_type: PenaltyCalculationType,
    /// Fixed amount, for [`PenaltyCalculationType::Fixed`].
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Percentage of monthly salary, for [`PenaltyCalculationType::Percentage`].
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Multiplier applied by the hourly-rate and daily-rate modes.
    #[serde(default = "default_multiplier")]
    pub multiplier: Decimal,
    /// Minutes below this threshold attract no penalty.
    #[serde(default)]
    pub threshold_minutes: Option<u32>,
    /// Minutes of lateness tolerated with no penalty.
    #[serde(default)]
    pub grace_period_minutes: u32,
    /// Occurrences tolerated with no penalty.
    #[serde(default)]
    pub grace_occurrences: u32,
    /// Ordered tiers for [`PenaltyCalculationType::Progressive`],
    /// ascending by `from_occurrence`.
    #[serde(default)]
    pub progressive_rules: Vec<ProgressivePenaltyRule>,
    /// Monthly cap on the penalty amount.
    #[serde(default)]
    pub max_penalty_per_month: Option<Decimal>,
    /// Monthly cap on penalized occurrences.
    #[serde(default)]
    pub max_occurrences_per_month: Option<u32>,
    /// Employment types this policy applies to; empty = unrestricted.
    #[serde(default)]
    pub applicable_employment_types: Vec<String>,
    /// Positions this policy applies to; empty = unrestricted.
    #[serde(default)]
    pub applicable_positions: Vec<String>,
    /// Departments this policy applies to; empty = unrestricted.
    #[serde(default)]
    pub applicable_departments: Vec<String>,
}

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

/// The category of a public holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayType {
    /// A nationwide public holiday.
    National,
    /// A regional or state holiday.
    Regional,
    /// A company-declared holiday.
    Company,
    /// A religious observance.
    Religious,
}

/// Whether employees work on a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayWorkPolicy {
    /// The workplace is closed; no attendance expected.
    Closed,
    /// Working is optional; attendance is voluntary.
    Optional,
    /// Working is required; the holiday overtime rate applies.
    Required,
}

/// A public holiday entry in the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// Unique identifier for the holiday entry.
    pub id: String,
    /// Human-readable holiday name.
    pub name: String,
    /// The holiday date, normalized to local midnight.
    pub date: NaiveDate,
    /// The holiday category.
    pub holiday_type: HolidayType,
    /// Whether employees work on this holiday.
    pub work_policy: HolidayWorkPolicy,
    /// Overtime rate multiplier for hours worked on this holiday.
    pub overtime_rate: Decimal,
    /// Locations this holiday applies to; empty = everywhere.
    #[serde(default)]
    pub locations: Vec<String>,
    /// Regions this holiday applies to; empty = everywhere.
    #[serde(default)]
    pub regions: Vec<String>,
    /// Departments this holiday applies to; empty = everywhere.
    #[serde(default)]
    pub departments: Vec<String>,
}

impl PublicHoliday {
    /// Returns true if this holiday applies to the given location, region,
    /// and department. An empty applicability list places no restriction.
    pub fn applies_to(
        &self,
        location: Option<&str>,
        region: Option<&str>,
        department: Option<&str>,
    ) -> bool {
        list_allows(&self.locations, location)
            && list_allows(&self.regions, region)
            && list_allows(&self.departments, department)
    }
}

/// Returns true if the allow-list is empty or contains the given value.
///
/// A `None` value only passes an empty (unrestricted) list.
pub(crate) fn list_allows(list: &[String], value: Option<&str>) -> bool {
    if list.is_empty() {
        return true;
    }
    match value {
        Some(v) => list.iter().any(|item| item == v),
        None => false,
    }
}

/// A circular attendance perimeter with per-direction enforcement flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceConfig {
    /// Unique identifier for the geofence.
    pub id: String,
    /// Human-readable geofence name (e.g., the site name).
    pub name: String,
    /// Latitude of the perimeter center, in degrees.
    pub latitude: f64,
    /// Longitude of the perimeter center, in degrees.
    pub longitude: f64,
    /// Perimeter radius in meters.
    pub radius_meters: f64,
    /// Whether the perimeter is enforced for clock-in events.
    pub enforce_for_clock_in: bool,
    /// Whether the perimeter is enforced for clock-out events.
    pub enforce_for_clock_out: bool,
    /// Departments this geofence applies to; empty = all.
    #[serde(default)]
    pub departments: Vec<String>,
    /// Employment types this geofence applies to; empty = all.
    #[serde(default)]
    pub employment_types: Vec<String>,
}
