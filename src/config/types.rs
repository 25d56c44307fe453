//! Configuration file structures.
//!
//! Each struct maps one YAML file in a snapshot directory onto the typed
//! policy records in [`crate::models`].

use serde::Deserialize;

use crate::models::{
    GeofenceConfig, OvertimePolicy, PenaltyPolicy, PublicHoliday, Shift, ShiftAssignment,
    WorkSchedulePolicy,
};

/// Structure of `policies.yaml`: the three policy families.
#[derive(Debug, Clone, Deserialize)]
pub struct PoliciesFile {
    /// Work schedule policies.
    #[serde(default)]
    pub work_schedules: Vec<WorkSchedulePolicy>,
    /// Overtime policies.
    #[serde(default)]
    pub overtime_policies: Vec<OvertimePolicy>,
    /// Penalty policies.
    #[serde(default)]
    pub penalty_policies: Vec<PenaltyPolicy>,
}

/// Structure of `shifts.yaml`: shift definitions and assignments.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsFile {
    /// Shift definitions.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Shift assignments.
    #[serde(default)]
    pub assignments: Vec<ShiftAssignment>,
}

/// Structure of `holidays.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// Public holiday entries.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
}

/// Structure of `geofences.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeofencesFile {
    /// Geofence configurations.
    #[serde(default)]
    pub geofences: Vec<GeofenceConfig>,
}
