//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a policy
//! snapshot from YAML files and admitting it through the repository
//! boundary.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::repository::{PolicySnapshot, SnapshotRepository};

use super::types::{GeofencesFile, HolidaysFile, PoliciesFile, ShiftsFile};

/// Loads a policy snapshot from a directory of YAML files.
///
/// # Directory Structure
///
/// The snapshot directory should have the following structure:
/// ```text
/// config/default/
/// ├── policies.yaml   # Work schedule, overtime, and penalty policies
/// ├── shifts.yaml     # Shift definitions and assignments
/// ├── holidays.yaml   # Public holiday calendar
/// └── geofences.yaml  # Attendance perimeters
/// ```
///
/// The directory is an explicit required parameter; there is no default
/// path or fallback snapshot.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let repository = loader.into_repository().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    snapshot: PolicySnapshot,
}

impl ConfigLoader {
    /// Loads a snapshot from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when a required file is
    /// missing and [`EngineError::ConfigParseError`] when a file contains
    /// invalid YAML or fails field validation at parse time.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policies: PoliciesFile = Self::load_yaml(&path.join("policies.yaml"))?;
        let shifts: ShiftsFile = Self::load_yaml(&path.join("shifts.yaml"))?;
        let holidays: HolidaysFile = Self::load_yaml(&path.join("holidays.yaml"))?;
        let geofences: GeofencesFile = Self::load_yaml(&path.join("geofences.yaml"))?;

        Ok(Self {
            snapshot: PolicySnapshot {
                work_schedules: policies.work_schedules,
                overtime_policies: policies.overtime_policies,
                penalty_policies: policies.penalty_policies,
                shifts: shifts.shifts,
                assignments: shifts.assignments,
                holidays: holidays.holidays,
                geofences: geofences.geofences,
            },
        })
    }

    /// Returns the loaded snapshot.
    pub fn snapshot(&self) -> &PolicySnapshot {
        &self.snapshot
    }

    /// Admits the snapshot through the repository boundary, running the
    /// data-model invariant checks.
    pub fn into_repository(self) -> EngineResult<SnapshotRepository> {
        SnapshotRepository::new(self.snapshot)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_directory_fails() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(matches!(
            result.unwrap_err(),
            EngineError::ConfigNotFound { .. }
        ));
    }

    #[test]
    fn test_load_default_snapshot() {
        let loader = ConfigLoader::load("./config/default").unwrap();
        let snapshot = loader.snapshot();

        assert!(!snapshot.work_schedules.is_empty());
        assert!(!snapshot.overtime_policies.is_empty());
        assert!(!snapshot.penalty_policies.is_empty());
        assert!(!snapshot.shifts.is_empty());
        assert!(!snapshot.holidays.is_empty());
        assert!(!snapshot.geofences.is_empty());
    }

    #[test]
    fn test_default_snapshot_passes_boundary_validation() {
        let loader = ConfigLoader::load("./config/default").unwrap();
        assert!(loader.into_repository().is_ok());
    }

    #[test]
    fn test_default_snapshot_policies_resolve() {
        use crate::repository::PolicyRepository;

        let repository = ConfigLoader::load("./config/default")
            .unwrap()
            .into_repository()
            .unwrap();

        assert!(repository.work_schedule_policy("ws_standard").is_ok());
        assert!(repository.overtime_policy("ot_standard").is_ok());
        assert!(repository.penalty_policy("pen_late").is_ok());
    }
}
