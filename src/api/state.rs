//! Application state for the Attendance Policy Evaluation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::evaluation::{GeofenceValidator, HolidayCalendar, ShiftScheduler};
use crate::repository::{PolicyRepository, SnapshotRepository};

/// Shared application state.
///
/// Holds the validated policy repository plus the snapshot views built from
/// it once at startup (the per-batch load from the engine's contract).
/// Everything here is immutable, so handlers need no locking.
#[derive(Clone)]
pub struct AppState {
    repository: Arc<SnapshotRepository>,
    calendar: Arc<HolidayCalendar>,
    scheduler: Arc<ShiftScheduler>,
    geofence: Arc<GeofenceValidator>,
}

impl AppState {
    /// Creates a new application state over the given repository, building
    /// the holiday, shift, and geofence views from its snapshot.
    pub fn new(repository: SnapshotRepository) -> Self {
        let calendar = HolidayCalendar::new(repository.holidays().to_vec());
        let scheduler =
            ShiftScheduler::new(repository.shifts().to_vec(), repository.assignments().to_vec());
        let geofence = GeofenceValidator::new(repository.geofences().to_vec());

        Self {
            repository: Arc::new(repository),
            calendar: Arc::new(calendar),
            scheduler: Arc::new(scheduler),
            geofence: Arc::new(geofence),
        }
    }

    /// Returns a reference to the policy repository.
    pub fn repository(&self) -> &SnapshotRepository {
        &self.repository
    }

    /// Returns the holiday calendar view.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Returns the shift scheduler view.
    pub fn scheduler(&self) -> &ShiftScheduler {
        &self.scheduler
    }

    /// Returns the geofence validator view.
    pub fn geofence(&self) -> &GeofenceValidator {
        &self.geofence
    }
}
