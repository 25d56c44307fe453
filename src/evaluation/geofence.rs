//! Geofence validation.
//!
//! Computes geodesic distance from an attendance coordinate to the
//! configured perimeters and decides whether the event occurred at an
//! approved location. Missing configuration fails open: with no applicable
//! geofence, validation always passes.

use serde::{Deserialize, Serialize};

use crate::models::{list_allows, GeofenceConfig, GeofenceValidation};

/// Mean Earth radius in meters, used by the Haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters (Haversine).
///
/// # Examples
///
/// ```
/// use attendance_engine::evaluation::haversine_distance;
///
/// let d = haversine_distance(-33.8688, 151.2093, -33.8688, 151.2093);
/// assert_eq!(d, 0.0);
/// ```
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// The employee attributes a geofence's allow-lists filter on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeContext {
    /// The employee's department.
    #[serde(default)]
    pub department: Option<String>,
    /// The employee's employment type.
    #[serde(default)]
    pub employment_type: Option<String>,
}

/// The direction of a clock event, selecting which enforcement flag applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockDirection {
    In,
    Out,
}

/// A read-only geofence validator over a preloaded configuration snapshot.
#[derive(Debug, Clone)]
pub struct GeofenceValidator {
    geofences: Vec<GeofenceConfig>,
}

impl GeofenceValidator {
    /// Creates a validator over the given geofence snapshot.
    pub fn new(geofences: Vec<GeofenceConfig>) -> Self {
        Self { geofences }
    }

    /// Validates a coordinate against the geofences applicable to the
    /// employee, ignoring enforcement flags.
    ///
    /// The nearest applicable center wins; the point passes when its
    /// distance is within that geofence's radius. Zero applicable geofences
    /// pass with a distinct "no geofence configured" message.
    pub fn validate(
        &self,
        latitude: f64,
        longitude: f64,
        context: &EmployeeContext,
    ) -> GeofenceValidation {
        self.validate_direction(latitude, longitude, context, None)
    }

    /// Validates a clock-in coordinate, honoring `enforce_for_clock_in`.
    ///
    /// When the nearest geofence does not enforce clock-ins, the result is
    /// forced to pass while still reporting the measured distance.
    pub fn validate_clock_in(
        &self,
        latitude: f64,
        longitude: f64,
        context: &EmployeeContext,
    ) -> GeofenceValidation {
        self.validate_direction(latitude, longitude, context, Some(ClockDirection::In))
    }

    /// Validates a clock-out coordinate, honoring `enforce_for_clock_out`.
    pub fn validate_clock_out(
        &self,
        latitude: f64,
        longitude: f64,
        context: &EmployeeContext,
    ) -> GeofenceValidation {
        self.validate_direction(latitude, longitude, context, Some(ClockDirection::Out))
    }

    fn validate_direction(
        &self,
        latitude: f64,
        longitude: f64,
        context: &EmployeeContext,
        direction: Option<ClockDirection>,
    ) -> GeofenceValidation {
        let candidates: Vec<(&GeofenceConfig, f64)> = self
            .geofences
            .iter()
            .filter(|g| {
                list_allows(&g.departments, context.department.as_deref())
                    && list_allows(&g.employment_types, context.employment_type.as_deref())
            })
            .map(|g| {
                let distance = haversine_distance(latitude, longitude, g.latitude, g.longitude);
                (g, distance)
            })
            .collect();

        let nearest = candidates
            .into_iter()
            .min_by(|(_, a), (_, b)| a.total_cmp(b));

        let Some((geofence, distance)) = nearest else {
            return GeofenceValidation {
                is_within_geofence: true,
                distance_meters: None,
                geofence_id: None,
                message: "No geofence configured".to_string(),
            };
        };

        let enforced = match direction {
            Some(ClockDirection::In) => geofence.enforce_for_clock_in,
            Some(ClockDirection::Out) => geofence.enforce_for_clock_out,
            None => true,
        };

        let within_radius = distance <= geofence.radius_meters;
        let (is_within_geofence, message) = if !enforced {
            (
                true,
                format!("Geofence '{}' not enforced for this event", geofence.name),
            )
        } else if within_radius {
            (
                true,
                format!("Within geofence '{}'", geofence.name),
            )
        } else {
            (
                false,
                format!(
                    "Outside geofence '{}' by {:.0} meters",
                    geofence.name,
                    distance - geofence.radius_meters
                ),
            )
        };

        GeofenceValidation {
            is_within_geofence,
            distance_meters: Some(distance),
            geofence_id: Some(geofence.id.clone()),
            message,
        }
    }
}
