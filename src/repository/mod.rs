//! The policy repository boundary.
//!
//! The evaluators depend on a single abstract [`PolicyRepository`] interface
//! with typed lookup methods, never on a specific store. Records are
//! validated once, here, when a snapshot is admitted — so the evaluators can
//! assume well-formed input and never re-validate.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    GeofenceConfig, OvertimePolicy, PenaltyPolicy, PublicHoliday, Shift, ShiftAssignment,
    WorkSchedulePolicy,
};

/// Read-only, typed lookup of policy and calendar records.
///
/// Lookups by id return [`EngineError::PolicyNotFound`] /
/// [`EngineError::ShiftNotFound`] when the id does not resolve; the engine
/// never substitutes defaults.
pub trait PolicyRepository {
    /// Looks up a work schedule policy by id.
    fn work_schedule_policy(&self, id: &str) -> EngineResult<&WorkSchedulePolicy>;
    /// Looks up an overtime policy by id.
    fn overtime_policy(&self, id: &str) -> EngineResult<&OvertimePolicy>;
    /// Looks up a penalty policy by id.
    fn penalty_policy(&self, id: &str) -> EngineResult<&PenaltyPolicy>;
    /// All shift definitions in the snapshot.
    fn shifts(&self) -> &[Shift];
    /// All shift assignments in the snapshot.
    fn assignments(&self) -> &[ShiftAssignment];
    /// All public holidays in the snapshot.
    fn holidays(&self) -> &[PublicHoliday];
    /// All geofence configurations in the snapshot.
    fn geofences(&self) -> &[GeofenceConfig];
}

/// A complete, immutable set of policy and calendar records loaded once per
/// batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    /// Work schedule policies.
    #[serde(default)]
    pub work_schedules: Vec<WorkSchedulePolicy>,
    /// Overtime policies.
    #[serde(default)]
    pub overtime_policies: Vec<OvertimePolicy>,
    /// Penalty policies.
    #[serde(default)]
    pub penalty_policies: Vec<PenaltyPolicy>,
    /// Shift definitions.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Shift assignments.
    #[serde(default)]
    pub assignments: Vec<ShiftAssignment>,
    /// Public holidays.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
    /// Geofence configurations.
    #[serde(default)]
    pub geofences: Vec<GeofenceConfig>,
}

/// An in-memory [`PolicyRepository`] over a validated [`PolicySnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    snapshot: PolicySnapshot,
    work_schedule_index: HashMap<String, usize>,
    overtime_index: HashMap<String, usize>,
    penalty_index: HashMap<String, usize>,
}

impl SnapshotRepository {
    /// Validates the snapshot against the data-model invariants and builds
    /// the id indexes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPolicy`] when a record violates an
    /// invariant: out-of-range weekday indices, duplicate overtime rules for
    /// one type, progressive tiers out of ascending order, a shift whose
    /// stored work hours disagree with its breaks, or overlapping active
    /// assignments for one employee.
    pub fn new(snapshot: PolicySnapshot) -> EngineResult<Self> {
        validate_snapshot(&snapshot)?;

        let work_schedule_index = index_by(&snapshot.work_schedules, |p| p.id.clone());
        let overtime_index = index_by(&snapshot.overtime_policies, |p| p.id.clone());
        let penalty_index = index_by(&snapshot.penalty_policies, |p| p.id.clone());

        Ok(Self {
            snapshot,
            work_schedule_index,
            overtime_index,
            penalty_index,
        })
    }

    /// Returns the underlying snapshot.
    pub fn snapshot(&self) -> &PolicySnapshot {
        &self.snapshot
    }
}

impl PolicyRepository for SnapshotRepository {
    fn work_schedule_policy(&self, id: &str) -> EngineResult<&WorkSchedulePolicy> {
        self.work_schedule_index
            .get(id)
            .map(|&i| &self.snapshot.work_schedules[i])
            .ok_or_else(|| not_found("work schedule", id))
    }

    fn overtime_policy(&self, id: &str) -> EngineResult<&OvertimePolicy> {
        self.overtime_index
            .get(id)
            .map(|&i| &self.snapshot.overtime_policies[i])
            .ok_or_else(|| not_found("overtime", id))
    }

    fn penalty_policy(&self, id: &str) -> EngineResult<&PenaltyPolicy> {
        self.penalty_index
            .get(id)
            .map(|&i| &self.snapshot.penalty_policies[i])
            .ok_or_else(|| not_found("penalty", id))
    }

    fn shifts(&self) -> &[Shift] {
        &self.snapshot.shifts
    }

    fn assignments(&self) -> &[ShiftAssignment] {
        &self.snapshot.assignments
    }

    fn holidays(&self) -> &[PublicHoliday] {
        &self.snapshot.holidays
    }

    fn geofences(&self) -> &[GeofenceConfig] {
        &self.snapshot.geofences
    }
}

fn not_found(kind: &str, id: &str) -> EngineError {
    EngineError::PolicyNotFound {
        kind: kind.to_string(),
        id: id.to_string(),
    }
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> String) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (key(item), i))
        .collect()
}

fn validate_snapshot(snapshot: &PolicySnapshot) -> EngineResult<()> {
    for policy in &snapshot.work_schedules {
        validate_day_indices(&policy.work_days, &policy.id)?;
    }

    for policy in &snapshot.overtime_policies {
        let mut seen = HashSet::new();
        for rule in &policy.rules {
            if !seen.insert(rule.overtime_type) {
                return Err(EngineError::InvalidPolicy {
                    field: format!("{}.rules", policy.id),
                    message: format!("duplicate rule for type '{}'", rule.overtime_type),
                });
            }
        }
    }

    for policy in &snapshot.penalty_policies {
        let mut previous_from = 0u32;
        for rule in &policy.progressive_rules {
            if rule.from_occurrence < previous_from {
                return Err(EngineError::InvalidPolicy {
                    field: format!("{}.progressive_rules", policy.id),
                    message: "tiers must be ordered by ascending from_occurrence".to_string(),
                });
            }
            if let Some(to) = rule.to_occurrence {
                if to < rule.from_occurrence {
                    return Err(EngineError::InvalidPolicy {
                        field: format!("{}.progressive_rules", policy.id),
                        message: "tier upper bound precedes its lower bound".to_string(),
                    });
                }
            }
            previous_from = rule.from_occurrence;
        }
    }

    for shift in &snapshot.shifts {
        validate_day_indices(&shift.applicable_days, &shift.id)?;
        if shift.work_hours != shift.derived_work_hours() {
            return Err(EngineError::InvalidPolicy {
                field: format!("{}.work_hours", shift.id),
                message: format!(
                    "stored work hours {} disagree with gross hours minus breaks {}",
                    shift.work_hours,
                    shift.derived_work_hours()
                ),
            });
        }
    }

    for assignment in &snapshot.assignments {
        validate_day_indices(&assignment.work_days, &assignment.id)?;
        if assignment.is_rotational && assignment.rotation.is_none() {
            return Err(EngineError::InvalidPolicy {
                field: format!("{}.rotation", assignment.id),
                message: "rotational assignment has no rotation pattern".to_string(),
            });
        }
    }
    validate_assignment_overlaps(&snapshot.assignments)?;

    for geofence in &snapshot.geofences {
        if geofence.radius_meters <= 0.0 {
            return Err(EngineError::InvalidPolicy {
                field: format!("{}.radius_meters", geofence.id),
                message: "radius must be positive".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_day_indices(days: &[u32], id: &str) -> EngineResult<()> {
    if let Some(bad) = days.iter().find(|&&d| d > 6) {
        return Err(EngineError::InvalidPolicy {
            field: format!("{}.days", id),
            message: format!("weekday index {} out of range 0-6", bad),
        });
    }
    Ok(())
}

/// Two active assignments for one employee must not overlap in time; an
/// open-ended assignment extends to the unbounded future.
fn validate_assignment_overlaps(assignments: &[ShiftAssignment]) -> EngineResult<()> {
    for (i, a) in assignments.iter().enumerate() {
        for b in &assignments[i + 1..] {
            if a.employee_id != b.employee_id {
                continue;
            }
            let a_end_after_b_start = a.end_date.is_none_or(|end| end >= b.start_date);
            let b_end_after_a_start = b.end_date.is_none_or(|end| end >= a.start_date);
            if a_end_after_b_start && b_end_after_a_start {
                return Err(EngineError::InvalidPolicy {
                    field: format!("{}/{}", a.id, b.id),
                    message: format!(
                        "overlapping assignments for employee {}",
                        a.employee_id
                    ),
                });
            }
        }
    }
    Ok(())
}
