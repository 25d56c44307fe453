//! Configuration loading for the Attendance Policy Evaluation Engine.
//!
//! This module loads a policy snapshot from a directory of YAML files and
//! hands it to the repository boundary for validation.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{GeofencesFile, HolidaysFile, PoliciesFile, ShiftsFile};
