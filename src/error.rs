//! Error types for the Attendance Policy Evaluation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during policy evaluation.
//!
//! Degraded-but-valid outcomes — no geofence configured, no holiday on a
//! date, no applicable shift — are deliberately NOT errors; they are ordinary
//! results so that absent configuration never blocks attendance flows.

use thiserror::Error;

/// The main error type for the Attendance Policy Evaluation Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeFormat {
///     value: "25:99".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time of day '25:99': expected HH:mm");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A time-of-day string did not match the `HH:mm` format.
    #[error("Invalid time of day '{value}': expected HH:mm")]
    InvalidTimeFormat {
        /// The string that failed to parse.
        value: String,
    },

    /// A policy record contained an out-of-range or inconsistent field.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A violation record was missing an input required by the penalty mode.
    #[error("Invalid violation field '{field}': {message}")]
    InvalidViolation {
        /// The field that was missing or invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A referenced policy id did not resolve in the repository.
    #[error("{kind} policy not found: {id}")]
    PolicyNotFound {
        /// The policy kind ("work schedule", "overtime", "penalty").
        kind: String,
        /// The policy id that was not found.
        id: String,
    },

    /// A shift code did not resolve in the repository.
    #[error("Shift not found: {code}")]
    ShiftNotFound {
        /// The shift code that was not found.
        code: String,
    },

    /// An overtime type had no matching rule in the policy's rule list.
    #[error("No overtime rule configured for type '{overtime_type}'")]
    OvertimeRuleNotFound {
        /// The overtime type that had no rule.
        overtime_type: String,
    },

    /// A penalty policy was applied to a violation of a different type.
    #[error("Penalty type mismatch: policy covers '{expected}', violation is '{actual}'")]
    PenaltyTypeMismatch {
        /// The penalty type the policy covers.
        expected: String,
        /// The penalty type of the violation.
        actual: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
