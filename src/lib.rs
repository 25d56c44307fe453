//! Attendance Policy Evaluation Engine
//!
//! This crate provides the deterministic rule-evaluation functions that turn
//! raw attendance facts (clock times, dates, geolocations, occurrence counts)
//! into business decisions: lateness, overtime pay, penalties, holiday
//! classification, shift resolution, and geofence validation.
//!
//! The evaluators are pure: they perform no I/O, hold no state between calls,
//! and produce identical outputs for identical inputs. Policy and calendar
//! records are loaded once per batch by the caller and passed in read-only.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod repository;
