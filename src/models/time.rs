//! Time-of-day representation.
//!
//! Clock readings and schedule boundaries are exchanged as `HH:mm` strings
//! (00:00–23:59). This module parses them once, at the boundary, into a
//! minutes-since-midnight value so the evaluators can do plain integer
//! arithmetic.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A time of day as minutes since local midnight (0..=1439).
///
/// Parses from and serializes to the `HH:mm` wire format.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::TimeOfDay;
///
/// let t: TimeOfDay = "09:30".parse().unwrap();
/// assert_eq!(t.minutes(), 570);
/// assert_eq!(t.to_string(), "09:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time of day from minutes since midnight.
    ///
    /// Returns an error if `minutes` is 1440 or more.
    pub fn from_minutes(minutes: u16) -> EngineResult<Self> {
        if minutes >= 24 * 60 {
            return Err(EngineError::InvalidTimeFormat {
                value: format!("{} minutes", minutes),
            });
        }
        Ok(Self(minutes))
    }

    /// Returns the minutes since midnight (0..=1439).
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Returns the hour component (0..=23).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute component (0..=59).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Returns the signed difference `self − other` in minutes.
    pub fn minutes_from(&self, other: TimeOfDay) -> i32 {
        i32::from(self.0) - i32::from(other.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidTimeFormat {
            value: s.to_string(),
        };

        let (hours_part, minutes_part) = s.split_once(':').ok_or_else(invalid)?;
        if hours_part.len() != 2 || minutes_part.len() != 2 {
            return Err(invalid());
        }

        let hours: u16 = hours_part.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes_part.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(Self(hours * 60 + minutes))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Returns the weekday index of a date, with 0 = Sunday through 6 = Saturday.
///
/// This is the convention used by all `work_days` / `applicable_days` lists
/// in the policy records.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::day_index;
/// use chrono::NaiveDate;
///
/// // 2026-01-18 is a Sunday
/// let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
/// assert_eq!(day_index(sunday), 0);
/// ```
pub fn day_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}
