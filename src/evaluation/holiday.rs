//! Holiday calendar lookups and working-day aggregation.
//!
//! The calendar is a read-only view over a preloaded holiday snapshot: the
//! caller loads all holidays for the relevant range once, and the range
//! loop here runs purely in memory.

use chrono::{Days, NaiveDate};

use crate::models::{day_index, HolidayCheckResult, PublicHoliday, WorkingDaysResult};

/// A read-only holiday calendar over a preloaded snapshot.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    holidays: Vec<PublicHoliday>,
}

impl HolidayCalendar {
    /// Creates a calendar over the given holiday snapshot.
    pub fn new(holidays: Vec<PublicHoliday>) -> Self {
        Self { holidays }
    }

    /// Checks whether a date is a holiday for the given context.
    ///
    /// Among the holidays on the date, the first whose location, region,
    /// and department applicability lists accept the given values wins
    /// (an empty list accepts everything). No match means not a holiday —
    /// a normal result, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::evaluation::HolidayCalendar;
    ///
    /// let calendar = HolidayCalendar::new(vec![]);
    /// let result = calendar.is_holiday(
    ///     chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     None,
    ///     None,
    ///     None,
    /// );
    /// assert!(!result.is_holiday);
    /// ```
    pub fn is_holiday(
        &self,
        date: NaiveDate,
        location: Option<&str>,
        region: Option<&str>,
        department: Option<&str>,
    ) -> HolidayCheckResult {
        self.holidays
            .iter()
            .filter(|h| h.date == date)
            .find(|h| h.applies_to(location, region, department))
            .map(HolidayCheckResult::from_holiday)
            .unwrap_or_else(HolidayCheckResult::not_holiday)
    }

    /// Classifies every day in the inclusive range `[start, end]`.
    ///
    /// Weekend means Saturday or Sunday. With `include_weekends = false`,
    /// weekend days are excluded from both the holiday check and the
    /// working-day count but still tallied under `weekend_days`, so a
    /// holiday falling on a weekend is counted once, as a weekend day.
    /// With weekends excluded the counts satisfy
    /// `total_days == working_days + weekend_days + holidays`.
    ///
    /// An inverted range (`end < start`) yields all-zero counts.
    pub fn calculate_working_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        include_weekends: bool,
        location: Option<&str>,
        region: Option<&str>,
        department: Option<&str>,
    ) -> WorkingDaysResult {
        let mut result = WorkingDaysResult {
            total_days: 0,
            working_days: 0,
            weekend_days: 0,
            holidays: 0,
            holiday_dates: Vec::new(),
        };

        let mut date = start;
        while date <= end {
            result.total_days += 1;

            let index = day_index(date);
            let is_weekend = index == 0 || index == 6;

            if is_weekend {
                result.weekend_days += 1;
            }

            if !is_weekend || include_weekends {
                if self.is_holiday(date, location, region, department).is_holiday {
                    result.holidays += 1;
                    result.holiday_dates.push(date);
                } else {
                    result.working_days += 1;
                }
            }

            date = date + Days::new(1);
        }

        result
    }
}
