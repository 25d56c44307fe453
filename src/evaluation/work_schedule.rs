//! Work schedule validation.
//!
//! Validates a clock-in or clock-out time-of-day against a
//! [`WorkSchedulePolicy`]: working-day membership, grace periods, late and
//! early-leave thresholds, and the optional flexible-time window.

use chrono::NaiveDate;

use crate::models::{day_index, TimeOfDay, TimeValidationResult, WorkSchedulePolicy};

/// Validates a clock-in reading against the schedule policy.
///
/// Decision order:
/// 1. A date outside the policy's working days is rejected outright.
/// 2. A clock-in within the grace period of the standard start is on time.
/// 3. Otherwise, a clock-in inside the flexible window (when configured)
///    is accepted as on time.
/// 4. Otherwise, a clock-in more than `late_threshold_minutes` past the
///    standard start is late by the full difference.
/// 5. Early arrivals and clock-ins past grace but within the late threshold
///    are accepted without a violation.
///
/// # Examples
///
/// ```
/// use attendance_engine::evaluation::validate_clock_in;
/// use attendance_engine::models::WorkSchedulePolicy;
/// use chrono::NaiveDate;
///
/// let policy = WorkSchedulePolicy {
///     id: "ws_001".to_string(),
///     name: "Standard".to_string(),
///     work_days: vec![1, 2, 3, 4, 5],
///     standard_start_time: "09:00".parse().unwrap(),
///     standard_end_time: "17:00".parse().unwrap(),
///     break_duration_minutes: 60,
///     late_threshold_minutes: 15,
///     early_leave_threshold_minutes: 15,
///     grace_period_minutes: 5,
///     flexible_time: None,
///     overtime_after_minutes: 0,
/// };
///
/// // 2026-01-14 is a Wednesday
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// let result = validate_clock_in(&policy, "09:30".parse().unwrap(), date);
/// assert!(result.is_late);
/// assert_eq!(result.minutes_late, 30);
/// ```
pub fn validate_clock_in(
    policy: &WorkSchedulePolicy,
    clock_in: TimeOfDay,
    date: NaiveDate,
) -> TimeValidationResult {
    if !policy.work_days.contains(&day_index(date)) {
        return TimeValidationResult::rejected(format!("{} is not a working day", date));
    }

    let diff = i64::from(clock_in.minutes_from(policy.standard_start_time));
    let grace = i64::from(policy.grace_period_minutes);

    if diff.abs() <= grace {
        return TimeValidationResult::accepted("On time");
    }

    if let Some(window) = &policy.flexible_time {
        if clock_in >= window.earliest_start && clock_in <= window.latest_start {
            return TimeValidationResult::accepted("On time within flexible window");
        }
    }

    if diff > i64::from(policy.late_threshold_minutes) {
        let mut result =
            TimeValidationResult::accepted(format!("Late by {} minutes", diff));
        result.is_late = true;
        result.minutes_late = diff;
        return result;
    }

    if diff < 0 {
        return TimeValidationResult::accepted("Early arrival");
    }

    TimeValidationResult::accepted("Within late threshold")
}

/// Validates a clock-out reading against the schedule policy.
///
/// Symmetric to [`validate_clock_in`], using `standard_end − clock_out`:
/// a positive difference past the early-leave threshold is an early leave;
/// a negative difference means the employee stayed past the scheduled end
/// and is reported as informational `overtime_minutes`, never a violation.
pub fn validate_clock_out(
    policy: &WorkSchedulePolicy,
    clock_out: TimeOfDay,
    date: NaiveDate,
) -> TimeValidationResult {
    if !policy.work_days.contains(&day_index(date)) {
        return TimeValidationResult::rejected(format!("{} is not a working day", date));
    }

    let diff = i64::from(policy.standard_end_time.minutes_from(clock_out));
    let grace = i64::from(policy.grace_period_minutes);

    if diff.abs() <= grace {
        return TimeValidationResult::accepted("On time");
    }

    if diff > i64::from(policy.early_leave_threshold_minutes) {
        let mut result =
            TimeValidationResult::accepted(format!("Left {} minutes early", diff));
        result.is_early_leave = true;
        result.minutes_early = diff;
        return result;
    }

    if diff < 0 {
        let mut result = TimeValidationResult::accepted(format!(
            "Worked {} minutes past scheduled end",
            -diff
        ));
        result.overtime_minutes = -diff;
        return result;
    }

    TimeValidationResult::accepted("Within early-leave threshold")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlexibleTimeWindow;

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn standard_policy() -> WorkSchedulePolicy {
        WorkSchedulePolicy {
            id: "ws_001".to_string(),
            name: "Standard 9-to-5".to_string(),
            work_days: vec![1, 2, 3, 4, 5],
            standard_start_time: time("09:00"),
            standard_end_time: time("17:00"),
            break_duration_minutes: 60,
            late_threshold_minutes: 15,
            early_leave_threshold_minutes: 15,
            grace_period_minutes: 5,
            flexible_time: None,
            overtime_after_minutes: 0,
        }
    }

    // 2026-01-14 is a Wednesday, 2026-01-17 a Saturday
    const WEDNESDAY: &str = "2026-01-14";
    const SATURDAY: &str = "2026-01-17";

    // ==========================================================================
    // Clock-in
    // ==========================================================================

    #[test]
    fn test_clock_in_rejected_on_non_working_day() {
        let policy = standard_policy();
        let result = validate_clock_in(&policy, time("09:00"), date(SATURDAY));
        assert!(!result.is_valid);
        assert!(!result.is_late);
    }

    #[test]
    fn test_clock_in_exact_start_is_on_time() {
        let policy = standard_policy();
        let result = validate_clock_in(&policy, time("09:00"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(!result.is_late);
        assert_eq!(result.minutes_late, 0);
    }

    #[test]
    fn test_clock_in_within_grace_both_sides() {
        let policy = standard_policy();
        for t in ["08:55", "09:05"] {
            let result = validate_clock_in(&policy, time(t), date(WEDNESDAY));
            assert!(result.is_valid, "{} should be accepted", t);
            assert!(!result.is_late, "{} should not be late", t);
            assert_eq!(result.minutes_late, 0);
        }
    }

    #[test]
    fn test_clock_in_past_grace_within_threshold_is_accepted() {
        let policy = standard_policy();
        // 10 minutes late: past the 5-minute grace, within the 15-minute threshold
        let result = validate_clock_in(&policy, time("09:10"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(!result.is_late);
        assert_eq!(result.minutes_late, 0);
    }

    #[test]
    fn test_clock_in_past_threshold_is_late_by_full_diff() {
        let policy = standard_policy();
        let result = validate_clock_in(&policy, time("09:30"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(result.is_late);
        assert_eq!(result.minutes_late, 30);
    }

    #[test]
    fn test_clock_in_exactly_at_threshold_is_not_late() {
        let policy = standard_policy();
        // diff == late_threshold is not strictly greater, so not late
        let result = validate_clock_in(&policy, time("09:15"), date(WEDNESDAY));
        assert!(!result.is_late);
    }

    #[test]
    fn test_early_arrival_always_accepted() {
        let policy = standard_policy();
        let result = validate_clock_in(&policy, time("07:30"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(!result.is_late);
    }

    #[test]
    fn test_flexible_window_accepts_late_clock_in() {
        let mut policy = standard_policy();
        policy.flexible_time = Some(FlexibleTimeWindow {
            earliest_start: time("08:00"),
            latest_start: time("10:00"),
        });

        // 45 minutes past start, but inside the flexible window
        let result = validate_clock_in(&policy, time("09:45"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(!result.is_late);
    }

    #[test]
    fn test_flexible_window_does_not_cover_beyond_latest() {
        let mut policy = standard_policy();
        policy.flexible_time = Some(FlexibleTimeWindow {
            earliest_start: time("08:00"),
            latest_start: time("10:00"),
        });

        let result = validate_clock_in(&policy, time("10:30"), date(WEDNESDAY));
        assert!(result.is_late);
        assert_eq!(result.minutes_late, 90);
    }

    // ==========================================================================
    // Clock-out
    // ==========================================================================

    #[test]
    fn test_clock_out_rejected_on_non_working_day() {
        let policy = standard_policy();
        let result = validate_clock_out(&policy, time("17:00"), date(SATURDAY));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_clock_out_within_grace() {
        let policy = standard_policy();
        let result = validate_clock_out(&policy, time("16:56"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(!result.is_early_leave);
        assert_eq!(result.minutes_early, 0);
    }

    #[test]
    fn test_clock_out_past_threshold_is_early_leave() {
        let policy = standard_policy();
        let result = validate_clock_out(&policy, time("16:30"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(result.is_early_leave);
        assert_eq!(result.minutes_early, 30);
    }

    #[test]
    fn test_clock_out_past_grace_within_threshold_accepted() {
        let policy = standard_policy();
        let result = validate_clock_out(&policy, time("16:50"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(!result.is_early_leave);
    }

    #[test]
    fn test_late_clock_out_reports_overtime_minutes() {
        let policy = standard_policy();
        let result = validate_clock_out(&policy, time("18:30"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert!(!result.is_early_leave);
        assert_eq!(result.overtime_minutes, 90);
    }

    #[test]
    fn test_clock_out_within_grace_after_end_is_not_overtime() {
        let policy = standard_policy();
        let result = validate_clock_out(&policy, time("17:04"), date(WEDNESDAY));
        assert!(result.is_valid);
        assert_eq!(result.overtime_minutes, 0);
    }
}
