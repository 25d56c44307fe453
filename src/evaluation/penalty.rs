//! Penalty calculation.
//!
//! Turns an attendance violation (lateness, absence, missing clock events)
//! into a penalty amount under a [`PenaltyPolicy`], including progressive
//! occurrence-based tiers and the monthly cap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    list_allows, PenaltyCalculationResult, PenaltyCalculationType, PenaltyPolicy, PenaltyType,
};

/// A single attendance violation, input to [`calculate_penalty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyViolation {
    /// The violation type.
    pub penalty_type: PenaltyType,
    /// Minutes late (or minutes left early for early-leave violations).
    #[serde(default)]
    pub minutes_late: u32,
    /// How many times this violation has occurred in the current period,
    /// counting this one (1-based).
    #[serde(default = "default_occurrence")]
    pub occurrence_count: u32,
    /// Monthly salary, required by the percentage modes.
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    /// Hourly rate, required by the hourly-rate mode.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Daily rate, required by the daily-rate mode.
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
}

fn default_occurrence() -> u32 {
    1
}

/// Calculates the penalty for a violation under a policy.
///
/// Steps, in order:
/// 1. The policy must cover the violation's type, else
///    [`EngineError::PenaltyTypeMismatch`].
/// 2. Late and early-leave violations within the grace period attract no
///    penalty.
/// 3. A violation below the configured minute threshold attracts no penalty.
/// 4. The amount is computed per the policy's calculation type; progressive
///    policies scan the ordered tiers and the first tier whose inclusive
///    occurrence range contains the count wins (an open upper bound covers
///    everything beyond).
/// 5. The amount is clamped to the monthly cap, clearing `is_within_cap`.
/// 6. The final amount is rounded to 2 decimal places.
///
/// A zero amount is a normal result with `should_apply = false`, not an
/// error.
pub fn calculate_penalty(
    policy: &PenaltyPolicy,
    violation: &PenaltyViolation,
) -> EngineResult<PenaltyCalculationResult> {
    if policy.penalty_type != violation.penalty_type {
        return Err(EngineError::PenaltyTypeMismatch {
            expected: policy.penalty_type.to_string(),
            actual: violation.penalty_type.to_string(),
        });
    }

    let minute_based = matches!(
        violation.penalty_type,
        PenaltyType::Late | PenaltyType::EarlyLeave
    );

    if minute_based && violation.minutes_late <= policy.grace_period_minutes {
        return Ok(no_penalty(policy.penalty_type, "Within grace period"));
    }

    if let Some(threshold) = policy.threshold_minutes {
        if minute_based && violation.minutes_late < threshold {
            return Ok(no_penalty(policy.penalty_type, "Below minute threshold"));
        }
    }

    let raw_amount = compute_amount(policy, violation)?;

    let (amount, is_within_cap) = match policy.max_penalty_per_month {
        Some(cap) if raw_amount > cap => (cap, false),
        _ => (raw_amount, true),
    };

    let amount = amount.round_dp(2);
    let should_apply = amount > Decimal::ZERO;
    let message = if should_apply {
        format!("Penalty of {} applied", amount)
    } else {
        "No penalty amount computed".to_string()
    };

    Ok(PenaltyCalculationResult {
        penalty_type: policy.penalty_type,
        amount,
        should_apply,
        is_within_cap,
        message,
    })
}

/// Checks whether a policy applies to an employee's classification.
///
/// Each of the policy's allow-lists must be empty (unrestricted) or contain
/// the corresponding value.
pub fn is_applicable(
    policy: &PenaltyPolicy,
    employment_type: Option<&str>,
    position: Option<&str>,
    department: Option<&str>,
) -> bool {
    list_allows(&policy.applicable_employment_types, employment_type)
        && list_allows(&policy.applicable_positions, position)
        && list_allows(&policy.applicable_departments, department)
}

fn no_penalty(penalty_type: PenaltyType, message: &str) -> PenaltyCalculationResult {
    PenaltyCalculationResult {
        penalty_type,
        amount: Decimal::ZERO,
        should_apply: false,
        is_within_cap: true,
        message: message.to_string(),
    }
}

fn compute_amount(policy: &PenaltyPolicy, violation: &PenaltyViolation) -> EngineResult<Decimal> {
    match policy.calculation_type {
        PenaltyCalculationType::Fixed => Ok(policy.amount.unwrap_or(Decimal::ZERO)),
        PenaltyCalculationType::Percentage => {
            let salary = require(violation.monthly_salary, "monthly_salary")?;
            let percentage = policy.percentage.unwrap_or(Decimal::ZERO);
            Ok(salary * percentage / Decimal::from(100))
        }
        PenaltyCalculationType::HourlyRate => {
            let hourly_rate = require(violation.hourly_rate, "hourly_rate")?;
            let hours = Decimal::from(violation.minutes_late) / Decimal::from(60);
            Ok(hours * hourly_rate * policy.multiplier)
        }
        PenaltyCalculationType::DailyRate => {
            let daily_rate = require(violation.daily_rate, "daily_rate")?;
            Ok(daily_rate * policy.multiplier)
        }
        PenaltyCalculationType::Progressive => progressive_amount(policy, violation),
    }
}

/// Scans the ordered tiers; the first tier whose inclusive range contains
/// the occurrence count wins. An absent upper bound covers every occurrence
/// from `from_occurrence` onward.
fn progressive_amount(
    policy: &PenaltyPolicy,
    violation: &PenaltyViolation,
) -> EngineResult<Decimal> {
    let count = violation.occurrence_count;

    for rule in &policy.progressive_rules {
        if count < rule.from_occurrence {
            continue;
        }
        if let Some(to) = rule.to_occurrence {
            if count > to {
                continue;
            }
        }

        if let Some(amount) = rule.amount {
            return Ok(amount);
        }
        if let Some(percentage) = rule.percentage {
            let salary = require(violation.monthly_salary, "monthly_salary")?;
            return Ok(salary * percentage / Decimal::from(100));
        }
        return Ok(Decimal::ZERO);
    }

    // No tier covers the count; nothing to charge
    Ok(Decimal::ZERO)
}

fn require(value: Option<Decimal>, field: &str) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::InvalidViolation {
        field: field.to_string(),
        message: "required by the policy's calculation type".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProgressivePenaltyRule;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn base_policy(
        penalty_type: PenaltyType,
        calculation_type: PenaltyCalculationType,
    ) -> PenaltyPolicy {
        PenaltyPolicy {
            id: "pen_001".to_string(),
            name: "Test penalty".to_string(),
            penalty_type,
            calculation_type,
            amount: None,
            percentage: None,
            multiplier: Decimal::ONE,
            threshold_minutes: None,
            grace_period_minutes: 0,
            grace_occurrences: 0,
            progressive_rules: vec![],
            max_penalty_per_month: None,
            max_occurrences_per_month: None,
            applicable_employment_types: vec![],
            applicable_positions: vec![],
            applicable_departments: vec![],
        }
    }

    fn late_violation(minutes: u32) -> PenaltyViolation {
        PenaltyViolation {
            penalty_type: PenaltyType::Late,
            minutes_late: minutes,
            occurrence_count: 1,
            monthly_salary: Some(dec("3000")),
            hourly_rate: Some(dec("20")),
            daily_rate: Some(dec("160")),
        }
    }

    // ==========================================================================
    // PEN-001: type mismatch is an error
    // ==========================================================================
    #[test]
    fn test_pen_001_type_mismatch_is_error() {
        let policy = base_policy(PenaltyType::Absence, PenaltyCalculationType::Fixed);
        let err = calculate_penalty(&policy, &late_violation(30)).unwrap_err();
        assert!(matches!(err, EngineError::PenaltyTypeMismatch { .. }));
    }

    // ==========================================================================
    // PEN-002: within grace period, no penalty
    // ==========================================================================
    #[test]
    fn test_pen_002_within_grace_no_penalty() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Fixed);
        policy.amount = Some(dec("50"));
        policy.grace_period_minutes = 10;

        let result = calculate_penalty(&policy, &late_violation(10)).unwrap();
        assert!(!result.should_apply);
        assert_eq!(result.amount, Decimal::ZERO);
        assert_eq!(result.message, "Within grace period");
    }

    #[test]
    fn test_one_minute_past_grace_applies() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Fixed);
        policy.amount = Some(dec("50"));
        policy.grace_period_minutes = 10;

        let result = calculate_penalty(&policy, &late_violation(11)).unwrap();
        assert!(result.should_apply);
        assert_eq!(result.amount, dec("50"));
    }

    // ==========================================================================
    // PEN-003: below minute threshold, no penalty
    // ==========================================================================
    #[test]
    fn test_pen_003_below_threshold_no_penalty() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Fixed);
        policy.amount = Some(dec("50"));
        policy.threshold_minutes = Some(30);

        let below = calculate_penalty(&policy, &late_violation(29)).unwrap();
        assert!(!below.should_apply);

        let at = calculate_penalty(&policy, &late_violation(30)).unwrap();
        assert!(at.should_apply);
    }

    // ==========================================================================
    // PEN-004: calculation modes
    // ==========================================================================
    #[test]
    fn test_pen_004_fixed_amount() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Fixed);
        policy.amount = Some(dec("75.5"));

        let result = calculate_penalty(&policy, &late_violation(45)).unwrap();
        assert_eq!(result.amount, dec("75.50"));
    }

    #[test]
    fn test_pen_004_percentage_of_salary() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Percentage);
        policy.percentage = Some(dec("2"));

        // 3000 × 2% = 60
        let result = calculate_penalty(&policy, &late_violation(45)).unwrap();
        assert_eq!(result.amount, dec("60.00"));
    }

    #[test]
    fn test_pen_004_hourly_rate_mode() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::HourlyRate);
        policy.multiplier = dec("2");

        // 45 minutes = 0.75h × $20 × 2 = $30.00
        let result = calculate_penalty(&policy, &late_violation(45)).unwrap();
        assert_eq!(result.amount, dec("30.00"));
    }

    #[test]
    fn test_pen_004_daily_rate_mode() {
        let mut policy = base_policy(PenaltyType::Absence, PenaltyCalculationType::DailyRate);
        policy.multiplier = dec("0.5");

        let violation = PenaltyViolation {
            penalty_type: PenaltyType::Absence,
            minutes_late: 0,
            occurrence_count: 1,
            monthly_salary: None,
            hourly_rate: None,
            daily_rate: Some(dec("160")),
        };

        // $160 × 0.5 = $80.00
        let result = calculate_penalty(&policy, &violation).unwrap();
        assert_eq!(result.amount, dec("80.00"));
    }

    #[test]
    fn test_missing_salary_for_percentage_is_error() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Percentage);
        policy.percentage = Some(dec("2"));

        let mut violation = late_violation(45);
        violation.monthly_salary = None;

        let err = calculate_penalty(&policy, &violation).unwrap_err();
        assert!(matches!(err, EngineError::InvalidViolation { ref field, .. } if field == "monthly_salary"));
    }

    // ==========================================================================
    // PEN-005: progressive tiers
    // Tiers: [1,1]→100, [2,3]→200, [4,∞)→300
    // ==========================================================================
    fn progressive_policy() -> PenaltyPolicy {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Progressive);
        policy.progressive_rules = vec![
            ProgressivePenaltyRule {
                from_occurrence: 1,
                to_occurrence: Some(1),
                amount: Some(dec("100")),
                percentage: None,
            },
            ProgressivePenaltyRule {
                from_occurrence: 2,
                to_occurrence: Some(3),
                amount: Some(dec("200")),
                percentage: None,
            },
            ProgressivePenaltyRule {
                from_occurrence: 4,
                to_occurrence: None,
                amount: Some(dec("300")),
                percentage: None,
            },
        ];
        policy
    }

    #[test]
    fn test_pen_005_progressive_tier_selection() {
        let policy = progressive_policy();
        let expected = [
            (1, "100"),
            (2, "200"),
            (3, "200"),
            (4, "300"),
            (5, "300"),
            (50, "300"),
        ];

        for (occurrence, amount) in expected {
            let mut violation = late_violation(45);
            violation.occurrence_count = occurrence;
            let result = calculate_penalty(&policy, &violation).unwrap();
            assert_eq!(
                result.amount,
                dec(amount),
                "occurrence {} should cost {}",
                occurrence,
                amount
            );
        }
    }

    #[test]
    fn test_progressive_percentage_tier() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Progressive);
        policy.progressive_rules = vec![ProgressivePenaltyRule {
            from_occurrence: 1,
            to_occurrence: None,
            amount: None,
            percentage: Some(dec("1.5")),
        }];

        // 3000 × 1.5% = 45
        let result = calculate_penalty(&policy, &late_violation(45)).unwrap();
        assert_eq!(result.amount, dec("45.00"));
    }

    #[test]
    fn test_progressive_uncovered_count_is_zero() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Progressive);
        policy.progressive_rules = vec![ProgressivePenaltyRule {
            from_occurrence: 3,
            to_occurrence: None,
            amount: Some(dec("100")),
            percentage: None,
        }];

        let mut violation = late_violation(45);
        violation.occurrence_count = 2;
        let result = calculate_penalty(&policy, &violation).unwrap();
        assert!(!result.should_apply);
        assert_eq!(result.amount, Decimal::ZERO);
    }

    // ==========================================================================
    // PEN-006: monthly cap
    // ==========================================================================
    #[test]
    fn test_pen_006_cap_clamps_amount() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Fixed);
        policy.amount = Some(dec("500"));
        policy.max_penalty_per_month = Some(dec("300"));

        let result = calculate_penalty(&policy, &late_violation(45)).unwrap();
        assert_eq!(result.amount, dec("300"));
        assert!(!result.is_within_cap);
    }

    #[test]
    fn test_pen_006_under_cap_unchanged() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Fixed);
        policy.amount = Some(dec("250"));
        policy.max_penalty_per_month = Some(dec("300"));

        let result = calculate_penalty(&policy, &late_violation(45)).unwrap();
        assert_eq!(result.amount, dec("250"));
        assert!(result.is_within_cap);
    }

    // ==========================================================================
    // PEN-007: rounding at the final step
    // ==========================================================================
    #[test]
    fn test_pen_007_rounds_to_two_places() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::HourlyRate);
        policy.multiplier = Decimal::ONE;

        // 50 minutes = 0.8333...h × $20 = $16.6666... → $16.67
        let result = calculate_penalty(&policy, &late_violation(50)).unwrap();
        assert_eq!(result.amount, dec("16.67"));
    }

    // ==========================================================================
    // Applicability allow-lists
    // ==========================================================================
    #[test]
    fn test_unrestricted_policy_applies_to_everyone() {
        let policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Fixed);
        assert!(is_applicable(&policy, None, None, None));
        assert!(is_applicable(&policy, Some("full_time"), Some("nurse"), Some("care")));
    }

    #[test]
    fn test_restricted_policy_checks_each_list() {
        let mut policy = base_policy(PenaltyType::Late, PenaltyCalculationType::Fixed);
        policy.applicable_employment_types = vec!["full_time".to_string()];
        policy.applicable_departments = vec!["care".to_string(), "admin".to_string()];

        assert!(is_applicable(&policy, Some("full_time"), None, Some("care")));
        assert!(!is_applicable(&policy, Some("casual"), None, Some("care")));
        assert!(!is_applicable(&policy, Some("full_time"), None, Some("kitchen")));
        // Missing value cannot satisfy a restricted list
        assert!(!is_applicable(&policy, None, None, Some("care")));
    }

    #[test]
    fn test_grace_does_not_shield_absence() {
        // Grace periods are minute-based; absences are not
        let mut policy = base_policy(PenaltyType::Absence, PenaltyCalculationType::Fixed);
        policy.amount = Some(dec("100"));
        policy.grace_period_minutes = 60;

        let violation = PenaltyViolation {
            penalty_type: PenaltyType::Absence,
            minutes_late: 0,
            occurrence_count: 1,
            monthly_salary: None,
            hourly_rate: None,
            daily_rate: None,
        };

        let result = calculate_penalty(&policy, &violation).unwrap();
        assert!(result.should_apply);
        assert_eq!(result.amount, dec("100"));
    }
}
