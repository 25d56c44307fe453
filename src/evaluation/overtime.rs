//! Overtime pay calculation.
//!
//! Turns overtime hours plus an [`OvertimeType`] into a payable amount by
//! looking up the matching rule in an [`OvertimePolicy`] and applying, in
//! order: minute rounding, the minimum-hours floor, and the daily cap.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    OvertimeCalculationResult, OvertimePolicy, OvertimeType, OvertimeTypeTotal,
    PeriodOvertimeSummary,
};

/// One overtime entry within a pay period, input to
/// [`calculate_period_overtime`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRecord {
    /// The date the overtime was worked.
    pub date: NaiveDate,
    /// Hours worked, before rounding.
    pub hours: Decimal,
    /// The overtime category of this record.
    pub overtime_type: OvertimeType,
}

/// Calculates the payable amount for a single overtime entry.
///
/// Adjustments are applied in this order:
/// 1. **Rounding** — minutes are floored to the nearest multiple of the
///    rule's `rounding_minutes`.
/// 2. **Minimum** — rounded hours below the rule's `min_hours` zero out
///    entirely (not partially).
/// 3. **Daily cap** — hours are clamped to `max_hours_per_day`, setting
///    `exceeds_limit`.
///
/// Pay is `effective_hours × hourly_rate × rule.rate`, rounded to 2 decimal
/// places at the end. `requires_approval` is true only when the policy
/// requires approval and the raw (pre-rounding) hours exceed the approval
/// threshold.
///
/// # Errors
///
/// Returns [`EngineError::OvertimeRuleNotFound`] when the policy has no rule
/// for the given type.
pub fn calculate_overtime(
    policy: &OvertimePolicy,
    hours: Decimal,
    overtime_type: OvertimeType,
    hourly_rate: Decimal,
) -> EngineResult<OvertimeCalculationResult> {
    let rule = policy
        .rule_for(overtime_type)
        .ok_or_else(|| EngineError::OvertimeRuleNotFound {
            overtime_type: overtime_type.to_string(),
        })?;

    let mut effective_hours = hours;

    if let Some(rounding) = rule.rounding_minutes {
        if rounding > 0 {
            let rounding = Decimal::from(rounding);
            let minutes = (effective_hours * Decimal::from(60)).floor();
            let floored = (minutes / rounding).floor() * rounding;
            effective_hours = floored / Decimal::from(60);
        }
    }

    if let Some(min_hours) = rule.min_hours {
        if effective_hours < min_hours {
            effective_hours = Decimal::ZERO;
        }
    }

    let mut exceeds_limit = false;
    if let Some(max_per_day) = rule.max_hours_per_day {
        if effective_hours > max_per_day {
            effective_hours = max_per_day;
            exceeds_limit = true;
        }
    }

    let amount = (effective_hours * hourly_rate * rule.rate).round_dp(2);
    let requires_approval = policy.requires_approval && hours > policy.approval_threshold_hours;

    Ok(OvertimeCalculationResult {
        overtime_type,
        raw_hours: hours,
        effective_hours,
        hourly_rate,
        rate_multiplier: rule.rate,
        amount,
        exceeds_limit,
        requires_approval,
    })
}

/// Aggregates overtime over a pay period.
///
/// Runs [`calculate_overtime`] once per record and sums the results into
/// per-type and grand totals. Accumulation is sequential so the result is
/// deterministic regardless of how the caller produced the records.
///
/// # Errors
///
/// Fails on the first record whose type has no rule in the policy.
pub fn calculate_period_overtime(
    policy: &OvertimePolicy,
    records: &[OvertimeRecord],
    hourly_rate: Decimal,
) -> EngineResult<PeriodOvertimeSummary> {
    let mut by_type: HashMap<OvertimeType, OvertimeTypeTotal> = HashMap::new();
    let mut total_hours = Decimal::ZERO;
    let mut total_amount = Decimal::ZERO;
    let mut records_requiring_approval = 0;

    for record in records {
        let result = calculate_overtime(policy, record.hours, record.overtime_type, hourly_rate)?;

        let entry = by_type.entry(record.overtime_type).or_default();
        entry.hours += result.effective_hours;
        entry.amount += result.amount;

        total_hours += result.effective_hours;
        total_amount += result.amount;
        if result.requires_approval {
            records_requiring_approval += 1;
        }
    }

    Ok(PeriodOvertimeSummary {
        by_type,
        total_hours,
        total_amount,
        records_requiring_approval,
    })
}
