//! Budget-vs-actual analysis and the small derived views the dashboard shows.

mod detail;

pub(crate) use detail::{detail_rows, DetailRows};

use rust_decimal::Decimal;

use crate::error::DashError;
use crate::models::{BudgetAnalysis, BudgetStatus, CategoryTotals};

/// Usage above this percentage (and at most 100) is a warning.
pub(crate) const WARNING_THRESHOLD_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Compare total spend against `limit`.
///
/// A zero limit means no budget is set: `usage_percent` is `None` and the
/// status is `Ok`. Status boundaries are evaluated on exact decimals, so
/// `Warning` covers usage in (80, 100] and `Exceeded` anything above 100.
pub(crate) fn analyze(totals: &CategoryTotals, limit: Decimal) -> Result<BudgetAnalysis, DashError> {
    if limit < Decimal::ZERO {
        return Err(DashError::InvalidInput(format!(
            "budget limit must not be negative, got {limit}"
        )));
    }

    let overflow = || DashError::InvalidInput("amounts too large to compare".into());
    let total_spend = totals.total();
    let remaining = limit.checked_sub(total_spend).ok_or_else(overflow)?;

    if limit.is_zero() {
        return Ok(BudgetAnalysis {
            limit,
            total_spend,
            remaining,
            usage_percent: None,
            status: BudgetStatus::Ok,
        });
    }

    let scaled_spend = total_spend
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(overflow)?;
    let usage_percent = scaled_spend.checked_div(limit).ok_or_else(overflow)?;
    let warning_line = limit
        .checked_mul(WARNING_THRESHOLD_PERCENT)
        .ok_or_else(overflow)?;

    let status = if total_spend > limit {
        BudgetStatus::Exceeded
    } else if scaled_spend > warning_line {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    };

    Ok(BudgetAnalysis {
        limit,
        total_spend,
        remaining,
        usage_percent: Some(usage_percent),
        status,
    })
}

/// Category with the highest amount. Ties go to the label that sorts first.
pub(crate) fn largest_category(totals: &CategoryTotals) -> Result<(&str, Decimal), DashError> {
    let mut best: Option<(&str, Decimal)> = None;
    for (label, amount) in totals.iter() {
        match best {
            Some((_, top)) if amount <= top => {}
            _ => best = Some((label, amount)),
        }
    }
    best.ok_or_else(|| DashError::EmptyInput("no categories to compare".into()))
}
