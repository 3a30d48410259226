use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BudgetStatus {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "Ok",
            Self::Warning => "Warning",
            Self::Exceeded => "Exceeded",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAnalysis {
    pub limit: Decimal,
    pub total_spend: Decimal,
    /// `limit - total_spend`; negative once the budget is blown.
    pub remaining: Decimal,
    /// `None` when no limit is set (limit == 0).
    pub usage_percent: Option<Decimal>,
    pub status: BudgetStatus,
}

impl BudgetAnalysis {
    pub fn has_limit(&self) -> bool {
        self.limit > Decimal::ZERO
    }

    /// Amount spent beyond the limit, zero when within budget.
    pub fn overspend(&self) -> Decimal {
        if self.remaining < Decimal::ZERO && self.has_limit() {
            -self.remaining
        } else {
            Decimal::ZERO
        }
    }

    /// Progress ratio for a gauge, clamped to 0.0..=1.0.
    pub fn progress_ratio(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        self.usage_percent
            .and_then(|p| (p / Decimal::ONE_HUNDRED).to_f64())
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }
}
