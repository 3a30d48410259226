use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::DashError;

/// Label used for records stored without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone)]
pub struct ExpenseRecord {
    /// ISO-8601 date, e.g. "2024-03-15"
    pub date: String,
    pub category: String,
    pub amount: Decimal,
}

impl ExpenseRecord {
    pub fn new(date: impl Into<String>, category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount,
        }
    }

    /// Category label used for grouping. Blank labels fold into `Uncategorized`.
    pub fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }
}

/// Sum amounts per category label. Grouping is exact and case-sensitive.
/// A category whose sum leaves the `Decimal` range is an `InvalidInput` error.
pub fn group_sums<I>(records: I) -> Result<BTreeMap<String, Decimal>, DashError>
where
    I: IntoIterator<Item = ExpenseRecord>,
{
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in records {
        let label = record.category_label();
        let sum = sums.entry(label.to_string()).or_insert(Decimal::ZERO);
        *sum = sum.checked_add(record.amount).ok_or_else(|| {
            DashError::InvalidInput(format!(
                "expenses in '{label}' exceed the supported amount range"
            ))
        })?;
    }
    Ok(sums)
}
