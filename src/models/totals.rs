use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::DashError;

/// Reserved label of the single-entry mapping returned for an empty period.
pub const NO_DATA_LABEL: &str = "No Data";

/// Summed expense amount per category for one period.
///
/// Entries iterate in ascending label order, which is also the tie-break
/// order for anything that picks a maximum. A period without records is
/// represented by the sentinel mapping `{"No Data": 0}`; `is_no_data`
/// distinguishes it from a real category that happens to sum to zero.
/// The grand total is computed once on construction and always fits a
/// `Decimal`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: BTreeMap<String, Decimal>,
    total: Decimal,
    no_data: bool,
}

impl CategoryTotals {
    pub fn new(entries: BTreeMap<String, Decimal>) -> Result<Self, DashError> {
        let total = entries
            .values()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
            .ok_or_else(|| {
                DashError::InvalidInput("category totals exceed the supported amount range".into())
            })?;
        Ok(Self {
            entries,
            total,
            no_data: false,
        })
    }

    pub fn no_data() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(NO_DATA_LABEL.to_string(), Decimal::ZERO);
        Self {
            entries,
            total: Decimal::ZERO,
            no_data: true,
        }
    }

    /// Replace an empty mapping with the sentinel.
    pub fn or_no_data(self) -> Self {
        if self.entries.is_empty() {
            Self::no_data()
        } else {
            self
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.no_data
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// Fixture builder: collect pairs, summing repeated labels.
#[cfg(test)]
impl<S: Into<String>> FromIterator<(S, Decimal)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut entries: BTreeMap<String, Decimal> = BTreeMap::new();
        for (label, amount) in iter {
            *entries.entry(label.into()).or_insert(Decimal::ZERO) += amount;
        }
        let total = entries.values().copied().sum();
        Self {
            entries,
            total,
            no_data: false,
        }
    }
}
