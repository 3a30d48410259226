use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::models::CategoryTotals;

/// One line of the breakdown table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DetailRow<'a> {
    pub(crate) category: &'a str,
    pub(crate) amount: Decimal,
    /// Share of the period total; `None` when the total is zero.
    pub(crate) percent_of_total: Option<Decimal>,
}

/// Breakdown rows ordered by amount, largest first.
///
/// Only the ordering is computed up front; percentages are derived as rows
/// are pulled. Clone the iterator to walk the rows again.
#[derive(Debug, Clone)]
pub(crate) struct DetailRows<'a> {
    sorted: Vec<(&'a str, Decimal)>,
    total: Decimal,
    pos: usize,
}

pub(crate) fn detail_rows(totals: &CategoryTotals) -> DetailRows<'_> {
    let mut sorted: Vec<(&str, Decimal)> = totals.iter().collect();
    // Amount descending, then label ascending.
    sorted.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    DetailRows {
        sorted,
        total: totals.total(),
        pos: 0,
    }
}

impl DetailRows<'_> {
    pub(crate) fn total(&self) -> Decimal {
        self.total
    }
}

impl<'a> Iterator for DetailRows<'a> {
    type Item = DetailRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (category, amount) = *self.sorted.get(self.pos)?;
        self.pos += 1;
        let percent_of_total = if self.total.is_zero() {
            None
        } else {
            amount
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(self.total))
        };
        Some(DetailRow {
            category,
            amount,
            percent_of_total,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.sorted.len() - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for DetailRows<'_> {}
