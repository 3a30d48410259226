//! Per-period category totals over an [`ExpenseStore`].

mod cache;

pub(crate) use cache::PeriodCache;

use tracing::debug;

use crate::db::ExpenseStore;
use crate::error::DashError;
use crate::models::{CategoryTotals, Period};

/// Aggregator over any store, as held by the presentation layer.
pub(crate) type DynAggregator = Aggregator<Box<dyn ExpenseStore>>;

pub(crate) struct Aggregator<S> {
    store: S,
    cache: PeriodCache,
}

impl<S: ExpenseStore> Aggregator<S> {
    /// Aggregator that always queries the store.
    #[cfg(test)]
    pub(crate) fn new(store: S) -> Self {
        Self::with_cache(store, PeriodCache::disabled())
    }

    pub(crate) fn with_cache(store: S, cache: PeriodCache) -> Self {
        Self { store, cache }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Totals for `month` (1-12) of `year`.
    pub(crate) fn aggregate(&mut self, month: u32, year: i32) -> Result<CategoryTotals, DashError> {
        let period = Period::new(month, year)?;
        self.aggregate_period(period)
    }

    /// Totals for `period`, or the "No Data" sentinel when nothing matched.
    /// Store failures are returned as-is and never cached.
    pub(crate) fn aggregate_period(&mut self, period: Period) -> Result<CategoryTotals, DashError> {
        if let Some(totals) = self.cache.get(period) {
            debug!(%period, "aggregation cache hit");
            return Ok(totals);
        }

        let sums = self.store.sum_by_category(period)?;
        let totals = CategoryTotals::new(sums)?.or_no_data();
        self.cache.insert(period, totals.clone());
        debug!(
            %period,
            categories = totals.len(),
            no_data = totals.is_no_data(),
            cached = self.cache.len(),
            "aggregated expenses"
        );
        Ok(totals)
    }

    /// Drop the cached totals for one period.
    pub(crate) fn invalidate(&mut self, period: Period) {
        self.cache.invalidate(period);
    }

    /// Drop every cached period so the next call re-reads the store.
    pub(crate) fn refresh(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests;
