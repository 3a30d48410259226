use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::models::{CategoryTotals, Period};

/// Bounded per-period cache of aggregation results.
///
/// Entries older than `ttl` are treated as missing, which bounds how long a
/// change in the store can go unnoticed. When full, the oldest inserted
/// period is evicted. Capacity 0 disables caching.
#[derive(Debug)]
pub(crate) struct PeriodCache {
    capacity: usize,
    ttl: Option<Duration>,
    entries: HashMap<Period, (Instant, CategoryTotals)>,
    order: VecDeque<Period>,
}

impl PeriodCache {
    pub(crate) fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            capacity,
            ttl,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    #[cfg(test)]
    pub(crate) fn disabled() -> Self {
        Self::new(0, None)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn get(&mut self, period: Period) -> Option<CategoryTotals> {
        let expired = match self.entries.get(&period) {
            None => return None,
            Some((stored_at, _)) => self.ttl.is_some_and(|ttl| stored_at.elapsed() >= ttl),
        };
        if expired {
            debug!(%period, "cached totals expired");
            self.invalidate(period);
            return None;
        }
        self.entries.get(&period).map(|(_, totals)| totals.clone())
    }

    pub(crate) fn insert(&mut self, period: Period, totals: CategoryTotals) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.contains_key(&period) {
            self.order.retain(|p| *p != period);
        } else if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!(period = %oldest, "evicted cached totals");
            }
        }
        self.order.push_back(period);
        self.entries.insert(period, (Instant::now(), totals));
    }

    pub(crate) fn invalidate(&mut self, period: Period) {
        self.entries.remove(&period);
        self.order.retain(|p| *p != period);
    }

    pub(crate) fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.order.clear();
        info!(dropped, "cleared aggregation cache");
    }
}

impl Default for PeriodCache {
    fn default() -> Self {
        Self::new(12, None)
    }
}
