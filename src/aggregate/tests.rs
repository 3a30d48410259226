#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

use super::*;
use crate::db::MemoryStore;
use crate::models::{ExpenseRecord, NO_DATA_LABEL};

fn march_records() -> Vec<ExpenseRecord> {
    vec![
        ExpenseRecord::new("2024-03-03", "Food", dec!(120.50)),
        ExpenseRecord::new("2024-03-01", "Rent", dec!(800.00)),
        ExpenseRecord::new("2024-03-17", "Food", dec!(30.00)),
        ExpenseRecord::new("2024-04-01", "Food", dec!(55.00)),
        ExpenseRecord::new("2023-03-01", "Rent", dec!(750.00)),
    ]
}

// ── Aggregation ───────────────────────────────────────────────

#[test]
fn test_aggregate_march_scenario() {
    let mut agg = Aggregator::new(MemoryStore::with(march_records()));
    let totals = agg.aggregate(3, 2024).unwrap();

    assert!(!totals.is_no_data());
    assert_eq!(totals.len(), 2);
    assert_eq!(totals.get("Food"), Some(dec!(150.50)));
    assert_eq!(totals.get("Rent"), Some(dec!(800.00)));
    assert_eq!(totals.total(), dec!(950.50));
}

#[test]
fn test_aggregate_total_matches_records_in_period() {
    let records = march_records();
    let expected: Decimal = records
        .iter()
        .filter(|r| r.date.starts_with("2024-03-"))
        .map(|r| r.amount)
        .sum();

    let mut agg = Aggregator::new(MemoryStore::with(records));
    assert_eq!(agg.aggregate(3, 2024).unwrap().total(), expected);
}

#[test]
fn test_aggregate_empty_period_returns_sentinel() {
    let mut agg = Aggregator::new(MemoryStore::with(march_records()));
    for (month, year) in [(2, 2024), (12, 1999), (7, 3000)] {
        let totals = agg.aggregate(month, year).unwrap();
        assert!(totals.is_no_data());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get(NO_DATA_LABEL), Some(Decimal::ZERO));
    }
}

#[test]
fn test_aggregate_empty_store_returns_sentinel() {
    let mut agg = Aggregator::new(MemoryStore::default());
    assert_eq!(agg.aggregate(1, 2024).unwrap(), CategoryTotals::no_data());
}

#[test]
fn test_aggregate_rejects_invalid_month() {
    let mut agg = Aggregator::new(MemoryStore::default());
    assert!(matches!(agg.aggregate(0, 2024), Err(DashError::InvalidInput(_))));
    assert!(matches!(agg.aggregate(13, 2024), Err(DashError::InvalidInput(_))));
    // Rejected before reaching the store
    assert_eq!(agg.store().calls.get(), 0);
}

#[test]
fn test_store_failure_is_not_masked_by_sentinel() {
    let store = MemoryStore::default();
    store.offline.set(true);
    let mut agg = Aggregator::new(store);

    let err = agg.aggregate(3, 2024).unwrap_err();
    assert!(matches!(err, DashError::StoreUnavailable(_)));
}

#[test]
fn test_total_overflow_across_categories_is_an_error() {
    let store = MemoryStore::with(vec![
        ExpenseRecord::new("2024-03-01", "Food", Decimal::MAX),
        ExpenseRecord::new("2024-03-02", "Rent", dec!(1)),
    ]);
    let mut agg = Aggregator::with_cache(store, PeriodCache::new(4, None));

    assert!(matches!(agg.aggregate(3, 2024), Err(DashError::InvalidInput(_))));
    // Nothing cached, the next call queries again
    assert!(agg.aggregate(3, 2024).is_err());
    assert_eq!(agg.store().calls.get(), 2);
}

#[test]
fn test_uncached_aggregator_sees_new_records() {
    let mut agg = Aggregator::new(MemoryStore::with(march_records()));
    assert_eq!(agg.aggregate(3, 2024).unwrap().total(), dec!(950.50));

    agg.store()
        .push(ExpenseRecord::new("2024-03-30", "Fun", dec!(49.50)));
    assert_eq!(agg.aggregate(3, 2024).unwrap().total(), dec!(1000.00));
    assert_eq!(agg.store().calls.get(), 2);
}

// ── Caching ───────────────────────────────────────────────────

#[test]
fn test_cache_avoids_repeat_queries() {
    let mut agg = Aggregator::with_cache(
        MemoryStore::with(march_records()),
        PeriodCache::new(4, None),
    );
    let first = agg.aggregate(3, 2024).unwrap();
    let second = agg.aggregate(3, 2024).unwrap();
    assert_eq!(first, second);
    assert_eq!(agg.store().calls.get(), 1);

    agg.aggregate(4, 2024).unwrap();
    assert_eq!(agg.store().calls.get(), 2);
}

#[test]
fn test_cache_staleness_until_refresh() {
    let mut agg = Aggregator::with_cache(
        MemoryStore::with(march_records()),
        PeriodCache::new(4, None),
    );
    assert_eq!(agg.aggregate(3, 2024).unwrap().total(), dec!(950.50));

    agg.store()
        .push(ExpenseRecord::new("2024-03-30", "Fun", dec!(49.50)));
    // Known staleness window: cached value is served until invalidated
    assert_eq!(agg.aggregate(3, 2024).unwrap().total(), dec!(950.50));

    agg.refresh();
    assert_eq!(agg.aggregate(3, 2024).unwrap().total(), dec!(1000.00));
}

#[test]
fn test_invalidate_single_period() {
    let mut agg = Aggregator::with_cache(
        MemoryStore::with(march_records()),
        PeriodCache::new(4, None),
    );
    agg.aggregate(3, 2024).unwrap();
    agg.aggregate(4, 2024).unwrap();
    agg.invalidate(Period::new(3, 2024).unwrap());

    agg.aggregate(3, 2024).unwrap();
    agg.aggregate(4, 2024).unwrap();
    assert_eq!(agg.store().calls.get(), 3);
}

#[test]
fn test_failures_are_not_cached() {
    let store = MemoryStore::with(march_records());
    store.offline.set(true);
    let mut agg = Aggregator::with_cache(store, PeriodCache::new(4, None));

    assert!(agg.aggregate(3, 2024).is_err());
    agg.store().offline.set(false);
    assert_eq!(agg.aggregate(3, 2024).unwrap().total(), dec!(950.50));
}

#[test]
fn test_zero_ttl_always_requeries() {
    let mut agg = Aggregator::with_cache(
        MemoryStore::with(march_records()),
        PeriodCache::new(4, Some(Duration::ZERO)),
    );
    agg.aggregate(3, 2024).unwrap();
    agg.aggregate(3, 2024).unwrap();
    assert_eq!(agg.store().calls.get(), 2);
}

// ── PeriodCache ───────────────────────────────────────────────

fn p(month: u32) -> Period {
    Period::new(month, 2024).unwrap()
}

#[test]
fn test_cache_evicts_oldest_when_full() {
    let mut cache = PeriodCache::new(2, None);
    cache.insert(p(1), CategoryTotals::no_data());
    cache.insert(p(2), CategoryTotals::no_data());
    cache.insert(p(3), CategoryTotals::no_data());

    assert_eq!(cache.len(), 2);
    assert!(cache.get(p(1)).is_none());
    assert!(cache.get(p(2)).is_some());
    assert!(cache.get(p(3)).is_some());
}

#[test]
fn test_cache_reinsert_refreshes_position() {
    let mut cache = PeriodCache::new(2, None);
    cache.insert(p(1), CategoryTotals::no_data());
    cache.insert(p(2), CategoryTotals::no_data());
    cache.insert(p(1), CategoryTotals::no_data());
    cache.insert(p(3), CategoryTotals::no_data());

    assert!(cache.get(p(1)).is_some());
    assert!(cache.get(p(2)).is_none());
}

#[test]
fn test_disabled_cache_stores_nothing() {
    let mut cache = PeriodCache::disabled();
    cache.insert(p(1), CategoryTotals::no_data());
    assert_eq!(cache.len(), 0);
    assert!(cache.get(p(1)).is_none());
}

#[test]
fn test_cache_clear() {
    let mut cache = PeriodCache::default();
    cache.insert(p(1), CategoryTotals::no_data());
    cache.insert(p(2), CategoryTotals::no_data());
    cache.clear();
    assert_eq!(cache.len(), 0);
}
