#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use std::path::Path;

use super::*;

#[test]
fn test_defaults() {
    let s = Settings::default();
    assert_eq!(s.default_budget, dec!(500));
    assert_eq!(s.budget_step, dec!(10));
    assert_eq!(s.min_year, 2020);
    assert_eq!(s.max_year, 2029);
    assert!(s.db_path.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn test_empty_file_keeps_defaults() {
    let s = Settings::from_toml("").unwrap();
    assert_eq!(s.default_budget, dec!(500));
    assert_eq!(s.cache_capacity, 12);
    assert_eq!(s.log_level, "info");
}

#[test]
fn test_file_overrides() {
    let s = Settings::from_toml(
        r#"
        db_path = "/tmp/my-expenses.db"
        default_budget = 1200
        budget_step = 2.5
        cache_capacity = 0
        min_year = 2015
        log_level = "debug"
        "#,
    )
    .unwrap();
    assert_eq!(s.db_path.as_deref(), Some(Path::new("/tmp/my-expenses.db")));
    assert_eq!(s.default_budget, dec!(1200));
    assert_eq!(s.budget_step, dec!(2.5));
    assert_eq!(s.cache_capacity, 0);
    assert_eq!(s.min_year, 2015);
    assert_eq!(s.max_year, 2029);
    assert_eq!(s.log_level, "debug");
}

#[test]
fn test_negative_budget_rejected() {
    assert!(Settings::from_toml("default_budget = -5").is_err());
}

#[test]
fn test_zero_step_rejected() {
    assert!(Settings::from_toml("budget_step = 0").is_err());
}

#[test]
fn test_inverted_year_range_rejected() {
    assert!(Settings::from_toml("min_year = 2030\nmax_year = 2020").is_err());
    assert!(Settings::from_toml("min_year = 0").is_err());
}

#[test]
fn test_explicit_db_path_wins() {
    let s = Settings {
        db_path: Some(PathBuf::from("/data/x.db")),
        ..Settings::default()
    };
    assert_eq!(s.resolve_db_path().unwrap(), PathBuf::from("/data/x.db"));
}

#[test]
fn test_clamp_year() {
    let s = Settings::default();
    assert_eq!(s.clamp_year(2010), 2020);
    assert_eq!(s.clamp_year(2024), 2024);
    assert_eq!(s.clamp_year(2050), 2029);
}

#[test]
fn test_period_cache_capacity() {
    let s = Settings {
        cache_capacity: 0,
        ..Settings::default()
    };
    let mut cache = s.period_cache();
    let p = crate::models::Period::new(1, 2024).unwrap();
    cache.insert(p, crate::models::CategoryTotals::no_data());
    assert_eq!(cache.len(), 0);
}
