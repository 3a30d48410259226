#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::aggregate::{Aggregator, PeriodCache};
use crate::db::{ExpenseStore, MemoryStore};
use crate::models::ExpenseRecord;
use crate::settings::Settings;

fn setup() -> (App, DynAggregator) {
    let store = MemoryStore::with(vec![
        ExpenseRecord::new("2024-03-03", "Food", dec!(150.50)),
        ExpenseRecord::new("2024-03-01", "Rent", dec!(800.00)),
        ExpenseRecord::new("2023-11-20", "Gifts", dec!(60.00)),
    ]);
    let boxed: Box<dyn ExpenseStore> = Box::new(store);
    let mut agg = Aggregator::with_cache(boxed, PeriodCache::new(4, None));
    let mut app = App::new(&Settings::default());
    app.set_period(Period::new(3, 2024).unwrap(), &mut agg);
    (app, agg)
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("month", "month"), 0);
    assert_eq!(levenshtein("mnth", "month"), 1);
    assert_eq!(levenshtein("", "year"), 4);
    assert_eq!(levenshtein("kitten", "sitting"), 3);
}

#[test]
fn test_find_closest_skips_aliases() {
    assert_eq!(find_closest("budgte"), "budget");
    assert_eq!(find_closest("refrsh"), "refresh");
    assert_eq!(find_closest("yr"), "year");
}

#[test]
fn test_every_alias_has_long_form() {
    for (name, cmd) in COMMANDS.iter().filter(|(n, _)| n.len() == 1) {
        assert!(
            COMMANDS
                .iter()
                .any(|(long, c)| long.len() > 1 && c.run as usize == cmd.run as usize),
            "alias :{name} has no long form"
        );
    }
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut agg) = setup();
    handle_command("mont 4", &mut app, &mut agg).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :mont. Did you mean :month?"
    );
}

#[test]
fn test_empty_command_is_ignored() {
    let (mut app, mut agg) = setup();
    app.set_status("unchanged");
    handle_command("   ", &mut app, &mut agg).unwrap();
    assert_eq!(app.status_message, "unchanged");
}

#[test]
fn test_quit_and_help() {
    let (mut app, mut agg) = setup();
    handle_command("help", &mut app, &mut agg).unwrap();
    assert!(app.show_help);
    handle_command("q", &mut app, &mut agg).unwrap();
    assert!(!app.running);
}

// ── :month / :year ─────────────────────────────────────────

#[test]
fn test_month_number_keeps_year() {
    let (mut app, mut agg) = setup();
    handle_command("month 11", &mut app, &mut agg).unwrap();
    assert_eq!(app.period, Period::new(11, 2024).unwrap());
    assert_eq!(app.status_message, "Switched to November 2024");
    assert!(app.totals.is_no_data());
}

#[test]
fn test_month_full_period() {
    let (mut app, mut agg) = setup();
    handle_command("m 2023-11", &mut app, &mut agg).unwrap();
    assert_eq!(app.period, Period::new(11, 2023).unwrap());
    assert_eq!(app.totals.get("Gifts"), Some(dec!(60.00)));
}

#[test]
fn test_month_invalid_leaves_period() {
    let (mut app, mut agg) = setup();
    handle_command("month 13", &mut app, &mut agg).unwrap();
    assert_eq!(app.period, Period::new(3, 2024).unwrap());
    assert!(app.status_message.contains("between 1 and 12"));

    handle_command("month march", &mut app, &mut agg).unwrap();
    assert!(app.status_message.contains("expected YYYY-MM"));
}

#[test]
fn test_year_out_of_range() {
    let (mut app, mut agg) = setup();
    handle_command("year 2031", &mut app, &mut agg).unwrap();
    assert_eq!(app.period.year(), 2024);
    assert!(app.status_message.contains("outside 2020-2029"));

    handle_command("y 2023", &mut app, &mut agg).unwrap();
    assert_eq!(app.period, Period::new(3, 2023).unwrap());

    handle_command("year abc", &mut app, &mut agg).unwrap();
    assert!(app.status_message.starts_with("Usage: :year"));
}

// ── :budget ────────────────────────────────────────────────

#[test]
fn test_budget_sets_limit() {
    let (mut app, mut agg) = setup();
    handle_command("budget $1,000", &mut app, &mut agg).unwrap();
    assert_eq!(app.budget_limit, dec!(1000));
    assert_eq!(app.status_message, "Budget limit: $1,000.00");
    assert_eq!(app.analysis.as_ref().unwrap().remaining, dec!(49.50));
}

#[test]
fn test_budget_zero_clears() {
    let (mut app, mut agg) = setup();
    handle_command("b 0", &mut app, &mut agg).unwrap();
    assert_eq!(app.budget_limit, Decimal::ZERO);
    assert_eq!(app.status_message, "Budget limit cleared");
    assert!(!app.analysis.as_ref().unwrap().has_limit());
}

#[test]
fn test_budget_rejects_bad_input() {
    let (mut app, mut agg) = setup();
    handle_command("budget -5", &mut app, &mut agg).unwrap();
    assert_eq!(app.budget_limit, dec!(500));
    assert!(app.status_message.contains("must not be negative"));

    handle_command("budget lots", &mut app, &mut agg).unwrap();
    assert_eq!(app.status_message, "Invalid amount: lots");
}

// ── :refresh ───────────────────────────────────────────────

#[test]
fn test_refresh_reloads() {
    let (mut app, mut agg) = setup();
    handle_command("refresh", &mut app, &mut agg).unwrap();
    assert_eq!(app.status_message, "Reloaded 2024-03");
    assert_eq!(app.totals.total(), dec!(950.50));
}

#[test]
fn test_refresh_single_period() {
    let (mut app, mut agg) = setup();
    handle_command("refresh 2024-03", &mut app, &mut agg).unwrap();
    assert_eq!(app.status_message, "Reloaded 2024-03");

    handle_command("refresh soon", &mut app, &mut agg).unwrap();
    assert!(app.status_message.contains("expected YYYY-MM"));
}

#[test]
fn test_next_prev_month_commands() {
    let (mut app, mut agg) = setup();
    handle_command("next-month", &mut app, &mut agg).unwrap();
    assert_eq!(app.period, Period::new(4, 2024).unwrap());
    handle_command("prev-month", &mut app, &mut agg).unwrap();
    handle_command("prev-month", &mut app, &mut agg).unwrap();
    assert_eq!(app.period, Period::new(2, 2024).unwrap());
}
