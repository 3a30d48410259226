use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::aggregate::DynAggregator;
use crate::analysis::{analyze, detail_rows, largest_category};
use crate::models::Period;
use crate::settings::Settings;
use crate::ui::util::{budget_message, format_amount, format_percent};

/// Global flags that take a value; skipped when looking for the command.
const VALUE_FLAGS: [&str; 1] = ["--db"];

pub(crate) fn as_cli(args: &[String], settings: &Settings, agg: &mut DynAggregator) -> Result<()> {
    let rest = strip_global_flags(args.get(1..).unwrap_or_default());
    let Some(command) = rest.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "summary" | "s" => cli_summary(&rest[1..], settings, agg),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensedash {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

/// Value of `--db <path>` anywhere on the command line.
pub(crate) fn db_override(args: &[String]) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| shellexpand(&w[1]))
}

/// True when the arguments name a command rather than only global flags.
pub(crate) fn has_command(args: &[String]) -> bool {
    !strip_global_flags(args.get(1..).unwrap_or_default()).is_empty()
}

fn strip_global_flags(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else {
            out.push(arg.clone());
        }
    }
    out
}

fn print_usage() {
    println!("ExpenseDash - monthly expense dashboard over a SQLite database");
    println!();
    println!("Usage: expensedash [--db <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive dashboard");
    println!("  summary [YYYY-MM]             Print a monthly summary (default: current month)");
    println!("    --budget, -b <amount>       Budget limit to compare against");
    println!("  --db <path>                   Expense database (default: data directory)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// Splits `summary` arguments into an optional period and an optional
/// `--budget` amount. Flags and the period may appear in any order.
pub(crate) fn parse_summary_args(args: &[String]) -> Result<(Option<Period>, Option<Decimal>)> {
    let mut period = None;
    let mut budget = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--budget" | "-b" => {
                let value = iter.next().context("Missing value for --budget")?;
                let raw = value.trim_start_matches('$').replace(',', "");
                let amount = Decimal::from_str(&raw)
                    .with_context(|| format!("Invalid budget amount: {value}"))?;
                budget = Some(amount);
            }
            flag if flag.starts_with("--") => anyhow::bail!("Unknown option for summary: {flag}"),
            month => {
                if period.is_some() {
                    anyhow::bail!("Unexpected argument: {month}");
                }
                period = Some(Period::parse(month)?);
            }
        }
    }
    Ok((period, budget))
}

fn cli_summary(args: &[String], settings: &Settings, agg: &mut DynAggregator) -> Result<()> {
    let (period, budget) = parse_summary_args(args)?;
    let period = period.unwrap_or_else(Period::current);
    let budget = budget.unwrap_or(settings.default_budget);

    let totals = agg.aggregate(period.month(), period.year())?;
    let analysis = analyze(&totals, budget)?;
    let (largest, largest_amount) = largest_category(&totals)?;
    let category_count = if totals.is_no_data() { 0 } else { totals.len() };

    println!(
        "ExpenseDash - {} {}",
        period.month_name(),
        period.year()
    );
    println!("{}", "─".repeat(44));
    println!("  Total Expenses:   {}", format_amount(totals.total()));
    println!("  Categories:       {category_count}");
    println!(
        "  Largest:          {largest} ({})",
        format_amount(largest_amount)
    );

    if !totals.is_no_data() {
        println!();
        println!("  {:<24} {:>14} {:>10}", "Category", "Amount", "Share");
        let rows = detail_rows(&totals);
        let total = rows.total();
        for row in rows {
            println!(
                "  {:<24} {:>14} {:>10}",
                row.category,
                format_amount(row.amount),
                format_percent(row.percent_of_total)
            );
        }
        println!("  {:<24} {:>14}", "Total", format_amount(total));
    }

    println!();
    println!("Budget Analysis:");
    println!("  Budget Limit:     {}", format_amount(analysis.limit));
    println!("  Remaining:        {}", format_amount(analysis.remaining));
    println!("  Budget Used:      {}", format_percent(analysis.usage_percent));
    println!("  Status:           {}", analysis.status);
    println!("  {}", budget_message(&analysis));

    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
