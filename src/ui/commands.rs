use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::App;
use super::util::format_amount;
use crate::aggregate::DynAggregator;
use crate::models::Period;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut DynAggregator) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseDash", cmd_quit, r);
    register_command!("quit", "Quit ExpenseDash", cmd_quit, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("m", "Set month (e.g. :m 3 or :m 2024-03)", cmd_month, r);
    register_command!(
        "month",
        "Set month (e.g. :month 3 or :month 2024-03)",
        cmd_month,
        r
    );
    register_command!("y", "Set year (e.g. :y 2024)", cmd_year, r);
    register_command!("year", "Set year (e.g. :year 2024)", cmd_year, r);
    register_command!("b", "Set budget limit (e.g. :b 750)", cmd_budget, r);
    register_command!(
        "budget",
        "Set budget limit (e.g. :budget 750, 0 for none)",
        cmd_budget,
        r
    );
    register_command!("r", "Re-read expenses (e.g. :r or :r 2024-03)", cmd_refresh, r);
    register_command!(
        "refresh",
        "Re-read expenses, all months or one (e.g. :refresh 2024-03)",
        cmd_refresh,
        r
    );
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    agg: &mut DynAggregator,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, agg)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _agg: &mut DynAggregator) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _agg: &mut DynAggregator) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, agg: &mut DynAggregator) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :month <1-12> or :month <YYYY-MM>");
        return Ok(());
    }

    // "3" keeps the selected year, "2024-03" sets both
    let parsed = if args.contains('-') {
        Period::parse(args)
    } else {
        match args.parse::<u32>() {
            Ok(month) => Period::new(month, app.period.year()),
            Err(_) => Period::parse(args),
        }
    };

    match parsed {
        Ok(period) => {
            if app.set_period(period, agg) {
                app.set_status(format!(
                    "Switched to {} {}",
                    period.month_name(),
                    period.year()
                ));
            }
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, agg: &mut DynAggregator) -> anyhow::Result<()> {
    let year = match args.parse::<i32>() {
        Ok(y) => y,
        Err(_) => {
            app.set_status(format!(
                "Usage: :year <YYYY> ({}-{})",
                app.min_year, app.max_year
            ));
            return Ok(());
        }
    };

    match app.period.with_year(year) {
        Ok(period) => {
            if app.set_period(period, agg) {
                app.set_status(format!("Switched to {year}"));
            }
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, _agg: &mut DynAggregator) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "Budget limit: {}. Usage: :budget <amount>",
            format_amount(app.budget_limit)
        ));
        return Ok(());
    }

    let cleaned = args.trim_start_matches('$').replace(',', "");
    let amount = match Decimal::from_str(&cleaned) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {args}"));
            return Ok(());
        }
    };

    match app.set_budget(amount) {
        Ok(()) if amount.is_zero() => app.set_status("Budget limit cleared"),
        Ok(()) => app.set_status(format!("Budget limit: {}", format_amount(amount))),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_refresh(args: &str, app: &mut App, agg: &mut DynAggregator) -> anyhow::Result<()> {
    if args.is_empty() {
        agg.refresh();
    } else {
        match Period::parse(args) {
            Ok(period) => agg.invalidate(period),
            Err(e) => {
                app.set_status(e.to_string());
                return Ok(());
            }
        }
    }
    app.refresh(agg);
    if app.error.is_none() {
        app.set_status(format!("Reloaded {}", app.period));
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, agg: &mut DynAggregator) -> anyhow::Result<()> {
    app.next_month(agg);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, agg: &mut DynAggregator) -> anyhow::Result<()> {
    app.prev_month(agg);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
