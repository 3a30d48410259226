use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::aggregate::DynAggregator;
use crate::analysis::{analyze, detail_rows, largest_category, DetailRows};
use crate::error::DashError;
use crate::models::{BudgetAnalysis, CategoryTotals, Period};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Selection
    pub(crate) period: Period,
    pub(crate) min_year: i32,
    pub(crate) max_year: i32,
    pub(crate) budget_limit: Decimal,
    pub(crate) budget_step: Decimal,

    // Computed for the selected period
    pub(crate) totals: CategoryTotals,
    pub(crate) analysis: Option<BudgetAnalysis>,
    pub(crate) error: Option<String>,

    // Breakdown table cursor
    pub(crate) row_index: usize,
    pub(crate) row_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(settings: &Settings) -> Self {
        let now = Period::current();
        let year = settings.clamp_year(now.year());
        let period = now.with_year(year).unwrap_or(now);

        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            period,
            min_year: settings.min_year,
            max_year: settings.max_year,
            budget_limit: settings.default_budget,
            budget_step: settings.budget_step,

            totals: CategoryTotals::default(),
            analysis: None,
            error: None,

            row_index: 0,
            row_scroll: 0,

            visible_rows: 10,
        }
    }

    /// Re-read totals for the selected period and recompute the budget.
    pub(crate) fn refresh(&mut self, agg: &mut DynAggregator) {
        match agg.aggregate_period(self.period) {
            Ok(totals) => {
                self.totals = totals;
                self.error = None;
            }
            Err(e) => {
                warn!(period = %self.period, error = %e, "aggregation failed");
                self.totals = CategoryTotals::default();
                self.error = Some(e.to_string());
            }
        }
        self.row_index = 0;
        self.row_scroll = 0;
        self.reanalyze();
    }

    /// Recompute the budget analysis against the current totals.
    pub(crate) fn reanalyze(&mut self) {
        match analyze(&self.totals, self.budget_limit) {
            Ok(analysis) => self.analysis = Some(analysis),
            Err(e) => {
                self.analysis = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub(crate) fn set_period(&mut self, period: Period, agg: &mut DynAggregator) -> bool {
        if !(self.min_year..=self.max_year).contains(&period.year()) {
            self.set_status(format!(
                "Year {} is outside {}-{}",
                period.year(),
                self.min_year,
                self.max_year
            ));
            return false;
        }
        self.period = period;
        self.refresh(agg);
        true
    }

    pub(crate) fn next_month(&mut self, agg: &mut DynAggregator) {
        let next = self.period.next();
        if self.set_period(next, agg) {
            self.announce_period();
        }
    }

    pub(crate) fn prev_month(&mut self, agg: &mut DynAggregator) {
        let prev = self.period.prev();
        if self.set_period(prev, agg) {
            self.announce_period();
        }
    }

    pub(crate) fn shift_year(&mut self, delta: i32, agg: &mut DynAggregator) {
        match self.period.with_year(self.period.year() + delta) {
            Ok(p) => {
                if self.set_period(p, agg) {
                    self.announce_period();
                }
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub(crate) fn set_budget(&mut self, limit: Decimal) -> Result<(), DashError> {
        if limit < Decimal::ZERO {
            return Err(DashError::InvalidInput(format!(
                "budget limit must not be negative, got {limit}"
            )));
        }
        self.budget_limit = limit;
        self.reanalyze();
        info!(limit = %limit, "budget limit changed");
        Ok(())
    }

    /// Move the budget by `steps` increments, never below zero.
    pub(crate) fn adjust_budget(&mut self, steps: i64) {
        let next = (self.budget_limit + self.budget_step * Decimal::from(steps)).max(Decimal::ZERO);
        if self.set_budget(next).is_ok() {
            self.set_status(format!(
                "Budget limit: {}",
                crate::ui::util::format_amount(next)
            ));
        }
    }

    pub(crate) fn largest(&self) -> Option<(&str, Decimal)> {
        largest_category(&self.totals).ok()
    }

    pub(crate) fn rows(&self) -> DetailRows<'_> {
        detail_rows(&self.totals)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn announce_period(&mut self) {
        let label = format!("{} {}", self.period.month_name(), self.period.year());
        self.set_status(format!("Showing {label}"));
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
