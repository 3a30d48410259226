mod budget;
mod expense;
mod period;
mod totals;

pub use budget::{BudgetAnalysis, BudgetStatus};
pub use expense::{group_sums, ExpenseRecord};
#[cfg(test)]
pub use expense::UNCATEGORIZED;
pub use period::Period;
pub use totals::CategoryTotals;
#[cfg(test)]
pub use totals::NO_DATA_LABEL;
