pub(crate) const EXPENSES_TABLE: &str = "expenses";

/// Columns the aggregation query reads. Extra columns are ignored.
pub(crate) const REQUIRED_COLUMNS: &[&str] = &["date", "category", "amount"];

/// Layout of the externally populated expense table, used for test fixtures.
#[cfg(test)]
pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    date     TEXT NOT NULL,
    category TEXT NOT NULL,
    amount   REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
"#;
