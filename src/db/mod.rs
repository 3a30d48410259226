#[cfg(test)]
mod memory;
mod schema;

#[cfg(test)]
pub(crate) use memory::MemoryStore;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::DashError;
use crate::models::{group_sums, ExpenseRecord, Period};

/// Read access to persisted expense records.
pub(crate) trait ExpenseStore {
    /// Sum of `amount` per category over records dated within `period`.
    /// An empty map means the query succeeded and matched nothing.
    fn sum_by_category(&self, period: Period) -> Result<BTreeMap<String, Decimal>, DashError>;
}

impl<T: ExpenseStore + ?Sized> ExpenseStore for Box<T> {
    fn sum_by_category(&self, period: Period) -> Result<BTreeMap<String, Decimal>, DashError> {
        (**self).sum_by_category(period)
    }
}

/// SQLite-backed store. Holds only the path: each query opens a read-only
/// connection and drops it before returning.
#[derive(Debug, Clone)]
pub(crate) struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, DashError> {
        if !self.path.is_file() {
            return Err(DashError::StoreUnavailable(format!(
                "database not found: {}",
                self.path.display()
            )));
        }
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            DashError::StoreUnavailable(format!(
                "failed to open database {}: {e}",
                self.path.display()
            ))
        })
    }

    fn check_schema(conn: &Connection) -> Result<(), DashError> {
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
        let columns = stmt
            .query_map(params![schema::EXPENSES_TABLE], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(DashError::StoreUnavailable(format!(
                "table '{}' not found",
                schema::EXPENSES_TABLE
            )));
        }
        let missing: Vec<&str> = schema::REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|required| !columns.iter().any(|c| c.eq_ignore_ascii_case(required)))
            .collect();
        if !missing.is_empty() {
            return Err(DashError::StoreUnavailable(format!(
                "table '{}' is missing column(s): {}",
                schema::EXPENSES_TABLE,
                missing.join(", ")
            )));
        }
        Ok(())
    }

    fn records_in_period(
        conn: &Connection,
        period: Period,
    ) -> Result<Vec<ExpenseRecord>, DashError> {
        // strftime compares the whole "YYYY-MM" key, so month 1 never matches 10-12.
        let mut stmt = conn.prepare(
            "SELECT CAST(date AS TEXT), CAST(category AS TEXT), amount
             FROM expenses
             WHERE strftime('%Y-%m', date) = ?1",
        )?;
        let rows = stmt.query_map(params![period.to_string()], |row| {
            let date: Option<String> = row.get(0)?;
            let category: Option<String> = row.get(1)?;
            let amount = amount_from_sql(row.get_ref(2)?);
            Ok((date.unwrap_or_default(), category.unwrap_or_default(), amount))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (date, category, amount) = row?;
            match amount {
                Some(amount) => {
                    let record = ExpenseRecord::new(date, category, amount);
                    if record.amount < Decimal::ZERO {
                        warn!(
                            date = %record.date,
                            category = %record.category_label(),
                            %amount,
                            "negative expense amount"
                        );
                    }
                    records.push(record);
                }
                None => warn!(%date, %category, "skipping row with non-numeric or out-of-range amount"),
            }
        }
        Ok(records)
    }
}

impl ExpenseStore for SqliteStore {
    fn sum_by_category(&self, period: Period) -> Result<BTreeMap<String, Decimal>, DashError> {
        let conn = self.connect()?;
        Self::check_schema(&conn)?;
        let records = Self::records_in_period(&conn, period)?;
        debug!(%period, rows = records.len(), db = %self.path.display(), "queried expenses");
        group_sums(records)
    }
}

/// Amount cells may be INTEGER, REAL or TEXT depending on who wrote the table.
/// `None` for anything that is not a number `Decimal` can hold.
fn amount_from_sql(value: ValueRef<'_>) -> Option<Decimal> {
    match value {
        ValueRef::Integer(i) => Some(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::from_f64(f),
        ValueRef::Text(bytes) => {
            let s = std::str::from_utf8(bytes).ok()?.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}
