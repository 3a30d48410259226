//! Errors raised by the aggregation and budget core.
//!
//! The store maps rusqlite failures into these; the presentation layer
//! decides how to show them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum DashError {
    /// Bad month or year, negative budget limit.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database missing, unreadable, or without the expected table/columns.
    #[error("Expense store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),
}

impl From<rusqlite::Error> for DashError {
    fn from(e: rusqlite::Error) -> Self {
        Self::StoreUnavailable(e.to_string())
    }
}
