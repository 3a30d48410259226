use rust_decimal::Decimal;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::ExpenseStore;
use crate::error::DashError;
use crate::models::{group_sums, ExpenseRecord, Period};

/// In-memory store for tests. Counts queries and can be switched offline.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) records: RefCell<Vec<ExpenseRecord>>,
    pub(crate) calls: Cell<usize>,
    pub(crate) offline: Cell<bool>,
}

impl MemoryStore {
    pub(crate) fn with(records: Vec<ExpenseRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Default::default()
        }
    }

    pub(crate) fn push(&self, record: ExpenseRecord) {
        self.records.borrow_mut().push(record);
    }
}

impl ExpenseStore for MemoryStore {
    fn sum_by_category(&self, period: Period) -> Result<BTreeMap<String, Decimal>, DashError> {
        self.calls.set(self.calls.get() + 1);
        if self.offline.get() {
            return Err(DashError::StoreUnavailable("offline".into()));
        }
        let prefix = format!("{period}-");
        let matching: Vec<ExpenseRecord> = self
            .records
            .borrow()
            .iter()
            .filter(|r| r.date.starts_with(&prefix))
            .cloned()
            .collect();
        group_sums(matching)
    }
}
