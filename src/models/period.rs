use chrono::{Datelike, Local, NaiveDate};

use crate::error::DashError;

/// A calendar month used to filter expense records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self, DashError> {
        if !(1..=12).contains(&month) {
            return Err(DashError::InvalidInput(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if year < 1 {
            return Err(DashError::InvalidInput(format!(
                "year must be positive, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Parse "YYYY-MM" (also accepts "YYYY-M").
    pub fn parse(s: &str) -> Result<Self, DashError> {
        let invalid = || DashError::InvalidInput(format!("expected YYYY-MM, got '{s}'"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(month, year)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Previous month. Stays put at January of year 1.
    pub fn prev(&self) -> Self {
        match (self.month, self.year) {
            (1, 1) => *self,
            (1, y) => Self {
                year: y - 1,
                month: 12,
            },
            (m, y) => Self {
                year: y,
                month: m - 1,
            },
        }
    }

    pub fn with_year(&self, year: i32) -> Result<Self, DashError> {
        Self::new(self.month, year)
    }

    /// Full English month name, e.g. "March".
    pub fn month_name(&self) -> String {
        NaiveDate::from_ymd_opt(2000, self.month, 1)
            .map(|d| d.format("%B").to_string())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
