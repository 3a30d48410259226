//! Application settings: defaults, then an optional TOML file, then
//! `EXPENSEDASH_*` environment variables.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::aggregate::PeriodCache;

const ENV_PREFIX: &str = "EXPENSEDASH";
const CONFIG_FILE_ENV: &str = "EXPENSEDASH_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Expense database. Read from EXPENSEDASH_DB_PATH.
    pub(crate) db_path: Option<PathBuf>,
    /// Budget limit shown on startup.
    pub(crate) default_budget: Decimal,
    /// Increment used by the +/- keys.
    pub(crate) budget_step: Decimal,
    /// Number of months kept in the aggregation cache. 0 disables it.
    pub(crate) cache_capacity: usize,
    /// Seconds before a cached month is re-read. 0 keeps entries until refresh.
    pub(crate) cache_ttl_secs: u64,
    /// Year range offered by the dashboard selectors.
    pub(crate) min_year: i32,
    pub(crate) max_year: i32,
    /// Fallback filter when RUST_LOG is unset.
    pub(crate) log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: None,
            default_budget: Decimal::from(500),
            budget_step: Decimal::from(10),
            cache_capacity: 12,
            cache_ttl_secs: 300,
            min_year: 2020,
            max_year: 2029,
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub(crate) fn load() -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = default_config_file() {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            builder = builder.add_source(::config::File::with_name(&path));
        }
        builder = builder.add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::build(builder)
    }

    fn build(builder: ::config::ConfigBuilder<::config::builder::DefaultState>) -> Result<Self> {
        let settings: Self = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(test)]
    pub(crate) fn from_toml(toml: &str) -> Result<Self> {
        Self::build(
            ::config::Config::builder()
                .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml)),
        )
    }

    fn validate(&self) -> Result<()> {
        if self.default_budget < Decimal::ZERO {
            anyhow::bail!("default_budget must not be negative ({})", self.default_budget);
        }
        if self.budget_step <= Decimal::ZERO {
            anyhow::bail!("budget_step must be positive ({})", self.budget_step);
        }
        if self.min_year < 1 {
            anyhow::bail!("min_year must be positive ({})", self.min_year);
        }
        if self.min_year > self.max_year {
            anyhow::bail!(
                "min_year ({}) is after max_year ({})",
                self.min_year,
                self.max_year
            );
        }
        Ok(())
    }

    /// Configured database path, or `expenses.db` in the platform data directory.
    pub(crate) fn resolve_db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("expenses.db")),
        }
    }

    pub(crate) fn period_cache(&self) -> PeriodCache {
        let ttl = (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs));
        PeriodCache::new(self.cache_capacity, ttl)
    }

    pub(crate) fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.min_year, self.max_year)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "expensedash", "ExpenseDash")
}

fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Data directory (created on demand). Holds the log and, by default, the database.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs =
        project_dirs().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod settings_tests;
