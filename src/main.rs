mod aggregate;
mod analysis;
mod db;
mod error;
mod logging;
mod models;
mod run;
mod settings;
mod ui;

use anyhow::{Context, Result};
use tracing::info;

use crate::aggregate::{Aggregator, DynAggregator};
use crate::db::{ExpenseStore, SqliteStore};
use crate::settings::Settings;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut settings = Settings::load()?;
    if let Some(path) = run::db_override(&args) {
        settings.db_path = Some(path.into());
    }

    let data_dir = settings::data_dir()?;
    let log_file = logging::init(&settings.log_level, &data_dir)?;

    let db_path = settings.resolve_db_path()?;
    let store = SqliteStore::new(&db_path);
    info!(db = %store.path().display(), log = %log_file.display(), "expensedash starting");

    let boxed: Box<dyn ExpenseStore> = Box::new(store);
    let mut agg: DynAggregator = Aggregator::with_cache(boxed, settings.period_cache());

    if run::has_command(&args) {
        run::as_cli(&args, &settings, &mut agg)
            .with_context(|| format!("Using database {}", db_path.display()))
    } else {
        run::as_tui(&settings, &mut agg)
    }
}
