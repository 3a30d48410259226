mod cli;
mod tui;

pub(crate) use cli::{as_cli, db_override, has_command};
pub(crate) use tui::as_tui;
