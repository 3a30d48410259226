use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use crate::aggregate::DynAggregator;
use crate::settings::Settings;
use crate::ui::app::{App, InputMode};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(settings: &Settings, agg: &mut DynAggregator) -> Result<()> {
    let mut app = App::new(settings);
    app.refresh(agg);
    info!(period = %app.period, "starting dashboard");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, agg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    agg: &mut DynAggregator,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            app.visible_rows = crate::ui::render::breakdown_capacity(f.area()).max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(key, app, agg)?;
        }
    }
    Ok(())
}

fn handle_key(key: event::KeyEvent, app: &mut App, agg: &mut DynAggregator) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, agg),
        InputMode::Command => handle_command_input(key, app, agg),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, agg: &mut DynAggregator) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('H') | KeyCode::Left => app.prev_month(agg),
        KeyCode::Char('L') | KeyCode::Right => app.next_month(agg),
        KeyCode::Char('[') => app.shift_year(-1, agg),
        KeyCode::Char(']') => app.shift_year(1, agg),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_budget(1),
        KeyCode::Char('-') => app.adjust_budget(-1),
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.rows().len();
            scroll_down(&mut app.row_index, &mut app.row_scroll, len, app.visible_rows);
        }
        KeyCode::Char('k') | KeyCode::Up => scroll_up(&mut app.row_index, &mut app.row_scroll),
        KeyCode::Char('g') => scroll_to_top(&mut app.row_index, &mut app.row_scroll),
        KeyCode::Char('G') => {
            let len = app.rows().len();
            scroll_to_bottom(&mut app.row_index, &mut app.row_scroll, len, app.visible_rows);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.set_status(""),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, agg: &mut DynAggregator) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, agg)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tui_tests;
