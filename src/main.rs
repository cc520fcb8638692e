// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Draaiboek.
//!
//! A terminal-based rundown planner for radio shows.
//!
//! A rundown ("draaiboek") is the ordered list of segments of a show: songs,
//! presentation, jingles, live connections. The planner keeps the running
//! times, projects the show on an hour clock, runs a play indicator during
//! the broadcast and exports the script the presenter takes into the studio.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, owns all UI state
//!   and renders it.
//! * A **Task Worker** owns the database connection and performs all
//!   persistence, lookups and exports.
//! * **Event Loops** capture user input, a redraw tick and, while the play
//!   indicator runs, a once-per-second clock tick.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and the worker is handled via `std::sync::mpsc` channels.
//! Edits are applied to the UI state first and persisted afterwards, a
//! failed save is reported but not rolled back.

mod commander;
mod components;
mod config;
mod db;
mod error;
mod events;
mod export;
mod lookup;
mod model;
mod render;
mod tasks;
mod theme;
mod ticker;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    commander::Commander,
    components::{SegmentForm, SegmentTable},
    config::AppConfig,
    db::access::Caller,
    events::{AppEvent, process_events},
    lookup::TrackMatch,
    model::{
        ItemType, Program, playback::PlayIndicator, rundowns::Rundowns, timeline::Timeline,
    },
    tasks::AppTask,
    theme::Theme,
    ticker::Ticker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Rundowns,
    Segments,
}

/// The last message shown in the status bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StatusMessage {
    text: String,
    is_error: bool,
}

/// Results of the latest track lookup.
#[derive(Debug, Default)]
struct LookupState {
    /// Number of the latest lookup request, older results are discarded.
    request: u64,
    /// The rundown that was active when the latest request was made.
    rundown_id: Option<String>,
    results: Vec<TrackMatch>,
}

/// Application state.
struct App {
    pub config: AppConfig,
    pub caller: Caller,

    pub theme: Theme,
    pub focus: Focus,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub program: Option<Program>,
    pub item_types: Vec<ItemType>,

    pub rundowns: Rundowns,
    pub timeline: Timeline,
    /// Set while the segments of the active rundown are on their way.
    pub segments_loading: bool,

    pub segment_table: SegmentTable,
    pub segment_form: Option<SegmentForm>,

    pub commander: Commander,

    pub indicator: PlayIndicator,
    pub ticker: Option<Ticker>,
    pub ticker_generation: u64,

    pub lookup: LookupState,
    pub scan_progress: Option<usize>,

    pub status: StatusMessage,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, caller: Caller, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            config,
            caller,
            theme: Theme::default(),
            focus: Focus::Segments,
            event_tx,
            event_rx,
            task_tx,
            program: None,
            item_types: vec![],
            rundowns: Rundowns::new(),
            timeline: Timeline::new(),
            segments_loading: false,
            segment_table: SegmentTable::new(),
            segment_form: None,
            commander: Commander::new(),
            indicator: PlayIndicator::new(),
            ticker: None,
            ticker_generation: 0,
            lookup: LookupState::default(),
            scan_progress: None,
            status: StatusMessage::default(),
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = StatusMessage {
            text: text.into(),
            is_error: false,
        };
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{}", text);
        self.status = StatusMessage { text, is_error: true };
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    let config = config::load_config();
    config::init_logging(&config)?;

    let caller = Caller::new(&config.user_id).context("No user configured")?;

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, caller, task_tx);

    log::info!("Starting for {}", app.caller.user_id());

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        log::error!("Application error: {:#}", e);
    }

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background colour based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&mut io::stdout(), app.theme.background_colour).ok();

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg(&mut io::stdout()).ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process [`AppTask`]s.
/// * An input thread to poll for keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers it requests the initial data and hands control
/// to [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    let task_event_tx = app.event_tx.clone();
    tasks::spawn_task_worker(&app.config, app.caller.clone(), task_rx, task_event_tx);

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    app.task_tx.send(AppTask::Bootstrap)?;

    process_events(terminal, app)
}
