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

//! Application logic, event handling, and command dispatching.
//!
//! This module acts as the central hub for the "Controller" logic of the
//! application. Every input (keys, commands, worker results, ticks) arrives
//! as an [`AppEvent`] on a single channel and is applied to the [`App`]
//! state on the main thread, after which the UI is redrawn.
//!
//! # Organization
//!
//! * [`handlers`]: Worker results and the edits shared by keys and commands.
//! * [`key_handlers`]: Keyboard routing.
//! * [`command_handlers`]: Commands entered on the command line.

mod command_handlers;
mod handlers;
mod key_handlers;

use command_handlers::*;
use handlers::*;
use key_handlers::*;

use std::{io::Stdout, path::PathBuf, sync::mpsc::Sender};

use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    commander::Command,
    db::{access::Invite, scan::ScanProgress},
    lookup::TrackMatch,
    model::{ItemType, Program, Rundown, Segment},
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    /// Redraw tick.
    Tick,
    /// Play indicator tick from the ticker with this generation.
    ClockTick(u64),

    RunCommand(Command),

    SubmitForm,
    CloseForm,

    Bootstrapped {
        program: Program,
        rundowns: Vec<Rundown>,
        item_types: Vec<ItemType>,
    },
    SegmentsLoaded {
        rundown_id: String,
        segments: Vec<Segment>,
    },
    RundownDuplicated(Rundown),
    ItemTypesLoaded(Vec<ItemType>),

    LookupResults {
        request: u64,
        rundown_id: String,
        results: Vec<TrackMatch>,
    },

    Scan(ScanProgress),
    ScanFinished(i64),

    InviteCreated(Invite),
    Exported(PathBuf),

    Info(String),
    Error(String),
    FatalError(String),

    ExitApplication,
}

pub(crate) trait AppEventProcessor {
    fn process_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<()>;
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a quit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => anyhow::bail!(message),
            event => apply_event(app, event)?,
        }

        terminal.draw(|f| draw(f, app))?;
    }

    stop_indicator(app);

    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn apply_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::ClockTick(generation) => handle_clock_tick(app, generation),
        AppEvent::RunCommand(command) => handle_command(app, command)?,
        AppEvent::SubmitForm => handle_submit_form(app)?,
        AppEvent::CloseForm => app.segment_form = None,
        AppEvent::Bootstrapped { program, rundowns, item_types } => {
            handle_bootstrapped(app, program, rundowns, item_types)?
        }
        AppEvent::SegmentsLoaded { rundown_id, segments } => {
            handle_segments_loaded(app, rundown_id, segments)
        }
        AppEvent::RundownDuplicated(rundown) => handle_rundown_duplicated(app, rundown)?,
        AppEvent::ItemTypesLoaded(item_types) => app.item_types = item_types,
        AppEvent::LookupResults { request, rundown_id, results } => {
            handle_lookup_results(app, request, rundown_id, results)
        }
        AppEvent::Scan(progress) => handle_scan_progress(app, progress),
        AppEvent::ScanFinished(count) => handle_scan_finished(app, count),
        AppEvent::InviteCreated(invite) => handle_invite_created(app, invite),
        AppEvent::Exported(path) => app.set_info(format!("Geëxporteerd naar {}", path.display())),
        AppEvent::Info(message) => app.set_info(message),
        AppEvent::Error(message) => app.set_error(message),
        AppEvent::Tick | AppEvent::FatalError(_) | AppEvent::ExitApplication => {}
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::mpsc::{self, Receiver};

    use chrono::NaiveDate;

    use super::*;
    use crate::{
        config::AppConfig,
        db::access::Caller,
        model::SegmentKind,
        tasks::AppTask,
    };

    /// An application with one program and two rundowns, the first active.
    pub(crate) fn app() -> (App, Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        let mut app = App::new(AppConfig::default(), Caller::new("anne").unwrap(), task_tx);

        let program = Program {
            id: "p1".to_string(),
            name: "Ochtendshow".to_string(),
        };
        let rundowns = ["r1", "r2"]
            .iter()
            .map(|id| Rundown {
                id: id.to_string(),
                owner_id: "p1".to_string(),
                name: format!("Show {}", id),
                date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            })
            .collect();

        apply_event(
            &mut app,
            AppEvent::Bootstrapped {
                program,
                rundowns,
                item_types: vec![],
            },
        )
        .unwrap();

        // Bootstrapping asks for the segments of the active rundown.
        assert!(matches!(task_rx.try_recv(), Ok(AppTask::LoadSegments(id)) if id == "r1"));

        (app, task_rx)
    }

    pub(crate) fn load(app: &mut App, titles: &[(&str, u64)]) {
        let segments = titles
            .iter()
            .enumerate()
            .map(|(i, (title, duration))| {
                let mut segment = Segment::new(&SegmentKind::Talk, *title).with_duration(*duration);
                segment.id = format!("s{}", i);
                segment
            })
            .collect();

        apply_event(
            app,
            AppEvent::SegmentsLoaded {
                rundown_id: "r1".to_string(),
                segments,
            },
        )
        .unwrap();
    }

    pub(crate) fn titles(app: &App) -> Vec<&str> {
        app.timeline.segments().iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_info_and_error_reach_status_bar() {
        let (mut app, _tasks) = app();

        apply_event(&mut app, AppEvent::Info("Klaar".to_string())).unwrap();
        assert_eq!(app.status.text, "Klaar");
        assert!(!app.status.is_error);

        apply_event(&mut app, AppEvent::Error("Mislukt".to_string())).unwrap();
        assert_eq!(app.status.text, "Mislukt");
        assert!(app.status.is_error);
    }

    #[test]
    fn test_stale_segments_are_ignored() {
        let (mut app, _tasks) = app();

        apply_event(
            &mut app,
            AppEvent::SegmentsLoaded {
                rundown_id: "r2".to_string(),
                segments: vec![Segment::new(&SegmentKind::Talk, "Elders")],
            },
        )
        .unwrap();
        assert!(app.timeline.is_empty());

        load(&mut app, &[("Opening", 120)]);
        assert_eq!(titles(&app), ["Opening"]);
    }
}
