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

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{
    App, Focus,
    components::SegmentTableAction,
    events::{AppEvent, AppEventProcessor},
    model::quick_add,
};

use super::handlers::*;

/// Maps keyboard input to application actions.
///
/// This function acts as the primary input router for the TUI. A key goes to
/// the first of these that wants it:
///
/// * **Command line**: `:` opens it, while open it takes every key.
/// * **Segment form**: while open it takes every key.
/// * **Focused pane**: navigation in the rundown list or the segment table.
/// * **Global keys**: focus, play indicator, segment edits and quitting.
///
/// # Errors
///
/// Returns an error if an event or task fails to send.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    if app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    if let Some(form) = app.segment_form.as_mut() {
        return form.process_event(event, &app.event_tx);
    }

    if key.code == KeyCode::Esc && !app.lookup.results.is_empty() {
        app.lookup.results.clear();
        return Ok(());
    }

    let handled = match app.focus {
        Focus::Rundowns => process_rundowns_key(app, key)?,
        Focus::Segments => {
            let (handled, action) = app.segment_table.process_event(&event, app.timeline.len());
            if let Some(SegmentTableAction::Edit(index)) = action {
                open_edit_form(app, index);
            }
            handled
        }
    };

    if !handled {
        process_global_key_event(app, key)?;
    }

    Ok(())
}

fn process_rundowns_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.rundowns.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.rundowns.select_previous(),
        KeyCode::Enter => app.focus = Focus::Segments,
        _ => return Ok(false),
    }

    if key.code != KeyCode::Enter {
        load_active_rundown(app)?;
    }

    Ok(true)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let selected = app.segment_table.selected().filter(|i| *i < app.timeline.len());

    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Rundowns => Focus::Segments,
                Focus::Segments => Focus::Rundowns,
            }
        }

        KeyCode::Char(' ') => toggle_indicator(app),
        KeyCode::Char('s') => stop_indicator(app),

        KeyCode::Char('n') => {
            let position = selected.map_or(app.timeline.len(), |i| i + 1);
            let template = quick_add("talk", &app.item_types, "");
            open_new_form(app, position, &template);
        }
        KeyCode::Char('e') => {
            if let Some(index) = selected {
                open_edit_form(app, index);
            }
        }
        KeyCode::Char('x') => {
            if let Some(index) = selected {
                remove_segment(app, index)?;
            }
        }

        // Move the selected segment down / up
        KeyCode::Char('J') => {
            if let Some(index) = selected.filter(|i| i + 1 < app.timeline.len()) {
                move_segment(app, index, index + 1)?;
            }
        }
        KeyCode::Char('K') => {
            if let Some(index) = selected.filter(|i| *i > 0) {
                move_segment(app, index, index - 1)?;
            }
        }

        _ => {}
    }

    Ok(())
}
