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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! terminal tick or state change to provide a reactive user interface.

mod clock;
mod commander;
mod icons;
mod lookup;
mod rundowns;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{
    App, Focus,
    render::{
        clock::draw_clock, commander::draw_commander, lookup::draw_lookup, rundowns::draw_rundowns,
        status::draw_status,
    },
    theme::Theme,
};

const RUNDOWNS_WIDTH: u16 = 28;
const CLOCK_WIDTH: u16 = 44;

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// This function calculates the layout constraints and populates the frame
/// with widgets based on the current state of the [`App`].
///
/// It handles:
///
/// * **Layout**: Rundown list, segment table and clock side by side, with the
///   status bar and the command line below them.
/// * **Popups**: The lookup results and the segment form are drawn over the
///   main layout.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - A mutable reference to the application state, allowing the UI
///   to reflect changes and update internal view state (like list scroll
///   positions).
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: main, status, command line
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(area);

    // Main layout: rundowns, segments, clock
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(RUNDOWNS_WIDTH),
            Constraint::Min(0),
            Constraint::Length(CLOCK_WIDTH),
        ])
        .split(outer[0]);

    draw_rundowns(f, main[0], app);

    let elapsed = (app.indicator.is_running() || app.indicator.elapsed() > 0)
        .then(|| app.indicator.elapsed());
    app.segment_table.draw(
        f,
        main[1],
        &app.timeline,
        &app.theme,
        app.focus == Focus::Segments,
        elapsed,
    );

    draw_clock(f, main[2], app);

    draw_status(f, outer[1], app);

    draw_commander(f, outer[2], app);

    if !app.lookup.results.is_empty() {
        draw_lookup(f, outer[0], app);
    }

    if let Some(form) = app.segment_form.as_mut() {
        form.draw(f, outer[0], &app.theme);
    }
}

/// A rectangle of `percent_x` of the width and `height` rows, centred in
/// `area` and never larger than it.
pub(crate) fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(10, 5, 100, 40);

        assert_eq!(centered_rect(area, 50, 10), Rect::new(35, 20, 50, 10));
        assert_eq!(centered_rect(area, 150, 60), area);
    }
}
