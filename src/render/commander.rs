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

//! Render the command line.
//!
//! While inactive the line shows a short reminder of the keys, while active
//! it shows the `:` prompt, the text typed so far and the cursor.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const PROMPT: &str = ":";
const KEYS_HINT: &str = ":commando  n nieuw  e bewerk  x wis  J/K verplaats  spatie start/pauze  s stop  q afsluiten";

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    let style = Style::default()
        .fg(app.theme.commander_colour)
        .bg(app.theme.gauge_track_colour);

    let line = if commander.active() {
        Line::from(vec![Span::raw(PROMPT), Span::raw(commander.input.value())])
    } else {
        Line::from(Span::styled(KEYS_HINT, Style::default().fg(app.theme.border_colour)))
    };

    f.render_widget(Paragraph::new(line).style(style), container[0]);

    if commander.active() {
        let cursor_x = container[0].x + PROMPT.len() as u16 + commander.input.cursor() as u16;
        let cursor_y = container[0].y;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}
