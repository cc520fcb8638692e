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

//! Render the list of rundowns of the program.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{App, Focus};

pub(crate) fn draw_rundowns(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let items: Vec<ListItem> = app
        .rundowns
        .all()
        .iter()
        .map(|rundown| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    rundown.name.clone(),
                    Style::default().fg(theme.table_title_fg),
                )),
                Line::from(Span::styled(
                    rundown.date.format("%Y-%m-%d").to_string(),
                    Style::default().fg(theme.table_time_fg),
                )),
            ])
        })
        .collect();

    let border_colour = if app.focus == Focus::Rundowns {
        theme.focus_border_colour
    } else {
        theme.border_colour
    };

    let title = match &app.program {
        Some(program) => format!(" {} ", program.name),
        None => " Draaiboeken ".to_string(),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_colour)),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.rundowns.list_state);
}
