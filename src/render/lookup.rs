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

//! Render the results of a track lookup as a popup.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use crate::{App, render::centered_rect, util::format::format_short};

pub(crate) fn draw_lookup(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let results = &app.lookup.results;

    let popup = centered_rect(area, 60, results.len() as u16 + 2);

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(i, track)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2} ", i + 1), Style::default().fg(theme.table_index_fg)),
                Span::styled(track.name.as_str(), Style::default().fg(theme.table_title_fg)),
                Span::raw(" - "),
                Span::styled(track.artist.as_str(), Style::default().fg(theme.table_kind_fg)),
                Span::styled(
                    format!(" ({})", format_short(track.duration)),
                    Style::default().fg(theme.table_time_fg),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Zoekresultaten | pick <n> | Esc sluit ")
            .border_style(Style::default().fg(theme.focus_border_colour)),
    );

    f.render_widget(Clear, popup);
    f.render_widget(list, popup);
}
