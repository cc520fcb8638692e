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

//! UI rendering logic for the segment table.
//!
//! This module handles the visual representation of the running order,
//! including the derived start and end times, the segment colour swatch and
//! the row of the segment currently on air.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Row, Table},
};

use crate::{
    components::SegmentTable,
    model::timeline::Timeline,
    theme::Theme,
    util::format::{format_long, format_short},
};

impl SegmentTable {
    /// Draws the running order.
    ///
    /// `elapsed` is the position of a running play indicator, the segment it
    /// falls in is highlighted.
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        timeline: &Timeline,
        theme: &Theme,
        focused: bool,
        elapsed: Option<u64>,
    ) {
        let rows = timeline.offsets().enumerate().map(|(index, (segment, start, end))| {
            let on_air = elapsed.is_some_and(|e| e >= start && e < end);

            let row = Row::new(vec![
                Cell::from("").style(Style::default().bg(Color::from(segment.colour))),
                Cell::from(Line::from(format!("{}", index + 1)).alignment(Alignment::Right))
                    .style(Style::default().fg(theme.table_index_fg)),
                Cell::from(segment.kind().label().to_string()).style(Style::default().fg(theme.table_kind_fg)),
                Cell::from(segment.title.as_str()).style(Style::default().fg(theme.table_title_fg)),
                Cell::from(Line::from(format_short(segment.duration)).alignment(Alignment::Right))
                    .style(Style::default().fg(theme.table_time_fg)),
                Cell::from(Line::from(format_long(start)).alignment(Alignment::Right))
                    .style(Style::default().fg(theme.table_time_fg)),
                Cell::from(Line::from(format_long(end)).alignment(Alignment::Right))
                    .style(Style::default().fg(theme.table_time_fg)),
                Cell::from(segment.status.key()).style(Style::default().fg(theme.status_colour(segment.status))),
            ]);

            if on_air {
                row.style(Style::default().bg(theme.table_on_air_bg))
            } else {
                row
            }
        });

        let border_colour = if focused {
            theme.focus_border_colour
        } else {
            theme.border_colour
        };

        let block = Block::default()
            .title(format!(
                " Segmenten | {} | {} ",
                timeline.len(),
                format_long(timeline.total_duration())
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_colour))
            .padding(Padding::horizontal(1));

        let table = Table::new(
            rows,
            [
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(12),
                Constraint::Min(10),
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(Line::from("#").alignment(Alignment::Right)),
                Cell::from("Soort"),
                Cell::from("Titel"),
                Cell::from(Line::from("Duur").alignment(Alignment::Right)),
                Cell::from(Line::from("Start").alignment(Alignment::Right)),
                Cell::from(Line::from("Eind").alignment(Alignment::Right)),
                Cell::from("Status"),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .block(block);

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}
