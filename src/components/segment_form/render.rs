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

//! UI rendering logic for the segment form.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{
    components::{SegmentForm, segment_form::FormField},
    model::SegmentKind,
    render::{Render, centered_rect},
    theme::Theme,
};

const LABEL_WIDTH: u16 = 17;

impl Render for SegmentForm {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let height = FormField::ALL.len() as u16 + 6;
        let popup = centered_rect(area, 70, height);

        let title = if self.is_new() {
            " Nieuw segment "
        } else {
            " Segment bewerken "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.focus_border_colour))
            .padding(Padding::horizontal(1));

        let inner = block.inner(popup);
        f.render_widget(Clear, popup);
        f.render_widget(block, popup);

        let mut constraints = vec![Constraint::Length(1); FormField::ALL.len()];
        constraints.extend([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (row, field) in rows.iter().zip(FormField::ALL) {
            let focused = field == self.focused();
            let label_style = if focused {
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.table_index_fg)
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<width$}", field.label(), width = LABEL_WIDTH as usize),
                    label_style,
                ),
                Span::styled(self.value(field), Style::default().fg(theme.table_title_fg)),
            ]);
            f.render_widget(Paragraph::new(line), *row);

            if focused {
                let cursor_x = row.x + LABEL_WIDTH + self.input(field).cursor() as u16;
                f.set_cursor_position((cursor_x.min(row.right().saturating_sub(1)), row.y));
            }
        }

        let footer = FormField::ALL.len();

        if let Some(error) = &self.error {
            f.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(theme.error_colour)),
                rows[footer + 1],
            );
        }

        let hint = if self.focused() == FormField::Kind {
            let kinds: Vec<String> = SegmentKind::BUILT_IN.iter().map(|kind| kind.label().to_string()).collect();
            format!("Soorten: {} of een eigen soort", kinds.join(", "))
        } else {
            "Tab: volgend veld  Enter: opslaan  Esc: annuleren".to_string()
        };

        f.render_widget(
            Paragraph::new(hint).style(Style::default().fg(theme.border_colour)),
            rows[footer + 2],
        );
    }
}
