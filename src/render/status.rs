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

//! Render the status bar.
//!
//! This module renders the play indicator position against the length of
//! the show, how far the show runs past the hour, progress of a library
//! scan and the last message.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    model::{clock::CLOCK_FACE_SECONDS, playback::IndicatorState},
    render::icons::{ICON_OVERFLOW, ICON_PAUSE, ICON_PLAY, ICON_STOP},
    util::format::{format_long, format_short},
};

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(48), Constraint::Min(0)])
        .split(rows[0]);

    let elapsed = app.indicator.elapsed();
    let total = app.timeline.total_duration();

    let icon = match app.indicator.state() {
        IndicatorState::Running => ICON_PLAY,
        IndicatorState::Stopped if elapsed > 0 => ICON_PAUSE,
        IndicatorState::Stopped => ICON_STOP,
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut time_spans = vec![
        Span::styled(format!("{} ", icon), bold).fg(Color::White),
        Span::styled(format_long(elapsed), bold).fg(theme.accent_colour),
        Span::styled(" / ", bold).fg(Color::White),
        Span::styled(format_long(total), bold).fg(theme.accent_colour),
    ];

    if total > CLOCK_FACE_SECONDS {
        time_spans.push(Span::styled(
            format!(" {} +{}", ICON_OVERFLOW, format_short(total - CLOCK_FACE_SECONDS)),
            bold.fg(theme.overflow_colour),
        ));
    }

    if let Some(index) = app.segment_table.selected().filter(|i| *i < app.timeline.len()) {
        time_spans.push(Span::styled(
            format!("  t/m #{} {}", index + 1, format_long(app.timeline.cumulative_duration(index))),
            Style::default().fg(theme.table_time_fg),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(time_spans)), info_chunks[0]);

    let mut message = app.status.text.clone();
    if let Some(count) = app.scan_progress {
        message = format!("{} ({} bestanden)", message, count);
    }

    let message_style = if app.status.is_error {
        Style::default().fg(theme.error_colour)
    } else {
        Style::default().fg(theme.commander_colour)
    };

    f.render_widget(Paragraph::new(message).style(message_style), info_chunks[1]);

    let position = if total > 0 {
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(position)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, rows[1]);
}
