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

//! Render the hour clock.
//!
//! The projected wedges are filled with radial lines on a braille canvas.
//! Screen angles run clockwise with y pointing down, the canvas has y
//! pointing up, so a point at angle `a` is drawn at `(cos a, -sin a)`.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
    },
};

use crate::{
    App,
    model::clock::{ClockFace, angle_for},
    util::format::format_short,
};

const MIN_WIDTH: u16 = 16;
const MIN_HEIGHT: u16 = 8;

/// Angle between two radial fill lines, in degrees.
const FILL_STEP: f64 = 0.75;

const DIAL_RADIUS: f64 = 1.0;
const HAND_RADIUS: f64 = 0.92;
const MARGIN: f64 = 1.15;

pub(crate) fn draw_clock(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let face = ClockFace::project(&app.timeline);

    let mut title = vec![Span::raw(" Klok ")];
    if let Some(excess) = face.excess() {
        title.push(Span::styled(
            format!("+{} ", format_short(excess)),
            Style::default().fg(theme.overflow_colour),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_colour));

    let inner = block.inner(area);
    if inner.width < MIN_WIDTH || inner.height < MIN_HEIGHT {
        let message = Paragraph::new("Venster te klein voor de klok")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(message, area);
        return;
    }

    // Terminal cells are about twice as tall as they are wide, widen the x
    // range so the face stays round.
    let aspect = inner.width as f64 / (2.0 * inner.height as f64);
    let x_extent = MARGIN * aspect;

    let selected_id = app
        .segment_table
        .selected()
        .and_then(|index| app.timeline.segments().get(index))
        .map(|segment| segment.id.as_str());

    let hand = (app.indicator.is_running() || app.indicator.elapsed() > 0)
        .then(|| angle_for(app.indicator.elapsed()));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-MARGIN, MARGIN])
        .paint(|ctx| {
            for wedge in face.wedges.iter().filter(|wedge| wedge.visible > 0) {
                let colour = if wedge.overflow {
                    theme.overflow_colour
                } else {
                    Color::from(wedge.colour)
                };
                fill_wedge(ctx, wedge.start_angle, wedge.sweep, colour);
            }

            ctx.layer();

            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: DIAL_RADIUS,
                color: theme.dial_colour,
            });

            for hour in 0..12 {
                let angle = hour as f64 * 30.0 - 90.0;
                let (x1, y1) = point(angle, DIAL_RADIUS);
                let (x2, y2) = point(angle, DIAL_RADIUS + 0.08);
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, theme.dial_colour));
            }

            // Mark the edges of the selected segment.
            if let Some(wedge) = face.wedges.iter().find(|wedge| Some(wedge.segment_id.as_str()) == selected_id) {
                for seconds in [wedge.start, wedge.start + wedge.visible] {
                    let (x, y) = point(angle_for(seconds), DIAL_RADIUS);
                    ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, theme.accent_colour));
                }
            }

            if let Some(angle) = hand {
                ctx.layer();
                let (x, y) = point(angle, HAND_RADIUS);
                ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, theme.hand_colour));
            }
        });

    f.render_widget(canvas, area);
}

fn fill_wedge(ctx: &mut Context, start_angle: f64, sweep: f64, colour: Color) {
    let steps = (sweep / FILL_STEP).ceil().max(1.0) as usize;

    for step in 0..=steps {
        let angle = start_angle + (sweep * step as f64 / steps as f64);
        let (x, y) = point(angle, DIAL_RADIUS);
        ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, colour));
    }
}

/// Canvas coordinates of the point at `angle` degrees and `radius`.
fn point(angle: f64, radius: f64) -> (f64, f64) {
    let radians = angle.to_radians();
    (radius * radians.cos(), -radius * radians.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_points_run_clockwise_from_twelve() {
        assert!(approx(point(angle_for(0), 1.0), (0.0, 1.0)));
        assert!(approx(point(angle_for(900), 1.0), (1.0, 0.0)));
        assert!(approx(point(angle_for(1800), 1.0), (0.0, -1.0)));
        assert!(approx(point(angle_for(2700), 1.0), (-1.0, 0.0)));
    }
}
