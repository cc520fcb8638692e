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

//! Visual styling and colour configuration for the TUI.
//!
//! This module defines the application's colour palette and the conversion
//! from segment colours to Ratatui colours.

use ratatui::style::Color;

use crate::model::{Colour, SegmentStatus, clock::OVERFLOW_COLOUR};

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Colour,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) focus_border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) error_colour: Color,
    pub(crate) overflow_colour: Color,
    pub(crate) hand_colour: Color,
    pub(crate) dial_colour: Color,

    pub(crate) table_index_fg: Color,
    pub(crate) table_time_fg: Color,
    pub(crate) table_title_fg: Color,
    pub(crate) table_kind_fg: Color,
    pub(crate) table_on_air_bg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Colour::rgb(24, 24, 36),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            focus_border_colour: Color::Rgb(250, 189, 47),
            gauge_track_colour: Color::Rgb(44, 44, 60),
            commander_colour: Color::Rgb(230, 230, 230),
            error_colour: Color::Rgb(248, 113, 113),
            overflow_colour: Color::Rgb(OVERFLOW_COLOUR.r, OVERFLOW_COLOUR.g, OVERFLOW_COLOUR.b),
            hand_colour: Color::Rgb(255, 255, 255),
            dial_colour: Color::Rgb(102, 102, 102),

            table_index_fg: Color::Rgb(162, 161, 166),
            table_time_fg: Color::Rgb(162, 161, 166),
            table_title_fg: Color::Rgb(255, 255, 255),
            table_kind_fg: Color::Rgb(179, 157, 219),
            table_on_air_bg: Color::Rgb(60, 40, 20),
        }
    }

    /// Colour used for a segment status in the table.
    pub(crate) fn status_colour(&self, status: SegmentStatus) -> Color {
        match status {
            SegmentStatus::Draft => Color::Rgb(162, 161, 166),
            SegmentStatus::Review => Color::Rgb(250, 189, 47),
            SegmentStatus::Montage => Color::Rgb(96, 165, 250),
            SegmentStatus::Checked => Color::Rgb(74, 222, 128),
            SegmentStatus::Cancelled => self.error_colour,
        }
    }
}

impl From<Colour> for Color {
    fn from(colour: Colour) -> Self {
        Color::Rgb(colour.r, colour.g, colour.b)
    }
}
