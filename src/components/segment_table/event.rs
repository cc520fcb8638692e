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

//! Input handling for the segment table.
//!
//! This module maps raw terminal keyboard events to table navigation. Keys
//! the table does not know about are left for the global key handler.

use crossterm::event::{Event, KeyCode};

use crate::components::{SegmentTable, SegmentTableAction};

impl SegmentTable {
    /// Handles a key for a table of `len` rows.
    ///
    /// Returns whether the key was consumed, and the action it requests.
    pub(crate) fn process_event(&mut self, event: &Event, len: usize) -> (bool, Option<SegmentTableAction>) {
        let Event::Key(key_event) = event else {
            return (false, None);
        };

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.goto_next(len),
            KeyCode::Char('k') | KeyCode::Up => self.goto_previous(len),
            KeyCode::Char('g') | KeyCode::Home => self.goto_first(len),
            KeyCode::Char('G') | KeyCode::End => self.goto_last(len),

            KeyCode::Enter => {
                let action = self.selected().filter(|i| *i < len).map(SegmentTableAction::Edit);
                return (true, action);
            }

            _ => return (false, None),
        }

        (true, None)
    }
}
