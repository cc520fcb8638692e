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

//! Interactive segment table.
//!
//! This module provides the table that lists the segments of the active
//! rundown with their running times. The table only keeps the selection, the
//! segments themselves are borrowed from the [`Timeline`] when drawing or
//! handling input.
//!
//! [`Timeline`]: crate::model::timeline::Timeline

mod event;
mod render;

use ratatui::widgets::TableState;

/// Requests the table makes of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentTableAction {
    Edit(usize),
}

#[derive(Default)]
pub(crate) struct SegmentTable {
    pub(crate) table_state: TableState,
}

impl SegmentTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub(crate) fn select(&mut self, index: Option<usize>) {
        self.table_state.select(index);
    }

    /// Keeps the selection inside a table of `len` rows.
    pub(crate) fn clamp(&mut self, len: usize) {
        let selected = match (self.table_state.selected(), len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.table_state.select(selected);
    }

    fn goto_next(&mut self, len: usize) {
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self, len: usize) {
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut table = SegmentTable::new();
        table.goto_next(3);
        assert_eq!(table.selected(), Some(0));

        table.goto_previous(3);
        assert_eq!(table.selected(), Some(2));

        table.goto_next(3);
        assert_eq!(table.selected(), Some(0));

        table.goto_last(3);
        assert_eq!(table.selected(), Some(2));
    }

    #[test]
    fn test_clamp() {
        let mut table = SegmentTable::new();
        table.select(Some(5));
        table.clamp(3);
        assert_eq!(table.selected(), Some(2));

        table.clamp(0);
        assert_eq!(table.selected(), None);

        table.clamp(2);
        assert_eq!(table.selected(), Some(0));
    }
}
