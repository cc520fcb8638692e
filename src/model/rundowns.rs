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

//! Rundown collection state.
//!
//! This module provides state for the list of rundowns of the current
//! program, tracking which one is active. The collection is never allowed to
//! become empty through a delete.

use ratatui::widgets::ListState;

use crate::model::Rundown;

#[derive(Default)]
pub(crate) struct Rundowns {
    rundowns: Vec<Rundown>,
    pub(crate) list_state: ListState,
}

impl Rundowns {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn all(&self) -> &[Rundown] {
        &self.rundowns
    }

    pub(crate) fn len(&self) -> usize {
        self.rundowns.len()
    }

    pub(crate) fn set_rundowns(&mut self, rundowns: Vec<Rundown>) {
        self.rundowns = rundowns;
        self.list_state.select((!self.rundowns.is_empty()).then_some(0));
    }

    pub(crate) fn active(&self) -> Option<&Rundown> {
        let index = self.list_state.selected()?;
        self.rundowns.get(index)
    }

    pub(crate) fn active_id(&self) -> Option<String> {
        self.active().map(|rundown| rundown.id.clone())
    }

    /// Adds a rundown at the top of the list and makes it active.
    pub(crate) fn add(&mut self, rundown: Rundown) {
        self.rundowns.insert(0, rundown);
        self.list_state.select(Some(0));
    }

    pub(crate) fn rename(&mut self, id: &str, name: &str) -> bool {
        match self.rundowns.iter_mut().find(|rundown| rundown.id == id) {
            Some(rundown) => {
                rundown.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub(crate) fn can_delete(&self) -> bool {
        self.rundowns.len() > 1
    }

    /// Removes a rundown unless it is the last one.
    ///
    /// The selection moves to the neighbouring rundown. Returns the removed
    /// rundown, or `None` if it was not found or was the last one.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Rundown> {
        if !self.can_delete() {
            return None;
        }

        let index = self.rundowns.iter().position(|rundown| rundown.id == id)?;
        let removed = self.rundowns.remove(index);

        let selected = index.min(self.rundowns.len() - 1);
        self.list_state.select(Some(selected));

        Some(removed)
    }

    pub(crate) fn select_next(&mut self) {
        let len = self.rundowns.len();
        if len == 0 { return; }
        let i = match self.list_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub(crate) fn select_previous(&mut self) {
        let len = self.rundowns.len();
        if len == 0 { return; }
        let i = match self.list_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn rundown(id: &str) -> Rundown {
        Rundown {
            id: id.to_string(),
            owner_id: "program".to_string(),
            name: format!("Show {}", id),
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        }
    }

    #[test]
    fn test_last_rundown_cannot_be_removed() {
        let mut rundowns = Rundowns::new();
        rundowns.set_rundowns(vec![rundown("a")]);

        assert!(!rundowns.can_delete());
        assert!(rundowns.remove("a").is_none());
        assert_eq!(rundowns.len(), 1);
    }

    #[test]
    fn test_remove_selects_neighbour() {
        let mut rundowns = Rundowns::new();
        rundowns.set_rundowns(vec![rundown("a"), rundown("b"), rundown("c")]);
        rundowns.select_previous();
        assert_eq!(rundowns.active_id().as_deref(), Some("c"));

        assert!(rundowns.remove("c").is_some());
        assert_eq!(rundowns.active_id().as_deref(), Some("b"));
    }

    #[test]
    fn test_add_becomes_active() {
        let mut rundowns = Rundowns::new();
        rundowns.set_rundowns(vec![rundown("a")]);
        rundowns.add(rundown("b"));

        assert_eq!(rundowns.active_id().as_deref(), Some("b"));
        assert!(rundowns.rename("a", "Renamed"));
        assert_eq!(rundowns.all()[1].name, "Renamed");
    }
}
