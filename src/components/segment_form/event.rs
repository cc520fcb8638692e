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

//! Input handling for the segment form.
//!
//! While the form is open it receives every key. Field navigation and typing
//! are handled here, saving and cancelling are passed on as application
//! events.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::backend::crossterm::EventHandler;

use crate::{
    components::SegmentForm,
    events::{AppEvent, AppEventProcessor},
};

impl AppEventProcessor for SegmentForm {
    fn process_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<()> {
        let Event::Key(key_event) = &event else {
            return Ok(());
        };

        match key_event.code {
            KeyCode::Esc => event_tx.send(AppEvent::CloseForm)?,
            KeyCode::Enter => event_tx.send(AppEvent::SubmitForm)?,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            _ => {
                self.error = None;
                self.focused_input_mut().handle_event(&event);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::{
        components::segment_form::FormField,
        model::{Segment, SegmentKind},
    };

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let (tx, rx) = mpsc::channel();
        let mut form = SegmentForm::create(0, &Segment::new(&SegmentKind::Talk, "Ope"));

        form.process_event(key(KeyCode::End), &tx).unwrap();
        form.process_event(key(KeyCode::Char('n')), &tx).unwrap();
        form.process_event(key(KeyCode::Tab), &tx).unwrap();

        assert_eq!(form.value(FormField::Title), "Open");
        assert_eq!(form.focused(), FormField::Kind);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_enter_and_escape_are_forwarded() {
        let (tx, rx) = mpsc::channel();
        let mut form = SegmentForm::create(0, &Segment::new(&SegmentKind::Talk, "Opening"));

        form.process_event(key(KeyCode::Enter), &tx).unwrap();
        form.process_event(key(KeyCode::Esc), &tx).unwrap();

        assert!(matches!(rx.try_recv(), Ok(AppEvent::SubmitForm)));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::CloseForm)));
    }
}
