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

//! Command-line input logic and state management.
//!
//! This module implements the `:` command line. It manages a text input
//! component and, when a command is submitted, parses it into a [`Command`]
//! and dispatches it as an application event.
//!
//! Segment numbers typed by the user start at 1, parsed commands carry
//! zero-based indices.

use std::sync::mpsc::Sender;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    error::ValidationError,
    events::AppEvent,
    export::ExportMode,
    model::{Colour, Role, SegmentStatus},
    util::format::parse_duration,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    NewRundown { date: Option<NaiveDate>, name: String },
    RenameRundown(String),
    DuplicateRundown,
    DeleteRundown,

    AddSegment { kind: String, duration: u64, title: String },
    MoveSegment { from: usize, to: usize },
    RemoveSegment(usize),
    SetStatus(usize, SegmentStatus),

    Export(Option<ExportMode>),

    Find(String),
    Pick(usize),

    SaveItemType { name: String, duration: u64, colour: Colour },
    Scan,

    Invite { role: Role, days: i64 },
    Redeem(String),
    Revoke(String),

    Feedback(String),

    Quit,
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Handles a key event, returns whether the command line consumed it.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    match parse_command(&buffer) {
                        Ok(command) => event_tx.send(AppEvent::RunCommand(command))?,
                        Err(message) => event_tx.send(AppEvent::Error(message))?,
                    }
                }
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

/// Parses a command line into a [`Command`].
///
/// The error is a message for the status bar.
pub(crate) fn parse_command(buffer: &str) -> Result<Command, String> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let command = match parts.as_slice() {
        ["q"] | ["quit"] => Command::Quit,

        ["new", rest @ ..] => {
            let (date, name_parts) = match rest.first() {
                Some(first) if looks_like_date(first) => {
                    let date = NaiveDate::parse_from_str(first, "%Y-%m-%d")
                        .map_err(|_| ValidationError::InvalidDate(first.to_string()).to_string())?;
                    (Some(date), &rest[1..])
                }
                _ => (None, rest),
            };
            Command::NewRundown {
                date,
                name: non_empty(name_parts, "Gebruik: new [YYYY-MM-DD] <naam>")?,
            }
        }
        ["rename", name @ ..] => Command::RenameRundown(non_empty(name, "Gebruik: rename <naam>")?),
        ["dup"] => Command::DuplicateRundown,
        ["delrundown"] => Command::DeleteRundown,

        ["add", kind, duration, title @ ..] => Command::AddSegment {
            kind: kind.to_string(),
            duration: parse_duration(duration),
            title: non_empty(title, "Gebruik: add <soort> <duur> <titel>")?,
        },
        ["mv", from, to] => Command::MoveSegment {
            from: segment_number(from)?,
            to: segment_number(to)?,
        },
        ["rm", n] => Command::RemoveSegment(segment_number(n)?),
        ["status", n, status] => Command::SetStatus(
            segment_number(n)?,
            SegmentStatus::parse(status).map_err(|e| e.to_string())?,
        ),

        ["export"] => Command::Export(None),
        ["export", mode] => Command::Export(Some(
            ExportMode::from_name(mode).ok_or_else(|| format!("Onbekende exportvorm '{}'", mode))?,
        )),

        ["find", query @ ..] => Command::Find(non_empty(query, "Gebruik: find <zoekterm>")?),
        ["pick", n] => Command::Pick(segment_number(n)?),

        ["type", name, duration, colour] => Command::SaveItemType {
            name: name.to_string(),
            duration: parse_duration(duration),
            colour: Colour::parse(colour).map_err(|e| e.to_string())?,
        },
        ["scan"] => Command::Scan,

        ["invite", role, days] => Command::Invite {
            role: Role::parse(role).map_err(|e| e.to_string())?,
            days: days.parse().map_err(|_| format!("Ongeldig aantal dagen '{}'", days))?,
        },
        ["redeem", token] => Command::Redeem(token.to_string()),
        ["revoke", token] => Command::Revoke(token.to_string()),

        ["feedback", text @ ..] => Command::Feedback(non_empty(text, "Gebruik: feedback <tekst>")?),

        [] => return Err("Geen commando".to_string()),
        [cmd, ..] => return Err(format!("Onbekend commando '{}'", cmd)),
    };

    Ok(command)
}

fn non_empty(parts: &[&str], usage: &str) -> Result<String, String> {
    if parts.is_empty() {
        return Err(usage.to_string());
    }
    Ok(parts.join(" "))
}

/// A leading `YYYY-` marks the first word of a name as a date.
fn looks_like_date(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.len() > 5 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

fn segment_number(text: &str) -> Result<usize, String> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("Ongeldig segmentnummer '{}'", text)),
    }
}
