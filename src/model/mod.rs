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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, such as
//! Rundowns and the Segments they are made of, representing the data schema
//! used for show planning and timing.
//!
//! A [`Segment`] has a common header (title, duration, colour, status and
//! script) plus a [`SegmentBody`] holding the fields that only make sense for
//! one kind of segment. The kind of a segment is derived from its body, so a
//! phone number can only ever exist on a live connection.

pub(crate) mod clock;
pub(crate) mod playback;
pub(crate) mod rundowns;
pub(crate) mod timeline;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display colour of a segment, only used for visual banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Colour {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Colour {
    pub(crate) const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a CSS-style `#rrggbb` string, the leading `#` is optional.
    pub(crate) fn parse(hex: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidColour(hex.to_string());

        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub(crate) fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The kind of a segment, without its kind-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum SegmentKind {
    Music,
    Talk,
    Jingle,
    Reportage,
    Live,
    Game,
    Custom(String),
}

impl SegmentKind {
    pub(crate) const BUILT_IN: [SegmentKind; 6] = [
        SegmentKind::Music,
        SegmentKind::Talk,
        SegmentKind::Jingle,
        SegmentKind::Reportage,
        SegmentKind::Live,
        SegmentKind::Game,
    ];

    /// Resolves a kind from its stored key or its display label.
    ///
    /// Anything that is not a built-in kind is taken to be the name of a
    /// custom item type.
    pub(crate) fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "music" | "muziek" => SegmentKind::Music,
            "talk" | "praat" | "presentatie" => SegmentKind::Talk,
            "jingle" => SegmentKind::Jingle,
            "reportage" => SegmentKind::Reportage,
            "live" => SegmentKind::Live,
            "game" | "spel" => SegmentKind::Game,
            _ => SegmentKind::Custom(name.trim().to_string()),
        }
    }

    /// The stable key used for persistence.
    pub(crate) fn key(&self) -> &str {
        match self {
            SegmentKind::Music => "music",
            SegmentKind::Talk => "talk",
            SegmentKind::Jingle => "jingle",
            SegmentKind::Reportage => "reportage",
            SegmentKind::Live => "live",
            SegmentKind::Game => "game",
            SegmentKind::Custom(name) => name,
        }
    }

    pub(crate) fn label(&self) -> &str {
        match self {
            SegmentKind::Music => "Muziek",
            SegmentKind::Talk => "Presentatie",
            SegmentKind::Jingle => "Jingle",
            SegmentKind::Reportage => "Reportage",
            SegmentKind::Live => "Live",
            SegmentKind::Game => "Spel",
            SegmentKind::Custom(name) => name,
        }
    }

    /// Default colour used by quick-add for this kind.
    pub(crate) fn default_colour(&self) -> Colour {
        match self {
            SegmentKind::Music => Colour::rgb(59, 130, 246),
            SegmentKind::Talk => Colour::rgb(34, 197, 94),
            SegmentKind::Jingle => Colour::rgb(234, 179, 8),
            SegmentKind::Reportage => Colour::rgb(168, 85, 247),
            SegmentKind::Live => Colour::rgb(249, 115, 22),
            SegmentKind::Game => Colour::rgb(236, 72, 153),
            SegmentKind::Custom(_) => Colour::rgb(148, 163, 184),
        }
    }

    /// Default duration in seconds used by quick-add for this kind.
    pub(crate) fn default_duration(&self) -> u64 {
        match self {
            SegmentKind::Music => 210,
            SegmentKind::Talk => 120,
            SegmentKind::Jingle => 10,
            SegmentKind::Reportage => 240,
            SegmentKind::Live => 300,
            SegmentKind::Game => 360,
            SegmentKind::Custom(_) => 60,
        }
    }

    /// An empty body of this kind.
    pub(crate) fn empty_body(&self) -> SegmentBody {
        match self {
            SegmentKind::Music => SegmentBody::Music(MusicDetails::default()),
            SegmentKind::Talk => SegmentBody::Talk,
            SegmentKind::Jingle => SegmentBody::Jingle,
            SegmentKind::Reportage => SegmentBody::Reportage,
            SegmentKind::Live => SegmentBody::Live(LiveDetails::default()),
            SegmentKind::Game => SegmentBody::Game(GameDetails::default()),
            SegmentKind::Custom(name) => SegmentBody::Custom(name.clone()),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a live connection is made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum ConnectionType {
    #[default]
    Luci,
    Teams,
    Wz,
    Telefoon,
    Other(String),
}

impl ConnectionType {
    pub(crate) fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "luci" => ConnectionType::Luci,
            "teams" => ConnectionType::Teams,
            "wz" => ConnectionType::Wz,
            "telefoon" | "phone" => ConnectionType::Telefoon,
            _ => ConnectionType::Other(name.trim().to_string()),
        }
    }

    pub(crate) fn label(&self) -> &str {
        match self {
            ConnectionType::Luci => "LUCI",
            ConnectionType::Teams => "Teams",
            ConnectionType::Wz => "WZ",
            ConnectionType::Telefoon => "Telefoon",
            ConnectionType::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MusicDetails {
    pub(crate) artist: Option<String>,
    pub(crate) preview_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LiveDetails {
    pub(crate) connection: ConnectionType,
    /// Only expected when the connection is by phone, but never enforced.
    pub(crate) phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GameDetails {
    /// Opaque references to audio clips, not interpreted here.
    pub(crate) audio_clips: Vec<String>,
}

/// Kind-specific part of a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SegmentBody {
    Music(MusicDetails),
    Talk,
    Jingle,
    Reportage,
    Live(LiveDetails),
    Game(GameDetails),
    Custom(String),
}

impl SegmentBody {
    pub(crate) fn kind(&self) -> SegmentKind {
        match self {
            SegmentBody::Music(_) => SegmentKind::Music,
            SegmentBody::Talk => SegmentKind::Talk,
            SegmentBody::Jingle => SegmentKind::Jingle,
            SegmentBody::Reportage => SegmentKind::Reportage,
            SegmentBody::Live(_) => SegmentKind::Live,
            SegmentBody::Game(_) => SegmentKind::Game,
            SegmentBody::Custom(name) => SegmentKind::Custom(name.clone()),
        }
    }

    pub(crate) fn artist(&self) -> Option<&str> {
        match self {
            SegmentBody::Music(details) => details.artist.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SegmentStatus {
    #[default]
    Draft,
    Review,
    Montage,
    Checked,
    Cancelled,
}

impl SegmentStatus {
    pub(crate) const ALL: [SegmentStatus; 5] = [
        SegmentStatus::Draft,
        SegmentStatus::Review,
        SegmentStatus::Montage,
        SegmentStatus::Checked,
        SegmentStatus::Cancelled,
    ];

    pub(crate) fn key(self) -> &'static str {
        match self {
            SegmentStatus::Draft => "draft",
            SegmentStatus::Review => "review",
            SegmentStatus::Montage => "montage",
            SegmentStatus::Checked => "checked",
            SegmentStatus::Cancelled => "cancelled",
        }
    }

    pub(crate) fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.key() == name)
            .ok_or(ValidationError::UnknownStatus(name))
    }
}

/// Free text the presenter reads from; none of it is constrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ScriptFields {
    pub(crate) first_words: String,
    pub(crate) notes: String,
    pub(crate) last_words: String,
}

impl ScriptFields {
    pub(crate) fn is_empty(&self) -> bool {
        self.first_words.is_empty() && self.notes.is_empty() && self.last_words.is_empty()
    }
}

/// A single broadcast segment of a rundown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    /// Unique within a rundown, empty until the timeline assigns one.
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) duration: u64,
    pub(crate) colour: Colour,
    pub(crate) status: SegmentStatus,
    pub(crate) script: ScriptFields,
    pub(crate) body: SegmentBody,
}

impl Segment {
    /// Creates a segment of the given kind using the kind's defaults.
    pub(crate) fn new(kind: &SegmentKind, title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            duration: kind.default_duration(),
            colour: kind.default_colour(),
            status: SegmentStatus::default(),
            script: ScriptFields::default(),
            body: kind.empty_body(),
        }
    }

    pub(crate) fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    pub(crate) fn kind(&self) -> SegmentKind {
        self.body.kind()
    }

    /// Checks the segment can be persisted.
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        Ok(())
    }
}

/// Replacement values for the mutable fields of a segment.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub(crate) struct SegmentPatch {
    pub(crate) title: Option<String>,
    pub(crate) duration: Option<u64>,
    pub(crate) colour: Option<Colour>,
    pub(crate) status: Option<SegmentStatus>,
    pub(crate) script: Option<ScriptFields>,
    pub(crate) body: Option<SegmentBody>,
}

impl SegmentPatch {
    /// A patch that replaces every field with those of `segment`.
    pub(crate) fn replace_with(segment: Segment) -> Self {
        Self {
            title: Some(segment.title),
            duration: Some(segment.duration),
            colour: Some(segment.colour),
            status: Some(segment.status),
            script: Some(segment.script),
            body: Some(segment.body),
        }
    }

    pub(crate) fn status(status: SegmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, segment: &mut Segment) {
        if let Some(title) = self.title {
            segment.title = title;
        }
        if let Some(duration) = self.duration {
            segment.duration = duration;
        }
        if let Some(colour) = self.colour {
            segment.colour = colour;
        }
        if let Some(status) = self.status {
            segment.status = status;
        }
        if let Some(script) = self.script {
            segment.script = script;
        }
        if let Some(body) = self.body {
            segment.body = body;
        }
    }
}

/// A named, dated, ordered show plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rundown {
    pub(crate) id: String,
    pub(crate) owner_id: String,
    pub(crate) name: String,
    pub(crate) date: NaiveDate,
}

/// A user-defined segment kind, also used as a quick-add template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemType {
    pub(crate) name: String,
    pub(crate) colour: Colour,
    pub(crate) default_duration: u64,
}

impl ItemType {
    pub(crate) fn template(&self, title: impl Into<String>) -> Segment {
        let kind = SegmentKind::Custom(self.name.clone());
        let mut segment = Segment::new(&kind, title).with_duration(self.default_duration);
        segment.colour = self.colour;
        segment
    }
}

/// Creates a segment from the template of the kind called `kind_name`.
///
/// Custom item types are matched by name without regard to case. A name
/// that is neither built in nor a known item type still yields a custom
/// segment with the generic defaults.
pub(crate) fn quick_add(kind_name: &str, item_types: &[ItemType], title: impl Into<String>) -> Segment {
    match SegmentKind::from_name(kind_name) {
        SegmentKind::Custom(name) => match item_types.iter().find(|t| t.name.eq_ignore_ascii_case(&name)) {
            Some(item_type) => item_type.template(title),
            None => Segment::new(&SegmentKind::Custom(name), title),
        },
        kind => Segment::new(&kind, title),
    }
}

/// Access level of a user within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Owner,
    Editor,
    Viewer,
}

impl Role {
    pub(crate) fn key(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    pub(crate) fn parse(name: &str) -> Result<Self, ValidationError> {
        match name.trim().to_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Program {
    pub(crate) id: String,
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Membership {
    pub(crate) program_id: String,
    pub(crate) user_id: String,
    pub(crate) role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_hex() {
        let colour = Colour::parse("#3b82f6").unwrap();
        assert_eq!(colour, Colour::rgb(59, 130, 246));
        assert_eq!(colour.to_hex(), "#3b82f6");
        assert_eq!(Colour::parse("FF0000").unwrap(), Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_colour_rejects_garbage() {
        assert!(Colour::parse("#12345").is_err());
        assert!(Colour::parse("#gg0000").is_err());
        assert!(Colour::parse("").is_err());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SegmentKind::from_name("Muziek"), SegmentKind::Music);
        assert_eq!(SegmentKind::from_name("live"), SegmentKind::Live);
        assert_eq!(
            SegmentKind::from_name("Verkeer"),
            SegmentKind::Custom("Verkeer".to_string())
        );
        for kind in SegmentKind::BUILT_IN {
            assert_eq!(SegmentKind::from_name(kind.key()), kind);
            assert_eq!(kind.empty_body().kind(), kind);
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(SegmentStatus::parse("Checked").unwrap(), SegmentStatus::Checked);
        assert_eq!(
            SegmentStatus::parse("done"),
            Err(ValidationError::UnknownStatus("done".to_string()))
        );
    }

    #[test]
    fn test_empty_title_is_invalid() {
        let segment = Segment::new(&SegmentKind::Talk, "   ");
        assert_eq!(segment.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let mut segment = Segment::new(&SegmentKind::Music, "Song").with_duration(200);
        SegmentPatch::status(SegmentStatus::Review).apply(&mut segment);

        assert_eq!(segment.status, SegmentStatus::Review);
        assert_eq!(segment.title, "Song");
        assert_eq!(segment.duration, 200);
    }

    #[test]
    fn test_item_type_template() {
        let item_type = ItemType {
            name: "Verkeer".to_string(),
            colour: Colour::rgb(1, 2, 3),
            default_duration: 45,
        };

        let segment = item_type.template("Files");
        assert_eq!(segment.kind(), SegmentKind::Custom("Verkeer".to_string()));
        assert_eq!(segment.duration, 45);
        assert_eq!(segment.colour, Colour::rgb(1, 2, 3));
    }

    #[test]
    fn test_quick_add() {
        let item_type = ItemType {
            name: "Verkeer".to_string(),
            colour: Colour::rgb(1, 2, 3),
            default_duration: 45,
        };

        let jingle = quick_add("jingle", &[], "Station ID");
        assert_eq!(jingle.kind(), SegmentKind::Jingle);
        assert_eq!(jingle.duration, SegmentKind::Jingle.default_duration());

        let traffic = quick_add("VERKEER", std::slice::from_ref(&item_type), "Files");
        assert_eq!(traffic.kind(), SegmentKind::Custom("Verkeer".to_string()));
        assert_eq!(traffic.colour, Colour::rgb(1, 2, 3));

        let unknown = quick_add("Weer", &[item_type], "Weerbericht");
        assert_eq!(unknown.kind(), SegmentKind::Custom("Weer".to_string()));
    }
}
