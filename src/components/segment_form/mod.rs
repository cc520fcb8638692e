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

//! Segment editing form.
//!
//! The form holds one text input per editable field. Nothing is validated
//! while typing, [`SegmentForm::build`] turns the inputs into a [`Segment`]
//! when the user saves, or reports the first problem so it can be shown in
//! the form itself.
//!
//! Fields that do not apply to the chosen kind (an artist for a jingle, a
//! phone number for a reportage) are kept in the form but ignored.

mod event;
mod render;

use tui_input::Input;

use crate::{
    error::ValidationError,
    model::{
        Colour, ConnectionType, GameDetails, ItemType, LiveDetails, MusicDetails, ScriptFields,
        Segment, SegmentBody, SegmentKind, SegmentStatus,
    },
    util::format::{format_short, parse_duration},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormField {
    Title,
    Kind,
    Duration,
    Colour,
    Artist,
    Connection,
    Phone,
    FirstWords,
    Notes,
    LastWords,
}

impl FormField {
    pub(crate) const ALL: [FormField; 10] = [
        FormField::Title,
        FormField::Kind,
        FormField::Duration,
        FormField::Colour,
        FormField::Artist,
        FormField::Connection,
        FormField::Phone,
        FormField::FirstWords,
        FormField::Notes,
        FormField::LastWords,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            FormField::Title => "Titel",
            FormField::Kind => "Soort",
            FormField::Duration => "Duur",
            FormField::Colour => "Kleur",
            FormField::Artist => "Artiest",
            FormField::Connection => "Verbinding",
            FormField::Phone => "Telefoon",
            FormField::FirstWords => "Eerste woorden",
            FormField::Notes => "Notities",
            FormField::LastWords => "Laatste woorden",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// What saving the form does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormTarget {
    /// Insert a new segment at this index.
    New { position: usize },
    /// Replace the segment with this id.
    Edit { id: String, status: SegmentStatus },
}

pub(crate) struct SegmentForm {
    pub(crate) target: FormTarget,
    inputs: Vec<Input>,
    focus: usize,
    pub(crate) error: Option<String>,
    preview_url: Option<String>,
    audio_clips: Vec<String>,
}

impl SegmentForm {
    /// A form for a new segment, pre-filled from `template`.
    pub(crate) fn create(position: usize, template: &Segment) -> Self {
        Self::from_segment(FormTarget::New { position }, template)
    }

    /// A form editing an existing segment.
    pub(crate) fn edit(segment: &Segment) -> Self {
        let target = FormTarget::Edit {
            id: segment.id.clone(),
            status: segment.status,
        };
        Self::from_segment(target, segment)
    }

    fn from_segment(target: FormTarget, segment: &Segment) -> Self {
        let mut form = Self {
            target,
            inputs: vec![Input::default(); FormField::ALL.len()],
            focus: 0,
            error: None,
            preview_url: None,
            audio_clips: vec![],
        };

        form.set(FormField::Title, &segment.title);
        form.set(FormField::Kind, segment.kind().label());
        form.set(FormField::Duration, &format_short(segment.duration));
        form.set(FormField::Colour, &segment.colour.to_hex());
        form.set(FormField::FirstWords, &segment.script.first_words);
        form.set(FormField::Notes, &segment.script.notes);
        form.set(FormField::LastWords, &segment.script.last_words);

        match &segment.body {
            SegmentBody::Music(music) => {
                form.set(FormField::Artist, music.artist.as_deref().unwrap_or_default());
                form.preview_url = music.preview_url.clone();
            }
            SegmentBody::Live(live) => {
                form.set(FormField::Connection, live.connection.label());
                form.set(FormField::Phone, live.phone.as_deref().unwrap_or_default());
            }
            SegmentBody::Game(game) => form.audio_clips = game.audio_clips.clone(),
            _ => {}
        }

        form
    }

    pub(crate) fn is_new(&self) -> bool {
        matches!(self.target, FormTarget::New { .. })
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        self.inputs[field.index()].value()
    }

    pub(crate) fn set(&mut self, field: FormField, value: &str) {
        self.inputs[field.index()] = Input::new(value.to_string());
    }

    pub(crate) fn focused(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub(crate) fn input(&self, field: FormField) -> &Input {
        &self.inputs[field.index()]
    }

    fn focused_input_mut(&mut self) -> &mut Input {
        &mut self.inputs[self.focus]
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.focus = (self.focus + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    /// Builds the segment described by the form.
    ///
    /// Custom kinds are matched against `item_types` without regard to case,
    /// and take their default colour from the item type.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, the form is left as it
    /// is.
    pub(crate) fn build(&self, item_types: &[ItemType]) -> Result<Segment, ValidationError> {
        let title = self.value(FormField::Title).trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let kind = match self.value(FormField::Kind).trim() {
            "" => SegmentKind::Talk,
            name => match SegmentKind::from_name(name) {
                SegmentKind::Custom(name) => SegmentKind::Custom(
                    find_item_type(item_types, &name)
                        .map(|t| t.name.clone())
                        .unwrap_or(name),
                ),
                kind => kind,
            },
        };

        let duration_text = self.value(FormField::Duration).trim();
        if !duration_text.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidDuration(duration_text.to_string()));
        }

        let colour = match self.value(FormField::Colour).trim() {
            "" => match &kind {
                SegmentKind::Custom(name) => find_item_type(item_types, name)
                    .map(|t| t.colour)
                    .unwrap_or_else(|| kind.default_colour()),
                kind => kind.default_colour(),
            },
            hex => Colour::parse(hex)?,
        };

        let (id, status) = match &self.target {
            FormTarget::New { .. } => (String::new(), SegmentStatus::default()),
            FormTarget::Edit { id, status } => (id.clone(), *status),
        };

        let mut segment = Segment::new(&kind, title).with_duration(parse_duration(duration_text));
        segment.id = id;
        segment.status = status;
        segment.colour = colour;
        segment.script = ScriptFields {
            first_words: self.value(FormField::FirstWords).trim().to_string(),
            notes: self.value(FormField::Notes).trim().to_string(),
            last_words: self.value(FormField::LastWords).trim().to_string(),
        };
        segment.body = self.body(&kind);

        Ok(segment)
    }

    fn body(&self, kind: &SegmentKind) -> SegmentBody {
        match kind {
            SegmentKind::Music => SegmentBody::Music(MusicDetails {
                artist: non_empty(self.value(FormField::Artist)),
                preview_url: self.preview_url.clone(),
            }),
            SegmentKind::Live => SegmentBody::Live(LiveDetails {
                connection: match self.value(FormField::Connection).trim() {
                    "" => ConnectionType::default(),
                    name => ConnectionType::from_name(name),
                },
                phone: non_empty(self.value(FormField::Phone)),
            }),
            SegmentKind::Game => SegmentBody::Game(GameDetails {
                audio_clips: self.audio_clips.clone(),
            }),
            kind => kind.empty_body(),
        }
    }
}

fn find_item_type<'a>(item_types: &'a [ItemType], name: &str) -> Option<&'a ItemType> {
    item_types.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verkeer() -> ItemType {
        ItemType {
            name: "Verkeer".to_string(),
            colour: Colour::rgb(10, 20, 30),
            default_duration: 45,
        }
    }

    #[test]
    fn test_new_form_round_trips_template() {
        let template = Segment::new(&SegmentKind::Jingle, "Station ID").with_duration(10);
        let form = SegmentForm::create(0, &template);

        let built = form.build(&[]).unwrap();
        assert_eq!(built.title, "Station ID");
        assert_eq!(built.duration, 10);
        assert_eq!(built.kind(), SegmentKind::Jingle);
        assert!(built.id.is_empty());
    }

    #[test]
    fn test_edit_keeps_identity_and_status() {
        let mut segment = Segment::new(&SegmentKind::Talk, "Opening").with_duration(120);
        segment.id = "s1".to_string();
        segment.status = SegmentStatus::Checked;

        let mut form = SegmentForm::edit(&segment);
        form.set(FormField::Title, "Opening kort");
        form.set(FormField::Duration, "1:30");

        let built = form.build(&[]).unwrap();
        assert_eq!(built.id, "s1");
        assert_eq!(built.status, SegmentStatus::Checked);
        assert_eq!(built.title, "Opening kort");
        assert_eq!(built.duration, 90);
    }

    #[test]
    fn test_validation_errors() {
        let template = Segment::new(&SegmentKind::Talk, "Opening");

        let mut form = SegmentForm::create(0, &template);
        form.set(FormField::Title, "   ");
        assert_eq!(form.build(&[]), Err(ValidationError::EmptyTitle));

        let mut form = SegmentForm::create(0, &template);
        form.set(FormField::Duration, "lang");
        assert!(matches!(form.build(&[]), Err(ValidationError::InvalidDuration(_))));

        let mut form = SegmentForm::create(0, &template);
        form.set(FormField::Colour, "rood");
        assert!(matches!(form.build(&[]), Err(ValidationError::InvalidColour(_))));
    }

    #[test]
    fn test_kind_specific_fields() {
        let template = Segment::new(&SegmentKind::Talk, "Verslag");

        let mut form = SegmentForm::create(0, &template);
        form.set(FormField::Kind, "live");
        form.set(FormField::Connection, "telefoon");
        form.set(FormField::Phone, "0612345678");
        form.set(FormField::Artist, "ignored");

        let built = form.build(&[]).unwrap();
        assert_eq!(
            built.body,
            SegmentBody::Live(LiveDetails {
                connection: ConnectionType::Telefoon,
                phone: Some("0612345678".to_string()),
            })
        );
        assert_eq!(built.body.artist(), None);
    }

    #[test]
    fn test_custom_kind_uses_item_type() {
        let template = Segment::new(&SegmentKind::Talk, "Files");

        let mut form = SegmentForm::create(0, &template);
        form.set(FormField::Kind, "verkeer");
        form.set(FormField::Colour, "");

        let built = form.build(&[verkeer()]).unwrap();
        assert_eq!(built.kind(), SegmentKind::Custom("Verkeer".to_string()));
        assert_eq!(built.colour, Colour::rgb(10, 20, 30));
    }

    #[test]
    fn test_focus_wraps() {
        let template = Segment::new(&SegmentKind::Talk, "Opening");
        let mut form = SegmentForm::create(0, &template);

        assert_eq!(form.focused(), FormField::Title);
        form.focus_previous();
        assert_eq!(form.focused(), FormField::LastWords);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused(), FormField::Kind);
    }
}
