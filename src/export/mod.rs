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

//! Plain-text script export.
//!
//! Renders a rundown into the document the presenter takes into the studio.
//! The output only depends on its inputs, the generation date is passed in
//! rather than read from the clock.
//!
//! # Modes
//!
//! * [`ExportMode::Full`]: first words, notes and last words verbatim.
//! * [`ExportMode::Short`]: only first and last words, each cut off at
//!   [`SHORT_WORDS_LIMIT`] characters.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    model::{ConnectionType, Segment, SegmentBody, timeline::Timeline},
    util::format::{format_long, format_short},
};

/// Maximum number of characters of first/last words in the short export.
pub(crate) const SHORT_WORDS_LIMIT: usize = 60;

const ELLIPSIS: &str = "...";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ExportMode {
    #[default]
    Full,
    Short,
}

impl ExportMode {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "full" | "volledig" => Some(ExportMode::Full),
            "short" | "kort" => Some(ExportMode::Short),
            _ => None,
        }
    }
}

/// Renders the script document for a rundown.
pub(crate) fn render_script(
    title: &str,
    generated: NaiveDate,
    timeline: &Timeline,
    mode: ExportMode,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "DRAAIBOEK: {}", title);
    let _ = writeln!(out, "Gegenereerd: {}", generated.format("%Y-%m-%d"));
    let _ = writeln!(out, "Totale duur: {}", format_long(timeline.total_duration()));
    let _ = writeln!(out, "{}", "=".repeat(50));

    for (index, (segment, _, end)) in timeline.offsets().enumerate() {
        out.push('\n');
        write_segment(&mut out, index + 1, segment, end, mode);
    }

    out
}

fn write_segment(out: &mut String, number: usize, segment: &Segment, end: u64, mode: ExportMode) {
    let _ = write!(out, "{}. [{}] {}", number, segment.kind().label().to_uppercase(), segment.title);
    if let Some(artist) = segment.body.artist().filter(|a| !a.is_empty()) {
        let _ = write!(out, " - {}", artist);
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "   Duur: {} | Tijd: {}",
        format_short(segment.duration),
        format_long(end)
    );

    if let SegmentBody::Live(live) = &segment.body {
        match (&live.connection, live.phone.as_deref().filter(|p| !p.is_empty())) {
            (ConnectionType::Telefoon, Some(phone)) => {
                let _ = writeln!(out, "   Verbinding: {} ({})", live.connection.label(), phone);
            }
            (connection, _) => {
                let _ = writeln!(out, "   Verbinding: {}", connection.label());
            }
        }
    }

    let script = &segment.script;
    if script.is_empty() {
        return;
    }

    match mode {
        ExportMode::Full => {
            write_field(out, "Eerste woorden", &script.first_words);
            write_field(out, "Notities", &script.notes);
            write_field(out, "Laatste woorden", &script.last_words);
        }
        ExportMode::Short => {
            write_field(out, "Begin", &truncate_words(&script.first_words));
            write_field(out, "Eind", &truncate_words(&script.last_words));
        }
    }
}

fn write_field(out: &mut String, label: &str, value: &str) {
    if !value.trim().is_empty() {
        let _ = writeln!(out, "   {}: {}", label, value);
    }
}

/// Cuts `text` to [`SHORT_WORDS_LIMIT`] characters, marking the cut.
pub(crate) fn truncate_words(text: &str) -> String {
    if text.chars().count() <= SHORT_WORDS_LIMIT {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(SHORT_WORDS_LIMIT).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// File name of the exported document for the given generation date.
pub(crate) fn export_file_name(generated: NaiveDate) -> String {
    format!("draaiboek-{}.txt", generated.format("%Y-%m-%d"))
}

/// Writes the script document to `dir` and returns the path written.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub(crate) fn write_export(
    dir: &Path,
    title: &str,
    generated: NaiveDate,
    timeline: &Timeline,
    mode: ExportMode,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Kan exportmap {} niet aanmaken", dir.display()))?;

    let path = dir.join(export_file_name(generated));
    let document = render_script(title, generated, timeline, mode);

    fs::write(&path, document.as_bytes())
        .with_context(|| format!("Kan {} niet schrijven", path.display()))?;

    log::info!("Exported '{}' to {}", title, path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LiveDetails, MusicDetails, ScriptFields, SegmentKind};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn sample() -> Timeline {
        let mut song = Segment::new(&SegmentKind::Music, "Bohemian Rhapsody").with_duration(355);
        song.body = SegmentBody::Music(MusicDetails {
            artist: Some("Queen".to_string()),
            preview_url: None,
        });

        let mut talk = Segment::new(&SegmentKind::Talk, "Opening").with_duration(120);
        talk.script = ScriptFields {
            first_words: "Goedemorgen en welkom bij de ochtendshow, vandaag hebben we een bijzondere gast".to_string(),
            notes: "Gast aankondigen".to_string(),
            last_words: "Eerst muziek".to_string(),
        };

        let mut live = Segment::new(&SegmentKind::Live, "Verslaggever").with_duration(10);
        live.body = SegmentBody::Live(LiveDetails {
            connection: ConnectionType::Telefoon,
            phone: Some("0612345678".to_string()),
        });

        Timeline::from_segments(vec![song, talk, live])
    }

    #[test]
    fn test_header() {
        let text = render_script("Ochtendshow", date(), &sample(), ExportMode::Full);
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("DRAAIBOEK: Ochtendshow"));
        assert_eq!(lines.next(), Some("Gegenereerd: 2026-10-18"));
        assert_eq!(lines.next(), Some("Totale duur: 0:08:05"));
    }

    #[test]
    fn test_segment_lines() {
        let text = render_script("Ochtendshow", date(), &sample(), ExportMode::Full);

        assert!(text.contains("1. [MUZIEK] Bohemian Rhapsody - Queen\n   Duur: 5:55 | Tijd: 0:05:55\n"));
        assert!(text.contains("2. [PRESENTATIE] Opening\n   Duur: 2:00 | Tijd: 0:07:55\n"));
        assert!(text.contains("3. [LIVE] Verslaggever\n   Duur: 0:10 | Tijd: 0:08:05\n"));
        assert!(text.contains("   Verbinding: Telefoon (0612345678)\n"));
    }

    #[test]
    fn test_phone_only_for_telefoon() {
        let mut live = Segment::new(&SegmentKind::Live, "Studio B");
        live.body = SegmentBody::Live(LiveDetails {
            connection: ConnectionType::Teams,
            phone: Some("0612345678".to_string()),
        });

        let text = render_script("Show", date(), &Timeline::from_segments(vec![live]), ExportMode::Full);
        assert!(text.contains("   Verbinding: Teams\n"));
        assert!(!text.contains("0612345678"));
    }

    #[test]
    fn test_segment_without_script() {
        let text = render_script("Ochtendshow", date(), &sample(), ExportMode::Full);

        assert!(text.ends_with("   Verbinding: Telefoon (0612345678)\n"));
        assert!(text.contains("Queen\n   Duur: 5:55 | Tijd: 0:05:55\n\n2. [PRESENTATIE]"));
    }

    #[test]
    fn test_full_mode_is_verbatim() {
        let text = render_script("Ochtendshow", date(), &sample(), ExportMode::Full);

        assert!(text.contains("   Eerste woorden: Goedemorgen en welkom bij de ochtendshow, vandaag hebben we een bijzondere gast\n"));
        assert!(text.contains("   Notities: Gast aankondigen\n"));
        assert!(text.contains("   Laatste woorden: Eerst muziek\n"));
    }

    #[test]
    fn test_short_mode_truncates() {
        let text = render_script("Ochtendshow", date(), &sample(), ExportMode::Short);

        assert!(!text.contains("Notities"));
        assert!(text.contains("   Begin: Goedemorgen en welkom bij de ochtendshow, vandaag hebben we ...\n"));
        assert!(text.contains("   Eind: Eerst muziek\n"));

        for line in text.lines() {
            for label in ["   Begin: ", "   Eind: "] {
                if let Some(words) = line.strip_prefix(label) {
                    assert!(words.chars().count() <= SHORT_WORDS_LIMIT + ELLIPSIS.len());
                }
            }
        }
    }

    #[test]
    fn test_truncate_counts_characters() {
        let exact = "é".repeat(SHORT_WORDS_LIMIT);
        assert_eq!(truncate_words(&exact), exact);

        let long = "é".repeat(SHORT_WORDS_LIMIT + 1);
        let truncated = truncate_words(&long);
        assert_eq!(truncated.chars().count(), SHORT_WORDS_LIMIT + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_output_is_deterministic() {
        let timeline = sample();
        assert_eq!(
            render_script("Show", date(), &timeline, ExportMode::Short),
            render_script("Show", date(), &timeline, ExportMode::Short)
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(date()), "draaiboek-2026-10-18.txt");
    }
}
