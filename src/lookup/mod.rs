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

//! Track metadata lookup.
//!
//! Looking up a song fills in the title, artist and duration of a music
//! segment so they do not have to be typed. The lookup source sits behind
//! the [`TrackLookup`] trait, [`LibraryLookup`] answers queries from the index
//! of the local audio library.

use anyhow::Result;
use rusqlite::Connection;

use crate::{
    db::library::search_library,
    model::{MusicDetails, Segment, SegmentBody, SegmentKind},
};

/// Most results a single lookup returns.
pub(crate) const MAX_LOOKUP_RESULTS: usize = 5;

/// Shortest query that is sent to the lookup source.
pub(crate) const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrackMatch {
    pub(crate) name: String,
    pub(crate) artist: String,
    pub(crate) duration: u64,
    pub(crate) preview_url: Option<String>,
}

impl TrackMatch {
    /// A music segment pre-filled from this match.
    pub(crate) fn into_segment(self) -> Segment {
        let mut segment = Segment::new(&SegmentKind::Music, self.name).with_duration(self.duration);
        segment.body = SegmentBody::Music(MusicDetails {
            artist: (!self.artist.is_empty()).then_some(self.artist),
            preview_url: self.preview_url,
        });
        segment
    }
}

pub(crate) trait TrackLookup {
    /// Finds at most [`MAX_LOOKUP_RESULTS`] tracks matching `query`.
    fn search(&self, query: &str) -> Result<Vec<TrackMatch>>;
}

/// Looks tracks up in the scanned audio library.
pub(crate) struct LibraryLookup<'a> {
    conn: &'a Connection,
}

impl<'a> LibraryLookup<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl TrackLookup for LibraryLookup<'_> {
    fn search(&self, query: &str) -> Result<Vec<TrackMatch>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        search_library(self.conn, query, MAX_LOOKUP_RESULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{library::tests::add_track, tests::open};

    #[test]
    fn test_short_queries_return_nothing() {
        let conn = open();
        add_track(&conn, "Bohemian Rhapsody", "Queen", 355);

        let lookup = LibraryLookup::new(&conn);
        assert!(lookup.search("Bo").unwrap().is_empty());
        assert!(lookup.search("  Bo  ").unwrap().is_empty());
        assert_eq!(lookup.search("Boh").unwrap().len(), 1);
    }

    #[test]
    fn test_results_are_capped() {
        let conn = open();
        for i in 0..8 {
            add_track(&conn, &format!("Song {}", i), "Band", 200);
        }

        let lookup = LibraryLookup::new(&conn);
        assert_eq!(lookup.search("song").unwrap().len(), MAX_LOOKUP_RESULTS);
    }

    #[test]
    fn test_match_prefills_music_segment() {
        let track = TrackMatch {
            name: "Bohemian Rhapsody".to_string(),
            artist: "Queen".to_string(),
            duration: 355,
            preview_url: Some("file:///music/queen.mp3".to_string()),
        };

        let segment = track.into_segment();
        assert_eq!(segment.kind(), SegmentKind::Music);
        assert_eq!(segment.title, "Bohemian Rhapsody");
        assert_eq!(segment.duration, 355);
        assert_eq!(segment.body.artist(), Some("Queen"));
    }
}
