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

//! Program level records that are not part of a rundown: custom item types,
//! user feedback and the audio library index.

use anyhow::Result;
use rusqlite::{Connection, Row, params};

use crate::{
    error::ValidationError,
    lookup::TrackMatch,
    model::{ItemType, SegmentKind},
};

use super::model::{from_sql_seconds, to_sql_seconds};

/// Fetches the custom item types of a program, alphabetically.
pub(crate) fn list_item_types(conn: &Connection, owner_id: &str) -> Result<Vec<ItemType>> {
    let mut stmt = conn.prepare_cached(
        "SELECT name, colour, default_duration FROM item_types WHERE owner_id = ? ORDER BY name",
    )?;

    let results = stmt
        .query_map([owner_id], ItemType::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Creates or replaces a custom item type.
///
/// Names compare case-insensitively, saving "Verkeer" after "verkeer"
/// replaces it.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the name is empty or is the name of a
/// built-in kind.
pub(crate) fn save_item_type(conn: &Connection, owner_id: &str, item_type: &ItemType) -> Result<()> {
    let name = item_type.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    if !matches!(SegmentKind::from_name(name), SegmentKind::Custom(_)) {
        return Err(ValidationError::ReservedName(name.to_string()).into());
    }

    let mut stmt = conn.prepare_cached(
        "INSERT INTO item_types (owner_id, name, colour, default_duration) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (owner_id, name)
         DO UPDATE SET name = excluded.name, colour = excluded.colour, default_duration = excluded.default_duration",
    )?;
    stmt.execute(params![
        owner_id,
        name,
        item_type.colour,
        to_sql_seconds(item_type.default_duration)
    ])?;

    Ok(())
}

/// Stores a feedback message.
pub(crate) fn submit_feedback(conn: &Connection, user_id: &str, message: &str) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        anyhow::bail!("Feedbackbericht is leeg");
    }

    conn.execute(
        "INSERT INTO feedback (user_id, message) VALUES (?1, ?2)",
        params![user_id, message],
    )?;

    log::info!("Feedback received from {}", user_id);

    Ok(())
}

/// Searches the library index by title or artist.
///
/// Title matches that start with the query come first.
pub(crate) fn search_library(conn: &Connection, query: &str, limit: usize) -> Result<Vec<TrackMatch>> {
    let pattern = format!("%{}%", escape_like(query));
    let prefix = format!("{}%", escape_like(query));

    let mut stmt = conn.prepare_cached(
        "SELECT title, artist, duration, filename
         FROM library_tracks
         WHERE title LIKE ?1 ESCAPE '\\' OR artist LIKE ?1 ESCAPE '\\'
         ORDER BY CASE WHEN title LIKE ?2 ESCAPE '\\' THEN 0 ELSE 1 END, title, artist
         LIMIT ?3",
    )?;

    let results = stmt
        .query_map(params![pattern, prefix, limit as i64], track_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

fn track_from_row(row: &Row) -> rusqlite::Result<TrackMatch> {
    let filename: String = row.get(3)?;

    Ok(TrackMatch {
        name: row.get(0)?,
        artist: row.get(1)?,
        duration: from_sql_seconds(row.get(2)?),
        preview_url: Some(format!("file://{}", filename)),
    })
}

fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{db::tests::open, model::Colour};

    pub(crate) fn add_track(conn: &Connection, title: &str, artist: &str, duration: i64) {
        let filename = format!("/music/{} - {}.mp3", artist, title);
        conn.execute(
            "INSERT INTO library_tracks (durable_id, title, artist, album, duration, filename)
             VALUES (?1, ?2, ?3, '', ?4, ?5)",
            params![
                xxhash_rust::xxh3::xxh3_64(filename.as_bytes()) as i64,
                title,
                artist,
                duration,
                filename
            ],
        )
        .unwrap();
    }

    fn verkeer(duration: u64) -> ItemType {
        ItemType {
            name: "Verkeer".to_string(),
            colour: Colour::rgb(1, 2, 3),
            default_duration: duration,
        }
    }

    #[test]
    fn test_save_item_type_upserts() {
        let conn = open();
        save_item_type(&conn, "p1", &verkeer(60)).unwrap();

        let mut renamed = verkeer(90);
        renamed.name = "VERKEER".to_string();
        save_item_type(&conn, "p1", &renamed).unwrap();

        let types = list_item_types(&conn, "p1").unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "VERKEER");
        assert_eq!(types[0].default_duration, 90);
        assert!(list_item_types(&conn, "p2").unwrap().is_empty());
    }

    #[test]
    fn test_item_type_name_rules() {
        let conn = open();

        let mut empty = verkeer(60);
        empty.name = "  ".to_string();
        assert!(save_item_type(&conn, "p1", &empty).is_err());

        let mut built_in = verkeer(60);
        built_in.name = "Muziek".to_string();
        assert!(save_item_type(&conn, "p1", &built_in).is_err());
    }

    #[test]
    fn test_submit_feedback() {
        let conn = open();
        submit_feedback(&conn, "anne", "Graag een donkere modus").unwrap();
        assert!(submit_feedback(&conn, "anne", "   ").is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM feedback", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_search_library() {
        let conn = open();
        add_track(&conn, "Don't Stop Me Now", "Queen", 209);
        add_track(&conn, "Bohemian Rhapsody", "Queen", 355);
        add_track(&conn, "Under Pressure", "Queen & David Bowie", 248);
        add_track(&conn, "100% Pure Love", "Crystal Waters", 241);

        let by_title = search_library(&conn, "bohemian", 5).unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].artist, "Queen");
        assert_eq!(by_title[0].duration, 355);

        assert_eq!(search_library(&conn, "queen", 5).unwrap().len(), 3);
        assert_eq!(search_library(&conn, "queen", 2).unwrap().len(), 2);

        let literal = search_library(&conn, "100%", 5).unwrap();
        assert_eq!(literal.len(), 1);
        assert!(search_library(&conn, "0%P", 5).unwrap().is_empty());
    }
}
