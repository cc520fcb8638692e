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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database, including
//! schema creation and the rundown and segment records. It uses cached
//! statements for the frequently executed queries.
//!
//! # Tables
//!
//! * `programs`, `program_members`, `invites` - Access control, see [`access`].
//! * `rundowns` - Named, dated show plans owned by a program.
//! * `segments` - The items of a rundown, ordered by `position`.
//! * `item_types` - Custom segment kinds of a program.
//! * `feedback` - Free text feedback from users.
//! * `library_tracks` - Index of the local audio library, see [`scan`].
//!
//! # Consistency
//!
//! Operations that touch more than one row (inserting in the middle of a
//! rundown, deleting, duplicating) run inside a single transaction so a
//! failure never leaves a half-copied rundown behind.

pub(crate) mod access;
pub(crate) mod library;
mod model;
pub(crate) mod scan;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::model::{Rundown, Segment, timeline::new_segment_id};

use self::model::{SEGMENT_COLUMNS, SegmentRow, date_to_sql};

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging, the UI and worker threads may
///   both read.
/// * **Constraints**: Enforces foreign key integrity so deleting a rundown
///   removes its segments.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices
///   exist.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Kan {} niet openen", path))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Kan niet overschakelen naar WAL, huidige modus: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(100);

    create_schema(&conn)?;

    log::info!("Opened database {}", path);

    Ok(conn)
}

/// Create the database schema.
///
/// This operation is wrapped in a single SQL transaction to ensure the schema
/// is updated atomically.
///
/// # Errors
///
/// Returns an error if the transaction fails, if there are permission issues
/// with the database file, or if the SQL syntax is invalid.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS programs (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS program_members (
            program_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            role TEXT NOT NULL,
            PRIMARY KEY (program_id, user_id),
            FOREIGN KEY (program_id) REFERENCES programs (id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS invites (
            token TEXT PRIMARY KEY,
            program_id TEXT NOT NULL,
            role TEXT NOT NULL,
            created_by TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            revoked INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (program_id) REFERENCES programs (id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS rundowns (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_rundowns_owner_id ON rundowns (owner_id);

        CREATE TABLE IF NOT EXISTS segments (
            id TEXT PRIMARY KEY,
            rundown_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            kind TEXT NOT NULL,
            title TEXT NOT NULL,
            duration INTEGER NOT NULL,
            colour TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'draft',
            first_words TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '',
            last_words TEXT NOT NULL DEFAULT '',
            details TEXT,
            FOREIGN KEY (rundown_id) REFERENCES rundowns (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_segments_rundown_id ON segments (rundown_id, position);

        CREATE TABLE IF NOT EXISTS item_types (
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL COLLATE NOCASE,
            colour TEXT NOT NULL,
            default_duration INTEGER NOT NULL,
            PRIMARY KEY (owner_id, name)
        );

        CREATE TABLE IF NOT EXISTS feedback (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS library_tracks (
            durable_id INTEGER PRIMARY KEY,
            title TEXT NOT NULL COLLATE NOCASE,
            artist TEXT NOT NULL COLLATE NOCASE,
            album TEXT NOT NULL COLLATE NOCASE,
            duration INTEGER NOT NULL,
            filename TEXT NOT NULL UNIQUE
        );

        COMMIT;",
    )
    .context("Kan het databaseschema niet aanmaken")
}

/// Fetches the rundowns of an owner, newest date first.
pub(crate) fn list_rundowns(conn: &Connection, owner_id: &str) -> Result<Vec<Rundown>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, owner_id, name, date
         FROM rundowns
         WHERE owner_id = ?
         ORDER BY date DESC, created_at DESC, rowid DESC",
    )?;

    let results = stmt
        .query_map([owner_id], Rundown::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Stores a new, empty rundown.
pub(crate) fn create_rundown(conn: &Connection, rundown: &Rundown) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO rundowns (id, owner_id, name, date) VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![
        rundown.id,
        rundown.owner_id,
        rundown.name,
        date_to_sql(rundown.date)
    ])?;

    Ok(())
}

/// Renames a rundown, returns `false` if it does not exist.
pub(crate) fn rename_rundown(conn: &Connection, id: &str, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare_cached("UPDATE rundowns SET name = ?2 WHERE id = ?1")?;
    let changed = stmt.execute(params![id, name])?;

    Ok(changed > 0)
}

/// Deletes a rundown and its segments.
///
/// Returns `false` if the rundown does not exist.
///
/// # Errors
///
/// Refuses to delete the last rundown of its owner, so a program always
/// has something to work on.
pub(crate) fn delete_rundown(conn: &mut Connection, id: &str) -> Result<bool> {
    let tx = conn.transaction()?;

    let owner_id: Option<String> = tx
        .query_row("SELECT owner_id FROM rundowns WHERE id = ?", [id], |r| r.get(0))
        .optional()?;

    let Some(owner_id) = owner_id else {
        return Ok(false);
    };

    let count: i64 = tx.query_row(
        "SELECT COUNT(*) FROM rundowns WHERE owner_id = ?",
        [&owner_id],
        |r| r.get(0),
    )?;

    if count <= 1 {
        anyhow::bail!("Het laatste draaiboek kan niet verwijderd worden");
    }

    tx.execute("DELETE FROM rundowns WHERE id = ?", [id])?;
    tx.commit().context("Kan de transactie niet vastleggen")?;

    Ok(true)
}

/// Copies a rundown and all of its segments.
///
/// The copy gets a new id, the name suffixed with "(kopie)" and fresh
/// segment ids. Both steps share one transaction. Returns `None` if the
/// source rundown does not exist.
pub(crate) fn duplicate_rundown(conn: &mut Connection, id: &str) -> Result<Option<Rundown>> {
    let tx = conn.transaction()?;

    let source = tx
        .query_row(
            "SELECT id, owner_id, name, date FROM rundowns WHERE id = ?",
            [id],
            Rundown::from_row,
        )
        .optional()?;

    let Some(source) = source else {
        return Ok(None);
    };

    let copy = Rundown {
        id: uuid::Uuid::new_v4().to_string(),
        owner_id: source.owner_id.clone(),
        name: format!("{} (kopie)", source.name),
        date: source.date,
    };

    create_rundown(&tx, &copy)?;

    let segments = list_segments(&tx, &source.id)?;
    for (position, mut segment) in segments.into_iter().enumerate() {
        segment.id = new_segment_id();
        write_segment(&tx, &copy.id, &segment, position)?;
    }

    tx.commit().context("Kan de transactie niet vastleggen")?;

    Ok(Some(copy))
}

/// Fetches the segments of a rundown in running order.
pub(crate) fn list_segments(conn: &Connection, rundown_id: &str) -> Result<Vec<Segment>> {
    let sql = format!(
        "SELECT {} FROM segments WHERE rundown_id = ? ORDER BY position, rowid",
        SEGMENT_COLUMNS
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([rundown_id], Segment::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Inserts a segment at `position`, shifting later segments down.
pub(crate) fn insert_segment(
    conn: &mut Connection,
    rundown_id: &str,
    segment: &Segment,
    position: usize,
) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "UPDATE segments SET position = position + 1 WHERE rundown_id = ?1 AND position >= ?2",
        params![rundown_id, position as i64],
    )?;

    write_segment(&tx, rundown_id, segment, position)?;

    tx.commit().context("Kan de transactie niet vastleggen")?;

    Ok(())
}

/// Replaces the stored record of a segment, keeping its position.
///
/// Returns `false` if the segment does not exist.
pub(crate) fn update_segment(conn: &Connection, segment: &Segment) -> Result<bool> {
    let row = SegmentRow::from_segment(segment)?;

    let mut stmt = conn.prepare_cached(
        "UPDATE segments
         SET kind = ?2, title = ?3, duration = ?4, colour = ?5, status = ?6,
             first_words = ?7, notes = ?8, last_words = ?9, details = ?10
         WHERE id = ?1",
    )?;

    let changed = stmt.execute(params![
        segment.id,
        row.kind,
        segment.title,
        row.duration,
        segment.colour,
        segment.status,
        segment.script.first_words,
        segment.script.notes,
        segment.script.last_words,
        row.details,
    ])?;

    Ok(changed > 0)
}

/// Deletes a segment and closes the gap it leaves.
///
/// Returns `false` if the segment does not exist.
pub(crate) fn delete_segment(conn: &mut Connection, id: &str) -> Result<bool> {
    let tx = conn.transaction()?;

    let found: Option<(String, i64)> = tx
        .query_row(
            "SELECT rundown_id, position FROM segments WHERE id = ?",
            [id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;

    let Some((rundown_id, position)) = found else {
        return Ok(false);
    };

    tx.execute("DELETE FROM segments WHERE id = ?", [id])?;
    tx.execute(
        "UPDATE segments SET position = position - 1 WHERE rundown_id = ?1 AND position > ?2",
        params![rundown_id, position],
    )?;

    tx.commit().context("Kan de transactie niet vastleggen")?;

    Ok(true)
}

/// Stores the running order of a rundown, `ids` in their new order.
pub(crate) fn reorder_segments(conn: &mut Connection, rundown_id: &str, ids: &[String]) -> Result<()> {
    let tx = conn.transaction()?;

    {
        let mut stmt = tx.prepare_cached(
            "UPDATE segments SET position = ?1 WHERE id = ?2 AND rundown_id = ?3",
        )?;
        for (position, id) in ids.iter().enumerate() {
            stmt.execute(params![position as i64, id, rundown_id])?;
        }
    }

    tx.commit().context("Kan de transactie niet vastleggen")?;

    Ok(())
}

fn write_segment(conn: &Connection, rundown_id: &str, segment: &Segment, position: usize) -> Result<()> {
    let row = SegmentRow::from_segment(segment)?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO segments (
            id, rundown_id, position, kind, title, duration, colour, status,
            first_words, notes, last_words, details
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )?;

    stmt.execute(params![
        segment.id,
        rundown_id,
        position as i64,
        row.kind,
        segment.title,
        row.duration,
        segment.colour,
        segment.status,
        segment.script.first_words,
        segment.script.notes,
        segment.script.last_words,
        row.details,
    ])?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{
        ConnectionType, LiveDetails, MusicDetails, SegmentBody, SegmentKind, SegmentStatus,
    };

    pub(crate) fn open() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    fn rundown(id: &str, name: &str) -> Rundown {
        Rundown {
            id: id.to_string(),
            owner_id: "program-1".to_string(),
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        }
    }

    fn segment(id: &str, title: &str) -> Segment {
        let mut segment = Segment::new(&SegmentKind::Talk, title);
        segment.id = id.to_string();
        segment
    }

    fn titles(conn: &Connection, rundown_id: &str) -> Vec<String> {
        list_segments(conn, rundown_id)
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect()
    }

    #[test]
    fn test_rundown_lifecycle() {
        let mut conn = open();
        create_rundown(&conn, &rundown("r1", "Ochtend")).unwrap();
        create_rundown(&conn, &rundown("r2", "Middag")).unwrap();

        assert_eq!(list_rundowns(&conn, "program-1").unwrap().len(), 2);
        assert!(list_rundowns(&conn, "other").unwrap().is_empty());

        assert!(rename_rundown(&conn, "r1", "Vroeg").unwrap());
        assert!(!rename_rundown(&conn, "missing", "x").unwrap());

        assert!(delete_rundown(&mut conn, "r2").unwrap());
        let remaining = list_rundowns(&conn, "program-1").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Vroeg");
    }

    #[test]
    fn test_last_rundown_is_kept() {
        let mut conn = open();
        create_rundown(&conn, &rundown("r1", "Ochtend")).unwrap();

        assert!(delete_rundown(&mut conn, "r1").is_err());
        assert!(!delete_rundown(&mut conn, "missing").unwrap());
        assert_eq!(list_rundowns(&conn, "program-1").unwrap().len(), 1);
    }

    #[test]
    fn test_segment_round_trip_keeps_body() {
        let conn = open();
        create_rundown(&conn, &rundown("r1", "Ochtend")).unwrap();

        let mut live = segment("s1", "Verslaggever");
        live.body = SegmentBody::Live(LiveDetails {
            connection: ConnectionType::Telefoon,
            phone: Some("0612345678".to_string()),
        });
        live.status = SegmentStatus::Checked;
        live.script.first_words = "Hallo".to_string();

        let mut custom = segment("s2", "Files");
        custom.body = SegmentBody::Custom("Verkeer".to_string());

        write_segment(&conn, "r1", &live, 0).unwrap();
        write_segment(&conn, "r1", &custom, 1).unwrap();

        let stored = list_segments(&conn, "r1").unwrap();
        assert_eq!(stored, vec![live, custom]);
    }

    #[test]
    fn test_insert_in_the_middle_shifts_positions() {
        let mut conn = open();
        create_rundown(&conn, &rundown("r1", "Ochtend")).unwrap();

        insert_segment(&mut conn, "r1", &segment("a", "A"), 0).unwrap();
        insert_segment(&mut conn, "r1", &segment("c", "C"), 1).unwrap();
        insert_segment(&mut conn, "r1", &segment("b", "B"), 1).unwrap();

        assert_eq!(titles(&conn, "r1"), ["A", "B", "C"]);
    }

    #[test]
    fn test_update_and_delete_segment() {
        let mut conn = open();
        create_rundown(&conn, &rundown("r1", "Ochtend")).unwrap();
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            insert_segment(&mut conn, "r1", &segment(id, &id.to_uppercase()), i).unwrap();
        }

        let mut music = segment("b", "Song");
        music.body = SegmentBody::Music(MusicDetails {
            artist: Some("Queen".to_string()),
            preview_url: None,
        });
        music.duration = 355;
        assert!(update_segment(&conn, &music).unwrap());
        assert!(!update_segment(&conn, &segment("zz", "Nope")).unwrap());

        let stored = list_segments(&conn, "r1").unwrap();
        assert_eq!(stored[1], music);

        assert!(delete_segment(&mut conn, "a").unwrap());
        assert!(!delete_segment(&mut conn, "a").unwrap());
        insert_segment(&mut conn, "r1", &segment("d", "D"), 2).unwrap();

        assert_eq!(titles(&conn, "r1"), ["Song", "C", "D"]);
    }

    #[test]
    fn test_reorder_segments() {
        let mut conn = open();
        create_rundown(&conn, &rundown("r1", "Ochtend")).unwrap();
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            insert_segment(&mut conn, "r1", &segment(id, &id.to_uppercase()), i).unwrap();
        }

        let order = ["b", "c", "a"].map(String::from);
        reorder_segments(&mut conn, "r1", &order).unwrap();

        assert_eq!(titles(&conn, "r1"), ["B", "C", "A"]);
    }

    #[test]
    fn test_duplicate_rundown() {
        let mut conn = open();
        create_rundown(&conn, &rundown("r1", "Ochtend")).unwrap();
        for (i, id) in ["a", "b"].iter().enumerate() {
            insert_segment(&mut conn, "r1", &segment(id, &id.to_uppercase()), i).unwrap();
        }

        let copy = duplicate_rundown(&mut conn, "r1").unwrap().unwrap();
        assert_eq!(copy.name, "Ochtend (kopie)");
        assert_ne!(copy.id, "r1");

        let copied = list_segments(&conn, &copy.id).unwrap();
        assert_eq!(copied.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(), ["A", "B"]);
        assert!(copied.iter().all(|s| s.id != "a" && s.id != "b"));

        assert!(duplicate_rundown(&mut conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_deleting_rundown_removes_segments() {
        let mut conn = open();
        create_rundown(&conn, &rundown("r1", "Ochtend")).unwrap();
        create_rundown(&conn, &rundown("r2", "Middag")).unwrap();
        insert_segment(&mut conn, "r1", &segment("a", "A"), 0).unwrap();

        delete_rundown(&mut conn, "r1").unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM segments", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
