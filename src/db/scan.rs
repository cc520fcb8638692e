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

//! Audio library indexing.
//!
//! Builds the `library_tracks` table that answers track lookups. Files are
//! discovered with `WalkDir` and their tags and duration are read with
//! `Lofty`.
//!
//! Each track is keyed by a hash of its path, so a rescan keeps the same id
//! for a file that has not moved.

use std::path::Path;

use anyhow::{Context, Result};
use lofty::prelude::*;
use lofty::probe::Probe;
use rusqlite::{Connection, params};
use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "flac", "ogg", "wav", "m4a"];

/// Progress of a library scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanProgress {
    StartedDirectory(String),
    ProcessedFile(usize),
    FinishedDirectory(String),
}

/// Rebuilds the library index from the given directories.
///
/// Files without readable tags are still indexed under their file name.
/// Files that cannot be read at all are skipped.
///
/// # Arguments
///
/// * `conn` - A mutable reference to the SQLite database connection.
/// * `media_dirs` - The directories to scan recursively.
/// * `on_progress` - Called as directories and files are processed.
///
/// # Returns
///
/// Returns the number of tracks in the index afterwards.
///
/// # Errors
///
/// Returns an error if the transaction fails or a path is not valid UTF-8.
pub(crate) fn index_library(
    conn: &mut Connection,
    media_dirs: &[String],
    mut on_progress: impl FnMut(ScanProgress),
) -> Result<i64> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM library_tracks", [])?;

    let mut processed = 0;

    for dir in media_dirs {
        on_progress(ScanProgress::StartedDirectory(dir.clone()));

        for entry in WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| is_audio_file(e.path()))
        {
            let path = entry.path();

            let Some(track) = read_track(path) else {
                continue;
            };

            let filename = path.to_str().context("Pad bevat ongeldige UTF-8")?;

            tx.execute(
                "INSERT OR IGNORE INTO library_tracks (durable_id, title, artist, album, duration, filename)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    durable_id(filename),
                    track.title,
                    track.artist,
                    track.album,
                    track.duration,
                    filename
                ],
            )?;

            processed += 1;
            on_progress(ScanProgress::ProcessedFile(processed));
        }

        on_progress(ScanProgress::FinishedDirectory(dir.clone()));
    }

    tx.commit().context("Kan de transactie niet vastleggen")?;

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM library_tracks", [], |row| row.get(0))?;

    log::info!("Indexed {} tracks from {} directories", count, media_dirs.len());

    Ok(count)
}

struct ScannedTrack {
    title: String,
    artist: String,
    album: String,
    duration: i64,
}

fn read_track(path: &Path) -> Option<ScannedTrack> {
    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(file) => file,
        Err(e) => {
            log::warn!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };

    let file_stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let duration = i64::try_from(tagged_file.properties().duration().as_secs()).unwrap_or(0);

    let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
        log::debug!("No tags in {}", path.display());
        return Some(ScannedTrack {
            title: file_stem,
            artist: String::new(),
            album: String::new(),
            duration,
        });
    };

    Some(ScannedTrack {
        title: tag.title().map(|t| t.to_string()).unwrap_or(file_stem),
        artist: tag.artist().map(|a| a.to_string()).unwrap_or_default(),
        album: tag.album().map(|a| a.to_string()).unwrap_or_default(),
        duration,
    })
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn durable_id(filename: &str) -> i64 {
    xxh3_64(filename.as_bytes()) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::open;

    #[test]
    fn test_audio_extensions() {
        assert!(is_audio_file(Path::new("/music/song.mp3")));
        assert!(is_audio_file(Path::new("/music/SONG.FLAC")));
        assert!(!is_audio_file(Path::new("/music/cover.jpg")));
        assert!(!is_audio_file(Path::new("/music/README")));
    }

    #[test]
    fn test_durable_id_is_stable() {
        assert_eq!(durable_id("/music/a.mp3"), durable_id("/music/a.mp3"));
        assert_ne!(durable_id("/music/a.mp3"), durable_id("/music/b.mp3"));
    }

    #[test]
    fn test_missing_directory_clears_index() {
        let mut conn = open();
        crate::db::library::tests::add_track(&conn, "Old", "Band", 100);

        let mut events = Vec::new();
        let dirs = vec!["/nonexistent/draaiboek-test".to_string()];
        let count = index_library(&mut conn, &dirs, |p| events.push(p)).unwrap();

        assert_eq!(count, 0);
        assert_eq!(
            events,
            vec![
                ScanProgress::StartedDirectory(dirs[0].clone()),
                ScanProgress::FinishedDirectory(dirs[0].clone()),
            ]
        );
    }
}
