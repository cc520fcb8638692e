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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and high-level domain models, ensuring type-safe extraction of model
//! attributes from database queries.
//!
//! The kind-specific part of a segment is stored as a `kind` key plus an
//! optional JSON `details` column.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{
    Result, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};

use crate::model::{
    Colour, ItemType, Role, Rundown, ScriptFields, Segment, SegmentBody, SegmentKind,
    SegmentStatus,
};

/// Columns read by [`Segment::from_row`], in order.
pub(super) const SEGMENT_COLUMNS: &str =
    "id, title, duration, colour, status, first_words, notes, last_words, kind, details";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The parts of a segment that need converting before they are stored.
pub(super) struct SegmentRow {
    pub(super) kind: String,
    pub(super) duration: i64,
    pub(super) details: Option<String>,
}

impl SegmentRow {
    pub(super) fn from_segment(segment: &Segment) -> anyhow::Result<Self> {
        let details = match &segment.body {
            SegmentBody::Music(details) => Some(serde_json::to_string(details)?),
            SegmentBody::Live(details) => Some(serde_json::to_string(details)?),
            SegmentBody::Game(details) => Some(serde_json::to_string(details)?),
            SegmentBody::Talk
            | SegmentBody::Jingle
            | SegmentBody::Reportage
            | SegmentBody::Custom(_) => None,
        };

        Ok(Self {
            kind: segment.kind().key().to_string(),
            duration: to_sql_seconds(segment.duration),
            details,
        })
    }
}

impl Segment {
    /// Maps an SQLite row, selected with [`SEGMENT_COLUMNS`], to a
    /// [`Segment`].
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if:
    /// * The row does not contain enough columns.
    /// * The data in a column cannot be converted to the required Rust type.
    /// * The `details` column does not match the segment kind.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let kind: String = row.get(8)?;
        let details: Option<String> = row.get(9)?;

        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            duration: from_sql_seconds(row.get(2)?),
            colour: row.get(3)?,
            status: row.get(4)?,
            script: ScriptFields {
                first_words: row.get(5)?,
                notes: row.get(6)?,
                last_words: row.get(7)?,
            },
            body: body_from_parts(&kind, details.as_deref())
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e)))?,
        })
    }
}

fn body_from_parts(kind: &str, details: Option<&str>) -> serde_json::Result<SegmentBody> {
    let kind = SegmentKind::from_name(kind);
    let Some(details) = details else {
        return Ok(kind.empty_body());
    };

    let body = match kind {
        SegmentKind::Music => SegmentBody::Music(serde_json::from_str(details)?),
        SegmentKind::Live => SegmentBody::Live(serde_json::from_str(details)?),
        SegmentKind::Game => SegmentBody::Game(serde_json::from_str(details)?),
        other => other.empty_body(),
    };

    Ok(body)
}

impl Rundown {
    /// Maps an SQLite row (`id, owner_id, name, date`) to a [`Rundown`].
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let date: String = row.get(3)?;

        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            name: row.get(2)?,
            date: NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
            })?,
        })
    }
}

impl ItemType {
    /// Maps an SQLite row (`name, colour, default_duration`) to an
    /// [`ItemType`].
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            colour: row.get(1)?,
            default_duration: from_sql_seconds(row.get(2)?),
        })
    }
}

pub(super) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(super) fn timestamp_to_sql(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}

pub(super) fn timestamp_from_sql(value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
}

pub(super) fn to_sql_seconds(seconds: u64) -> i64 {
    i64::try_from(seconds).unwrap_or(i64::MAX)
}

pub(super) fn from_sql_seconds(seconds: i64) -> u64 {
    u64::try_from(seconds).unwrap_or(0)
}

impl ToSql for Colour {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_hex()))
    }
}

impl FromSql for Colour {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Colour::parse(value.as_str()?).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for SegmentStatus {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.key()))
    }
}

impl FromSql for SegmentStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        SegmentStatus::parse(value.as_str()?).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.key()))
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Role::parse(value.as_str()?).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
