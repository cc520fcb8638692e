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

//! Rundown timeline management.
//!
//! This module provides the ordered sequence of segments for the active
//! rundown. Segment order is the only source of timing: no segment carries a
//! start time, start and end offsets are always derived by summing the
//! durations of the segments before it.
//!
//! Operations on an unknown id or an out-of-range index never fail, they
//! report whether anything was found so callers can decide what to do.

use std::collections::HashSet;

use uuid::Uuid;

use crate::model::{Segment, SegmentPatch};

#[derive(Debug, Clone, Default)]
pub(crate) struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Creates a timeline from segments in their stored order.
    ///
    /// Missing or duplicate ids are replaced so the identity invariant holds
    /// even for hand-edited data.
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        let mut timeline = Self::new();
        for segment in segments {
            timeline.append(segment);
        }
        timeline
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.id == id)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.segments.iter().position(|segment| segment.id == id)
    }

    pub(crate) fn ids(&self) -> Vec<String> {
        self.segments.iter().map(|segment| segment.id.clone()).collect()
    }

    /// Adds a segment at the end of the timeline and returns it as stored.
    pub(crate) fn append(&mut self, segment: Segment) -> &Segment {
        let segment = self.with_fresh_id(segment);
        self.segments.push(segment);
        &self.segments[self.segments.len() - 1]
    }

    /// Inserts a segment before `index`, `index == len()` appends.
    ///
    /// Returns `None` without inserting when the index is out of range.
    pub(crate) fn insert_at(&mut self, index: usize, segment: Segment) -> Option<&Segment> {
        if index > self.segments.len() {
            return None;
        }

        let segment = self.with_fresh_id(segment);
        self.segments.insert(index, segment);
        self.segments.get(index)
    }

    /// Moves the segment at `from` so that it ends up at `to`.
    ///
    /// This has splice semantics: the segment is removed first and `to` is
    /// an index into the shortened sequence. Returns `false` if either index
    /// is out of range.
    pub(crate) fn move_to(&mut self, from: usize, to: usize) -> bool {
        let len = self.segments.len();
        if from >= len || to >= len {
            return false;
        }

        if from != to {
            let segment = self.segments.remove(from);
            self.segments.insert(to, segment);
        }

        true
    }

    /// Applies `patch` to the segment with the given id.
    ///
    /// Returns `false` if there is no such segment.
    pub(crate) fn update(&mut self, id: &str, patch: SegmentPatch) -> bool {
        match self.segments.iter_mut().find(|segment| segment.id == id) {
            Some(segment) => {
                patch.apply(segment);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the segment with the given id, if present.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Segment> {
        let index = self.position(id)?;
        Some(self.segments.remove(index))
    }

    /// Sum of the durations of the segments up to and including `index`.
    ///
    /// An out-of-range index yields zero.
    pub(crate) fn cumulative_duration(&self, index: usize) -> u64 {
        if index >= self.segments.len() {
            return 0;
        }

        self.segments[..=index]
            .iter()
            .map(|segment| segment.duration)
            .sum()
    }

    pub(crate) fn total_duration(&self) -> u64 {
        self.segments.iter().map(|segment| segment.duration).sum()
    }

    /// Iterates the segments together with their derived start and end
    /// offsets in seconds.
    pub(crate) fn offsets(&self) -> impl Iterator<Item = (&Segment, u64, u64)> + '_ {
        self.segments.iter().scan(0u64, |acc, segment| {
            let start = *acc;
            *acc += segment.duration;
            Some((segment, start, *acc))
        })
    }

    fn with_fresh_id(&self, mut segment: Segment) -> Segment {
        let taken: HashSet<&str> = self.segments.iter().map(|s| s.id.as_str()).collect();
        if segment.id.is_empty() || taken.contains(segment.id.as_str()) {
            segment.id = new_segment_id();
        }
        segment
    }
}

/// Generates a new, never reused, segment identifier.
pub(crate) fn new_segment_id() -> String {
    Uuid::new_v4().to_string()
}
