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

//! Programming clock projection.
//!
//! A radio hour is shown as a clock face where every segment occupies a wedge
//! proportional to its duration. Zero seconds is at 12 o'clock and time runs
//! clockwise. Angles are in degrees measured the screen way, so 12 o'clock is
//! -90 degrees.
//!
//! Segments starting at or after the end of the hour get no wedge, a segment
//! straddling the end of the hour is cut off at 12 o'clock and marked as
//! overflowing.

use crate::model::{Colour, timeline::Timeline};

/// Length of the clock face in seconds.
pub(crate) const CLOCK_FACE_SECONDS: u64 = 3600;

/// Colour of every wedge whose segment runs past the end of the hour.
pub(crate) const OVERFLOW_COLOUR: Colour = Colour::rgb(220, 38, 38);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Wedge {
    pub(crate) segment_id: String,
    /// True start offset of the segment in seconds.
    pub(crate) start: u64,
    /// Part of the segment that fits on the face, in seconds.
    pub(crate) visible: u64,
    pub(crate) start_angle: f64,
    pub(crate) sweep: f64,
    pub(crate) overflow: bool,
    pub(crate) colour: Colour,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClockFace {
    pub(crate) wedges: Vec<Wedge>,
    pub(crate) total: u64,
}

impl ClockFace {
    /// Projects the timeline onto the clock face.
    pub(crate) fn project(timeline: &Timeline) -> Self {
        let wedges = timeline
            .offsets()
            .filter(|(_, start, _)| *start < CLOCK_FACE_SECONDS)
            .map(|(segment, start, end)| {
                let visible = segment.duration.min(CLOCK_FACE_SECONDS - start);
                let overflow = end > CLOCK_FACE_SECONDS;

                Wedge {
                    segment_id: segment.id.clone(),
                    start,
                    visible,
                    start_angle: angle_for(start),
                    sweep: visible as f64 / CLOCK_FACE_SECONDS as f64 * 360.0,
                    overflow,
                    colour: if overflow { OVERFLOW_COLOUR } else { segment.colour },
                }
            })
            .collect();

        Self {
            wedges,
            total: timeline.total_duration(),
        }
    }

    pub(crate) fn is_overflowing(&self) -> bool {
        self.total > CLOCK_FACE_SECONDS
    }

    /// How far the show runs past the hour, if it does.
    pub(crate) fn excess(&self) -> Option<u64> {
        self.is_overflowing()
            .then(|| self.total - CLOCK_FACE_SECONDS)
    }
}

/// Angle of a point in time on the face.
///
/// There is no wrap around, an elapsed time past the hour gives an angle
/// beyond a full turn and it is up to the renderer what to do with it.
pub(crate) fn angle_for(seconds: u64) -> f64 {
    seconds as f64 / CLOCK_FACE_SECONDS as f64 * 360.0 - 90.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Segment, SegmentKind};

    fn timeline(durations: &[u64]) -> Timeline {
        Timeline::from_segments(
            durations
                .iter()
                .map(|d| Segment::new(&SegmentKind::Music, "Song").with_duration(*d))
                .collect(),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_wedge_angles() {
        let face = ClockFace::project(&timeline(&[900, 1800]));

        assert_eq!(face.wedges.len(), 2);
        assert!(approx(face.wedges[0].start_angle, -90.0));
        assert!(approx(face.wedges[0].sweep, 90.0));
        assert!(approx(face.wedges[1].start_angle, 0.0));
        assert!(approx(face.wedges[1].sweep, 180.0));
        assert!(face.wedges.iter().all(|w| !w.overflow));
        assert_eq!(face.excess(), None);
    }

    #[test]
    fn test_single_long_segment_is_truncated() {
        let face = ClockFace::project(&timeline(&[4000]));

        assert_eq!(face.wedges.len(), 1);
        let wedge = &face.wedges[0];
        assert_eq!(wedge.visible, 3600);
        assert!(approx(wedge.sweep, 360.0));
        assert!(wedge.overflow);
        assert_eq!(wedge.colour, OVERFLOW_COLOUR);
        assert_eq!(face.excess(), Some(400));
    }

    #[test]
    fn test_straddling_segment() {
        let face = ClockFace::project(&timeline(&[3000, 1200, 300]));

        assert_eq!(face.wedges.len(), 2);
        assert!(!face.wedges[0].overflow);

        let straddling = &face.wedges[1];
        assert_eq!(straddling.start, 3000);
        assert_eq!(straddling.visible, 600);
        assert!(straddling.overflow);
        assert_eq!(face.excess(), Some(900));
    }

    #[test]
    fn test_segments_past_the_hour_are_skipped() {
        let face = ClockFace::project(&timeline(&[3600, 60, 60]));

        assert_eq!(face.wedges.len(), 1);
        assert!(!face.wedges[0].overflow);
        assert_eq!(face.excess(), Some(120));
    }

    #[test]
    fn test_exactly_one_hour_does_not_overflow() {
        let face = ClockFace::project(&timeline(&[1800, 1800]));

        assert!(!face.is_overflowing());
        assert!(face.wedges.iter().all(|w| !w.overflow));
    }

    #[test]
    fn test_segment_colour_kept_when_not_overflowing() {
        let mut timeline = timeline(&[60]);
        let id = timeline.segments()[0].id.clone();
        timeline.update(
            &id,
            crate::model::SegmentPatch {
                colour: Some(Colour::rgb(1, 2, 3)),
                ..Default::default()
            },
        );

        let face = ClockFace::project(&timeline);
        assert_eq!(face.wedges[0].colour, Colour::rgb(1, 2, 3));
    }

    #[test]
    fn test_indicator_angle_does_not_wrap() {
        assert!(approx(angle_for(0), -90.0));
        assert!(approx(angle_for(1800), 90.0));
        assert!(approx(angle_for(3600), 270.0));
        assert!(approx(angle_for(4500), 360.0));
    }
}
