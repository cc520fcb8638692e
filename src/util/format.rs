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

//! Duration parsing and formatting.
//!
//! Durations are always whole seconds. User input such as `"3:20"` is parsed
//! leniently (never failing), and durations are displayed either in the short
//! `M:SS` form used for individual segments or the long `H:MM:SS` form used
//! for cumulative show times.

/// Parses a human-entered duration into seconds.
///
/// Every colon-separated component is folded base-60, so `"95"`, `"1:35"`
/// and `"0:01:35"` all yield 95. Components are not taken modulo 60, which
/// means `"2:75"` is 195 seconds. A component is read from its leading
/// digits; a component without any digits counts as zero.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_duration("5:55"), 355);
/// assert_eq!(parse_duration("abc"), 0);
/// ```
pub(crate) fn parse_duration(input: &str) -> u64 {
    input
        .split(':')
        .map(parse_component)
        .fold(0u64, |acc, value| acc.saturating_mul(60).saturating_add(value))
}

fn parse_component(component: &str) -> u64 {
    let digits: String = component
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(0)
}

/// Formats a duration in seconds as `M:SS`.
///
/// The minutes are not bounded, so an hour-long segment reads `60:00`.
pub(crate) fn format_short(total_seconds: u64) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Formats a duration in seconds as `H:MM:SS`.
pub(crate) fn format_long(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, mins, secs)
}
