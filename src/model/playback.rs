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

//! Play indicator state.
//!
//! The play indicator walks through the show in real time so the presenter
//! can see where they should be. It is driven by a once-per-second tick and
//! stops by itself when it reaches the end of the show.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum IndicatorState {
    #[default]
    Stopped,
    Running,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PlayIndicator {
    state: IndicatorState,
    elapsed: u64,
}

impl PlayIndicator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> IndicatorState {
        self.state
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state == IndicatorState::Running
    }

    /// Seconds elapsed since the start of the show.
    pub(crate) fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Starts the indicator, returns `false` if it was already running.
    pub(crate) fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        self.state = IndicatorState::Running;
        true
    }

    /// Stops the indicator but keeps its position.
    pub(crate) fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        self.state = IndicatorState::Stopped;
        true
    }

    /// Stops the indicator and rewinds it to the start of the show.
    pub(crate) fn stop(&mut self) {
        self.state = IndicatorState::Stopped;
        self.elapsed = 0;
    }

    /// Advances the indicator by one second.
    ///
    /// Ticks while stopped are ignored. Returns `true` when this tick reached
    /// the end of the show, in which case the indicator has stopped and been
    /// rewound.
    pub(crate) fn tick(&mut self, total: u64) -> bool {
        if !self.is_running() {
            return false;
        }

        self.elapsed += 1;

        if self.elapsed >= total {
            self.stop();
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_only_when_stopped() {
        let mut indicator = PlayIndicator::new();
        assert!(indicator.start());
        assert!(!indicator.start());
        assert_eq!(indicator.state(), IndicatorState::Running);
    }

    #[test]
    fn test_tick_advances_while_running() {
        let mut indicator = PlayIndicator::new();
        indicator.tick(100);
        assert_eq!(indicator.elapsed(), 0);

        indicator.start();
        indicator.tick(100);
        indicator.tick(100);
        assert_eq!(indicator.elapsed(), 2);
    }

    #[test]
    fn test_pause_keeps_position() {
        let mut indicator = PlayIndicator::new();
        indicator.start();
        indicator.tick(100);
        assert!(indicator.pause());
        assert!(!indicator.pause());

        indicator.tick(100);
        assert_eq!(indicator.elapsed(), 1);
        assert!(!indicator.is_running());

        indicator.start();
        indicator.tick(100);
        assert_eq!(indicator.elapsed(), 2);
    }

    #[test]
    fn test_stop_rewinds() {
        let mut indicator = PlayIndicator::new();
        indicator.start();
        indicator.tick(100);
        indicator.stop();

        assert_eq!(indicator.elapsed(), 0);
        assert!(!indicator.is_running());
    }

    #[test]
    fn test_auto_stop_at_end_of_show() {
        let mut indicator = PlayIndicator::new();
        indicator.start();

        assert!(!indicator.tick(3));
        assert!(!indicator.tick(3));
        assert!(indicator.tick(3));

        assert_eq!(indicator.state(), IndicatorState::Stopped);
        assert_eq!(indicator.elapsed(), 0);
    }
}
