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

//! Once-per-second clock for the play indicator.
//!
//! A [`Ticker`] owns a thread that sends [`AppEvent::ClockTick`] every second
//! until it is cancelled or dropped. Each ticker stamps its events with its
//! own generation number, so a tick that was already queued when the ticker
//! was cancelled can be recognised and ignored.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    thread,
    time::Duration,
};

use crate::events::AppEvent;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub(crate) struct Ticker {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl Ticker {
    pub(crate) fn start(generation: u64, event_tx: Sender<AppEvent>) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::spawn(move || {
            loop {
                thread::sleep(TICK_INTERVAL);

                if flag.load(Ordering::Acquire) {
                    break;
                }

                if event_tx.send(AppEvent::ClockTick(generation)).is_err() {
                    break;
                }
            }
        });

        log::debug!("Started ticker {}", generation);

        Self {
            generation,
            cancelled,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn test_ticks_carry_generation() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(7, tx);

        let event = rx.recv_timeout(Duration::from_secs(3)).unwrap();
        assert!(matches!(event, AppEvent::ClockTick(7)));
        assert_eq!(ticker.generation(), 7);
    }

    #[test]
    fn test_dropped_ticker_stops() {
        let (tx, rx) = mpsc::channel();
        drop(Ticker::start(1, tx));

        // The thread wakes once, sees the flag and exits, closing the channel.
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(3)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
