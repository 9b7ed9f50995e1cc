//! Clock and pacing adapters backed by the standard library.

use std::thread;
use std::time::{Duration, Instant};

use log::trace;

use super::{Sleeper, Time};

/// Milliseconds elapsed since the clock was created.
pub struct SystemTime {
    start: Instant,
}

impl SystemTime {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTime {
    fn default() -> Self {
        Self::new()
    }
}

impl Time for SystemTime {
    fn now(&self) -> i64 {
        self.start.elapsed().as_millis() as i64
    }
}

/// Sleeps away whatever is left of the frame budget.
///
/// The previous call's timestamp is the start of the frame; when less than
/// `budget_ms` has passed since then, the thread sleeps for the remainder.
/// Frames that overran are not compensated.
pub struct ThreadSleeper {
    budget_ms: i64,
    last_time: i64,
}

impl ThreadSleeper {
    pub fn new(budget_ms: i64) -> Self {
        Self {
            budget_ms,
            last_time: 0,
        }
    }

    /// How long a call at `now` would sleep, in milliseconds.
    pub fn remaining(&self, now: i64) -> i64 {
        let spent = now - self.last_time;
        if spent < self.budget_ms {
            self.budget_ms - spent
        } else {
            0
        }
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep_until_next_frame(&mut self, now: i64) {
        let remaining = self.remaining(now);
        if remaining > 0 {
            trace!("frame finished early, sleeping {} ms", remaining);
            thread::sleep(Duration::from_millis(remaining as u64));
        }
        self.last_time = now;
    }
}
