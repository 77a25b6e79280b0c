//! Rate limiting
//!
//! Debounce and throttle primitives for noisy event streams (scroll,
//! resize, pointer move). Both are driven by explicit `Instant`s so
//! callers and tests control the clock.

use std::time::{Duration, Instant};

/// Trailing-edge debouncer
///
/// Each `trigger` pushes the deadline out by the full wait; `poll` reports
/// `true` once, after the stream has been quiet for the wait period.
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Record an occurrence of the debounced event
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Check whether the quiet period has elapsed; fires at most once per
    /// burst of triggers
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel any pending fire
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Leading-edge throttler
///
/// `allow` returns `true` at most once per interval.
#[derive(Debug)]
pub struct Throttler {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns `true` if enough time has passed since the last allowed call
    pub fn allow(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last allowed call so the next `allow` fires immediately
    pub fn reset(&mut self) {
        self.last = None;
    }
}
