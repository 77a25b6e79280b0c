//! Timed value tween
//!
//! A duration-based animation from a start value to an end value through an
//! easing curve. Tweens are passive: owners (or the scheduler) advance them
//! with `tick` and sample `value`.

use pulse_core::Easing;

/// An eased, fixed-duration animation between two values
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    start: f32,
    end: f32,
    duration_ms: f32,
    easing: Easing,
    elapsed_ms: f32,
    playing: bool,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration_ms: duration_ms.max(0.0),
            easing,
            elapsed_ms: 0.0,
            playing: false,
        }
    }

    /// Start (or restart) from the beginning
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the tween has reached its end
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Raw progress (0.0 to 1.0), before easing
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current eased value
    ///
    /// At completion this is exactly the end value, with no easing residue.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.end;
        }
        let eased = self.easing.apply(self.progress());
        self.start + (self.end - self.start) * eased
    }

    pub fn end_value(&self) -> f32 {
        self.end
    }

    /// Advance by delta time in milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.duration_ms {
            self.elapsed_ms = self.duration_ms;
            self.playing = false;
        }
    }
}
