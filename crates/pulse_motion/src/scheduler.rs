//! Motion scheduler
//!
//! Owns every active tween and advances them once per frame. Tweens are
//! implicitly registered when created through [`AnimatedTween`], which
//! deregisters on drop — dropping a component cancels its animations, so
//! teardown is a deterministic call rather than a garbage-collection
//! side effect.

use crate::tween::Tween;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, Weak};

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
}

struct SchedulerInner {
    tweens: SlotMap<TweenId, Tween>,
}

/// The scheduler that ticks all active tweens
///
/// Held by the page composition root and shared with components via
/// [`SchedulerHandle`]. The host drives it by delivering frame events;
/// the scheduler never spawns its own timing source.
pub struct MotionScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl MotionScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
            })),
        }
    }

    /// Get a handle for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance all tweens by `dt_ms`
    ///
    /// Returns true if any tween is still playing (needs another frame).
    pub fn tick(&self, dt_ms: f32) -> bool {
        let mut inner = self.inner.lock().unwrap();
        for (_, tween) in inner.tweens.iter_mut() {
            tween.tick(dt_ms);
        }
        // Finished tweens are not removed here: their wrappers still read
        // the terminal value, and removal happens when the wrapper drops.
        inner.tweens.iter().any(|(_, t)| t.is_playing())
    }

    /// Number of registered tweens
    pub fn tween_count(&self) -> usize {
        self.inner.lock().unwrap().tweens.len()
    }

    /// Check if any tween is still playing
    pub fn has_active(&self) -> bool {
        self.inner
            .lock()
            .unwrap()
            .tweens
            .iter()
            .any(|(_, t)| t.is_playing())
    }
}

impl Default for MotionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the scheduler
///
/// Components keep this instead of the scheduler itself, so a dropped
/// scheduler turns every operation into a safe no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a tween and return its id
    pub fn register(&self, tween: Tween) -> Option<TweenId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().tweens.insert(tween))
    }

    /// Current value of a tween
    pub fn value(&self, id: TweenId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().tweens.get(id).map(|t| t.value()))
    }

    /// Whether a tween has run to completion
    pub fn is_finished(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .lock()
                    .unwrap()
                    .tweens
                    .get(id)
                    .map(|t| t.is_finished())
            })
            .unwrap_or(true)
    }

    pub fn start(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(tween) = inner.lock().unwrap().tweens.get_mut(id) {
                tween.start();
            }
        }
    }

    pub fn stop(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(tween) = inner.lock().unwrap().tweens.get_mut(id) {
                tween.stop();
            }
        }
    }

    pub fn remove(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().tweens.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

/// A tween that automatically registers with the scheduler
///
/// Registered on `start`, advanced by the scheduler each frame, and
/// removed when dropped.
///
/// # Example
///
/// ```rust
/// use pulse_motion::{AnimatedTween, MotionScheduler};
/// use pulse_core::Easing;
///
/// let scheduler = MotionScheduler::new();
/// let mut value = AnimatedTween::new(scheduler.handle(), 0.0, 100.0, 1000.0, Easing::EaseOut);
/// value.start();
///
/// scheduler.tick(500.0);
/// assert!(value.get() > 50.0);
/// ```
pub struct AnimatedTween {
    handle: SchedulerHandle,
    id: Option<TweenId>,
    tween: Tween,
}

impl AnimatedTween {
    pub fn new(handle: SchedulerHandle, start: f32, end: f32, duration_ms: f32, easing: pulse_core::Easing) -> Self {
        Self {
            handle,
            id: None,
            tween: Tween::new(start, end, duration_ms, easing),
        }
    }

    /// Start the animation, registering with the scheduler on first use
    pub fn start(&mut self) {
        match self.id {
            Some(id) => self.handle.start(id),
            None => {
                let mut tween = self.tween;
                tween.start();
                self.id = self.handle.register(tween);
            }
        }
    }

    /// Current animated value
    pub fn get(&self) -> f32 {
        match self.id {
            Some(id) => self.handle.value(id).unwrap_or(self.tween.end_value()),
            None => self.tween.value(),
        }
    }

    /// Whether the animation has run to completion
    pub fn is_finished(&self) -> bool {
        match self.id {
            Some(id) => self.handle.is_finished(id),
            None => self.tween.is_finished(),
        }
    }

    /// Stop without reaching the end value
    pub fn cancel(&mut self) {
        if let Some(id) = self.id {
            self.handle.stop(id);
        }
    }
}

impl Drop for AnimatedTween {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::Easing;

    #[test]
    fn test_scheduler_tick_advances_tweens() {
        let scheduler = MotionScheduler::new();
        let mut value = AnimatedTween::new(scheduler.handle(), 0.0, 100.0, 1000.0, Easing::Linear);
        value.start();

        assert!(scheduler.tick(250.0));
        assert!((value.get() - 25.0).abs() < 1e-4);

        assert!(!scheduler.tick(750.0));
        assert_eq!(value.get(), 100.0);
        assert!(value.is_finished());
    }

    #[test]
    fn test_drop_deregisters() {
        let scheduler = MotionScheduler::new();
        {
            let mut value =
                AnimatedTween::new(scheduler.handle(), 0.0, 1.0, 100.0, Easing::Linear);
            value.start();
            assert_eq!(scheduler.tween_count(), 1);
        }
        assert_eq!(scheduler.tween_count(), 0);
        assert!(!scheduler.has_active());
    }

    #[test]
    fn test_handle_outlives_scheduler_safely() {
        let handle = {
            let scheduler = MotionScheduler::new();
            scheduler.handle()
        };
        assert!(!handle.is_alive());
        assert!(handle.register(Tween::new(0.0, 1.0, 100.0, Easing::Linear)).is_none());

        // Wrapper operations no-op too
        let mut value = AnimatedTween::new(handle, 0.0, 1.0, 100.0, Easing::Linear);
        value.start();
        assert!(value.is_finished() || value.get() == 0.0);
    }

    #[test]
    fn test_restart_after_completion() {
        let scheduler = MotionScheduler::new();
        let mut value = AnimatedTween::new(scheduler.handle(), 0.0, 10.0, 100.0, Easing::Linear);
        value.start();
        scheduler.tick(200.0);
        assert!(value.is_finished());

        value.start();
        assert!(!value.is_finished());
        scheduler.tick(50.0);
        assert!((value.get() - 5.0).abs() < 1e-4);
    }
}
