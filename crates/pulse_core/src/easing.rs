//! Easing functions
//!
//! Timing curves mapping normalized progress to eased progress.
//! Input is clamped to [0, 1] before the curve is applied.

/// Easing curve selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// No easing, constant rate
    Linear,
    /// Cubic ease-in: slow start
    EaseIn,
    /// Cubic ease-out: slow finish (`1 - (1-t)^3`)
    #[default]
    EaseOut,
    /// Cubic ease-in-out
    EaseInOut,
    /// Quartic ease-in-out (used for programmatic scrolling)
    EaseInOutQuart,
}

impl Easing {
    /// Apply the curve to a normalized progress value
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }
}
