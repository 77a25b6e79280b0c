//! Pulse Core Utilities
//!
//! This crate provides the foundational primitives shared by every Pulse
//! animator:
//!
//! - **Geometry**: points, sizes, and viewport-relative rectangles
//! - **Easing**: timing curves applied to normalized progress
//! - **Interpolation**: lerp / range mapping for animatable values
//! - **Rate Limiting**: debounce and throttle driven by explicit clocks
//! - **Event Dispatch**: custom-event pub/sub with removable listeners
//! - **Motion Preference**: the user's reduced-motion setting
//!
//! # Example
//!
//! ```rust
//! use pulse_core::{Easing, Interpolate};
//!
//! // Cubic ease-out over half the duration
//! let t = Easing::EaseOut.apply(0.5);
//! let value = 0.0_f32.lerp(&100.0, t);
//! assert!(value > 50.0); // ease-out front-loads motion
//! ```

pub mod easing;
pub mod events;
pub mod geometry;
pub mod interpolate;
pub mod motion;
pub mod rate;

pub use easing::Easing;
pub use events::{EventDispatcher, ListenerId};
pub use geometry::{Point, Rect, Size};
pub use interpolate::{lerp, map_range, Interpolate};
pub use motion::MotionPreference;
pub use rate::{Debouncer, Throttler};
