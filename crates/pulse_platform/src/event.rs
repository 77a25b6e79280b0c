//! Host events and control flow

use crate::document::NodeId;
use crate::input::InputEvent;

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Continue running
    #[default]
    Continue,
    /// The page has been torn down; stop delivering events
    Exit,
}

/// A visibility crossing reported by a host-native intersection observer
///
/// Ordering among records batched in the same frame is host-defined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityRecord {
    pub node: NodeId,
    pub visible: bool,
}

/// Host events delivered to the page
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Frame tick - advance animations
    ///
    /// Carries the elapsed time since the previous frame so animators
    /// and tests control time explicitly.
    Frame {
        /// Milliseconds since the last frame
        dt_ms: f32,
    },
    /// Input event (pointer, scroll, resize)
    Input(InputEvent),
    /// Visibility crossing from the host's native observer
    ///
    /// Only delivered when [`Capabilities::intersection_observer`] is set;
    /// otherwise the engine polls geometry itself.
    ///
    /// [`Capabilities::intersection_observer`]: crate::Capabilities
    Visibility(VisibilityRecord),
    /// Application lifecycle event
    Lifecycle(LifecycleEvent),
}

/// Page lifecycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Document is ready; components may take their initial readings
    Ready,
    /// Page is unloading; release every subscription and timer
    Unload,
}
