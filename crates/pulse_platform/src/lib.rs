//! Pulse Surface Abstraction Layer
//!
//! This crate defines the boundary between the Pulse motion engine and the
//! host: a structured-document rendering surface plus a windowing/input
//! event stream.
//!
//! # Architecture
//!
//! - [`DocumentSurface`] - geometry reads and visual-state writes on nodes
//! - [`Event`] - the host event stream (frames, input, lifecycle, visibility)
//! - [`Capabilities`] - what the host can do, probed once at construction
//!
//! [`MemoryDocument`] is the in-memory surface implementation used by tests
//! and headless embedders. Hosts with a real document substitute their own
//! [`DocumentSurface`] implementation.
//!
//! # Example
//!
//! ```rust
//! use pulse_platform::{DocumentSurface, MemoryDocument, NodeSpec};
//! use pulse_core::Rect;
//!
//! let mut doc = MemoryDocument::new(1280.0, 800.0);
//! let hero = doc.insert(NodeSpec::new().rect(Rect::new(0.0, 900.0, 1280.0, 400.0)));
//!
//! doc.set_scroll_y(500.0);
//! let bounds = doc.bounds(hero).unwrap();
//! assert_eq!(bounds.top(), 400.0); // document 900 - scroll 500
//! ```

mod capability;
mod document;
mod error;
mod event;
mod input;

pub use capability::Capabilities;
pub use document::{DocumentSurface, MemoryDocument, NodeId, NodeSpec};
pub use error::{Result, SurfaceError};
pub use event::{ControlFlow, Event, LifecycleEvent, VisibilityRecord};
pub use input::{InputEvent, PointerEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::capability::Capabilities;
    pub use crate::document::{DocumentSurface, MemoryDocument, NodeId, NodeSpec};
    pub use crate::error::{Result, SurfaceError};
    pub use crate::event::{ControlFlow, Event, LifecycleEvent, VisibilityRecord};
    pub use crate::input::{InputEvent, PointerEvent};
}
