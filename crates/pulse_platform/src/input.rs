//! Input event types for pointer and viewport changes

/// Pointer events
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to position (viewport coordinates)
    Moved { x: f32, y: f32 },
    /// Pointer entered the document
    Entered,
    /// Pointer left the document
    Left,
    /// Primary button pressed at position
    Pressed { x: f32, y: f32 },
}

/// Input events
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer event
    Pointer(PointerEvent),
    /// Scroll position changed
    Scroll {
        /// New vertical scroll offset from the document top
        offset_y: f32,
    },
    /// Viewport was resized
    Resized {
        /// New width in logical pixels
        width: f32,
        /// New height in logical pixels
        height: f32,
    },
}
