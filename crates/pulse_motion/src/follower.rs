//! Pointer follower
//!
//! A transient dot node trails the pointer with exponential smoothing:
//! each frame the dot moves a fixed fraction of the remaining distance
//! toward the raw pointer position. Presses spawn short-lived ripple
//! nodes that remove themselves after a fixed lifetime.

use pulse_core::Point;
use pulse_platform::{DocumentSurface, NodeId, PointerEvent};

/// Class on the follower dot node
pub const FOLLOWER_CLASS: &str = "mouse-follower-dot";

/// Class on spawned ripple nodes
pub const RIPPLE_CLASS: &str = "pointer-ripple";

/// Follower behavior knobs
#[derive(Clone, Copy, Debug)]
pub struct FollowerConfig {
    /// Fraction of the remaining distance covered per frame
    pub smoothing: f32,
    /// Ripple lifetime before self-removal
    pub ripple_ms: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            ripple_ms: 600.0,
        }
    }
}

struct Ripple {
    node: NodeId,
    remaining_ms: f32,
}

/// The pointer-trailing dot and its click ripples
pub struct PointerFollower {
    dot: NodeId,
    raw: Point,
    smoothed: Point,
    config: FollowerConfig,
    ripples: Vec<Ripple>,
}

impl PointerFollower {
    /// Spawn the dot node, hidden until the pointer enters
    pub fn new(config: FollowerConfig, surface: &mut dyn DocumentSurface) -> Self {
        let dot = surface.spawn_node(FOLLOWER_CLASS);
        surface.set_style(dot, "opacity", 0.0);
        Self {
            dot,
            raw: Point::default(),
            smoothed: Point::default(),
            config,
            ripples: Vec::new(),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, surface: &mut dyn DocumentSurface) {
        match event {
            PointerEvent::Moved { x, y } => {
                self.raw = Point::new(x, y);
            }
            PointerEvent::Entered => {
                surface.set_style(self.dot, "opacity", 1.0);
            }
            PointerEvent::Left => {
                surface.set_style(self.dot, "opacity", 0.0);
            }
            PointerEvent::Pressed { x, y } => {
                let node = surface.spawn_node(RIPPLE_CLASS);
                surface.set_style(node, "left", x);
                surface.set_style(node, "top", y);
                self.ripples.push(Ripple {
                    node,
                    remaining_ms: self.config.ripple_ms,
                });
            }
        }
    }

    /// Advance smoothing and ripple lifetimes by one frame
    pub fn tick(&mut self, dt_ms: f32, surface: &mut dyn DocumentSurface) {
        self.smoothed.x += (self.raw.x - self.smoothed.x) * self.config.smoothing;
        self.smoothed.y += (self.raw.y - self.smoothed.y) * self.config.smoothing;
        surface.set_style(self.dot, "left", self.smoothed.x);
        surface.set_style(self.dot, "top", self.smoothed.y);

        let mut index = 0;
        while index < self.ripples.len() {
            self.ripples[index].remaining_ms -= dt_ms;
            if self.ripples[index].remaining_ms <= 0.0 {
                let ripple = self.ripples.swap_remove(index);
                surface.remove_node(ripple.node);
            } else {
                index += 1;
            }
        }
    }

    /// Smoothed dot position
    pub fn position(&self) -> Point {
        self.smoothed
    }

    /// Remove the dot and any live ripples
    pub fn teardown(&mut self, surface: &mut dyn DocumentSurface) {
        for ripple in self.ripples.drain(..) {
            surface.remove_node(ripple.node);
        }
        surface.remove_node(self.dot);
    }
}
