//! Scroll-reveal engine
//!
//! Watches a node set and applies a terminal `animated` class the first
//! time each node crosses into view, optionally staggered by sibling
//! index. Reveals are monotone: a node is revealed at most once and the
//! class is never removed.

use crate::visibility::{watcher_for, VisibilityWatcher};
use pulse_core::MotionPreference;
use pulse_platform::{Capabilities, DocumentSurface, NodeId, VisibilityRecord};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::time::Instant;

/// Class applied on reveal
pub const REVEALED_CLASS: &str = "animated";

/// Reveal behavior knobs
#[derive(Clone, Copy, Debug)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible
    pub threshold: f32,
    /// Pixels shaved off the viewport's bottom edge
    pub bottom_margin: f32,
    /// Per-sibling delay within a group
    pub stagger_ms: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
            stagger_ms: 100.0,
        }
    }
}

struct PendingReveal {
    node: NodeId,
    remaining_ms: f32,
}

/// The scroll-reveal engine
pub struct ScrollReveal {
    config: RevealConfig,
    preference: MotionPreference,
    watcher: Box<dyn VisibilityWatcher>,
    /// Monotone: inserted once, never removed until teardown
    revealed: FxHashSet<NodeId>,
    /// Crossed but still waiting out their stagger delay
    pending: Vec<PendingReveal>,
}

impl ScrollReveal {
    /// Build the engine for a watched node set
    ///
    /// The watcher implementation (native observer vs geometry polling)
    /// is selected here, once, from the host capabilities.
    pub fn new(caps: Capabilities, config: RevealConfig, targets: &[NodeId]) -> Self {
        let mut watcher = watcher_for(caps, config.threshold, config.bottom_margin);
        for node in targets {
            watcher.observe(*node);
        }
        Self {
            config,
            preference: caps.motion_preference(),
            watcher,
            revealed: FxHashSet::default(),
            pending: Vec::new(),
        }
    }

    /// Route a host-native visibility crossing to the watcher
    pub fn handle_visibility(&mut self, record: VisibilityRecord) {
        self.watcher.notify(record);
    }

    /// Advance the engine by one frame
    ///
    /// Returns the nodes revealed during this frame, for custom-event
    /// dispatch by the caller.
    pub fn tick(
        &mut self,
        dt_ms: f32,
        surface: &mut dyn DocumentSurface,
        now: Instant,
    ) -> SmallVec<[NodeId; 4]> {
        let mut revealed_now = SmallVec::new();

        for node in self.watcher.take_crossings(surface, now) {
            if self.revealed.contains(&node) || self.is_pending(node) {
                continue;
            }
            if self.preference.is_reduced() {
                self.apply(node, surface, &mut revealed_now);
                continue;
            }
            let delay = self.config.stagger_ms * surface.sibling_index(node) as f32;
            if delay <= 0.0 {
                self.apply(node, surface, &mut revealed_now);
            } else {
                self.pending.push(PendingReveal {
                    node,
                    remaining_ms: delay,
                });
            }
        }

        // Count down stagger delays
        let mut index = 0;
        while index < self.pending.len() {
            self.pending[index].remaining_ms -= dt_ms;
            if self.pending[index].remaining_ms <= 0.0 {
                let entry = self.pending.swap_remove(index);
                self.apply(entry.node, surface, &mut revealed_now);
            } else {
                index += 1;
            }
        }

        revealed_now
    }

    fn is_pending(&self, node: NodeId) -> bool {
        self.pending.iter().any(|entry| entry.node == node)
    }

    fn apply(
        &mut self,
        node: NodeId,
        surface: &mut dyn DocumentSurface,
        out: &mut SmallVec<[NodeId; 4]>,
    ) {
        if !self.revealed.insert(node) {
            return;
        }
        self.watcher.unobserve(node);
        if !surface.contains(node) {
            tracing::debug!("reveal target vanished before its transition");
            return;
        }
        surface.add_class(node, REVEALED_CLASS);
        out.push(node);
    }

    /// Number of nodes revealed so far
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Release subscriptions and tracked state
    pub fn teardown(&mut self) {
        self.watcher.disconnect();
        self.pending.clear();
        self.revealed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::Rect;
    use pulse_platform::{MemoryDocument, NodeSpec};

    fn caps_observer() -> Capabilities {
        Capabilities::default()
    }

    fn visible(node: NodeId) -> VisibilityRecord {
        VisibilityRecord {
            node,
            visible: true,
        }
    }

    fn card(doc: &mut MemoryDocument, y: f32, sibling: usize) -> NodeId {
        doc.insert(
            NodeSpec::new()
                .class("animate-on-scroll")
                .rect(Rect::new(0.0, y, 100.0, 100.0))
                .sibling_index(sibling),
        )
    }

    #[test]
    fn test_reveal_applied_exactly_once() {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = card(&mut doc, 100.0, 0);
        let mut reveal = ScrollReveal::new(caps_observer(), RevealConfig::default(), &[node]);
        let now = Instant::now();

        reveal.handle_visibility(visible(node));
        let first = reveal.tick(16.0, &mut doc, now);
        assert_eq!(first.as_slice(), &[node]);
        assert!(doc.has_class(node, REVEALED_CLASS));

        // Repeat crossings never re-reveal
        reveal.handle_visibility(visible(node));
        reveal.handle_visibility(visible(node));
        assert!(reveal.tick(16.0, &mut doc, now).is_empty());
        assert_eq!(reveal.revealed_count(), 1);
    }

    #[test]
    fn test_stagger_delays_by_sibling_index() {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let first = card(&mut doc, 100.0, 0);
        let third = card(&mut doc, 100.0, 2);
        let mut reveal =
            ScrollReveal::new(caps_observer(), RevealConfig::default(), &[first, third]);
        let now = Instant::now();

        reveal.handle_visibility(visible(first));
        reveal.handle_visibility(visible(third));

        // Sibling 0 reveals immediately; sibling 2 waits 200ms
        let revealed = reveal.tick(16.0, &mut doc, now);
        assert_eq!(revealed.as_slice(), &[first]);
        assert!(!doc.has_class(third, REVEALED_CLASS));

        reveal.tick(100.0, &mut doc, now);
        assert!(!doc.has_class(third, REVEALED_CLASS));

        let revealed = reveal.tick(100.0, &mut doc, now);
        assert_eq!(revealed.as_slice(), &[third]);
    }

    #[test]
    fn test_reduced_motion_skips_stagger() {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = card(&mut doc, 100.0, 5);
        let caps = Capabilities {
            reduced_motion: true,
            ..Capabilities::default()
        };
        let mut reveal = ScrollReveal::new(caps, RevealConfig::default(), &[node]);

        reveal.handle_visibility(visible(node));
        let revealed = reveal.tick(0.0, &mut doc, Instant::now());
        assert_eq!(revealed.as_slice(), &[node]);
    }

    #[test]
    fn test_polling_fallback_reveals_on_scroll() {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = card(&mut doc, 2000.0, 0);
        let caps = Capabilities {
            intersection_observer: false,
            ..Capabilities::default()
        };
        let mut reveal = ScrollReveal::new(caps, RevealConfig::default(), &[node]);
        let start = Instant::now();

        // Off-screen
        reveal.tick(16.0, &mut doc, start);
        assert!(!doc.has_class(node, REVEALED_CLASS));

        // Scrolled into view; next allowed poll picks it up
        doc.set_scroll_y(1700.0);
        let revealed = reveal.tick(
            16.0,
            &mut doc,
            start + std::time::Duration::from_millis(150),
        );
        assert_eq!(revealed.as_slice(), &[node]);
    }

    #[test]
    fn test_vanished_target_is_skipped() {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = card(&mut doc, 100.0, 0);
        let mut reveal = ScrollReveal::new(caps_observer(), RevealConfig::default(), &[node]);

        reveal.handle_visibility(visible(node));
        doc.remove_node(node);
        // No panic, no reveal event
        assert!(reveal.tick(16.0, &mut doc, Instant::now()).is_empty());
    }

    #[test]
    fn test_teardown_clears_state() {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = card(&mut doc, 100.0, 0);
        let mut reveal = ScrollReveal::new(caps_observer(), RevealConfig::default(), &[node]);
        reveal.handle_visibility(visible(node));
        reveal.teardown();
        assert!(reveal.tick(16.0, &mut doc, Instant::now()).is_empty());
        assert_eq!(reveal.revealed_count(), 0);
    }
}
