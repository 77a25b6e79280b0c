//! Visibility watching
//!
//! The reveal engine and the counter animators both trigger on "element
//! entered the viewport". Hosts with a native intersection observer feed
//! crossings through [`VisibilityWatcher::notify`]; hosts without one get
//! a rate-limited geometry poll. The branch is taken exactly once, at
//! construction, via [`watcher_for`].

use pulse_core::{Rect, Throttler};
use pulse_platform::{Capabilities, DocumentSurface, NodeId, VisibilityRecord};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::time::{Duration, Instant};

/// Interval for the polling fallback
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Visibility test against the viewport
///
/// `threshold` is the fraction of the element's height that must have
/// entered; `bottom_margin` shrinks the effective viewport from the
/// bottom edge so elements reveal slightly after they appear.
pub fn is_in_view(rect: Rect, viewport_height: f32, threshold: f32, bottom_margin: f32) -> bool {
    let vertically_in = rect.top() <= viewport_height - bottom_margin && rect.bottom() >= 0.0;
    let enough_shown = rect.height * threshold < viewport_height - rect.top();
    vertically_in && enough_shown
}

/// Source of visibility crossings for a watched node set
pub trait VisibilityWatcher {
    fn observe(&mut self, node: NodeId);

    fn unobserve(&mut self, node: NodeId);

    /// Host-fed crossing; the polling implementation ignores these
    fn notify(&mut self, record: VisibilityRecord);

    /// Nodes that crossed into view since the last call
    ///
    /// Order among simultaneously-crossing nodes is unspecified; each
    /// observed node is reported while it remains observed and visible,
    /// and consumers deduplicate.
    fn take_crossings(
        &mut self,
        surface: &dyn DocumentSurface,
        now: Instant,
    ) -> SmallVec<[NodeId; 4]>;

    /// Release all subscriptions
    fn disconnect(&mut self);
}

/// Build the watcher matching the host's capabilities
pub fn watcher_for(
    caps: Capabilities,
    threshold: f32,
    bottom_margin: f32,
) -> Box<dyn VisibilityWatcher> {
    if caps.intersection_observer {
        Box::new(ObserverWatcher::new())
    } else {
        tracing::warn!("intersection observer unavailable, falling back to geometry polling");
        Box::new(PollingWatcher::new(threshold, bottom_margin))
    }
}

/// Watcher backed by host-native crossing notifications
pub struct ObserverWatcher {
    observed: FxHashSet<NodeId>,
    queued: Vec<NodeId>,
}

impl ObserverWatcher {
    pub fn new() -> Self {
        Self {
            observed: FxHashSet::default(),
            queued: Vec::new(),
        }
    }
}

impl Default for ObserverWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityWatcher for ObserverWatcher {
    fn observe(&mut self, node: NodeId) {
        self.observed.insert(node);
    }

    fn unobserve(&mut self, node: NodeId) {
        self.observed.remove(&node);
        self.queued.retain(|queued| *queued != node);
    }

    fn notify(&mut self, record: VisibilityRecord) {
        if record.visible && self.observed.contains(&record.node) {
            self.queued.push(record.node);
        }
    }

    fn take_crossings(
        &mut self,
        _surface: &dyn DocumentSurface,
        _now: Instant,
    ) -> SmallVec<[NodeId; 4]> {
        self.queued.drain(..).collect()
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.queued.clear();
    }
}

/// Fallback watcher computing intersections from bounding geometry
///
/// Functionally equivalent to the observer path but coarser-grained:
/// checks are rate-limited to one pass per 100ms.
pub struct PollingWatcher {
    observed: FxHashSet<NodeId>,
    throttler: Throttler,
    threshold: f32,
    bottom_margin: f32,
}

impl PollingWatcher {
    pub fn new(threshold: f32, bottom_margin: f32) -> Self {
        Self {
            observed: FxHashSet::default(),
            throttler: Throttler::new(POLL_INTERVAL),
            threshold,
            bottom_margin,
        }
    }
}

impl VisibilityWatcher for PollingWatcher {
    fn observe(&mut self, node: NodeId) {
        self.observed.insert(node);
    }

    fn unobserve(&mut self, node: NodeId) {
        self.observed.remove(&node);
    }

    fn notify(&mut self, _record: VisibilityRecord) {
        // Geometry is the source of truth on this path
    }

    fn take_crossings(
        &mut self,
        surface: &dyn DocumentSurface,
        now: Instant,
    ) -> SmallVec<[NodeId; 4]> {
        if !self.throttler.allow(now) {
            return SmallVec::new();
        }
        let viewport_height = surface.viewport().height;
        self.observed
            .iter()
            .copied()
            .filter(|node| {
                surface.bounds(*node).is_some_and(|rect| {
                    is_in_view(rect, viewport_height, self.threshold, self.bottom_margin)
                })
            })
            .collect()
    }

    fn disconnect(&mut self) {
        self.observed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_platform::{MemoryDocument, NodeSpec};

    fn doc_with_node(doc_y: f32) -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = doc.insert(NodeSpec::new().rect(Rect::new(0.0, doc_y, 100.0, 200.0)));
        (doc, node)
    }

    #[test]
    fn test_is_in_view_respects_margin() {
        let viewport_height = 800.0;
        // Element top exactly at the margin boundary
        let at_margin = Rect::new(0.0, 750.0, 100.0, 200.0);
        assert!(is_in_view(at_margin, viewport_height, 0.1, 50.0));
        let below_margin = Rect::new(0.0, 751.0, 100.0, 200.0);
        assert!(!is_in_view(below_margin, viewport_height, 0.1, 50.0));
    }

    #[test]
    fn test_is_in_view_scrolled_past() {
        let gone = Rect::new(0.0, -300.0, 100.0, 200.0);
        assert!(!is_in_view(gone, 800.0, 0.1, 50.0));
    }

    #[test]
    fn test_observer_watcher_queues_only_observed() {
        let (doc, node) = doc_with_node(100.0);
        let mut watcher = ObserverWatcher::new();
        let now = Instant::now();

        // Not yet observed: ignored
        watcher.notify(VisibilityRecord {
            node,
            visible: true,
        });
        assert!(watcher.take_crossings(&doc, now).is_empty());

        watcher.observe(node);
        watcher.notify(VisibilityRecord {
            node,
            visible: true,
        });
        assert_eq!(watcher.take_crossings(&doc, now).as_slice(), &[node]);
        // Drained
        assert!(watcher.take_crossings(&doc, now).is_empty());
    }

    #[test]
    fn test_observer_ignores_exit_crossings() {
        let (doc, node) = doc_with_node(100.0);
        let mut watcher = ObserverWatcher::new();
        watcher.observe(node);
        watcher.notify(VisibilityRecord {
            node,
            visible: false,
        });
        assert!(watcher.take_crossings(&doc, Instant::now()).is_empty());
    }

    #[test]
    fn test_polling_watcher_is_throttled() {
        let (mut doc, node) = doc_with_node(2000.0);
        let mut watcher = PollingWatcher::new(0.1, 50.0);
        watcher.observe(node);
        let start = Instant::now();

        // Off-screen: polled, nothing crosses
        assert!(watcher.take_crossings(&doc, start).is_empty());

        // Scroll it into view, but the next poll is throttled
        doc.set_scroll_y(1600.0);
        assert!(watcher
            .take_crossings(&doc, start + Duration::from_millis(50))
            .is_empty());

        // After the interval the crossing is reported
        let crossings = watcher.take_crossings(&doc, start + Duration::from_millis(150));
        assert_eq!(crossings.as_slice(), &[node]);
    }

    #[test]
    fn test_disconnect_clears_subscriptions() {
        let (mut doc, node) = doc_with_node(2000.0);
        doc.set_scroll_y(1600.0);
        let mut watcher = PollingWatcher::new(0.1, 50.0);
        watcher.observe(node);
        watcher.disconnect();
        assert!(watcher
            .take_crossings(&doc, Instant::now() + Duration::from_secs(1))
            .is_empty());
    }
}
