//! Custom event dispatch
//!
//! A small pub/sub dispatcher for page-level custom events such as
//! "element-animated" or "page-ready". Listeners are keyed by a slotmap
//! handle so they can be removed individually, and the whole dispatcher
//! can be cleared at teardown.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

type Callback<D> = Box<dyn FnMut(&D)>;

struct ListenerEntry<D> {
    event: String,
    callback: Callback<D>,
}

/// Custom-event dispatcher
///
/// `D` is the detail payload type carried by every event.
///
/// # Example
///
/// ```rust
/// use pulse_core::EventDispatcher;
///
/// let mut events: EventDispatcher<u32> = EventDispatcher::new();
/// let id = events.subscribe("page-ready", |detail| {
///     assert_eq!(*detail, 7);
/// });
/// events.emit("page-ready", &7);
/// events.unsubscribe(id);
/// ```
pub struct EventDispatcher<D> {
    listeners: SlotMap<ListenerId, ListenerEntry<D>>,
    by_event: FxHashMap<String, SmallVec<[ListenerId; 4]>>,
}

impl<D> EventDispatcher<D> {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            by_event: FxHashMap::default(),
        }
    }

    /// Register a listener for a named event
    pub fn subscribe<F>(&mut self, event: &str, callback: F) -> ListenerId
    where
        F: FnMut(&D) + 'static,
    {
        let id = self.listeners.insert(ListenerEntry {
            event: event.to_string(),
            callback: Box::new(callback),
        });
        self.by_event.entry(event.to_string()).or_default().push(id);
        id
    }

    /// Remove a single listener; unknown handles are ignored
    pub fn unsubscribe(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.remove(id) {
            if let Some(ids) = self.by_event.get_mut(&entry.event) {
                ids.retain(|candidate| *candidate != id);
            }
        }
    }

    /// Dispatch an event to every listener registered for its name
    ///
    /// Listener invocation order matches subscription order.
    pub fn emit(&mut self, event: &str, detail: &D) {
        let Some(ids) = self.by_event.get(event) else {
            tracing::trace!(event, "no listeners for event");
            return;
        };
        // Snapshot so listeners may subscribe/unsubscribe re-entrantly
        let ids: SmallVec<[ListenerId; 4]> = ids.clone();
        for id in ids {
            if let Some(entry) = self.listeners.get_mut(id) {
                (entry.callback)(detail);
            }
        }
    }

    /// Number of registered listeners across all events
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.by_event.clear();
    }
}

impl<D> Default for EventDispatcher<D> {
    fn default() -> Self {
        Self::new()
    }
}
