//! Document surface
//!
//! The rendering surface is a set of nodes carrying geometry, class-list
//! markers, style properties, and text. The motion engine only ever reads
//! layout and writes visual state; it never creates structure beyond
//! transient effect nodes (click ripples).
//!
//! All write methods are silently tolerant of stale node handles: a node
//! removed by the host mid-animation must never fail the page.

use pulse_core::{Rect, Size};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a document node
    pub struct NodeId;
}

/// A structured-document rendering surface
///
/// Geometry reads return viewport-relative rectangles: `top() < 0` means
/// the node has scrolled past the viewport's top edge.
pub trait DocumentSurface {
    /// Viewport size in logical pixels
    fn viewport(&self) -> Size;

    /// Current vertical scroll offset from the document top
    fn scroll_y(&self) -> f32;

    /// Total scrollable height of the document
    fn document_height(&self) -> f32;

    /// Viewport-relative bounds of a node, or `None` if it is gone
    fn bounds(&self, node: NodeId) -> Option<Rect>;

    /// Whether the node is still present
    fn contains(&self, node: NodeId) -> bool;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// All nodes currently carrying a class, in document order
    fn nodes_with_class(&self, class: &str) -> Vec<NodeId>;

    /// Write a numeric style property (opacity, left, custom properties)
    fn set_style(&mut self, node: NodeId, property: &str, value: f32);

    /// Read back a style property previously written
    fn style(&self, node: NodeId, property: &str) -> Option<f32>;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn text(&self, node: NodeId) -> Option<String>;

    /// Read a data attribute (e.g. `data-level` on a skill bar)
    fn data_attr(&self, node: NodeId, key: &str) -> Option<String>;

    /// Index of the node among its siblings, for stagger delays
    fn sibling_index(&self, node: NodeId) -> usize;

    /// Spawn a transient effect node (ripples, follower dot)
    fn spawn_node(&mut self, class: &str) -> NodeId;

    /// Remove a node; stale handles are ignored
    fn remove_node(&mut self, node: NodeId);
}

/// Specification for inserting a node into a [`MemoryDocument`]
#[derive(Clone, Debug, Default)]
pub struct NodeSpec {
    rect: Rect,
    classes: Vec<String>,
    text: String,
    data: Vec<(String, String)>,
    sibling_index: usize,
}

impl NodeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document-relative bounds (translated by scroll when read back)
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn data(mut self, key: &str, value: &str) -> Self {
        self.data.push((key.to_string(), value.to_string()));
        self
    }

    pub fn sibling_index(mut self, index: usize) -> Self {
        self.sibling_index = index;
        self
    }
}

struct NodeData {
    /// Document-relative geometry; viewport-relative on read
    rect: Rect,
    classes: FxHashSet<String>,
    styles: FxHashMap<String, f32>,
    text: String,
    data: FxHashMap<String, String>,
    sibling_index: usize,
}

/// In-memory document surface
///
/// Nodes store document-relative rectangles; `bounds` translates them by
/// the current scroll offset, so scrolling in tests behaves like scrolling
/// in a real document.
pub struct MemoryDocument {
    nodes: SlotMap<NodeId, NodeData>,
    /// Insertion order, so class queries return document order
    order: Vec<NodeId>,
    viewport: Size,
    scroll_y: f32,
}

impl MemoryDocument {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            order: Vec::new(),
            viewport: Size::new(width, height),
            scroll_y: 0.0,
        }
    }

    /// Insert a node described by a [`NodeSpec`]
    pub fn insert(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.nodes.insert(NodeData {
            rect: spec.rect,
            classes: spec.classes.into_iter().collect(),
            styles: FxHashMap::default(),
            text: spec.text,
            data: spec.data.into_iter().collect(),
            sibling_index: spec.sibling_index,
        });
        self.order.push(id);
        id
    }

    /// Scroll the document; node bounds shift accordingly
    pub fn set_scroll_y(&mut self, offset: f32) {
        self.scroll_y = offset;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
    }

    /// Move a node within the document (host-side layout change)
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.rect = rect;
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl DocumentSurface for MemoryDocument {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn document_height(&self) -> f32 {
        // Content extends to the lowest node edge, never less than one
        // viewport
        self.nodes
            .values()
            .map(|data| data.rect.y + data.rect.height)
            .fold(self.viewport.height, f32::max)
    }

    fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.nodes
            .get(node)
            .map(|data| data.rect.translated_y(-self.scroll_y))
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.classes.remove(class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|data| data.classes.contains(class))
    }

    fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.nodes
                    .get(*id)
                    .is_some_and(|data| data.classes.contains(class))
            })
            .collect()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: f32) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.styles.insert(property.to_string(), value);
        } else {
            tracing::debug!(property, "style write to a removed node ignored");
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<f32> {
        self.nodes
            .get(node)
            .and_then(|data| data.styles.get(property).copied())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.text = text.to_string();
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.nodes.get(node).map(|data| data.text.clone())
    }

    fn data_attr(&self, node: NodeId, key: &str) -> Option<String> {
        self.nodes
            .get(node)
            .and_then(|data| data.data.get(key).cloned())
    }

    fn sibling_index(&self, node: NodeId) -> usize {
        self.nodes
            .get(node)
            .map(|data| data.sibling_index)
            .unwrap_or(0)
    }

    fn spawn_node(&mut self, class: &str) -> NodeId {
        self.insert(NodeSpec::new().class(class))
    }

    fn remove_node(&mut self, node: NodeId) {
        self.nodes.remove(node);
        self.order.retain(|id| *id != node);
    }
}
