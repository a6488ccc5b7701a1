//! In-memory UI tree.
//!
//! `Document` is the host "UI-tree" capability the components are written
//! against: create nodes, set attributes/classes/styles/text, append and
//! remove children, listen for events and dispatch them with bubbling.
//! The terminal showcase renders it as an outline; tests query it directly.

mod event;

pub use event::{Delivery, EventKind, Key, UiEvent};

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, warn};

new_key_type! {
    /// Handle of a node in a [`Document`]
    pub struct NodeId;
    /// Handle of a registered event listener
    pub struct ListenerId;
}

/// Layout box of a node, in abstract pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attrs: IndexMap<String, String>,
    styles: IndexMap<String, String>,
    text: String,
    bounds: Option<Bounds>,
    listeners: Vec<ListenerId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attrs: IndexMap::new(),
            styles: IndexMap::new(),
            text: String::new(),
            bounds: None,
            listeners: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    node: NodeId,
    kind: EventKind,
}

/// Arena-backed UI tree with a permanent `body` root
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    listeners: SlotMap<ListenerId, Listener>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("body"));
        Self {
            nodes,
            listeners: SlotMap::with_key(),
            root,
        }
    }

    /// The page body; document-level listeners attach here
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    /// Create an element with a class list and text in one call
    pub fn element(&mut self, tag: &str, class_name: &str, text: &str) -> NodeId {
        let node = self.create_element(tag);
        self.set_class_name(node, class_name);
        if !text.is_empty() {
            self.set_text(node, text);
        }
        node
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.tag.as_str())
    }

    // ---- structure -------------------------------------------------------

    /// Append `child` to `parent`, moving it if it already has a parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            warn!("append_child: missing node or self-append, ignoring");
            return;
        }
        if self.is_descendant(parent, child) {
            warn!("append_child: refusing to create a cycle");
            return;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Detach `child` from `parent`; the child stays alive
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(p) = self.nodes.get_mut(parent) else {
            return false;
        };
        let before = p.children.len();
        p.children.retain(|c| *c != child);
        let removed = p.children.len() < before;
        if removed {
            self.nodes[child].parent = None;
        }
        removed
    }

    /// Detach a node from its parent, if any
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            self.remove_child(parent, node);
        }
    }

    /// Detach and drop a node with its whole subtree and every listener in it.
    /// Returns the number of nodes dropped.
    pub fn remove(&mut self, node: NodeId) -> usize {
        if node == self.root || !self.contains(node) {
            return 0;
        }
        self.detach(node);
        let mut stack = vec![node];
        let mut dropped = 0;
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.remove(id) {
                for l in n.listeners {
                    self.listeners.remove(l);
                }
                stack.extend(n.children);
                dropped += 1;
            }
        }
        debug!("removed {} nodes", dropped);
        dropped
    }

    /// Drop every child of `node`
    pub fn clear_children(&mut self, node: NodeId) {
        for child in self.children(node).to_vec() {
            self.remove(child);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `node` is `ancestor` or lies below it
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is connected to the page body
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.contains(node) && self.is_descendant(node, self.root)
    }

    // ---- attributes ------------------------------------------------------

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(node)
            .and_then(|n| n.attrs.get(name))
            .map(String::as_str)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.attrs.shift_remove(name);
        }
    }

    /// Set or clear a boolean attribute such as `disabled` or `checked`
    pub fn set_flag(&mut self, node: NodeId, name: &str, on: bool) {
        if on {
            self.set_attr(node, name, "");
        } else {
            self.remove_attr(node, name);
        }
    }

    // ---- classes ---------------------------------------------------------

    /// Replace the class list with the whitespace-separated `class_name`
    pub fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.classes.clear();
            for class in class_name.split_whitespace() {
                if !n.classes.iter().any(|c| c == class) {
                    n.classes.push(class.to_string());
                }
            }
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes
            .get(node)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    // ---- styles ----------------------------------------------------------

    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.styles.insert(property.to_string(), value.into());
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(node)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    pub fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.styles.shift_remove(property);
        }
    }

    // ---- text and layout -------------------------------------------------

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.text = text.into();
        }
    }

    /// The node's own text (not including descendants)
    pub fn text(&self, node: NodeId) -> &str {
        self.nodes.get(node).map(|n| n.text.as_str()).unwrap_or("")
    }

    /// Text of the node and all its descendants, in document order
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.walk(node, &mut |id| out.push_str(self.text(id)));
        out
    }

    pub fn set_bounds(&mut self, node: NodeId, bounds: Bounds) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.bounds = Some(bounds);
        }
    }

    pub fn bounds(&self, node: NodeId) -> Option<Bounds> {
        self.nodes.get(node).and_then(|n| n.bounds)
    }

    // ---- queries ---------------------------------------------------------

    fn walk(&self, node: NodeId, f: &mut dyn FnMut(NodeId)) {
        if !self.contains(node) {
            return;
        }
        f(node);
        for child in self.children(node) {
            self.walk(*child, f);
        }
    }

    /// Descendants of `scope` (excluding `scope`) matching `pred`, in document order
    pub fn query_all(&self, scope: NodeId, pred: impl Fn(&Document, NodeId) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        for child in self.children(scope) {
            self.walk(*child, &mut |id| {
                if pred(self, id) {
                    found.push(id);
                }
            });
        }
        found
    }

    /// False when the node or an ancestor has `display: none`
    pub fn is_displayed(&self, node: NodeId) -> bool {
        let mut current = self.contains(node).then_some(node);
        while let Some(id) = current {
            if self.style(id, "display") == Some("none") {
                return false;
            }
            current = self.parent(id);
        }
        true
    }

    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.query_all(scope, |doc, id| doc.has_class(id, class))
    }

    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.find_by_class(scope, class).into_iter().next()
    }

    pub fn find_by_attr(&self, scope: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.query_all(scope, |doc, id| doc.attr(id, name) == Some(value))
            .into_iter()
            .next()
    }

    pub fn find_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.find_by_attr(scope, "id", id)
    }

    /// Nearest inclusive ancestor of `node` carrying attribute `name`,
    /// stopping at `boundary`
    pub fn closest_with_attr(&self, node: NodeId, name: &str, boundary: NodeId) -> Option<NodeId> {
        self.closest(node, boundary, |doc, id| doc.has_attr(id, name))
    }

    /// Nearest inclusive ancestor of `node` with `class`, stopping at `boundary`
    pub fn closest_with_class(&self, node: NodeId, class: &str, boundary: NodeId) -> Option<NodeId> {
        self.closest(node, boundary, |doc, id| doc.has_class(id, class))
    }

    fn closest(
        &self,
        node: NodeId,
        boundary: NodeId,
        pred: impl Fn(&Document, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if pred(self, id) {
                return Some(id);
            }
            if id == boundary {
                break;
            }
            current = self.parent(id);
        }
        None
    }

    // ---- events ----------------------------------------------------------

    /// Attach a listener; `None` when the node does not exist
    pub fn listen(&mut self, node: NodeId, kind: EventKind) -> Option<ListenerId> {
        if !self.contains(node) {
            warn!("listen: node not found");
            return None;
        }
        let id = self.listeners.insert(Listener { node, kind });
        self.nodes[node].listeners.push(id);
        Some(id)
    }

    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(n) = self.nodes.get_mut(listener.node) {
            n.listeners.retain(|l| *l != id);
        }
        true
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Whether `node` itself has a listener for `kind`
    pub fn listens(&self, node: NodeId, kind: EventKind) -> bool {
        self.nodes.get(node).is_some_and(|n| {
            n.listeners
                .iter()
                .any(|l| self.listeners.get(*l).is_some_and(|l| l.kind == kind))
        })
    }

    /// First node at or below `scope` with a listener for `kind`
    pub fn first_listening(&self, scope: NodeId, kind: EventKind) -> Option<NodeId> {
        let mut found = None;
        self.walk(scope, &mut |id| {
            if found.is_none()
                && self.nodes[id]
                    .listeners
                    .iter()
                    .any(|l| self.listeners.get(*l).is_some_and(|l| l.kind == kind))
            {
                found = Some(id);
            }
        });
        found
    }

    /// Resolve the listeners an event reaches, from the target up to the root
    pub fn dispatch(&self, event: &UiEvent) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        let mut current = self.contains(event.target).then_some(event.target);
        while let Some(node) = current {
            for id in &self.nodes[node].listeners {
                if self.listeners.get(*id).is_some_and(|l| l.kind == event.kind) {
                    deliveries.push(Delivery {
                        listener: *id,
                        current_target: node,
                        event: event.clone(),
                    });
                }
            }
            current = self.parent(node);
        }
        deliveries
    }

    // ---- debugging -------------------------------------------------------

    /// One-line description of a node: `tag.class#id [attr=value] "text"`
    pub fn describe(&self, node: NodeId) -> String {
        let Some(n) = self.nodes.get(node) else {
            return "<removed>".to_string();
        };
        let mut line = n.tag.clone();
        for class in &n.classes {
            line.push('.');
            line.push_str(class);
        }
        if let Some(id) = n.attrs.get("id") {
            line.push('#');
            line.push_str(id);
        }
        for (name, value) in n.attrs.iter().filter(|(k, _)| k.as_str() != "id") {
            if value.is_empty() {
                line.push_str(&format!(" [{}]", name));
            } else {
                line.push_str(&format!(" [{}={}]", name, value));
            }
        }
        if let Some(display) = n.styles.get("display") {
            line.push_str(&format!(" {{display:{}}}", display));
        }
        if !n.text.is_empty() {
            line.push_str(&format!(" {:?}", n.text));
        }
        line
    }

    /// Indented outline of a subtree, one node per line
    pub fn outline(&self, node: NodeId) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_into(node, 0, &mut lines);
        lines
    }

    fn outline_into(&self, node: NodeId, depth: usize, lines: &mut Vec<String>) {
        if !self.contains(node) {
            return;
        }
        lines.push(format!("{}{}", "  ".repeat(depth), self.describe(node)));
        for child in self.children(node) {
            self.outline_into(*child, depth + 1, lines);
        }
    }
}
