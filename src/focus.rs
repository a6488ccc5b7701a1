//! Keyboard focus over a rendered UI tree.
//!
//! The terminal has no pointer, so the showcase walks the interactive nodes
//! of a section in document order and turns key presses into the events a
//! pointer or a native control would have produced.

use crate::dom::{Document, EventKind, NodeId, UiEvent};

const CONTROL_TAGS: [&str; 5] = ["button", "input", "select", "textarea", "a"];

fn is_interactive(doc: &Document, node: NodeId) -> bool {
    doc.tag(node).is_some_and(|t| CONTROL_TAGS.contains(&t))
        || doc.has_attr(node, "data-icon")
        || doc.listens(node, EventKind::Click)
        || doc.listens(node, EventKind::Input)
        || doc.listens(node, EventKind::Change)
}

/// Interactive, displayed nodes under `scope`, innermost first: a node
/// that contains other interactive nodes (a delegating container) is left out
pub fn focusable(doc: &Document, scope: NodeId) -> Vec<NodeId> {
    let candidates = doc.query_all(scope, |d, n| is_interactive(d, n) && d.is_displayed(n));
    candidates
        .iter()
        .copied()
        .filter(|n| {
            !candidates
                .iter()
                .any(|other| other != n && doc.is_descendant(*other, *n))
        })
        .collect()
}

/// How the focused node takes keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Free text; keys edit a buffer that is sent as input events
    Text,
    /// Left/Right step through a range
    Range,
    /// Left/Right cycle through options
    Choice,
    /// Enter activates
    Button,
}

pub fn control_kind(doc: &Document, node: NodeId) -> ControlKind {
    match (doc.tag(node), doc.attr(node, "type")) {
        (Some("textarea"), _) => ControlKind::Text,
        (Some("select"), _) => ControlKind::Choice,
        (Some("input"), Some("range")) => ControlKind::Range,
        (Some("input"), Some("checkbox" | "radio" | "button" | "submit")) => ControlKind::Button,
        (Some("input"), _) => ControlKind::Text,
        _ => ControlKind::Button,
    }
}

/// Event for pressing Enter on `node`
pub fn activation(doc: &Document, node: NodeId) -> UiEvent {
    if !doc.listens(node, EventKind::Click) && doc.listens(node, EventKind::MouseEnter) {
        UiEvent::mouse_enter(node)
    } else {
        UiEvent::click(node)
    }
}

fn attr_f64(doc: &Document, node: NodeId, name: &str, default: f64) -> f64 {
    doc.attr(node, name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Input event moving a range control one step in `direction` (-1 or 1)
pub fn step_range(doc: &Document, node: NodeId, direction: f64) -> Option<UiEvent> {
    let min = attr_f64(doc, node, "min", 0.0);
    let max = attr_f64(doc, node, "max", 100.0);
    let step = attr_f64(doc, node, "step", 1.0);
    let value = attr_f64(doc, node, "value", min);
    let next = (value + step * direction).clamp(min, max);
    (next != value).then(|| UiEvent::input(node, format_number(next)))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Change event selecting the neighbouring enabled `<option>`
pub fn cycle_choice(doc: &Document, node: NodeId, forward: bool) -> Option<UiEvent> {
    let values: Vec<&str> = doc
        .children(node)
        .iter()
        .filter(|o| !doc.has_attr(**o, "disabled"))
        .filter_map(|o| doc.attr(*o, "value"))
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        return None;
    }
    let current = doc
        .attr(node, "value")
        .and_then(|v| values.iter().position(|x| *x == v));
    let next = match (current, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % values.len(),
        (Some(i), false) => (i + values.len() - 1) % values.len(),
    };
    Some(UiEvent::change(node, values[next]))
}

/// Focus position within a list of nodes that is rebuilt as the tree changes
#[derive(Debug, Default, Clone)]
pub struct FocusRing {
    nodes: Vec<NodeId>,
    index: usize,
}

impl FocusRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-collect the nodes under `scope`, keeping focus on the same node
    /// when it is still present
    pub fn refresh(&mut self, doc: &Document, scope: NodeId) {
        let current = self.current();
        self.nodes = focusable(doc, scope);
        self.index = current
            .and_then(|c| self.nodes.iter().position(|n| *n == c))
            .unwrap_or_else(|| self.index.min(self.nodes.len().saturating_sub(1)));
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index = 0;
    }

    pub fn current(&self) -> Option<NodeId> {
        self.nodes.get(self.index).copied()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn next(&mut self) -> Option<NodeId> {
        if !self.nodes.is_empty() {
            self.index = (self.index + 1) % self.nodes.len();
        }
        self.current()
    }

    pub fn prev(&mut self) -> Option<NodeId> {
        if !self.nodes.is_empty() {
            self.index = (self.index + self.nodes.len() - 1) % self.nodes.len();
        }
        self.current()
    }

    pub fn focus(&mut self, node: NodeId) -> bool {
        match self.nodes.iter().position(|n| *n == node) {
            Some(i) => {
                self.index = i;
                true
            }
            None => false,
        }
    }
}
