//! UI events delivered through the document.

use super::{ListenerId, NodeId};

/// Kind of event a listener subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    /// Value of a text-like control changed while typing
    Input,
    /// Committed value change (select, checkbox)
    Change,
    KeyDown,
    MouseEnter,
    MouseLeave,
    /// Control lost focus
    Blur,
    Submit,
}

/// Keys the components react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Char(char),
}

/// An event fired at a target node
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    pub kind: EventKind,
    pub target: NodeId,
    /// New control value for `Input` and `Change` events
    pub value: Option<String>,
    /// Pressed key for `KeyDown` events
    pub key: Option<Key>,
}

impl UiEvent {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            value: None,
            key: None,
        }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn input(target: NodeId, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(EventKind::Input, target)
        }
    }

    pub fn change(target: NodeId, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(EventKind::Change, target)
        }
    }

    pub fn key(target: NodeId, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    pub fn mouse_enter(target: NodeId) -> Self {
        Self::new(EventKind::MouseEnter, target)
    }

    pub fn mouse_leave(target: NodeId) -> Self {
        Self::new(EventKind::MouseLeave, target)
    }

    pub fn blur(target: NodeId) -> Self {
        Self::new(EventKind::Blur, target)
    }

    pub fn submit(target: NodeId) -> Self {
        Self::new(EventKind::Submit, target)
    }

    /// Whether this is a key press of `key`
    pub fn is_key(&self, key: Key) -> bool {
        self.kind == EventKind::KeyDown && self.key == Some(key)
    }
}

/// One listener invocation produced by dispatching an event
///
/// `current_target` is the node the listener is attached to, which differs
/// from `event.target` when the event bubbled up from a descendant.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub listener: ListenerId,
    pub current_target: NodeId,
    pub event: UiEvent,
}

impl Delivery {
    pub fn target(&self) -> NodeId {
        self.event.target
    }
}
