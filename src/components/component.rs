use crate::dom::{Delivery, Document, EventKind, ListenerId, NodeId};
use crate::host::Host;
use crate::timers::{TimerId, Timers};
use anyhow::Result;
use std::fmt;
use std::time::Duration;

/// Action that a component can return after handling an event or timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentAction {
    /// No action needed
    None,
    /// Visible state changed without a value change
    Update,
    /// The user changed the component's value
    Changed,
    /// A button-like element was activated
    Activated,
    /// An overlay finished closing
    Closed,
    /// The component removed itself from the page
    Dismissed,
    /// Custom action with a string identifier
    Custom(String),
}

/// Trait for all UI components
///
/// Components are self-contained UI elements that:
/// - Own their options and, once rendered, one UI-tree handle
/// - Handle the events delivered to their listeners
/// - Update options and the live tree together in their setters
/// - Release listeners, timers and the handle in `destroy`
pub trait Component {
    /// Registry name of the component type
    fn name(&self) -> &'static str;

    /// Build the UI tree from the current options and return its root.
    /// Rendering again replaces the previous handle.
    fn render(&mut self, host: &mut Host) -> Result<NodeId>;

    /// Root of the rendered tree, if rendered
    fn handle(&self) -> Option<NodeId>;

    /// Handle an event delivered to one of this component's listeners
    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction>;

    /// Handle one of this component's timers firing
    fn on_timer(&mut self, _host: &mut Host, _timer: TimerId) -> Result<ComponentAction> {
        Ok(ComponentAction::None)
    }

    fn owns_listener(&self, id: ListenerId) -> bool;

    fn owns_timer(&self, _id: TimerId) -> bool {
        false
    }

    /// Detach the handle and release listeners and pending timers.
    /// Safe to call more than once.
    fn destroy(&mut self, host: &mut Host);
}

/// A user-supplied callback
pub struct Callback<T: ?Sized>(Box<dyn FnMut(&T)>);

impl<T: ?Sized> Callback<T> {
    pub fn new(f: impl FnMut(&T) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn call(&mut self, value: &T) {
        (self.0)(value);
    }
}

impl<T: ?Sized> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// Invoke an optional callback
pub fn emit<T: ?Sized>(callback: &mut Option<Callback<T>>, value: &T) {
    if let Some(cb) = callback.as_mut() {
        cb.call(value);
    }
}

/// Listener and timer bookkeeping shared by every component
#[derive(Debug, Default)]
pub struct Bindings {
    listeners: Vec<ListenerId>,
    timers: Vec<TimerId>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, doc: &mut Document, node: NodeId, kind: EventKind) -> Option<ListenerId> {
        let id = doc.listen(node, kind)?;
        self.listeners.push(id);
        Some(id)
    }

    pub fn unlisten(&mut self, doc: &mut Document, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
        doc.unlisten(id);
    }

    pub fn owns_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn schedule(&mut self, timers: &mut Timers, delay: Duration) -> TimerId {
        let id = timers.set_timeout(delay);
        self.timers.push(id);
        id
    }

    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.timers.contains(&id)
    }

    /// Forget a timer that just fired; returns whether it was ours
    pub fn fired(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| *t != id);
        self.timers.len() < before
    }

    /// Cancel a pending timer held in `slot`
    pub fn cancel(&mut self, timers: &mut Timers, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            timers.clear(id);
            self.timers.retain(|t| *t != id);
        }
    }

    pub fn release_listeners(&mut self, doc: &mut Document) {
        for id in self.listeners.drain(..) {
            doc.unlisten(id);
        }
    }

    pub fn release_timers(&mut self, timers: &mut Timers) {
        for id in self.timers.drain(..) {
            timers.clear(id);
        }
    }

    /// Release everything and remove `handle` from the page
    pub fn teardown(&mut self, host: &mut Host, handle: Option<NodeId>) {
        self.release_timers(&mut host.timers);
        self.release_listeners(&mut host.document);
        if let Some(node) = handle {
            host.document.remove(node);
        }
    }
}
