//! The page the components live in.
//!
//! `Host` bundles the capabilities a component may use: the UI tree, the
//! timer queue, the clipboard (with its selection fallback), preference
//! storage and the notification stacking area. It also routes dispatched
//! events and fired timers to the components that own them.

pub mod clipboard;
pub mod notices;
pub mod storage;

pub use clipboard::{Clipboard, ClipboardError, CopyOutcome, MemoryClipboard, SelectionFallback};
pub use notices::{Notice, NoticeStack, NoticeVariant, StackPosition};
pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::components::{Component, ComponentAction};
use crate::dom::{Document, EventKind, NodeId, UiEvent};
use crate::timers::Timers;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, trace};

/// Default lifetime of a host notice
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(3000);

pub struct Host {
    pub document: Document,
    pub timers: Timers,
    pub notices: NoticeStack,
    clipboard: Box<dyn Clipboard>,
    fallback: Box<dyn Clipboard>,
    storage: Box<dyn Storage>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    /// In-memory host: memory clipboard, selection fallback, memory storage
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            timers: Timers::new(),
            notices: NoticeStack::new(DEFAULT_NOTICE_DURATION),
            clipboard: Box::new(MemoryClipboard::new()),
            fallback: Box::new(SelectionFallback::new()),
            storage: Box::new(MemoryStorage::new()),
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_fallback(mut self, fallback: Box<dyn Clipboard>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notices.set_default_duration(duration);
        self
    }

    pub fn root(&self) -> NodeId {
        self.document.root()
    }

    pub fn clipboard(&self) -> &dyn Clipboard {
        self.clipboard.as_ref()
    }

    pub fn fallback_clipboard(&self) -> &dyn Clipboard {
        self.fallback.as_ref()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn Storage {
        self.storage.as_mut()
    }

    /// Copy text, falling back to the selection mechanism on failure
    pub fn copy_text(&mut self, text: &str) -> CopyOutcome {
        clipboard::copy_with_fallback(self.clipboard.as_mut(), self.fallback.as_mut(), text)
    }

    /// Show a notice in the shared stacking area
    pub fn notify(&mut self, message: impl Into<String>, variant: NoticeVariant) -> NodeId {
        self.notices
            .push(&mut self.document, &mut self.timers, message, variant)
    }

    /// Render a component and attach its handle to the page body, unless
    /// the component already placed it (toasts go to their stack)
    pub fn mount(&mut self, component: &mut dyn Component) -> Result<NodeId> {
        let handle = component.render(self)?;
        if self.document.parent(handle).is_none() {
            let root = self.document.root();
            self.document.append_child(root, handle);
        }
        Ok(handle)
    }

    /// Dispatch an event to a single component
    pub fn dispatch(
        &mut self,
        component: &mut dyn Component,
        event: UiEvent,
    ) -> Result<ComponentAction> {
        let actions = self.dispatch_many(&mut [component], event)?;
        Ok(actions.into_iter().last().unwrap_or(ComponentAction::None))
    }

    /// Dispatch an event; each listener it reaches is handed to the
    /// component that owns it. Returns every non-`None` action produced.
    pub fn dispatch_many(
        &mut self,
        components: &mut [&mut dyn Component],
        event: UiEvent,
    ) -> Result<Vec<ComponentAction>> {
        if matches!(event.kind, EventKind::Input | EventKind::Change) {
            if let Some(value) = &event.value {
                self.document.set_attr(event.target, "value", value.clone());
            }
        }

        let deliveries = self.document.dispatch(&event);
        trace!("{:?} reached {} listeners", event.kind, deliveries.len());

        let mut actions = Vec::new();
        for delivery in deliveries {
            // an earlier handler may have torn this listener down
            if !self.document.is_listening(delivery.listener) {
                continue;
            }
            if self.notices.owns_listener(delivery.listener) {
                self.notices
                    .on_click(&mut self.document, &mut self.timers, delivery.listener);
                continue;
            }
            for component in components.iter_mut() {
                if component.owns_listener(delivery.listener) {
                    let action = component.handle_event(self, &delivery)?;
                    if action != ComponentAction::None {
                        actions.push(action);
                    }
                    break;
                }
            }
        }
        Ok(actions)
    }

    /// Advance the clock, firing a single component's timers
    pub fn advance(&mut self, component: &mut dyn Component, dt: Duration) -> Result<()> {
        self.advance_many(&mut [component], dt).map(|_| ())
    }

    /// Advance the clock by `dt`, firing every due timer in order.
    /// Timers scheduled while firing are honoured if they fall in the window.
    pub fn advance_many(
        &mut self,
        components: &mut [&mut dyn Component],
        dt: Duration,
    ) -> Result<Vec<ComponentAction>> {
        let until = self.timers.now() + dt;
        let mut actions = Vec::new();
        while let Some(id) = self.timers.pop_due(until) {
            if self.notices.owns_timer(id) {
                self.notices
                    .on_timer(&mut self.document, &mut self.timers, id);
                continue;
            }
            let mut routed = false;
            for component in components.iter_mut() {
                if component.owns_timer(id) {
                    let action = component.on_timer(self, id)?;
                    if action != ComponentAction::None {
                        actions.push(action);
                    }
                    routed = true;
                    break;
                }
            }
            if !routed {
                debug!("timer fired with no owner");
            }
        }
        self.timers.settle(until);
        Ok(actions)
    }
}
