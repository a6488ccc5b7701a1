use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::overlay::{OverlayState, Transition};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, Key, ListenerId, NodeId};
use crate::host::Host;
use crate::timers::TimerId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalOptions {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub size: String,
    pub show_close: bool,
    pub close_on_overlay: bool,
    pub close_on_escape: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            size: "md".to_string(),
            show_close: true,
            close_on_overlay: true,
            close_on_escape: true,
        }
    }
}

pub struct Modal {
    options: ModalOptions,
    handle: Option<NodeId>,
    title: Option<NodeId>,
    body: Option<NodeId>,
    close_button: Option<NodeId>,
    bindings: Bindings,
    transition: Transition,
    on_open: Option<Callback<()>>,
    on_close: Option<Callback<()>>,
}

impl Modal {
    pub fn new(options: ModalOptions) -> Self {
        Self {
            options,
            handle: None,
            title: None,
            body: None,
            close_button: None,
            bindings: Bindings::new(),
            transition: Transition::default(),
            on_open: None,
            on_close: None,
        }
    }

    pub fn on_open(mut self, f: impl FnMut(&()) + 'static) -> Self {
        self.on_open = Some(Callback::new(f));
        self
    }

    pub fn on_close(mut self, f: impl FnMut(&()) + 'static) -> Self {
        self.on_close = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    pub fn state(&self) -> OverlayState {
        self.transition.state()
    }

    pub fn is_open(&self) -> bool {
        self.transition.is_open()
    }

    pub fn set_title(&mut self, host: &mut Host, title: &str) {
        self.options.title = title.to_string();
        if let Some(node) = self.title {
            host.document.set_text(node, title);
        }
    }

    pub fn set_content(&mut self, host: &mut Host, content: &str) {
        self.options.content = content.to_string();
        if let Some(node) = self.body {
            host.document.set_text(node, content);
        }
    }

    pub fn open(&mut self, host: &mut Host) {
        let Some(node) = self.handle else {
            warn!("Modal not rendered, cannot open");
            return;
        };
        if !self.transition.open(&mut self.bindings, &mut host.timers) {
            return;
        }
        let root = host.root();
        host.document.set_style(node, "display", "flex");
        host.document.set_style(root, "overflow", "hidden");
        debug!("modal opening");
        emit(&mut self.on_open, &());
    }

    pub fn close(&mut self, host: &mut Host) {
        let Some(node) = self.handle else {
            return;
        };
        if self.transition.close(&mut self.bindings, &mut host.timers) {
            host.document.remove_class(node, "active");
        }
    }
}

impl FromOptions for Modal {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Modal {
    fn name(&self) -> &'static str {
        "modal"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.transition.reset();

        let root = host.root();
        let doc = &mut host.document;
        let overlay = doc.element("div", "modal", "");
        if let Some(id) = &self.options.id {
            doc.set_attr(overlay, "id", id.clone());
        }
        doc.set_style(overlay, "display", "none");
        let dialog = doc.element("div", &format!("modal-dialog modal-{}", self.options.size), "");
        doc.set_attr(dialog, "role", "dialog");
        let header = doc.element("div", "modal-header", "");
        let title = doc.element("h3", "modal-title", &self.options.title);
        doc.append_child(header, title);
        if self.options.show_close {
            let close = doc.element("button", "modal-close", "\u{00D7}");
            doc.set_attr(close, "aria-label", "Close");
            doc.append_child(header, close);
            self.bindings.listen(doc, close, EventKind::Click);
            self.close_button = Some(close);
        } else {
            self.close_button = None;
        }
        let body = doc.element("div", "modal-body", &self.options.content);
        doc.append_child(dialog, header);
        doc.append_child(dialog, body);
        doc.append_child(overlay, dialog);

        self.bindings.listen(doc, overlay, EventKind::Click);
        self.bindings.listen(doc, root, EventKind::KeyDown);

        self.handle = Some(overlay);
        self.title = Some(title);
        self.body = Some(body);
        Ok(overlay)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(overlay) = self.handle else {
            return Ok(ComponentAction::None);
        };
        match delivery.event.kind {
            EventKind::KeyDown => {
                if self.options.close_on_escape
                    && delivery.event.is_key(Key::Escape)
                    && self.transition.is_open()
                {
                    self.close(host);
                    return Ok(ComponentAction::Update);
                }
            }
            EventKind::Click if Some(delivery.current_target) == self.close_button => {
                self.close(host);
                return Ok(ComponentAction::Update);
            }
            // only clicks on the backdrop itself, not ones bubbling from the dialog
            EventKind::Click
                if delivery.current_target == overlay && delivery.target() == overlay =>
            {
                if self.options.close_on_overlay {
                    self.close(host);
                    return Ok(ComponentAction::Update);
                }
            }
            _ => {}
        }
        Ok(ComponentAction::None)
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        self.bindings.fired(timer);
        let Some(node) = self.handle else {
            return Ok(ComponentAction::None);
        };
        match self.transition.on_timer(timer) {
            Some(OverlayState::Open) => {
                host.document.add_class(node, "active");
                Ok(ComponentAction::Update)
            }
            Some(OverlayState::Closed) => {
                let root = host.root();
                host.document.set_style(node, "display", "none");
                host.document.set_style(root, "overflow", "auto");
                emit(&mut self.on_close, &());
                Ok(ComponentAction::Closed)
            }
            _ => Ok(ComponentAction::None),
        }
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.bindings.owns_timer(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        if self.transition.state() != OverlayState::Closed {
            let root = host.root();
            host.document.set_style(root, "overflow", "auto");
        }
        self.bindings.teardown(host, self.handle.take());
        self.transition.reset();
        self.title = None;
        self.body = None;
        self.close_button = None;
    }
}
