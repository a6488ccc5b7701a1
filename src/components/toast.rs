use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::notices::LEAVE_DURATION;
use crate::host::{Host, NoticeVariant, StackPosition};
use crate::timers::TimerId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToastOptions {
    pub message: String,
    pub title: Option<String>,
    pub variant: NoticeVariant,
    pub position: StackPosition,
    /// Milliseconds until the toast leaves; `0` keeps it until closed
    pub duration: u64,
    pub closable: bool,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            message: String::new(),
            title: None,
            variant: NoticeVariant::Info,
            position: StackPosition::TopRight,
            duration: 5000,
            closable: true,
        }
    }
}

/// A notice placed in the shared stacking area for its position.
/// Several toasts stack in the same container.
pub struct Toast {
    options: ToastOptions,
    handle: Option<NodeId>,
    message: Option<NodeId>,
    bindings: Bindings,
    timer: Option<TimerId>,
    leaving: bool,
    on_close: Option<Callback<()>>,
}

impl Toast {
    pub fn new(options: ToastOptions) -> Self {
        Self {
            options,
            handle: None,
            message: None,
            bindings: Bindings::new(),
            timer: None,
            leaving: false,
            on_close: None,
        }
    }

    pub fn on_close(mut self, f: impl FnMut(&()) + 'static) -> Self {
        self.on_close = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    pub fn is_leaving(&self) -> bool {
        self.leaving
    }

    pub fn set_message(&mut self, host: &mut Host, message: &str) {
        self.options.message = message.to_string();
        if let Some(node) = self.message {
            host.document.set_text(node, message);
        }
    }

    /// Start leaving; the node is removed once the leave animation is over
    pub fn dismiss(&mut self, host: &mut Host) {
        let Some(node) = self.handle else {
            return;
        };
        if self.leaving {
            return;
        }
        self.leaving = true;
        self.bindings.cancel(&mut host.timers, &mut self.timer);
        host.document.add_class(node, "leaving");
        self.timer = Some(self.bindings.schedule(&mut host.timers, LEAVE_DURATION));
    }
}

impl FromOptions for Toast {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Toast {
    fn name(&self) -> &'static str {
        "toast"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.timer = None;
        self.leaving = false;

        let container = host
            .notices
            .container(&mut host.document, self.options.position);
        let variant = self.options.variant;
        let doc = &mut host.document;

        let toast = doc.element("div", &format!("toast toast-{}", variant.class()), "");
        doc.set_attr(toast, "role", "status");
        let icon = doc.element("span", "toast-icon", variant.icon());
        let body = doc.element("div", "toast-body", "");
        if let Some(title) = &self.options.title {
            let title = doc.element("strong", "toast-title", title);
            doc.append_child(body, title);
        }
        let message = doc.element("span", "toast-message", &self.options.message);
        doc.append_child(body, message);
        doc.append_child(toast, icon);
        doc.append_child(toast, body);
        if self.options.closable {
            let close = doc.element("button", "toast-close", "\u{00D7}");
            doc.append_child(toast, close);
            self.bindings.listen(doc, toast, EventKind::Click);
        }
        doc.append_child(container, toast);

        if self.options.duration > 0 {
            let duration = Duration::from_millis(self.options.duration);
            self.timer = Some(self.bindings.schedule(&mut host.timers, duration));
        }

        self.handle = Some(toast);
        self.message = Some(message);
        Ok(toast)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, _delivery: &Delivery) -> Result<ComponentAction> {
        self.dismiss(host);
        Ok(ComponentAction::Update)
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        self.bindings.fired(timer);
        if self.timer != Some(timer) {
            return Ok(ComponentAction::None);
        }
        self.timer = None;
        if !self.leaving {
            self.dismiss(host);
            return Ok(ComponentAction::Update);
        }
        self.bindings.teardown(host, self.handle.take());
        self.message = None;
        emit(&mut self.on_close, &());
        Ok(ComponentAction::Dismissed)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.bindings.owns_timer(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.message = None;
        self.timer = None;
        self.leaving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::UiEvent;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_toasts_share_a_stack() {
        let mut host = Host::new();
        let mut first = Toast::new(ToastOptions {
            message: "one".to_string(),
            ..Default::default()
        });
        let mut second = Toast::new(ToastOptions {
            message: "two".to_string(),
            ..Default::default()
        });
        let a = host.mount(&mut first).unwrap();
        let b = host.mount(&mut second).unwrap();

        let stack = host
            .notices
            .container(&mut host.document, StackPosition::TopRight);
        assert_eq!(host.document.children(stack), &[a, b]);
    }

    #[test]
    fn test_auto_dismiss() {
        let mut host = Host::new();
        let closed = Rc::new(Cell::new(false));
        let sink = closed.clone();
        let mut toast = Toast::new(ToastOptions {
            message: "Saved".to_string(),
            variant: NoticeVariant::Success,
            ..Default::default()
        })
        .on_close(move |_| sink.set(true));
        let node = host.mount(&mut toast).unwrap();

        host.advance(&mut toast, Duration::from_millis(5000)).unwrap();
        assert!(toast.is_leaving());
        assert!(host.document.has_class(node, "leaving"));
        host.advance(&mut toast, LEAVE_DURATION).unwrap();
        assert!(closed.get());
        assert!(!host.document.contains(node));
    }

    #[test]
    fn test_click_closes_and_position_is_honoured() {
        let mut host = Host::new();
        let mut toast = Toast::new(ToastOptions {
            position: StackPosition::BottomLeft,
            duration: 0,
            ..Default::default()
        });
        toast.set_message(&mut host, "Hello");
        let node = host.mount(&mut toast).unwrap();
        let stack = host.document.parent(node).unwrap();
        assert!(host.document.has_class(stack, "bottom-left"));
        assert_eq!(host.timers.pending_count(), 0);
        assert!(host.document.text_content(node).contains("Hello"));

        host.dispatch(&mut toast, UiEvent::click(node)).unwrap();
        host.advance(&mut toast, LEAVE_DURATION).unwrap();
        assert!(toast.handle().is_none());
    }
}
