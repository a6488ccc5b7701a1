use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::overlay::CLOSE_DELAY;
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::{Host, NoticeVariant};
use crate::timers::TimerId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertOptions {
    pub message: String,
    pub title: Option<String>,
    pub variant: NoticeVariant,
    pub dismissible: bool,
    /// Milliseconds until the alert dismisses itself; `null` disables
    pub auto_dismiss: Option<u64>,
}

impl Default for AlertOptions {
    fn default() -> Self {
        Self {
            message: String::new(),
            title: None,
            variant: NoticeVariant::Info,
            dismissible: true,
            auto_dismiss: Some(5000),
        }
    }
}

pub struct Alert {
    options: AlertOptions,
    handle: Option<NodeId>,
    message: Option<NodeId>,
    bindings: Bindings,
    auto_timer: Option<TimerId>,
    close_timer: Option<TimerId>,
    on_dismiss: Option<Callback<()>>,
}

impl Alert {
    pub fn new(options: AlertOptions) -> Self {
        Self {
            options,
            handle: None,
            message: None,
            bindings: Bindings::new(),
            auto_timer: None,
            close_timer: None,
            on_dismiss: None,
        }
    }

    pub fn on_dismiss(mut self, f: impl FnMut(&()) + 'static) -> Self {
        self.on_dismiss = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &AlertOptions {
        &self.options
    }

    pub fn is_closing(&self) -> bool {
        self.close_timer.is_some()
    }

    pub fn set_message(&mut self, host: &mut Host, message: &str) {
        self.options.message = message.to_string();
        if let Some(node) = self.message {
            host.document.set_text(node, message);
        }
    }

    pub fn set_variant(&mut self, host: &mut Host, variant: NoticeVariant) {
        self.options.variant = variant;
        if let Some(node) = self.handle {
            host.document
                .set_class_name(node, &format!("alert alert-{}", variant.class()));
            if let Some(icon) = host.document.first_by_class(node, "alert-icon") {
                host.document.set_text(icon, variant.icon());
            }
        }
    }

    /// Start the closing transition; the node is removed after the close delay
    pub fn dismiss(&mut self, host: &mut Host) {
        let Some(node) = self.handle else {
            return;
        };
        if self.close_timer.is_some() {
            return;
        }
        self.bindings.cancel(&mut host.timers, &mut self.auto_timer);
        host.document.add_class(node, "closing");
        self.close_timer = Some(self.bindings.schedule(&mut host.timers, CLOSE_DELAY));
    }

    fn finish(&mut self, host: &mut Host) -> ComponentAction {
        self.bindings.teardown(host, self.handle.take());
        self.message = None;
        self.close_timer = None;
        debug!("alert dismissed");
        emit(&mut self.on_dismiss, &());
        ComponentAction::Dismissed
    }
}

impl FromOptions for Alert {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Alert {
    fn name(&self) -> &'static str {
        "alert"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.auto_timer = None;
        self.close_timer = None;

        let variant = self.options.variant;
        let doc = &mut host.document;
        let alert = doc.element("div", &format!("alert alert-{}", variant.class()), "");
        doc.set_attr(alert, "role", "alert");
        let icon = doc.element("span", "alert-icon", variant.icon());
        let body = doc.element("div", "alert-body", "");
        if let Some(title) = &self.options.title {
            let title = doc.element("strong", "alert-title", title);
            doc.append_child(body, title);
        }
        let message = doc.element("span", "alert-message", &self.options.message);
        doc.append_child(body, message);
        doc.append_child(alert, icon);
        doc.append_child(alert, body);

        if self.options.dismissible {
            let close = doc.element("button", "alert-close", "\u{00D7}");
            doc.set_attr(close, "aria-label", "Close");
            doc.append_child(alert, close);
            self.bindings.listen(doc, close, EventKind::Click);
        }

        if let Some(ms) = self.options.auto_dismiss {
            self.auto_timer = Some(
                self.bindings
                    .schedule(&mut host.timers, Duration::from_millis(ms)),
            );
        }

        self.handle = Some(alert);
        self.message = Some(message);
        Ok(alert)
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
        if self.auto_timer == Some(timer) {
            self.auto_timer = None;
            self.dismiss(host);
            return Ok(ComponentAction::Update);
        }
        if self.close_timer == Some(timer) {
            return Ok(self.finish(host));
        }
        Ok(ComponentAction::None)
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
        self.auto_timer = None;
        self.close_timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::UiEvent;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_alert(options: AlertOptions) -> (Alert, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        let alert = Alert::new(options).on_dismiss(move |_| sink.set(sink.get() + 1));
        (alert, count)
    }

    #[test]
    fn test_auto_dismiss_after_default_window() {
        let mut host = Host::new();
        let (mut alert, dismissed) = counting_alert(AlertOptions {
            message: "Saved".to_string(),
            ..Default::default()
        });
        let node = host.mount(&mut alert).unwrap();

        host.advance(&mut alert, Duration::from_millis(4999)).unwrap();
        assert!(!host.document.has_class(node, "closing"));

        host.advance(&mut alert, Duration::from_millis(1)).unwrap();
        assert!(host.document.has_class(node, "closing"));
        assert_eq!(dismissed.get(), 0);

        host.advance(&mut alert, CLOSE_DELAY).unwrap();
        assert!(!host.document.contains(node));
        assert_eq!(dismissed.get(), 1);
        assert!(alert.handle().is_none());
    }

    #[test]
    fn test_close_button() {
        let mut host = Host::new();
        let (mut alert, dismissed) = counting_alert(AlertOptions {
            auto_dismiss: None,
            ..Default::default()
        });
        let node = host.mount(&mut alert).unwrap();
        let close = host.document.first_by_class(node, "alert-close").unwrap();
        host.dispatch(&mut alert, UiEvent::click(close)).unwrap();
        assert!(alert.is_closing());
        // a second click during the transition is ignored
        host.dispatch(&mut alert, UiEvent::click(close)).unwrap();
        host.advance(&mut alert, CLOSE_DELAY).unwrap();
        assert_eq!(dismissed.get(), 1);
        assert_eq!(host.timers.pending_count(), 0);
    }

    #[test]
    fn test_not_dismissible_has_no_close_button() {
        let mut host = Host::new();
        let mut alert = Alert::new(AlertOptions {
            dismissible: false,
            auto_dismiss: None,
            ..Default::default()
        });
        let node = host.mount(&mut alert).unwrap();
        assert!(host.document.first_by_class(node, "alert-close").is_none());
        assert_eq!(host.timers.pending_count(), 0);
    }

    #[test]
    fn test_setters_before_render() {
        let mut host = Host::new();
        let mut alert = Alert::new(AlertOptions::default());
        alert.set_message(&mut host, "Disk almost full");
        alert.set_variant(&mut host, NoticeVariant::Warning);
        let node = host.mount(&mut alert).unwrap();
        assert!(host.document.has_class(node, "alert-warning"));
        assert!(host.document.text_content(node).contains("Disk almost full"));
    }

    #[test]
    fn test_destroy_cancels_timers() {
        let mut host = Host::new();
        let (mut alert, dismissed) = counting_alert(AlertOptions::default());
        host.mount(&mut alert).unwrap();
        alert.destroy(&mut host);
        assert_eq!(host.timers.pending_count(), 0);
        host.advance(&mut alert, Duration::from_secs(10)).unwrap();
        assert_eq!(dismissed.get(), 0);
    }
}
