use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::{CopyOutcome, Host, NoticeVariant};
use crate::timers::TimerId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CopyButtonOptions {
    /// Text placed on the clipboard
    pub content: String,
    pub text: String,
    pub copied_text: String,
    /// Milliseconds the confirmation stays visible
    pub feedback_duration: u64,
    pub success_message: String,
    pub error_message: String,
}

impl Default for CopyButtonOptions {
    fn default() -> Self {
        Self {
            content: String::new(),
            text: "Copy".to_string(),
            copied_text: "Copied!".to_string(),
            feedback_duration: 2000,
            success_message: "Code copied to clipboard!".to_string(),
            error_message: "Failed to copy code".to_string(),
        }
    }
}

/// Button that copies its content and briefly confirms it
pub struct CopyButton {
    options: CopyButtonOptions,
    handle: Option<NodeId>,
    revert_timer: Option<TimerId>,
    bindings: Bindings,
    on_copy: Option<Callback<CopyOutcome>>,
}

impl CopyButton {
    pub fn new(options: CopyButtonOptions) -> Self {
        Self {
            options,
            handle: None,
            revert_timer: None,
            bindings: Bindings::new(),
            on_copy: None,
        }
    }

    /// A copy button for a code sample with default labels
    pub fn for_code(code: &str) -> Self {
        Self::new(CopyButtonOptions {
            content: code.to_string(),
            ..Default::default()
        })
    }

    pub fn on_copy(mut self, f: impl FnMut(&CopyOutcome) + 'static) -> Self {
        self.on_copy = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &CopyButtonOptions {
        &self.options
    }

    /// Whether the confirmation state is showing
    pub fn is_confirming(&self) -> bool {
        self.revert_timer.is_some()
    }

    pub fn set_content(&mut self, content: &str) {
        self.options.content = content.to_string();
    }

    /// Copy the content now. Failures end in an error notice and are not
    /// returned as errors.
    pub fn copy(&mut self, host: &mut Host) -> CopyOutcome {
        let outcome = host.copy_text(&self.options.content);
        if outcome.is_success() {
            host.notify(self.options.success_message.clone(), NoticeVariant::Success);
            self.confirm(host);
        } else {
            host.notify(self.options.error_message.clone(), NoticeVariant::Error);
        }
        emit(&mut self.on_copy, &outcome);
        outcome
    }

    fn confirm(&mut self, host: &mut Host) {
        let Some(node) = self.handle else {
            return;
        };
        self.bindings.cancel(&mut host.timers, &mut self.revert_timer);
        host.document.set_text(node, self.options.copied_text.clone());
        host.document.add_class(node, "copied");
        let delay = Duration::from_millis(self.options.feedback_duration);
        self.revert_timer = Some(self.bindings.schedule(&mut host.timers, delay));
    }

    fn revert(&mut self, host: &mut Host) {
        if let Some(node) = self.handle {
            host.document.set_text(node, self.options.text.clone());
            host.document.remove_class(node, "copied");
        }
    }
}

impl FromOptions for CopyButton {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for CopyButton {
    fn name(&self) -> &'static str {
        "copy-button"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.revert_timer = None;
        let doc = &mut host.document;
        let button = doc.element("button", "copy-btn", &self.options.text);
        doc.set_attr(button, "aria-label", "Copy to clipboard");
        self.bindings.listen(doc, button, EventKind::Click);
        self.handle = Some(button);
        Ok(button)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, _delivery: &Delivery) -> Result<ComponentAction> {
        let outcome = self.copy(host);
        debug!("copy button outcome: {:?}", outcome);
        Ok(ComponentAction::Activated)
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        self.bindings.fired(timer);
        if self.revert_timer != Some(timer) {
            return Ok(ComponentAction::None);
        }
        self.revert_timer = None;
        self.revert(host);
        Ok(ComponentAction::Update)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.bindings.owns_timer(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.revert_timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::UiEvent;
    use crate::host::{Clipboard, MemoryClipboard, SelectionFallback};

    #[test]
    fn test_confirmation_reverts_after_feedback_duration() {
        let mut host = Host::new();
        let mut button = CopyButton::for_code("fn main() {}");
        let node = host.mount(&mut button).unwrap();

        host.dispatch(&mut button, UiEvent::click(node)).unwrap();
        assert_eq!(host.document.text(node), "Copied!");
        assert!(host.document.has_class(node, "copied"));
        assert_eq!(host.clipboard().read_text().as_deref(), Some("fn main() {}"));
        assert_eq!(host.notices.messages(), vec!["Code copied to clipboard!"]);

        host.advance(&mut button, Duration::from_millis(1999)).unwrap();
        assert!(host.document.has_class(node, "copied"));
        host.advance(&mut button, Duration::from_millis(1)).unwrap();
        assert_eq!(host.document.text(node), "Copy");
        assert!(!host.document.has_class(node, "copied"));
    }

    #[test]
    fn test_second_copy_restarts_feedback() {
        let mut host = Host::new();
        let mut button = CopyButton::for_code("x");
        let node = host.mount(&mut button).unwrap();
        host.dispatch(&mut button, UiEvent::click(node)).unwrap();
        host.advance(&mut button, Duration::from_millis(1500)).unwrap();
        host.dispatch(&mut button, UiEvent::click(node)).unwrap();
        host.advance(&mut button, Duration::from_millis(1500)).unwrap();
        assert!(button.is_confirming());
        host.advance(&mut button, Duration::from_millis(500)).unwrap();
        assert!(!button.is_confirming());
    }

    #[test]
    fn test_fallback_still_confirms() {
        let mut host = Host::new().with_clipboard(Box::new(MemoryClipboard::unavailable()));
        let mut button = CopyButton::for_code("snippet");
        let node = host.mount(&mut button).unwrap();
        host.dispatch(&mut button, UiEvent::click(node)).unwrap();
        assert!(host.document.has_class(node, "copied"));
        assert_eq!(host.fallback_clipboard().read_text().as_deref(), Some("snippet"));
    }

    #[test]
    fn test_total_failure_shows_error_notice() {
        let mut host = Host::new()
            .with_clipboard(Box::new(MemoryClipboard::unavailable()))
            .with_fallback(Box::new(SelectionFallback::disabled()));
        let mut button = CopyButton::for_code("snippet");
        let node = host.mount(&mut button).unwrap();
        host.dispatch(&mut button, UiEvent::click(node)).unwrap();
        assert!(!host.document.has_class(node, "copied"));
        assert_eq!(host.notices.messages(), vec!["Failed to copy code"]);
        assert!(!button.is_confirming());
    }
}
