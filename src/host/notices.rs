//! Notification stacking area.
//!
//! Short-lived notices appear in a container keyed by screen position and
//! auto-close after a configurable duration. New notices are appended to the
//! container, so several can be visible at once.

use crate::dom::{Document, EventKind, ListenerId, NodeId};
use crate::styles::theme;
use crate::timers::{TimerId, Timers};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Delay between starting to hide a notice and removing it
pub const LEAVE_DURATION: Duration = Duration::from_millis(300);

/// Notice variant for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl NoticeVariant {
    /// Get the icon for this variant
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeVariant::Success => "\u{2714}", // ✔
            NoticeVariant::Info => "\u{2139}",    // ℹ
            NoticeVariant::Warning => "\u{26A0}", // ⚠
            NoticeVariant::Error => "\u{2718}",   // ✘
        }
    }

    /// CSS-style class name used in markup
    pub fn class(&self) -> &'static str {
        match self {
            NoticeVariant::Success => "success",
            NoticeVariant::Info => "info",
            NoticeVariant::Warning => "warning",
            NoticeVariant::Error => "error",
        }
    }

    /// Get the border color for this variant
    pub fn color(&self) -> ratatui::style::Color {
        let t = theme();
        match self {
            NoticeVariant::Success => t.success,
            NoticeVariant::Info => t.primary,
            NoticeVariant::Warning => t.warning,
            NoticeVariant::Error => t.error,
        }
    }
}

/// Screen corner a stack lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackPosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl StackPosition {
    pub fn class(&self) -> &'static str {
        match self {
            StackPosition::TopRight => "top-right",
            StackPosition::TopLeft => "top-left",
            StackPosition::BottomRight => "bottom-right",
            StackPosition::BottomLeft => "bottom-left",
        }
    }
}

/// A notice currently shown in a stack
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub variant: NoticeVariant,
    pub position: StackPosition,
    pub node: NodeId,
    timer: Option<TimerId>,
    listener: Option<ListenerId>,
    leaving: bool,
}

impl Notice {
    /// Whether the notice is animating out
    pub fn is_leaving(&self) -> bool {
        self.leaving
    }
}

/// Owner of all stack containers and the notices inside them
#[derive(Debug)]
pub struct NoticeStack {
    containers: IndexMap<StackPosition, NodeId>,
    notices: Vec<Notice>,
    default_duration: Duration,
}

impl NoticeStack {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            containers: IndexMap::new(),
            notices: Vec::new(),
            default_duration,
        }
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    pub fn set_default_duration(&mut self, duration: Duration) {
        self.default_duration = duration;
    }

    /// Container for `position`, created on first use and re-created if it
    /// was removed from the page
    pub fn container(&mut self, doc: &mut Document, position: StackPosition) -> NodeId {
        if let Some(node) = self.containers.get(&position) {
            if doc.is_attached(*node) {
                return *node;
            }
        }
        let node = doc.element("div", &format!("notification-stack {}", position.class()), "");
        doc.append_child(doc.root(), node);
        self.containers.insert(position, node);
        node
    }

    /// Show a notice in the default position for the default duration
    pub fn push(
        &mut self,
        doc: &mut Document,
        timers: &mut Timers,
        message: impl Into<String>,
        variant: NoticeVariant,
    ) -> NodeId {
        let duration = self.default_duration;
        self.push_at(doc, timers, message, variant, StackPosition::TopRight, duration)
    }

    /// Show a notice, appending it below any already visible in the stack
    pub fn push_at(
        &mut self,
        doc: &mut Document,
        timers: &mut Timers,
        message: impl Into<String>,
        variant: NoticeVariant,
        position: StackPosition,
        duration: Duration,
    ) -> NodeId {
        let message = message.into();
        let container = self.container(doc, position);

        let node = doc.element("div", &format!("notification {}", variant.class()), "");
        let icon = doc.element("span", "notification-icon", variant.icon());
        let text = doc.element("span", "notification-message", &message);
        doc.append_child(node, icon);
        doc.append_child(node, text);
        doc.append_child(container, node);

        let listener = doc.listen(node, EventKind::Click);
        let timer = timers.set_timeout(duration);
        debug!("notice shown: {}", message);

        self.notices.push(Notice {
            message,
            variant,
            position,
            node,
            timer: Some(timer),
            listener,
            leaving: false,
        });
        node
    }

    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.notices.iter().any(|n| n.timer == Some(id))
    }

    pub fn owns_listener(&self, id: ListenerId) -> bool {
        self.notices.iter().any(|n| n.listener == Some(id))
    }

    /// Advance a notice: visible → leaving → removed
    pub fn on_timer(&mut self, doc: &mut Document, timers: &mut Timers, id: TimerId) {
        let Some(index) = self.notices.iter().position(|n| n.timer == Some(id)) else {
            return;
        };
        if self.notices[index].leaving {
            let notice = self.notices.remove(index);
            doc.remove(notice.node);
        } else {
            self.start_leaving(doc, timers, index);
        }
    }

    /// Clicking a notice closes it early
    pub fn on_click(&mut self, doc: &mut Document, timers: &mut Timers, listener: ListenerId) {
        if let Some(index) = self.notices.iter().position(|n| n.listener == Some(listener)) {
            if !self.notices[index].leaving {
                if let Some(timer) = self.notices[index].timer.take() {
                    timers.clear(timer);
                }
                self.start_leaving(doc, timers, index);
            }
        }
    }

    fn start_leaving(&mut self, doc: &mut Document, timers: &mut Timers, index: usize) {
        let notice = &mut self.notices[index];
        notice.leaving = true;
        doc.add_class(notice.node, "leaving");
        notice.timer = Some(timers.set_timeout(LEAVE_DURATION));
    }

    /// Notices still on the page, oldest first
    pub fn active(&self) -> &[Notice] {
        &self.notices
    }

    pub fn messages(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.message.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Remove every notice immediately
    pub fn clear(&mut self, doc: &mut Document, timers: &mut Timers) {
        for notice in self.notices.drain(..) {
            if let Some(timer) = notice.timer {
                timers.clear(timer);
            }
            doc.remove(notice.node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(stack: &mut NoticeStack, doc: &mut Document, timers: &mut Timers, until: Duration) {
        while let Some(id) = timers.pop_due(until) {
            stack.on_timer(doc, timers, id);
        }
        timers.settle(until);
    }

    #[test]
    fn test_notices_append_instead_of_replace() {
        let mut doc = Document::new();
        let mut timers = Timers::new();
        let mut stack = NoticeStack::new(Duration::from_millis(3000));

        stack.push(&mut doc, &mut timers, "first", NoticeVariant::Info);
        stack.push(&mut doc, &mut timers, "second", NoticeVariant::Success);

        let container = stack.container(&mut doc, StackPosition::TopRight);
        assert_eq!(doc.children(container).len(), 2);
        assert_eq!(stack.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_stacks_are_keyed_by_position() {
        let mut doc = Document::new();
        let mut timers = Timers::new();
        let mut stack = NoticeStack::new(Duration::from_millis(3000));
        let a = stack.container(&mut doc, StackPosition::TopRight);
        let b = stack.container(&mut doc, StackPosition::BottomLeft);
        assert_ne!(a, b);
        assert_eq!(stack.container(&mut doc, StackPosition::TopRight), a);
        stack.push_at(
            &mut doc,
            &mut timers,
            "saved",
            NoticeVariant::Success,
            StackPosition::BottomLeft,
            Duration::from_secs(1),
        );
        assert_eq!(doc.children(b).len(), 1);
        assert!(doc.children(a).is_empty());
    }

    #[test]
    fn test_auto_close_after_duration() {
        let mut doc = Document::new();
        let mut timers = Timers::new();
        let mut stack = NoticeStack::new(Duration::from_millis(3000));
        let node = stack.push(&mut doc, &mut timers, "copied", NoticeVariant::Success);

        drain(&mut stack, &mut doc, &mut timers, Duration::from_millis(2999));
        assert_eq!(stack.len(), 1);

        drain(&mut stack, &mut doc, &mut timers, Duration::from_millis(3000));
        assert!(doc.has_class(node, "leaving"));
        assert!(stack.active()[0].is_leaving());

        drain(&mut stack, &mut doc, &mut timers, Duration::from_millis(3300));
        assert!(stack.is_empty());
        assert!(!doc.contains(node));
    }

    #[test]
    fn test_click_closes_early() {
        let mut doc = Document::new();
        let mut timers = Timers::new();
        let mut stack = NoticeStack::new(Duration::from_millis(3000));
        let node = stack.push(&mut doc, &mut timers, "hello", NoticeVariant::Info);
        let listener = doc.dispatch(&crate::dom::UiEvent::click(node))[0].listener;
        assert!(stack.owns_listener(listener));

        stack.on_click(&mut doc, &mut timers, listener);
        drain(&mut stack, &mut doc, &mut timers, LEAVE_DURATION);
        assert!(stack.is_empty());
        assert_eq!(timers.pending_count(), 0);
    }
}
