use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardAction {
    pub text: String,
    pub variant: String,
}

impl Default for CardAction {
    fn default() -> Self {
        Self {
            text: String::new(),
            variant: "primary".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardOptions {
    pub title: String,
    pub content: String,
    pub actions: Vec<CardAction>,
}

/// Titled content box with an optional row of action buttons.
/// `on_action` receives the index of the clicked action.
pub struct Card {
    options: CardOptions,
    handle: Option<NodeId>,
    title: Option<NodeId>,
    body: Option<NodeId>,
    bindings: Bindings,
    on_action: Option<Callback<usize>>,
}

impl Card {
    pub fn new(options: CardOptions) -> Self {
        Self {
            options,
            handle: None,
            title: None,
            body: None,
            bindings: Bindings::new(),
            on_action: None,
        }
    }

    pub fn on_action(mut self, f: impl FnMut(&usize) + 'static) -> Self {
        self.on_action = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    pub fn set_title(&mut self, host: &mut Host, title: &str) {
        self.options.title = title.to_string();
        if let Some(node) = self.title {
            host.document.set_text(node, title);
            if title.is_empty() {
                host.document.set_style(node, "display", "none");
            } else {
                host.document.remove_style(node, "display");
            }
        }
    }

    pub fn set_content(&mut self, host: &mut Host, content: &str) {
        self.options.content = content.to_string();
        if let Some(node) = self.body {
            host.document.set_text(node, content);
        }
    }
}

impl FromOptions for Card {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Card {
    fn name(&self) -> &'static str {
        "card"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;

        let card = doc.element("div", "demo-card", "");
        let title = doc.element("h4", "card-title", "");
        let body = doc.element("p", "card-content", "");
        doc.append_child(card, title);
        doc.append_child(card, body);

        if !self.options.actions.is_empty() {
            let row = doc.element("div", "card-actions", "");
            for (index, action) in self.options.actions.iter().enumerate() {
                let button = doc.element(
                    "button",
                    &format!("btn btn-{}", action.variant),
                    &action.text,
                );
                doc.set_attr(button, "data-action", index.to_string());
                doc.append_child(row, button);
                self.bindings.listen(doc, button, EventKind::Click);
            }
            doc.append_child(card, row);
        }

        self.handle = Some(card);
        self.title = Some(title);
        self.body = Some(body);

        let (title_text, content) = (self.options.title.clone(), self.options.content.clone());
        self.set_title(host, &title_text);
        self.set_content(host, &content);
        Ok(card)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let index = host
            .document
            .attr(delivery.current_target, "data-action")
            .and_then(|v| v.parse::<usize>().ok());
        match index {
            Some(index) => {
                emit(&mut self.on_action, &index);
                Ok(ComponentAction::Activated)
            }
            None => Ok(ComponentAction::None),
        }
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.title = None;
        self.body = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::UiEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_setters_before_render() {
        let mut host = Host::new();
        let mut card = Card::new(CardOptions::default());
        card.set_title(&mut host, "Release notes");
        card.set_content(&mut host, "Version 2 is out");

        let node = host.mount(&mut card).unwrap();
        let title = host.document.first_by_class(node, "card-title").unwrap();
        assert_eq!(host.document.text(title), "Release notes");
        assert_eq!(host.document.style(title, "display"), None);
        assert!(host.document.text_content(node).contains("Version 2 is out"));
    }

    #[test]
    fn test_empty_title_is_hidden() {
        let mut host = Host::new();
        let mut card = Card::new(CardOptions::default());
        let node = host.mount(&mut card).unwrap();
        let title = host.document.first_by_class(node, "card-title").unwrap();
        assert_eq!(host.document.style(title, "display"), Some("none"));
    }

    #[test]
    fn test_action_click_reports_index() {
        let mut host = Host::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut card = Card::new(CardOptions {
            title: "Plan".to_string(),
            content: "Pick one".to_string(),
            actions: vec![
                CardAction {
                    text: "Cancel".to_string(),
                    variant: "secondary".to_string(),
                },
                CardAction {
                    text: "Buy".to_string(),
                    ..Default::default()
                },
            ],
        })
        .on_action(move |i| sink.borrow_mut().push(*i));
        let node = host.mount(&mut card).unwrap();

        let buy = host.document.find_by_attr(node, "data-action", "1").unwrap();
        assert!(host.document.has_class(buy, "btn-primary"));
        host.dispatch(&mut card, UiEvent::click(buy)).unwrap();
        assert_eq!(*seen.borrow(), vec![1]);
    }
}
