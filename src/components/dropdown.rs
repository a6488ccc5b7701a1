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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownItem {
    pub label: String,
    pub value: String,
    pub disabled: bool,
}

impl DropdownItem {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropdownOptions {
    pub label: String,
    pub items: Vec<DropdownItem>,
    pub close_on_select: bool,
    pub close_on_escape: bool,
}

impl Default for DropdownOptions {
    fn default() -> Self {
        Self {
            label: "Menu".to_string(),
            items: Vec::new(),
            close_on_select: true,
            close_on_escape: true,
        }
    }
}

pub struct Dropdown {
    options: DropdownOptions,
    handle: Option<NodeId>,
    toggle: Option<NodeId>,
    menu: Option<NodeId>,
    bindings: Bindings,
    transition: Transition,
    on_select: Option<Callback<str>>,
    on_close: Option<Callback<()>>,
}

impl Dropdown {
    pub fn new(options: DropdownOptions) -> Self {
        Self {
            options,
            handle: None,
            toggle: None,
            menu: None,
            bindings: Bindings::new(),
            transition: Transition::default(),
            on_select: None,
            on_close: None,
        }
    }

    pub fn on_select(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_select = Some(Callback::new(f));
        self
    }

    pub fn on_close(mut self, f: impl FnMut(&()) + 'static) -> Self {
        self.on_close = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &DropdownOptions {
        &self.options
    }

    pub fn state(&self) -> OverlayState {
        self.transition.state()
    }

    pub fn is_open(&self) -> bool {
        self.transition.is_open()
    }

    pub fn set_label(&mut self, host: &mut Host, label: &str) {
        self.options.label = label.to_string();
        if let Some(toggle) = self.toggle {
            host.document.set_text(toggle, label);
        }
    }

    pub fn open(&mut self, host: &mut Host) {
        let (Some(toggle), Some(menu)) = (self.toggle, self.menu) else {
            return;
        };
        if self.transition.open(&mut self.bindings, &mut host.timers) {
            host.document.set_style(menu, "display", "block");
            host.document.set_attr(toggle, "aria-expanded", "true");
        }
    }

    pub fn close(&mut self, host: &mut Host) {
        let (Some(toggle), Some(menu)) = (self.toggle, self.menu) else {
            return;
        };
        if self.transition.close(&mut self.bindings, &mut host.timers) {
            host.document.remove_class(menu, "active");
            host.document.set_attr(toggle, "aria-expanded", "false");
        }
    }

    pub fn toggle(&mut self, host: &mut Host) {
        if self.transition.is_open() {
            self.close(host);
        } else {
            self.open(host);
        }
    }
}

impl FromOptions for Dropdown {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Dropdown {
    fn name(&self) -> &'static str {
        "dropdown"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.transition.reset();

        let root = host.root();
        let doc = &mut host.document;
        let wrapper = doc.element("div", "dropdown", "");
        let toggle = doc.element("button", "dropdown-toggle", &self.options.label);
        doc.set_attr(toggle, "aria-haspopup", "true");
        doc.set_attr(toggle, "aria-expanded", "false");
        let menu = doc.element("ul", "dropdown-menu", "");
        doc.set_style(menu, "display", "none");
        for item in &self.options.items {
            let li = doc.element("li", "dropdown-item", &item.label);
            doc.set_attr(li, "data-value", item.value.clone());
            if item.disabled {
                doc.add_class(li, "disabled");
            }
            doc.append_child(menu, li);
            self.bindings.listen(doc, li, EventKind::Click);
        }
        doc.append_child(wrapper, toggle);
        doc.append_child(wrapper, menu);

        self.bindings.listen(doc, toggle, EventKind::Click);
        // outside clicks and Escape are observed at the page level
        self.bindings.listen(doc, root, EventKind::Click);
        self.bindings.listen(doc, root, EventKind::KeyDown);

        self.handle = Some(wrapper);
        self.toggle = Some(toggle);
        self.menu = Some(menu);
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(wrapper) = self.handle else {
            return Ok(ComponentAction::None);
        };
        let root = host.root();
        let current = delivery.current_target;

        match delivery.event.kind {
            EventKind::KeyDown => {
                if self.options.close_on_escape
                    && delivery.event.is_key(Key::Escape)
                    && self.transition.is_open()
                {
                    self.close(host);
                    return Ok(ComponentAction::Update);
                }
                Ok(ComponentAction::None)
            }
            EventKind::Click if current == root => {
                let outside = !host.document.is_descendant(delivery.target(), wrapper);
                if outside && self.transition.is_open() {
                    self.close(host);
                    return Ok(ComponentAction::Update);
                }
                Ok(ComponentAction::None)
            }
            EventKind::Click if Some(current) == self.toggle => {
                self.toggle(host);
                Ok(ComponentAction::Update)
            }
            EventKind::Click => {
                if host.document.has_class(current, "disabled") {
                    return Ok(ComponentAction::None);
                }
                let Some(value) = host.document.attr(current, "data-value").map(str::to_string)
                else {
                    return Ok(ComponentAction::None);
                };
                emit(&mut self.on_select, value.as_str());
                if self.options.close_on_select {
                    self.close(host);
                }
                Ok(ComponentAction::Changed)
            }
            _ => Ok(ComponentAction::None),
        }
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        self.bindings.fired(timer);
        let Some(menu) = self.menu else {
            return Ok(ComponentAction::None);
        };
        match self.transition.on_timer(timer) {
            Some(OverlayState::Open) => {
                host.document.add_class(menu, "active");
                Ok(ComponentAction::Update)
            }
            Some(OverlayState::Closed) => {
                host.document.set_style(menu, "display", "none");
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
        self.bindings.teardown(host, self.handle.take());
        self.transition.reset();
        self.toggle = None;
        self.menu = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::overlay::{ARM_DELAY, CLOSE_DELAY};
    use crate::dom::UiEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn menu() -> DropdownOptions {
        DropdownOptions {
            label: "Actions".to_string(),
            items: vec![
                DropdownItem::new("Edit", "edit"),
                DropdownItem::new("Delete", "delete"),
                DropdownItem {
                    disabled: true,
                    ..DropdownItem::new("Archive", "archive")
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_open_and_close() {
        let mut host = Host::new();
        let mut dropdown = Dropdown::new(menu());
        let node = host.mount(&mut dropdown).unwrap();
        let toggle = host.document.first_by_class(node, "dropdown-toggle").unwrap();
        let list = host.document.first_by_class(node, "dropdown-menu").unwrap();

        host.dispatch(&mut dropdown, UiEvent::click(toggle)).unwrap();
        assert!(dropdown.is_open());
        assert_eq!(host.document.style(list, "display"), Some("block"));
        host.advance(&mut dropdown, ARM_DELAY).unwrap();
        assert!(host.document.has_class(list, "active"));

        host.dispatch(&mut dropdown, UiEvent::click(toggle)).unwrap();
        assert_eq!(dropdown.state(), OverlayState::Closing);
        host.advance(&mut dropdown, CLOSE_DELAY).unwrap();
        assert_eq!(host.document.style(list, "display"), Some("none"));
    }

    #[test]
    fn test_select_item_closes() {
        let mut host = Host::new();
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = selected.clone();
        let mut dropdown =
            Dropdown::new(menu()).on_select(move |v: &str| sink.borrow_mut().push(v.to_string()));
        let node = host.mount(&mut dropdown).unwrap();
        dropdown.open(&mut host);

        let archive = host.document.find_by_attr(node, "data-value", "archive").unwrap();
        host.dispatch(&mut dropdown, UiEvent::click(archive)).unwrap();
        assert!(dropdown.is_open());

        let delete = host.document.find_by_attr(node, "data-value", "delete").unwrap();
        let action = host.dispatch(&mut dropdown, UiEvent::click(delete)).unwrap();
        assert_eq!(action, ComponentAction::Changed);
        assert_eq!(*selected.borrow(), vec!["delete"]);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_outside_click_and_escape() {
        let mut host = Host::new();
        let mut dropdown = Dropdown::new(menu());
        host.mount(&mut dropdown).unwrap();
        let elsewhere = host.document.element("p", "", "elsewhere");
        let root = host.root();
        host.document.append_child(root, elsewhere);

        dropdown.open(&mut host);
        host.dispatch(&mut dropdown, UiEvent::click(elsewhere)).unwrap();
        assert!(!dropdown.is_open());

        dropdown.open(&mut host);
        host.dispatch(&mut dropdown, UiEvent::key(root, Key::Escape)).unwrap();
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_set_label_before_render() {
        let mut host = Host::new();
        let mut dropdown = Dropdown::new(DropdownOptions::default());
        dropdown.set_label(&mut host, "Options");
        let node = host.mount(&mut dropdown).unwrap();
        let toggle = host.document.first_by_class(node, "dropdown-toggle").unwrap();
        assert_eq!(host.document.text(toggle), "Options");
    }
}
