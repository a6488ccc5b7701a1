use super::checkbox::ChoiceOption;
use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioOptions {
    pub name: String,
    pub label: String,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
}

/// A single radio button. Clicking an unchecked radio checks it and fires
/// `on_change` with its value; clicking a checked radio does nothing.
pub struct Radio {
    options: RadioOptions,
    handle: Option<NodeId>,
    control: Option<NodeId>,
    bindings: Bindings,
    on_change: Option<Callback<str>>,
}

impl Radio {
    pub fn new(options: RadioOptions) -> Self {
        Self {
            options,
            handle: None,
            control: None,
            bindings: Bindings::new(),
            on_change: None,
        }
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &RadioOptions {
        &self.options
    }

    pub fn is_checked(&self) -> bool {
        self.options.checked
    }

    pub fn value(&self) -> &str {
        &self.options.value
    }

    pub fn control(&self) -> Option<NodeId> {
        self.control
    }

    pub fn set_checked(&mut self, host: &mut Host, checked: bool) {
        self.options.checked = checked;
        if let (Some(wrapper), Some(control)) = (self.handle, self.control) {
            host.document.set_flag(control, "checked", checked);
            host.document.toggle_class(wrapper, "checked", checked);
        }
    }
}

impl FromOptions for Radio {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Radio {
    fn name(&self) -> &'static str {
        "radio"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;
        let wrapper = doc.element("label", "radio", "");
        let control = doc.element("input", "radio-input", "");
        doc.set_attr(control, "type", "radio");
        doc.set_attr(control, "value", self.options.value.clone());
        if !self.options.name.is_empty() {
            doc.set_attr(control, "name", self.options.name.clone());
        }
        doc.set_flag(control, "disabled", self.options.disabled);
        let label = doc.element("span", "radio-label", &self.options.label);
        doc.append_child(wrapper, control);
        doc.append_child(wrapper, label);
        self.bindings.listen(doc, control, EventKind::Click);

        self.handle = Some(wrapper);
        self.control = Some(control);
        let checked = self.options.checked;
        self.set_checked(host, checked);
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, _delivery: &Delivery) -> Result<ComponentAction> {
        if self.options.disabled || self.options.checked {
            return Ok(ComponentAction::None);
        }
        self.set_checked(host, true);
        emit(&mut self.on_change, self.options.value.as_str());
        Ok(ComponentAction::Changed)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.control = None;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioGroupOptions {
    pub name: String,
    pub label: Option<String>,
    pub options: Vec<ChoiceOption>,
    /// Checked value; empty for none
    pub value: String,
    pub inline: bool,
}

/// Radios sharing one name; at most one is checked
pub struct RadioGroup {
    options: RadioGroupOptions,
    children: Vec<Radio>,
    handle: Option<NodeId>,
    on_change: Option<Callback<str>>,
}

impl RadioGroup {
    pub fn new(options: RadioGroupOptions) -> Self {
        let name = if options.name.is_empty() {
            "radio-group".to_string()
        } else {
            options.name.clone()
        };
        let children = options
            .options
            .iter()
            .map(|choice| {
                Radio::new(RadioOptions {
                    name: name.clone(),
                    label: choice.label.clone(),
                    value: choice.value.clone(),
                    checked: options.value == choice.value,
                    disabled: choice.disabled,
                })
            })
            .collect();
        let mut group = Self {
            options,
            children,
            handle: None,
            on_change: None,
        };
        group.options.value = group.aggregate();
        group
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &RadioGroupOptions {
        &self.options
    }

    /// The checked value, empty when none is checked
    pub fn value(&self) -> &str {
        &self.options.value
    }

    pub fn children(&self) -> &[Radio] {
        &self.children
    }

    fn aggregate(&self) -> String {
        self.children
            .iter()
            .find(|r| r.is_checked())
            .map(|r| r.value().to_string())
            .unwrap_or_default()
    }

    /// Check the radio with `value`, silently; unknown values clear the group
    pub fn set_value(&mut self, host: &mut Host, value: &str) {
        for child in &mut self.children {
            let checked = child.value() == value;
            child.set_checked(host, checked);
        }
        self.options.value = self.aggregate();
    }
}

impl FromOptions for RadioGroup {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for RadioGroup {
    fn name(&self) -> &'static str {
        "radio-group"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        if let Some(old) = self.handle.take() {
            for child in &mut self.children {
                child.destroy(host);
            }
            host.document.remove(old);
        }
        let group = host.document.element("div", "radio-group", "");
        host.document.set_attr(group, "role", "radiogroup");
        if self.options.inline {
            host.document.add_class(group, "inline");
        }
        if let Some(label) = &self.options.label {
            let legend = host.document.element("div", "group-label", label);
            host.document.append_child(group, legend);
        }
        for child in &mut self.children {
            let node = child.render(host)?;
            host.document.append_child(group, node);
        }
        self.handle = Some(group);
        Ok(group)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(index) = self
            .children
            .iter()
            .position(|c| c.owns_listener(delivery.listener))
        else {
            return Ok(ComponentAction::None);
        };
        if self.children[index].handle_event(host, delivery)? != ComponentAction::Changed {
            return Ok(ComponentAction::None);
        }
        for (i, child) in self.children.iter_mut().enumerate() {
            if i != index && child.is_checked() {
                child.set_checked(host, false);
            }
        }
        self.options.value = self.aggregate();
        emit(&mut self.on_change, self.options.value.as_str());
        Ok(ComponentAction::Changed)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.children.iter().any(|c| c.owns_listener(id))
    }

    fn destroy(&mut self, host: &mut Host) {
        for child in &mut self.children {
            child.destroy(host);
        }
        if let Some(node) = self.handle.take() {
            host.document.remove(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::UiEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sizes() -> RadioGroupOptions {
        RadioGroupOptions {
            name: "size".to_string(),
            options: vec![
                ChoiceOption::new("s", "Small"),
                ChoiceOption::new("m", "Medium"),
                ChoiceOption::new("l", "Large"),
            ],
            value: "m".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_checked_value() {
        let mut host = Host::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut group =
            RadioGroup::new(sizes()).on_change(move |v: &str| sink.borrow_mut().push(v.to_string()));
        host.mount(&mut group).unwrap();
        assert_eq!(group.value(), "m");

        let large = group.children()[2].control().unwrap();
        host.dispatch(&mut group, UiEvent::click(large)).unwrap();
        assert_eq!(group.value(), "l");
        assert_eq!(group.children().iter().filter(|r| r.is_checked()).count(), 1);

        // re-clicking the checked radio is not a change
        host.dispatch(&mut group, UiEvent::click(large)).unwrap();
        assert_eq!(*seen.borrow(), vec!["l"]);
    }

    #[test]
    fn test_set_value_is_silent() {
        let mut host = Host::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        let mut group = RadioGroup::new(sizes()).on_change(move |_: &str| *sink.borrow_mut() += 1);
        group.set_value(&mut host, "s");
        host.mount(&mut group).unwrap();
        let small = group.children()[0].control().unwrap();
        assert!(host.document.has_attr(small, "checked"));
        group.set_value(&mut host, "unknown");
        assert_eq!(group.value(), "");
        assert_eq!(*seen.borrow(), 0);
    }
}
