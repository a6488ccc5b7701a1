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
pub struct CheckboxOptions {
    pub name: String,
    pub label: String,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
}

pub struct Checkbox {
    options: CheckboxOptions,
    handle: Option<NodeId>,
    control: Option<NodeId>,
    bindings: Bindings,
    on_change: Option<Callback<bool>>,
}

impl Checkbox {
    pub fn new(options: CheckboxOptions) -> Self {
        Self {
            options,
            handle: None,
            control: None,
            bindings: Bindings::new(),
            on_change: None,
        }
    }

    pub fn on_change(mut self, f: impl FnMut(&bool) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &CheckboxOptions {
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

    /// Check or uncheck without notifying `on_change`
    pub fn set_checked(&mut self, host: &mut Host, checked: bool) {
        self.options.checked = checked;
        if let (Some(wrapper), Some(control)) = (self.handle, self.control) {
            host.document.set_flag(control, "checked", checked);
            host.document.toggle_class(wrapper, "checked", checked);
        }
    }

    pub fn set_disabled(&mut self, host: &mut Host, disabled: bool) {
        self.options.disabled = disabled;
        if let (Some(wrapper), Some(control)) = (self.handle, self.control) {
            host.document.set_flag(control, "disabled", disabled);
            host.document.toggle_class(wrapper, "disabled", disabled);
        }
    }
}

impl FromOptions for Checkbox {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Checkbox {
    fn name(&self) -> &'static str {
        "checkbox"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;
        let wrapper = doc.element("label", "checkbox", "");
        let control = doc.element("input", "checkbox-input", "");
        doc.set_attr(control, "type", "checkbox");
        doc.set_attr(control, "value", self.options.value.clone());
        if !self.options.name.is_empty() {
            doc.set_attr(control, "name", self.options.name.clone());
        }
        let label = doc.element("span", "checkbox-label", &self.options.label);
        doc.append_child(wrapper, control);
        doc.append_child(wrapper, label);
        self.bindings.listen(doc, control, EventKind::Click);

        self.handle = Some(wrapper);
        self.control = Some(control);
        let (checked, disabled) = (self.options.checked, self.options.disabled);
        self.set_checked(host, checked);
        self.set_disabled(host, disabled);
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, _delivery: &Delivery) -> Result<ComponentAction> {
        if self.options.disabled {
            return Ok(ComponentAction::None);
        }
        let checked = !self.options.checked;
        self.set_checked(host, checked);
        emit(&mut self.on_change, &checked);
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
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxGroupOptions {
    pub name: String,
    pub label: Option<String>,
    pub options: Vec<ChoiceOption>,
    /// Checked values, in option order
    pub value: Vec<String>,
    pub inline: bool,
}

/// A set of checkboxes reporting the checked values as one aggregate.
///
/// `on_change` fires once per user toggle with the checked values in
/// option order.
pub struct CheckboxGroup {
    options: CheckboxGroupOptions,
    children: Vec<Checkbox>,
    handle: Option<NodeId>,
    on_change: Option<Callback<[String]>>,
}

impl CheckboxGroup {
    pub fn new(options: CheckboxGroupOptions) -> Self {
        let children = options
            .options
            .iter()
            .map(|choice| {
                Checkbox::new(CheckboxOptions {
                    name: options.name.clone(),
                    label: choice.label.clone(),
                    value: choice.value.clone(),
                    checked: options.value.contains(&choice.value),
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

    pub fn on_change(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &CheckboxGroupOptions {
        &self.options
    }

    /// Checked values in option order
    pub fn values(&self) -> &[String] {
        &self.options.value
    }

    pub fn children(&self) -> &[Checkbox] {
        &self.children
    }

    fn aggregate(&self) -> Vec<String> {
        self.children
            .iter()
            .filter(|c| c.is_checked())
            .map(|c| c.value().to_string())
            .collect()
    }

    /// Check exactly the given values, silently
    pub fn set_values(&mut self, host: &mut Host, values: &[&str]) {
        for child in &mut self.children {
            let checked = values.contains(&child.value());
            child.set_checked(host, checked);
        }
        self.options.value = self.aggregate();
    }
}

impl FromOptions for CheckboxGroup {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for CheckboxGroup {
    fn name(&self) -> &'static str {
        "checkbox-group"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        if let Some(old) = self.handle.take() {
            for child in &mut self.children {
                child.destroy(host);
            }
            host.document.remove(old);
        }
        let group = host.document.element("div", "checkbox-group", "");
        host.document.set_attr(group, "role", "group");
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
        let Some(child) = self
            .children
            .iter_mut()
            .find(|c| c.owns_listener(delivery.listener))
        else {
            return Ok(ComponentAction::None);
        };
        if child.handle_event(host, delivery)? != ComponentAction::Changed {
            return Ok(ComponentAction::None);
        }
        self.options.value = self.aggregate();
        emit(&mut self.on_change, self.options.value.as_slice());
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
