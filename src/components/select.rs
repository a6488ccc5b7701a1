use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
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
pub struct SelectOptions {
    pub name: String,
    pub options: Vec<SelectOption>,
    /// Selected value; empty for none
    pub value: String,
    pub placeholder: Option<String>,
    pub disabled: bool,
}

pub struct Select {
    options: SelectOptions,
    handle: Option<NodeId>,
    control: Option<NodeId>,
    bindings: Bindings,
    on_change: Option<Callback<str>>,
}

impl Select {
    pub fn new(options: SelectOptions) -> Self {
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

    pub fn options(&self) -> &SelectOptions {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.options.value
    }

    pub fn control(&self) -> Option<NodeId> {
        self.control
    }

    fn accepts(&self, value: &str) -> bool {
        self.options
            .options
            .iter()
            .any(|o| o.value == value && !o.disabled)
    }

    /// Select a configured value without notifying `on_change`.
    /// Unknown values are rejected.
    pub fn set_value(&mut self, host: &mut Host, value: &str) -> bool {
        if !self.accepts(value) {
            warn!("Select has no option '{}'", value);
            return false;
        }
        self.options.value = value.to_string();
        self.sync_selection(host);
        true
    }

    /// Replace the option list, dropping a selection that no longer exists
    pub fn set_options(&mut self, host: &mut Host, options: Vec<SelectOption>) {
        self.options.options = options;
        if !self.options.value.is_empty() && !self.accepts(&self.options.value) {
            self.options.value.clear();
        }
        if let Some(control) = self.control {
            host.document.clear_children(control);
            self.build_options(host, control);
        }
    }

    fn build_options(&self, host: &mut Host, control: NodeId) {
        let doc = &mut host.document;
        if let Some(placeholder) = &self.options.placeholder {
            let option = doc.element("option", "", placeholder);
            doc.set_attr(option, "value", "");
            doc.set_flag(option, "disabled", true);
            doc.append_child(control, option);
        }
        for item in &self.options.options {
            let option = doc.element("option", "", &item.label);
            doc.set_attr(option, "value", item.value.clone());
            doc.set_flag(option, "disabled", item.disabled);
            doc.append_child(control, option);
        }
        self.sync_selection(host);
    }

    fn sync_selection(&self, host: &mut Host) {
        let Some(control) = self.control else {
            return;
        };
        let doc = &mut host.document;
        doc.set_attr(control, "value", self.options.value.clone());
        for option in doc.children(control).to_vec() {
            let selected = doc.attr(option, "value") == Some(self.options.value.as_str());
            doc.set_flag(option, "selected", selected);
        }
    }
}

impl FromOptions for Select {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Select {
    fn name(&self) -> &'static str {
        "select"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;
        let wrapper = doc.element("div", "select-wrapper", "");
        let control = doc.element("select", "form-select", "");
        if !self.options.name.is_empty() {
            doc.set_attr(control, "name", self.options.name.clone());
        }
        doc.set_flag(control, "disabled", self.options.disabled);
        doc.append_child(wrapper, control);
        self.bindings.listen(doc, control, EventKind::Change);

        self.handle = Some(wrapper);
        self.control = Some(control);
        self.build_options(host, control);
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(value) = delivery.event.value.clone() else {
            return Ok(ComponentAction::None);
        };
        if self.options.disabled || !self.accepts(&value) {
            // restore the control to the committed selection
            self.sync_selection(host);
            return Ok(ComponentAction::None);
        }
        self.options.value = value;
        self.sync_selection(host);
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
