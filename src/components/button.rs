use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonOptions {
    pub text: String,
    pub variant: String,
    pub size: String,
    pub disabled: bool,
    pub loading: bool,
    pub icon: Option<String>,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            text: "Button".to_string(),
            variant: "primary".to_string(),
            size: "md".to_string(),
            disabled: false,
            loading: false,
            icon: None,
        }
    }
}

pub struct Button {
    options: ButtonOptions,
    handle: Option<NodeId>,
    label: Option<NodeId>,
    bindings: Bindings,
    on_click: Option<Callback<()>>,
}

impl Button {
    pub fn new(options: ButtonOptions) -> Self {
        Self {
            options,
            handle: None,
            label: None,
            bindings: Bindings::new(),
            on_click: None,
        }
    }

    pub fn on_click(mut self, f: impl FnMut(&()) + 'static) -> Self {
        self.on_click = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &ButtonOptions {
        &self.options
    }

    fn class_name(&self) -> String {
        let mut class = format!("btn btn-{} btn-{}", self.options.variant, self.options.size);
        if self.options.loading {
            class.push_str(" loading");
        }
        class
    }

    fn sync(&self, host: &mut Host) {
        let Some(node) = self.handle else {
            return;
        };
        let doc = &mut host.document;
        doc.set_class_name(node, &self.class_name());
        doc.set_flag(node, "disabled", self.options.disabled || self.options.loading);
        if let Some(label) = self.label {
            doc.set_text(label, self.options.text.clone());
        }
    }

    pub fn set_text(&mut self, host: &mut Host, text: &str) {
        self.options.text = text.to_string();
        self.sync(host);
    }

    pub fn set_variant(&mut self, host: &mut Host, variant: &str) {
        self.options.variant = variant.to_string();
        self.sync(host);
    }

    pub fn set_disabled(&mut self, host: &mut Host, disabled: bool) {
        self.options.disabled = disabled;
        self.sync(host);
    }

    pub fn set_loading(&mut self, host: &mut Host, loading: bool) {
        self.options.loading = loading;
        self.sync(host);
    }
}

impl FromOptions for Button {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Button {
    fn name(&self) -> &'static str {
        "button"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;

        let node = doc.create_element("button");
        doc.set_attr(node, "type", "button");
        if let Some(icon) = &self.options.icon {
            let icon = doc.element("span", "btn-icon", icon);
            doc.append_child(node, icon);
        }
        let label = doc.element("span", "btn-text", &self.options.text);
        doc.append_child(node, label);

        self.bindings.listen(doc, node, EventKind::Click);
        self.handle = Some(node);
        self.label = Some(label);
        self.sync(host);
        Ok(node)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, _host: &mut Host, _delivery: &Delivery) -> Result<ComponentAction> {
        if self.options.disabled || self.options.loading {
            return Ok(ComponentAction::None);
        }
        emit(&mut self.on_click, &());
        Ok(ComponentAction::Activated)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.label = None;
    }
}
