use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputOptions {
    /// `text`, `email`, `password`, `search` or `textarea`
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub label: Option<String>,
    pub placeholder: String,
    pub value: String,
    pub disabled: bool,
    pub required: bool,
    pub min_length: Option<usize>,
    /// Message used when a required field is empty
    pub required_message: Option<String>,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            kind: "text".to_string(),
            name: String::new(),
            label: None,
            placeholder: String::new(),
            value: String::new(),
            disabled: false,
            required: false,
            min_length: None,
            required_message: None,
        }
    }
}

impl InputOptions {
    pub fn new(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Check a value against this field's rules; the error message on failure
    pub fn check(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            if !self.required {
                return None;
            }
            let message = self.required_message.clone().unwrap_or_else(|| {
                match self.kind.as_str() {
                    "email" => "Email is required",
                    "textarea" => "Message is required",
                    _ => "This field is required",
                }
                .to_string()
            });
            return Some(message);
        }
        if self.kind == "email" && !is_valid_email(value) {
            return Some("Please enter a valid email".to_string());
        }
        if let Some(min) = self.min_length {
            if value.chars().count() < min {
                return Some(format!("Must be at least {} characters", min));
            }
        }
        None
    }
}

/// Text field with field-level validation.
///
/// Blur validates, typing clears any visible error. `on_change` fires
/// with the new value on every user input.
pub struct Input {
    options: InputOptions,
    handle: Option<NodeId>,
    control: Option<NodeId>,
    error_node: Option<NodeId>,
    error: Option<String>,
    bindings: Bindings,
    on_change: Option<Callback<str>>,
}

impl Input {
    pub fn new(options: InputOptions) -> Self {
        Self {
            options,
            handle: None,
            control: None,
            error_node: None,
            error: None,
            bindings: Bindings::new(),
            on_change: None,
        }
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.options.value
    }

    /// The control element receiving input and blur events
    pub fn control(&self) -> Option<NodeId> {
        self.control
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set the value without notifying `on_change`
    pub fn set_value(&mut self, host: &mut Host, value: &str) {
        self.options.value = value.to_string();
        if let Some(control) = self.control {
            host.document.set_attr(control, "value", value);
        }
    }

    pub fn set_disabled(&mut self, host: &mut Host, disabled: bool) {
        self.options.disabled = disabled;
        if let Some(control) = self.control {
            host.document.set_flag(control, "disabled", disabled);
        }
    }

    /// Validate the current value, showing or clearing the field error
    pub fn validate(&mut self, host: &mut Host) -> bool {
        match self.options.check(&self.options.value) {
            Some(message) => {
                self.show_error(host, message);
                false
            }
            None => {
                self.clear_error(host);
                true
            }
        }
    }

    pub fn show_error(&mut self, host: &mut Host, message: String) {
        self.clear_error(host);
        if let (Some(wrapper), Some(control)) = (self.handle, self.control) {
            let doc = &mut host.document;
            doc.add_class(control, "invalid");
            doc.set_attr(control, "aria-invalid", "true");
            let node = doc.element("div", "field-error", &message);
            doc.append_child(wrapper, node);
            self.error_node = Some(node);
        }
        self.error = Some(message);
    }

    pub fn clear_error(&mut self, host: &mut Host) {
        self.error = None;
        if let Some(control) = self.control {
            host.document.remove_class(control, "invalid");
            host.document.remove_attr(control, "aria-invalid");
        }
        if let Some(node) = self.error_node.take() {
            host.document.remove(node);
        }
    }
}

impl FromOptions for Input {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Input {
    fn name(&self) -> &'static str {
        "input"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.error_node = None;

        let doc = &mut host.document;
        let wrapper = doc.element("div", "form-group", "");
        if let Some(label) = &self.options.label {
            let label = doc.element("label", "form-label", label);
            if !self.options.name.is_empty() {
                doc.set_attr(label, "for", self.options.name.clone());
            }
            doc.append_child(wrapper, label);
        }

        let control = if self.options.kind == "textarea" {
            doc.element("textarea", "form-input", "")
        } else {
            let control = doc.element("input", "form-input", "");
            doc.set_attr(control, "type", self.options.kind.clone());
            control
        };
        if !self.options.name.is_empty() {
            doc.set_attr(control, "name", self.options.name.clone());
            doc.set_attr(control, "id", self.options.name.clone());
        }
        if !self.options.placeholder.is_empty() {
            doc.set_attr(control, "placeholder", self.options.placeholder.clone());
        }
        doc.set_attr(control, "value", self.options.value.clone());
        doc.set_flag(control, "disabled", self.options.disabled);
        doc.set_flag(control, "required", self.options.required);
        doc.append_child(wrapper, control);

        self.bindings.listen(doc, control, EventKind::Input);
        self.bindings.listen(doc, control, EventKind::Blur);

        self.handle = Some(wrapper);
        self.control = Some(control);
        if let Some(message) = self.error.clone() {
            self.show_error(host, message);
        }
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        if self.options.disabled {
            return Ok(ComponentAction::None);
        }
        match delivery.event.kind {
            EventKind::Input => {
                let value = delivery.event.value.clone().unwrap_or_default();
                self.options.value = value;
                self.clear_error(host);
                emit(&mut self.on_change, self.options.value.as_str());
                Ok(ComponentAction::Changed)
            }
            EventKind::Blur => {
                self.validate(host);
                Ok(ComponentAction::Update)
            }
            _ => Ok(ComponentAction::None),
        }
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.control = None;
        self.error_node = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::UiEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.io"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_rules() {
        let mut email = InputOptions::new("email", "email");
        email.required = true;
        assert_eq!(email.check("  ").as_deref(), Some("Email is required"));
        assert_eq!(email.check("nope").as_deref(), Some("Please enter a valid email"));
        assert_eq!(email.check("a@b.co"), None);

        let mut message = InputOptions::new("textarea", "message");
        message.required = true;
        message.min_length = Some(10);
        assert_eq!(message.check("").as_deref(), Some("Message is required"));
        assert_eq!(
            message.check("too short").as_deref(),
            Some("Must be at least 10 characters")
        );
        assert_eq!(message.check("long enough now"), None);

        let optional = InputOptions::new("text", "subject");
        assert_eq!(optional.check(""), None);
    }

    #[test]
    fn test_blur_validates_and_input_clears() {
        let mut host = Host::new();
        let mut input = Input::new(InputOptions {
            required: true,
            ..InputOptions::new("text", "name")
        });
        let wrapper = host.mount(&mut input).unwrap();
        let control = input.control().unwrap();

        host.dispatch(&mut input, UiEvent::blur(control)).unwrap();
        assert_eq!(input.error(), Some("This field is required"));
        assert!(host.document.has_class(control, "invalid"));
        assert!(host.document.first_by_class(wrapper, "field-error").is_some());

        host.dispatch(&mut input, UiEvent::input(control, "Ada")).unwrap();
        assert_eq!(input.error(), None);
        assert!(host.document.first_by_class(wrapper, "field-error").is_none());
        assert_eq!(input.value(), "Ada");
        assert_eq!(host.document.attr(control, "value"), Some("Ada"));
    }

    #[test]
    fn test_programmatic_set_is_silent() {
        let mut host = Host::new();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let mut input = Input::new(InputOptions::default())
            .on_change(move |v: &str| sink.borrow_mut().push(v.to_string()));

        input.set_value(&mut host, "before");
        host.mount(&mut input).unwrap();
        let control = input.control().unwrap();
        assert_eq!(host.document.attr(control, "value"), Some("before"));

        input.set_value(&mut host, "after");
        assert!(changes.borrow().is_empty());

        host.dispatch(&mut input, UiEvent::input(control, "typed")).unwrap();
        assert_eq!(*changes.borrow(), vec!["typed"]);
    }
}
