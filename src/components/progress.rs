use super::component::{Bindings, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressOptions {
    pub value: f64,
    pub max: f64,
    pub variant: String,
    pub show_label: bool,
    pub animated: bool,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            value: 0.0,
            max: 100.0,
            variant: "primary".to_string(),
            show_label: true,
            animated: false,
        }
    }
}

/// Displayed percentage for `value` out of `max`. Out-of-range values pass
/// through, so the result may fall outside `0..=100`.
pub fn percentage(value: f64, max: f64) -> i64 {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    (value / max * 100.0).round() as i64
}

pub struct ProgressBar {
    options: ProgressOptions,
    handle: Option<NodeId>,
    bar: Option<NodeId>,
    label: Option<NodeId>,
    bindings: Bindings,
}

impl ProgressBar {
    pub fn new(options: ProgressOptions) -> Self {
        Self {
            options,
            handle: None,
            bar: None,
            label: None,
            bindings: Bindings::new(),
        }
    }

    pub fn options(&self) -> &ProgressOptions {
        &self.options
    }

    pub fn percentage(&self) -> i64 {
        percentage(self.options.value, self.options.max)
    }

    pub fn set_value(&mut self, host: &mut Host, value: f64) {
        self.options.value = value;
        self.sync(host);
    }

    pub fn set_max(&mut self, host: &mut Host, max: f64) {
        self.options.max = max;
        self.sync(host);
    }

    pub fn set_variant(&mut self, host: &mut Host, variant: &str) {
        self.options.variant = variant.to_string();
        self.sync(host);
    }

    fn sync(&self, host: &mut Host) {
        let (Some(bar), Some(label)) = (self.bar, self.label) else {
            return;
        };
        let doc = &mut host.document;
        let pct = self.percentage();

        let mut class = format!("progress-bar progress-{}", self.options.variant);
        if self.options.animated {
            class.push_str(" animated");
        }
        doc.set_class_name(bar, &class);
        doc.set_style(bar, "width", format!("{}%", pct));
        doc.set_attr(bar, "aria-valuenow", self.options.value.to_string());
        doc.set_attr(bar, "aria-valuemax", self.options.max.to_string());

        doc.set_text(label, format!("{}%", pct));
        if self.options.show_label {
            doc.remove_style(label, "display");
        } else {
            doc.set_style(label, "display", "none");
        }
    }
}

impl FromOptions for ProgressBar {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for ProgressBar {
    fn name(&self) -> &'static str {
        "progress"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;
        let track = doc.element("div", "progress", "");
        let bar = doc.element("div", "progress-bar", "");
        doc.set_attr(bar, "role", "progressbar");
        doc.set_attr(bar, "aria-valuemin", "0");
        let label = doc.element("span", "progress-label", "");
        doc.append_child(track, bar);
        doc.append_child(track, label);

        self.handle = Some(track);
        self.bar = Some(bar);
        self.label = Some(label);
        self.sync(host);
        Ok(track)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, _host: &mut Host, _delivery: &Delivery) -> Result<ComponentAction> {
        Ok(ComponentAction::None)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.bar = None;
        self.label = None;
    }
}
