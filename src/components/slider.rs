use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snap `value` to the step grid anchored at `min`, then clamp to the range
pub fn snap(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let stepped = if step > 0.0 {
        min + ((value - min) / step).round() * step
    } else {
        value
    };
    stepped.clamp(min, max.max(min))
}

fn parse_input(delivery: &Delivery) -> Option<f64> {
    delivery
        .event
        .value
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderOptions {
    pub label: Option<String>,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
    pub disabled: bool,
    pub show_value: bool,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            label: None,
            min: 0.0,
            max: 100.0,
            step: 1.0,
            value: 50.0,
            disabled: false,
            show_value: true,
        }
    }
}

pub struct Slider {
    options: SliderOptions,
    handle: Option<NodeId>,
    control: Option<NodeId>,
    readout: Option<NodeId>,
    bindings: Bindings,
    on_change: Option<Callback<f64>>,
}

impl Slider {
    pub fn new(mut options: SliderOptions) -> Self {
        options.value = snap(options.value, options.min, options.max, options.step);
        Self {
            options,
            handle: None,
            control: None,
            readout: None,
            bindings: Bindings::new(),
            on_change: None,
        }
    }

    pub fn on_change(mut self, f: impl FnMut(&f64) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn value(&self) -> f64 {
        self.options.value
    }

    pub fn control(&self) -> Option<NodeId> {
        self.control
    }

    fn snap(&self, value: f64) -> f64 {
        snap(value, self.options.min, self.options.max, self.options.step)
    }

    /// Set the value, snapped and clamped, without notifying `on_change`
    pub fn set_value(&mut self, host: &mut Host, value: f64) {
        self.options.value = self.snap(value);
        self.sync(host);
    }

    fn sync(&self, host: &mut Host) {
        if let Some(control) = self.control {
            host.document
                .set_attr(control, "value", self.options.value.to_string());
        }
        if let Some(readout) = self.readout {
            host.document
                .set_text(readout, self.options.value.to_string());
        }
    }
}

impl FromOptions for Slider {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Slider {
    fn name(&self) -> &'static str {
        "slider"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;
        let wrapper = doc.element("div", "slider", "");
        if let Some(label) = &self.options.label {
            let label = doc.element("label", "slider-label", label);
            doc.append_child(wrapper, label);
        }
        let control = doc.element("input", "slider-input", "");
        doc.set_attr(control, "type", "range");
        doc.set_attr(control, "min", self.options.min.to_string());
        doc.set_attr(control, "max", self.options.max.to_string());
        doc.set_attr(control, "step", self.options.step.to_string());
        doc.set_flag(control, "disabled", self.options.disabled);
        doc.append_child(wrapper, control);
        self.readout = if self.options.show_value {
            let readout = doc.element("span", "slider-value", "");
            doc.append_child(wrapper, readout);
            Some(readout)
        } else {
            None
        };
        self.bindings.listen(doc, control, EventKind::Input);

        self.handle = Some(wrapper);
        self.control = Some(control);
        self.sync(host);
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(raw) = parse_input(delivery) else {
            self.sync(host);
            return Ok(ComponentAction::None);
        };
        if self.options.disabled {
            self.sync(host);
            return Ok(ComponentAction::None);
        }
        let value = self.snap(raw);
        let changed = value != self.options.value;
        self.options.value = value;
        self.sync(host);
        if !changed {
            return Ok(ComponentAction::None);
        }
        emit(&mut self.on_change, &value);
        Ok(ComponentAction::Changed)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.control = None;
        self.readout = None;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RangeSliderOptions {
    pub label: Option<String>,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub low: f64,
    pub high: f64,
    pub disabled: bool,
}

impl Default for RangeSliderOptions {
    fn default() -> Self {
        Self {
            label: None,
            min: 0.0,
            max: 100.0,
            step: 1.0,
            low: 25.0,
            high: 75.0,
            disabled: false,
        }
    }
}

/// Two-handle slider keeping `low <= high`.
///
/// When the user drags one handle past the other, the handle not being
/// dragged is moved along with it.
pub struct RangeSlider {
    options: RangeSliderOptions,
    handle: Option<NodeId>,
    low_control: Option<NodeId>,
    high_control: Option<NodeId>,
    readout: Option<NodeId>,
    bindings: Bindings,
    on_change: Option<Callback<(f64, f64)>>,
}

impl RangeSlider {
    pub fn new(options: RangeSliderOptions) -> Self {
        let mut slider = Self {
            options,
            handle: None,
            low_control: None,
            high_control: None,
            readout: None,
            bindings: Bindings::new(),
            on_change: None,
        };
        let (low, high) = (slider.options.low, slider.options.high);
        slider.store(low, high);
        slider
    }

    pub fn on_change(mut self, f: impl FnMut(&(f64, f64)) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &RangeSliderOptions {
        &self.options
    }

    /// Current `(low, high)` pair
    pub fn values(&self) -> (f64, f64) {
        (self.options.low, self.options.high)
    }

    pub fn low_control(&self) -> Option<NodeId> {
        self.low_control
    }

    pub fn high_control(&self) -> Option<NodeId> {
        self.high_control
    }

    fn snap(&self, value: f64) -> f64 {
        snap(value, self.options.min, self.options.max, self.options.step)
    }

    fn store(&mut self, low: f64, high: f64) {
        let (low, high) = (self.snap(low), self.snap(high));
        self.options.low = low.min(high);
        self.options.high = low.max(high);
    }

    /// Set both bounds without notifying `on_change`; the pair is ordered
    pub fn set_values(&mut self, host: &mut Host, low: f64, high: f64) {
        self.store(low, high);
        self.sync(host);
    }

    fn sync(&self, host: &mut Host) {
        let doc = &mut host.document;
        if let Some(node) = self.low_control {
            doc.set_attr(node, "value", self.options.low.to_string());
        }
        if let Some(node) = self.high_control {
            doc.set_attr(node, "value", self.options.high.to_string());
        }
        if let Some(node) = self.readout {
            doc.set_text(
                node,
                format!("{} \u{2013} {}", self.options.low, self.options.high),
            );
        }
    }

    fn range_input(&self, doc: &mut crate::dom::Document, class: &str, bound: &str) -> NodeId {
        let input = doc.element("input", class, "");
        doc.set_attr(input, "type", "range");
        doc.set_attr(input, "data-bound", bound);
        doc.set_attr(input, "min", self.options.min.to_string());
        doc.set_attr(input, "max", self.options.max.to_string());
        doc.set_attr(input, "step", self.options.step.to_string());
        doc.set_flag(input, "disabled", self.options.disabled);
        input
    }
}

impl FromOptions for RangeSlider {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for RangeSlider {
    fn name(&self) -> &'static str {
        "range-slider"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;
        let wrapper = doc.element("div", "range-slider", "");
        if let Some(label) = &self.options.label {
            let label = doc.element("label", "slider-label", label);
            doc.append_child(wrapper, label);
        }
        let low = self.range_input(doc, "range-low", "low");
        let high = self.range_input(doc, "range-high", "high");
        let readout = doc.element("span", "range-values", "");
        doc.append_child(wrapper, low);
        doc.append_child(wrapper, high);
        doc.append_child(wrapper, readout);
        self.bindings.listen(doc, low, EventKind::Input);
        self.bindings.listen(doc, high, EventKind::Input);

        self.handle = Some(wrapper);
        self.low_control = Some(low);
        self.high_control = Some(high);
        self.readout = Some(readout);
        self.sync(host);
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let raw = parse_input(delivery);
        let (Some(raw), false) = (raw, self.options.disabled) else {
            self.sync(host);
            return Ok(ComponentAction::None);
        };
        let value = self.snap(raw);
        let before = self.values();

        if Some(delivery.current_target) == self.low_control {
            self.options.low = value;
            if self.options.high < value {
                self.options.high = value;
            }
        } else if Some(delivery.current_target) == self.high_control {
            self.options.high = value;
            if self.options.low > value {
                self.options.low = value;
            }
        } else {
            return Ok(ComponentAction::None);
        }

        self.sync(host);
        let after = self.values();
        if after == before {
            return Ok(ComponentAction::None);
        }
        emit(&mut self.on_change, &after);
        Ok(ComponentAction::Changed)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.low_control = None;
        self.high_control = None;
        self.readout = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::UiEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_snap_and_clamp() {
        assert_eq!(snap(47.0, 0.0, 100.0, 5.0), 45.0);
        assert_eq!(snap(48.0, 0.0, 100.0, 5.0), 50.0);
        assert_eq!(snap(130.0, 0.0, 100.0, 5.0), 100.0);
        assert_eq!(snap(-3.0, 0.0, 100.0, 5.0), 0.0);
        assert_eq!(snap(7.0, 2.0, 20.0, 4.0), 6.0);
        assert_eq!(snap(7.3, 0.0, 10.0, 0.0), 7.3);
    }

    #[test]
    fn test_slider_input() {
        let mut host = Host::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut slider = Slider::new(SliderOptions {
            step: 10.0,
            ..Default::default()
        })
        .on_change(move |v| sink.borrow_mut().push(*v));
        let node = host.mount(&mut slider).unwrap();
        let control = slider.control().unwrap();

        host.dispatch(&mut slider, UiEvent::input(control, "73")).unwrap();
        assert_eq!(slider.value(), 70.0);
        assert_eq!(host.document.attr(control, "value"), Some("70"));
        let readout = host.document.first_by_class(node, "slider-value").unwrap();
        assert_eq!(host.document.text(readout), "70");

        host.dispatch(&mut slider, UiEvent::input(control, "not a number")).unwrap();
        assert_eq!(host.document.attr(control, "value"), Some("70"));
        assert_eq!(*seen.borrow(), vec![70.0]);
    }

    #[test]
    fn test_slider_set_value_before_render() {
        let mut host = Host::new();
        let mut slider = Slider::new(SliderOptions::default());
        slider.set_value(&mut host, 250.0);
        host.mount(&mut slider).unwrap();
        assert_eq!(host.document.attr(slider.control().unwrap(), "value"), Some("100"));
    }

    #[test]
    fn test_range_moves_the_other_bound() {
        let mut host = Host::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut range = RangeSlider::new(RangeSliderOptions::default())
            .on_change(move |pair| sink.borrow_mut().push(*pair));
        host.mount(&mut range).unwrap();
        let low = range.low_control().unwrap();
        let high = range.high_control().unwrap();

        host.dispatch(&mut range, UiEvent::input(low, "90")).unwrap();
        assert_eq!(range.values(), (90.0, 90.0));

        host.dispatch(&mut range, UiEvent::input(high, "10")).unwrap();
        assert_eq!(range.values(), (10.0, 10.0));

        host.dispatch(&mut range, UiEvent::input(high, "60")).unwrap();
        assert_eq!(range.values(), (10.0, 60.0));
        assert_eq!(*seen.borrow(), vec![(90.0, 90.0), (10.0, 10.0), (10.0, 60.0)]);
    }

    #[test]
    fn test_range_set_values_orders_pair() {
        let mut host = Host::new();
        let mut range = RangeSlider::new(RangeSliderOptions {
            low: 80.0,
            high: 20.0,
            ..Default::default()
        });
        assert_eq!(range.values(), (20.0, 80.0));
        range.set_values(&mut host, 70.0, 30.0);
        assert_eq!(range.values(), (30.0, 70.0));
    }
}
