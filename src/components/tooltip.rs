use super::component::{Bindings, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Bounds, Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use crate::timers::TimerId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::Left => "left",
            Placement::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    #[default]
    Hover,
    Click,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipOptions {
    /// Text of the anchor element
    pub label: String,
    pub text: String,
    pub placement: Placement,
    pub trigger: Trigger,
    /// Hover delay in milliseconds
    pub delay: u64,
    pub offset: f64,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            text: String::new(),
            placement: Placement::Top,
            trigger: Trigger::Hover,
            delay: 200,
            offset: 8.0,
        }
    }
}

/// Top-left corner of a tooltip of `size` placed around `anchor`
pub fn position(anchor: Bounds, size: (f64, f64), placement: Placement, offset: f64) -> (f64, f64) {
    let (width, height) = size;
    let center_x = anchor.x + anchor.width / 2.0 - width / 2.0;
    let center_y = anchor.y + anchor.height / 2.0 - height / 2.0;
    match placement {
        Placement::Top => (center_x, anchor.y - height - offset),
        Placement::Bottom => (center_x, anchor.y + anchor.height + offset),
        Placement::Left => (anchor.x - width - offset, center_y),
        Placement::Right => (anchor.x + anchor.width + offset, center_y),
    }
}

pub struct Tooltip {
    options: TooltipOptions,
    handle: Option<NodeId>,
    anchor: Option<NodeId>,
    tip: Option<NodeId>,
    bindings: Bindings,
    show_timer: Option<TimerId>,
    visible: bool,
}

impl Tooltip {
    pub fn new(options: TooltipOptions) -> Self {
        Self {
            options,
            handle: None,
            anchor: None,
            tip: None,
            bindings: Bindings::new(),
            show_timer: None,
            visible: false,
        }
    }

    pub fn options(&self) -> &TooltipOptions {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_text(&mut self, host: &mut Host, text: &str) {
        self.options.text = text.to_string();
        if let Some(tip) = self.tip {
            host.document.set_text(tip, text);
        }
    }

    pub fn set_placement(&mut self, host: &mut Host, placement: Placement) {
        self.options.placement = placement;
        if let Some(tip) = self.tip {
            host.document
                .set_class_name(tip, &format!("tooltip tooltip-{}", placement.as_str()));
            if self.visible {
                host.document.add_class(tip, "visible");
                self.place(host);
            }
        }
    }

    pub fn show(&mut self, host: &mut Host) {
        let Some(tip) = self.tip else {
            return;
        };
        self.bindings.cancel(&mut host.timers, &mut self.show_timer);
        self.visible = true;
        host.document.remove_style(tip, "display");
        host.document.add_class(tip, "visible");
        self.place(host);
    }

    pub fn hide(&mut self, host: &mut Host) {
        self.bindings.cancel(&mut host.timers, &mut self.show_timer);
        self.visible = false;
        if let Some(tip) = self.tip {
            host.document.remove_class(tip, "visible");
            host.document.set_style(tip, "display", "none");
        }
    }

    fn place(&self, host: &mut Host) {
        let (Some(anchor), Some(tip)) = (self.anchor, self.tip) else {
            return;
        };
        let anchor_box = host.document.bounds(anchor).unwrap_or_default();
        let tip_box = host.document.bounds(tip).unwrap_or_default();
        let (x, y) = position(
            anchor_box,
            (tip_box.width, tip_box.height),
            self.options.placement,
            self.options.offset,
        );
        host.document.set_style(tip, "left", format!("{}px", x));
        host.document.set_style(tip, "top", format!("{}px", y));
    }
}

impl FromOptions for Tooltip {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Tooltip {
    fn name(&self) -> &'static str {
        "tooltip"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.show_timer = None;
        self.visible = false;

        let doc = &mut host.document;
        let wrapper = doc.element("span", "tooltip-wrapper", "");
        let anchor = doc.element("span", "tooltip-anchor", &self.options.label);
        let tip = doc.element(
            "div",
            &format!("tooltip tooltip-{}", self.options.placement.as_str()),
            &self.options.text,
        );
        doc.set_attr(tip, "role", "tooltip");
        doc.set_style(tip, "display", "none");
        doc.append_child(wrapper, anchor);
        doc.append_child(wrapper, tip);

        match self.options.trigger {
            Trigger::Hover => {
                self.bindings.listen(doc, anchor, EventKind::MouseEnter);
                self.bindings.listen(doc, anchor, EventKind::MouseLeave);
            }
            Trigger::Click => {
                self.bindings.listen(doc, anchor, EventKind::Click);
            }
        }

        self.handle = Some(wrapper);
        self.anchor = Some(anchor);
        self.tip = Some(tip);
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        match delivery.event.kind {
            EventKind::MouseEnter => {
                if self.options.delay == 0 {
                    self.show(host);
                } else if self.show_timer.is_none() && !self.visible {
                    let delay = Duration::from_millis(self.options.delay);
                    self.show_timer = Some(self.bindings.schedule(&mut host.timers, delay));
                }
            }
            EventKind::MouseLeave => self.hide(host),
            EventKind::Click => {
                if self.visible {
                    self.hide(host);
                } else {
                    self.show(host);
                }
            }
            _ => return Ok(ComponentAction::None),
        }
        Ok(ComponentAction::Update)
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        self.bindings.fired(timer);
        if self.show_timer == Some(timer) {
            self.show_timer = None;
            self.show(host);
            return Ok(ComponentAction::Update);
        }
        Ok(ComponentAction::None)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.bindings.owns_timer(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.anchor = None;
        self.tip = None;
        self.show_timer = None;
        self.visible = false;
    }
}
