use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use crate::timers::TimerId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slide {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}

impl Slide {
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselOptions {
    pub slides: Vec<Slide>,
    #[serde(rename = "loop")]
    pub wrap: bool,
    pub autoplay: bool,
    /// Autoplay interval in milliseconds
    pub interval: u64,
    pub show_indicators: bool,
    pub show_controls: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            wrap: true,
            autoplay: false,
            interval: 5000,
            show_indicators: true,
            show_controls: true,
        }
    }
}

pub struct Carousel {
    options: CarouselOptions,
    current: usize,
    handle: Option<NodeId>,
    slides: Vec<NodeId>,
    indicators: Vec<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    autoplay_timer: Option<TimerId>,
    bindings: Bindings,
    on_change: Option<Callback<usize>>,
}

impl Carousel {
    pub fn new(options: CarouselOptions) -> Self {
        Self {
            options,
            current: 0,
            handle: None,
            slides: Vec::new(),
            indicators: Vec::new(),
            prev: None,
            next: None,
            autoplay_timer: None,
            bindings: Bindings::new(),
            on_change: None,
        }
    }

    pub fn on_change(mut self, f: impl FnMut(&usize) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay_timer.is_some()
    }

    pub fn prev_button(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next_button(&self) -> Option<NodeId> {
        self.next
    }

    pub fn indicator(&self, index: usize) -> Option<NodeId> {
        self.indicators.get(index).copied()
    }

    fn next_index(&self) -> Option<usize> {
        let count = self.options.slides.len();
        if count == 0 {
            return None;
        }
        match self.current + 1 {
            n if n < count => Some(n),
            _ if self.options.wrap => Some(0),
            _ => None,
        }
    }

    fn prev_index(&self) -> Option<usize> {
        let count = self.options.slides.len();
        if count == 0 {
            return None;
        }
        match self.current.checked_sub(1) {
            Some(n) => Some(n),
            None if self.options.wrap => Some(count - 1),
            None => None,
        }
    }

    /// Show slide `index` without notifying `on_change`
    pub fn go_to(&mut self, host: &mut Host, index: usize) -> bool {
        if index >= self.options.slides.len() {
            warn!("Carousel has no slide {}", index);
            return false;
        }
        self.current = index;
        self.sync(host);
        true
    }

    /// Advance one slide and notify; a no-op at the end without `loop`
    pub fn next(&mut self, host: &mut Host) -> bool {
        match self.next_index() {
            Some(index) => self.change(host, index),
            None => false,
        }
    }

    pub fn prev(&mut self, host: &mut Host) -> bool {
        match self.prev_index() {
            Some(index) => self.change(host, index),
            None => false,
        }
    }

    fn change(&mut self, host: &mut Host, index: usize) -> bool {
        if !self.go_to(host, index) {
            return false;
        }
        emit(&mut self.on_change, &index);
        true
    }

    pub fn play(&mut self, host: &mut Host) {
        self.bindings.cancel(&mut host.timers, &mut self.autoplay_timer);
        if self.handle.is_some() && self.options.slides.len() > 1 {
            let interval = Duration::from_millis(self.options.interval);
            self.autoplay_timer = Some(self.bindings.schedule(&mut host.timers, interval));
        }
    }

    pub fn pause(&mut self, host: &mut Host) {
        self.bindings.cancel(&mut host.timers, &mut self.autoplay_timer);
    }

    fn sync(&self, host: &mut Host) {
        let doc = &mut host.document;
        for (i, slide) in self.slides.iter().enumerate() {
            doc.toggle_class(*slide, "active", i == self.current);
            doc.set_attr(*slide, "aria-hidden", (i != self.current).to_string());
        }
        for (i, dot) in self.indicators.iter().enumerate() {
            doc.toggle_class(*dot, "active", i == self.current);
        }
        if !self.options.wrap {
            let last = self.options.slides.len().saturating_sub(1);
            if let Some(prev) = self.prev {
                doc.set_flag(prev, "disabled", self.current == 0);
            }
            if let Some(next) = self.next {
                doc.set_flag(next, "disabled", self.current >= last);
            }
        }
    }
}

impl FromOptions for Carousel {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Carousel {
    fn name(&self) -> &'static str {
        "carousel"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.autoplay_timer = None;
        self.slides.clear();
        self.indicators.clear();
        self.prev = None;
        self.next = None;
        if self.current >= self.options.slides.len() {
            self.current = 0;
        }

        let doc = &mut host.document;
        let carousel = doc.element("div", "carousel", "");
        let track = doc.element("div", "carousel-track", "");
        for slide in &self.options.slides {
            let node = doc.element("div", "carousel-slide", "");
            if let Some(image) = &slide.image {
                let img = doc.element("img", "carousel-image", "");
                doc.set_attr(img, "src", image.clone());
                doc.set_attr(img, "alt", slide.title.clone());
                doc.append_child(node, img);
            }
            let title = doc.element("h4", "carousel-title", &slide.title);
            let content = doc.element("p", "carousel-content", &slide.content);
            doc.append_child(node, title);
            doc.append_child(node, content);
            doc.append_child(track, node);
            self.slides.push(node);
        }
        doc.append_child(carousel, track);

        if self.options.show_controls {
            let prev = doc.element("button", "carousel-prev", "\u{2039}");
            doc.set_attr(prev, "aria-label", "Previous slide");
            let next = doc.element("button", "carousel-next", "\u{203A}");
            doc.set_attr(next, "aria-label", "Next slide");
            doc.append_child(carousel, prev);
            doc.append_child(carousel, next);
            self.bindings.listen(doc, prev, EventKind::Click);
            self.bindings.listen(doc, next, EventKind::Click);
            self.prev = Some(prev);
            self.next = Some(next);
        }

        if self.options.show_indicators {
            let dots = doc.element("div", "carousel-indicators", "");
            for i in 0..self.options.slides.len() {
                let dot = doc.element("button", "carousel-indicator", "");
                doc.set_attr(dot, "data-index", i.to_string());
                doc.set_attr(dot, "aria-label", format!("Go to slide {}", i + 1));
                doc.append_child(dots, dot);
                self.bindings.listen(doc, dot, EventKind::Click);
                self.indicators.push(dot);
            }
            doc.append_child(carousel, dots);
        }

        self.handle = Some(carousel);
        self.sync(host);
        if self.options.autoplay {
            self.play(host);
        }
        Ok(carousel)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let node = delivery.current_target;
        let changed = if Some(node) == self.prev {
            self.prev(host)
        } else if Some(node) == self.next {
            self.next(host)
        } else if let Some(index) = self.indicators.iter().position(|d| *d == node) {
            index != self.current && self.change(host, index)
        } else {
            false
        };
        if !changed {
            return Ok(ComponentAction::None);
        }
        // manual navigation restarts the autoplay interval
        if self.autoplay_timer.is_some() {
            self.play(host);
        }
        Ok(ComponentAction::Changed)
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        self.bindings.fired(timer);
        if self.autoplay_timer != Some(timer) {
            return Ok(ComponentAction::None);
        }
        self.autoplay_timer = None;
        if !self.next(host) {
            return Ok(ComponentAction::None);
        }
        self.play(host);
        Ok(ComponentAction::Changed)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.bindings.owns_timer(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.autoplay_timer = None;
        self.slides.clear();
        self.indicators.clear();
        self.prev = None;
        self.next = None;
    }
}
