use super::catalog::{CategoryFilter, IconCatalog, IconCategory, IconEntry};
use super::glyphs::{svg_snippet, GlyphSet, Glyphs};
use crate::components::{emit, Bindings, Callback, Component, ComponentAction};
use crate::dom::{Delivery, EventKind, Key, ListenerId, NodeId};
use crate::host::{CopyOutcome, Host, NoticeVariant};
use crate::timers::TimerId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Length of the press animation on a clicked card
pub const PRESS_DURATION: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryOptions {
    /// Icons shown per page and added by each load-more
    pub page_size: usize,
    /// Search quiet period in milliseconds
    pub debounce: u64,
    /// Count advertised while the whole catalog is visible
    pub advertised_total: usize,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            page_size: 48,
            debounce: 300,
            advertised_total: 500,
        }
    }
}

/// Searchable, filterable icon grid with copy-to-clipboard.
///
/// Search input is applied after a quiet period; Escape clears it at once.
/// Changing the search or the category resets the visible count to one
/// page.
pub struct IconGallery {
    options: GalleryOptions,
    catalog: IconCatalog,
    glyphs: Box<dyn GlyphSet>,
    search: String,
    pending_search: Option<String>,
    filter: CategoryFilter,
    visible_count: usize,
    handle: Option<NodeId>,
    search_input: Option<NodeId>,
    grid: Option<NodeId>,
    results: Option<NodeId>,
    load_more: Option<NodeId>,
    filter_tags: Vec<NodeId>,
    search_timer: Option<TimerId>,
    press: Option<(TimerId, NodeId)>,
    bindings: Bindings,
    on_copy: Option<Callback<str>>,
}

impl IconGallery {
    pub fn new(options: GalleryOptions) -> Self {
        let visible_count = options.page_size;
        Self {
            options,
            catalog: IconCatalog::builtin(),
            glyphs: Box::new(Glyphs::new()),
            search: String::new(),
            pending_search: None,
            filter: CategoryFilter::All,
            visible_count,
            handle: None,
            search_input: None,
            grid: None,
            results: None,
            load_more: None,
            filter_tags: Vec::new(),
            search_timer: None,
            press: None,
            bindings: Bindings::new(),
            on_copy: None,
        }
    }

    pub fn with_catalog(mut self, catalog: IconCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_glyphs(mut self, glyphs: Box<dyn GlyphSet>) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Called with the icon name after a successful copy
    pub fn on_copy(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_copy = Some(Callback::new(f));
        self
    }

    pub fn catalog(&self) -> &IconCatalog {
        &self.catalog
    }

    pub fn glyphs(&self) -> &dyn GlyphSet {
        self.glyphs.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn search_input(&self) -> Option<NodeId> {
        self.search_input
    }

    pub fn load_more_button(&self) -> Option<NodeId> {
        self.load_more
    }

    pub fn filter_tag(&self, host: &Host, filter: CategoryFilter) -> Option<NodeId> {
        self.handle
            .and_then(|h| host.document.find_by_attr(h, "data-filter", filter.as_str()))
    }

    pub fn card(&self, host: &Host, name: &str) -> Option<NodeId> {
        self.grid
            .and_then(|g| host.document.find_by_attr(g, "data-icon", name))
    }

    /// Icons passing the current search and filter
    pub fn filtered(&self) -> Vec<&IconEntry> {
        self.catalog.filter(&self.search, self.filter)
    }

    /// The filtered icons currently shown
    pub fn visible(&self) -> Vec<&IconEntry> {
        let mut icons = self.filtered();
        icons.truncate(self.visible_count);
        icons
    }

    pub fn results_label(&self) -> String {
        let total = self.filtered().len();
        if total == self.catalog.len() {
            format!("{}+ icons available", self.options.advertised_total)
        } else {
            format!(
                "Showing {} of {} icons",
                self.visible_count.min(total),
                total
            )
        }
    }

    /// Label of the load-more button, `None` when everything is shown
    pub fn load_more_label(&self) -> Option<String> {
        let remaining = self.filtered().len().saturating_sub(self.visible_count);
        (remaining > 0).then(|| format!("Load more ({})", remaining.min(self.options.page_size)))
    }

    /// Apply a search term now
    pub fn search(&mut self, host: &mut Host, term: &str) {
        self.bindings.cancel(&mut host.timers, &mut self.search_timer);
        self.pending_search = None;
        self.search = term.to_string();
        self.visible_count = self.options.page_size;
        if let Some(input) = self.search_input {
            host.document.set_attr(input, "value", term);
        }
        self.refresh(host);
    }

    pub fn set_filter(&mut self, host: &mut Host, filter: CategoryFilter) {
        self.filter = filter;
        self.visible_count = self.options.page_size;
        for tag in &self.filter_tags {
            let on = host.document.attr(*tag, "data-filter") == Some(filter.as_str());
            host.document.toggle_class(*tag, "active", on);
        }
        debug!("icon filter set to {}", filter.as_str());
        self.refresh(host);
    }

    pub fn load_more(&mut self, host: &mut Host) {
        self.visible_count += self.options.page_size;
        self.refresh(host);
    }

    /// Copy the SVG of `name`. Unknown names are logged and ignored.
    pub fn copy_icon(&mut self, host: &mut Host, name: &str) -> Option<CopyOutcome> {
        let Some(icon) = self.catalog.find(name) else {
            warn!("No icon named '{}'", name);
            return None;
        };
        let title = icon.display_name();
        let svg = svg_snippet(icon, self.glyphs.as_ref());
        let outcome = host.copy_text(&svg);
        match outcome {
            CopyOutcome::Copied => {
                host.notify(format!("Icon \"{}\" copied to clipboard!", title), NoticeVariant::Success);
            }
            CopyOutcome::CopiedWithFallback => {
                host.notify(format!("Icon \"{}\" copied!", title), NoticeVariant::Success);
            }
            CopyOutcome::Failed => {
                host.notify("Copy failed. Please try again.", NoticeVariant::Error);
            }
        }
        if outcome.is_success() {
            emit(&mut self.on_copy, name);
        }
        Some(outcome)
    }

    fn refresh(&mut self, host: &mut Host) {
        let Some(grid) = self.grid else {
            return;
        };
        let cards: Vec<(String, IconCategory, String, &'static str)> = self
            .visible()
            .into_iter()
            .map(|icon| {
                (
                    icon.name.clone(),
                    icon.category,
                    icon.display_name(),
                    self.glyphs.symbol(icon.category),
                )
            })
            .collect();
        let results = self.results_label();
        let load_more = self.load_more_label();

        // the pressed card is about to be rebuilt
        if let Some((timer, _)) = self.press.take() {
            host.timers.clear(timer);
            self.bindings.fired(timer);
        }

        let doc = &mut host.document;
        doc.clear_children(grid);
        for (name, category, title, symbol) in cards {
            let card = doc.element("div", "icon-card", "");
            doc.set_attr(card, "data-icon", name);
            doc.set_attr(card, "data-category", category.as_str());
            let svg = doc.element("div", "icon-svg", symbol);
            let label = doc.element("div", "icon-name", &title);
            doc.append_child(card, svg);
            doc.append_child(card, label);
            doc.append_child(grid, card);
        }
        if let Some(node) = self.results {
            doc.set_text(node, results);
        }
        if let Some(button) = self.load_more {
            match load_more {
                Some(label) => {
                    doc.set_style(button, "display", "block");
                    doc.set_text(button, label);
                }
                None => doc.set_style(button, "display", "none"),
            }
        }
    }
}

impl Component for IconGallery {
    fn name(&self) -> &'static str {
        "icon-gallery"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.search_timer = None;
        self.pending_search = None;
        self.press = None;
        self.filter_tags.clear();

        let doc = &mut host.document;
        let gallery = doc.element("div", "icon-gallery", "");
        let input = doc.element("input", "icon-search form-input", "");
        doc.set_attr(input, "type", "search");
        doc.set_attr(input, "placeholder", "Search icons...");
        doc.set_attr(input, "value", self.search.clone());
        doc.append_child(gallery, input);
        self.bindings.listen(doc, input, EventKind::Input);
        self.bindings.listen(doc, input, EventKind::KeyDown);

        let filters = doc.element("div", "icon-filters", "");
        let mut tags = vec![(CategoryFilter::All, "All")];
        tags.extend(
            IconCategory::ALL
                .into_iter()
                .map(|c| (CategoryFilter::Only(c), c.label())),
        );
        for (filter, label) in tags {
            let tag = doc.element("button", "filter-tag", label);
            doc.set_attr(tag, "data-filter", filter.as_str());
            doc.toggle_class(tag, "active", filter == self.filter);
            doc.append_child(filters, tag);
            self.bindings.listen(doc, tag, EventKind::Click);
            self.filter_tags.push(tag);
        }
        doc.append_child(gallery, filters);

        let results = doc.element("span", "results-count", "");
        let grid = doc.element("div", "icons-grid", "");
        let load_more = doc.element("button", "load-more", "");
        doc.append_child(gallery, results);
        doc.append_child(gallery, grid);
        doc.append_child(gallery, load_more);
        // cards are rebuilt on every refresh, so the grid delegates
        self.bindings.listen(doc, grid, EventKind::Click);
        self.bindings.listen(doc, load_more, EventKind::Click);

        self.handle = Some(gallery);
        self.search_input = Some(input);
        self.grid = Some(grid);
        self.results = Some(results);
        self.load_more = Some(load_more);
        self.refresh(host);
        Ok(gallery)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let node = delivery.current_target;

        if Some(node) == self.search_input {
            if delivery.event.is_key(Key::Escape) {
                self.search(host, "");
                return Ok(ComponentAction::Update);
            }
            if delivery.event.kind == EventKind::Input {
                let term = delivery.event.value.clone().unwrap_or_default();
                self.bindings.cancel(&mut host.timers, &mut self.search_timer);
                self.pending_search = Some(term);
                let delay = Duration::from_millis(self.options.debounce);
                self.search_timer = Some(self.bindings.schedule(&mut host.timers, delay));
            }
            return Ok(ComponentAction::None);
        }

        if Some(node) == self.load_more {
            self.load_more(host);
            return Ok(ComponentAction::Update);
        }

        if let Some(filter) = host
            .document
            .attr(node, "data-filter")
            .and_then(|f| f.parse::<CategoryFilter>().ok())
        {
            self.set_filter(host, filter);
            return Ok(ComponentAction::Changed);
        }

        if Some(node) == self.grid {
            let Some(card) = host
                .document
                .closest_with_attr(delivery.target(), "data-icon", node)
            else {
                return Ok(ComponentAction::None);
            };
            let Some(name) = host.document.attr(card, "data-icon").map(str::to_string) else {
                return Ok(ComponentAction::None);
            };
            host.document.set_style(card, "transform", "scale(0.95)");
            let timer = self.bindings.schedule(&mut host.timers, PRESS_DURATION);
            if let Some((old, old_card)) = self.press.replace((timer, card)) {
                host.timers.clear(old);
                self.bindings.fired(old);
                host.document.set_style(old_card, "transform", "scale(1)");
            }
            self.copy_icon(host, &name);
            return Ok(ComponentAction::Activated);
        }

        Ok(ComponentAction::None)
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        self.bindings.fired(timer);
        if self.search_timer == Some(timer) {
            self.search_timer = None;
            if let Some(term) = self.pending_search.take() {
                self.search = term;
                self.visible_count = self.options.page_size;
                self.refresh(host);
            }
            return Ok(ComponentAction::Update);
        }
        if let Some((press, card)) = self.press {
            if press == timer {
                self.press = None;
                host.document.set_style(card, "transform", "scale(1)");
            }
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
        self.search_timer = None;
        self.press = None;
        self.search_input = None;
        self.grid = None;
        self.results = None;
        self.load_more = None;
        self.filter_tags.clear();
    }
}
