use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

const OPEN_ICON: &str = "\u{2212}";
const CLOSED_ICON: &str = "+";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub open: bool,
}

impl AccordionItem {
    pub fn new(id: &str, title: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            open: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionOptions {
    pub items: Vec<AccordionItem>,
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, Copy)]
struct ItemNodes {
    header: NodeId,
    content: NodeId,
    icon: Option<NodeId>,
}

/// Collapsible sections.
///
/// With `allow_multiple` unset at most one item is open. `on_toggle` fires
/// once per header click with the clicked item's id and its new state.
pub struct Accordion {
    options: AccordionOptions,
    handle: Option<NodeId>,
    nodes: Vec<ItemNodes>,
    bindings: Bindings,
    on_toggle: Option<Callback<(String, bool)>>,
}

impl Accordion {
    pub fn new(mut options: AccordionOptions) -> Self {
        if !options.allow_multiple {
            let mut seen_open = false;
            for item in &mut options.items {
                item.open &= !seen_open;
                seen_open |= item.open;
            }
        }
        Self {
            options,
            handle: None,
            nodes: Vec::new(),
            bindings: Bindings::new(),
            on_toggle: None,
        }
    }

    /// Bind to existing `.accordion-item` markup under `container`. Each
    /// item needs an `.accordion-header` and an `.accordion-content`; the
    /// item id is its `data-item` attribute or its position.
    pub fn mount(host: &mut Host, container: NodeId, allow_multiple: bool) -> Option<Self> {
        let doc = &host.document;
        let mut items = Vec::new();
        let mut nodes = Vec::new();
        for (index, node) in doc.find_by_class(container, "accordion-item").into_iter().enumerate() {
            let (Some(header), Some(content)) = (
                doc.first_by_class(node, "accordion-header"),
                doc.first_by_class(node, "accordion-content"),
            ) else {
                warn!("Accordion item {} is missing its header or content", index);
                continue;
            };
            let id = doc
                .attr(node, "data-item")
                .map_or_else(|| index.to_string(), str::to_string);
            let mut item = AccordionItem::new(&id, &doc.text_content(header), &doc.text_content(content));
            item.open = doc.has_class(header, "active");
            items.push(item);
            nodes.push(ItemNodes {
                header,
                content,
                icon: doc.first_by_class(header, "accordion-icon"),
            });
        }
        if items.is_empty() {
            error!("Accordion container has no usable items");
            return None;
        }

        let mut component = Self::new(AccordionOptions {
            items,
            allow_multiple,
        });
        for item in &nodes {
            component
                .bindings
                .listen(&mut host.document, item.header, EventKind::Click);
        }
        component.nodes = nodes;
        component.handle = Some(container);
        component.sync(host);
        Some(component)
    }

    pub fn on_toggle(mut self, f: impl FnMut(&(String, bool)) + 'static) -> Self {
        self.on_toggle = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &AccordionOptions {
        &self.options
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.options.items.iter().any(|i| i.id == id && i.open)
    }

    /// Ids of the open items in item order
    pub fn open_items(&self) -> Vec<&str> {
        self.options
            .items
            .iter()
            .filter(|i| i.open)
            .map(|i| i.id.as_str())
            .collect()
    }

    pub fn header(&self, id: &str) -> Option<NodeId> {
        self.index_of(id).and_then(|i| self.nodes.get(i)).map(|n| n.header)
    }

    pub fn content(&self, id: &str) -> Option<NodeId> {
        self.index_of(id).and_then(|i| self.nodes.get(i)).map(|n| n.content)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.options.items.iter().position(|i| i.id == id)
    }

    /// Toggle an item without notifying `on_toggle`; returns the new state
    pub fn toggle(&mut self, host: &mut Host, id: &str) -> Option<bool> {
        let Some(index) = self.index_of(id) else {
            warn!("No accordion item '{}'", id);
            return None;
        };
        let open = !self.options.items[index].open;
        self.set_open(host, index, open);
        Some(open)
    }

    pub fn open(&mut self, host: &mut Host, id: &str) {
        if let Some(index) = self.index_of(id) {
            self.set_open(host, index, true);
        }
    }

    pub fn close(&mut self, host: &mut Host, id: &str) {
        if let Some(index) = self.index_of(id) {
            self.set_open(host, index, false);
        }
    }

    fn set_open(&mut self, host: &mut Host, index: usize, open: bool) {
        if open && !self.options.allow_multiple {
            for item in &mut self.options.items {
                item.open = false;
            }
        }
        self.options.items[index].open = open;
        self.sync(host);
    }

    fn sync(&self, host: &mut Host) {
        let doc = &mut host.document;
        for (item, nodes) in self.options.items.iter().zip(&self.nodes) {
            doc.toggle_class(nodes.header, "active", item.open);
            doc.set_attr(nodes.header, "aria-expanded", item.open.to_string());
            if item.open {
                let height = doc
                    .bounds(nodes.content)
                    .map_or_else(|| "none".to_string(), |b| format!("{}px", b.height));
                doc.set_style(nodes.content, "max-height", height);
            } else {
                doc.remove_style(nodes.content, "max-height");
            }
            if let Some(icon) = nodes.icon {
                doc.set_text(icon, if item.open { OPEN_ICON } else { CLOSED_ICON });
            }
        }
    }
}

impl FromOptions for Accordion {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Accordion {
    fn name(&self) -> &'static str {
        "accordion"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.nodes.clear();
        let doc = &mut host.document;
        let container = doc.element("div", "accordion", "");
        for item in &self.options.items {
            let wrapper = doc.element("div", "accordion-item", "");
            doc.set_attr(wrapper, "data-item", item.id.clone());
            let header = doc.element("button", "accordion-header", "");
            let title = doc.element("span", "accordion-title", &item.title);
            let icon = doc.element("span", "accordion-icon", CLOSED_ICON);
            doc.append_child(header, title);
            doc.append_child(header, icon);
            let content = doc.element("div", "accordion-content", "");
            let body = doc.element("div", "accordion-body", &item.content);
            doc.append_child(content, body);
            doc.append_child(wrapper, header);
            doc.append_child(wrapper, content);
            doc.append_child(container, wrapper);
            self.bindings.listen(doc, header, EventKind::Click);
            self.nodes.push(ItemNodes {
                header,
                content,
                icon: Some(icon),
            });
        }
        self.handle = Some(container);
        self.sync(host);
        Ok(container)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(index) = self
            .nodes
            .iter()
            .position(|n| n.header == delivery.current_target)
        else {
            return Ok(ComponentAction::None);
        };
        let open = !self.options.items[index].open;
        self.set_open(host, index, open);
        let id = self.options.items[index].id.clone();
        emit(&mut self.on_toggle, &(id, open));
        Ok(ComponentAction::Changed)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.nodes.clear();
    }
}
