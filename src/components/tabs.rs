use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabItem {
    pub id: String,
    pub label: String,
    pub content: String,
}

impl TabItem {
    pub fn new(id: &str, label: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsOptions {
    pub tabs: Vec<TabItem>,
    /// Initially active tab; the first tab when unset
    pub active: Option<String>,
}

/// Tab strip with one active tab and its paired content panel.
///
/// Tabs and panels are paired by id: `.tab[data-tab=ID]` activates
/// `.tab-content#ID`. `on_change` fires on every tab click, including a
/// click on the tab that is already active.
pub struct Tabs {
    options: TabsOptions,
    handle: Option<NodeId>,
    active: Option<String>,
    bindings: Bindings,
    on_change: Option<Callback<str>>,
}

impl Tabs {
    pub fn new(options: TabsOptions) -> Self {
        let active = options
            .active
            .clone()
            .filter(|id| options.tabs.iter().any(|t| &t.id == id))
            .or_else(|| options.tabs.first().map(|t| t.id.clone()));
        Self {
            options,
            handle: None,
            active,
            bindings: Bindings::new(),
            on_change: None,
        }
    }

    /// Bind to existing markup under `container`. The initial tab is the
    /// one already marked `active`, else the first. `None` when the
    /// container holds no tabs.
    pub fn mount(host: &mut Host, container: NodeId) -> Option<Self> {
        let doc = &host.document;
        let tab_nodes = doc.query_all(container, |d, n| d.has_class(n, "tab") && d.has_attr(n, "data-tab"));
        if tab_nodes.is_empty() {
            error!("Tabs container has no .tab[data-tab] elements");
            return None;
        }
        let tabs: Vec<TabItem> = tab_nodes
            .iter()
            .filter_map(|n| {
                let id = doc.attr(*n, "data-tab")?;
                Some(TabItem::new(id, doc.text(*n), ""))
            })
            .collect();
        let marked = tab_nodes
            .iter()
            .find(|n| doc.has_class(**n, "active"))
            .and_then(|n| doc.attr(*n, "data-tab"))
            .map(str::to_string);

        let mut component = Self::new(TabsOptions { tabs, active: marked });
        for node in tab_nodes {
            component.bindings.listen(&mut host.document, node, EventKind::Click);
        }
        component.handle = Some(container);
        component.sync(host);
        Some(component)
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &TabsOptions {
        &self.options
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Node of the content panel for `id`
    pub fn panel(&self, host: &Host, id: &str) -> Option<NodeId> {
        self.handle.and_then(|h| host.document.find_by_id(h, id))
    }

    /// Node of the tab button for `id`
    pub fn tab(&self, host: &Host, id: &str) -> Option<NodeId> {
        self.handle
            .and_then(|h| host.document.find_by_attr(h, "data-tab", id))
    }

    /// Activate a tab without notifying `on_change`; unknown ids are ignored
    pub fn activate(&mut self, host: &mut Host, id: &str) -> bool {
        if !self.options.tabs.iter().any(|t| t.id == id) {
            warn!("No tab with id '{}'", id);
            return false;
        }
        self.active = Some(id.to_string());
        self.options.active = self.active.clone();
        self.sync(host);
        true
    }

    fn sync(&self, host: &mut Host) {
        let Some(container) = self.handle else {
            return;
        };
        let doc = &mut host.document;
        for node in doc.find_by_class(container, "tab") {
            let on = doc.attr(node, "data-tab") == self.active.as_deref();
            doc.toggle_class(node, "active", on);
            doc.set_attr(node, "aria-selected", on.to_string());
        }
        for node in doc.find_by_class(container, "tab-content") {
            doc.remove_class(node, "active");
        }
        if let Some(id) = &self.active {
            match doc.find_by_id(container, id) {
                Some(panel) => doc.add_class(panel, "active"),
                None => warn!("No content panel for tab '{}'", id),
            }
        }
    }
}

impl FromOptions for Tabs {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Tabs {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;
        let container = doc.element("div", "tabs", "");
        let list = doc.element("div", "tab-list", "");
        doc.set_attr(list, "role", "tablist");
        let panels = doc.element("div", "tab-panels", "");
        for item in &self.options.tabs {
            let tab = doc.element("button", "tab", &item.label);
            doc.set_attr(tab, "data-tab", item.id.clone());
            doc.set_attr(tab, "role", "tab");
            doc.append_child(list, tab);
            self.bindings.listen(doc, tab, EventKind::Click);

            let panel = doc.element("div", "tab-content", &item.content);
            doc.set_attr(panel, "id", item.id.clone());
            doc.set_attr(panel, "role", "tabpanel");
            doc.append_child(panels, panel);
        }
        doc.append_child(container, list);
        doc.append_child(container, panels);

        self.handle = Some(container);
        self.sync(host);
        Ok(container)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(id) = host
            .document
            .attr(delivery.current_target, "data-tab")
            .map(str::to_string)
        else {
            return Ok(ComponentAction::None);
        };
        if !self.activate(host, &id) {
            return Ok(ComponentAction::None);
        }
        emit(&mut self.on_change, id.as_str());
        Ok(ComponentAction::Changed)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::UiEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn three() -> TabsOptions {
        TabsOptions {
            tabs: vec![
                TabItem::new("a", "A", "first"),
                TabItem::new("b", "B", "second"),
                TabItem::new("c", "C", "third"),
            ],
            active: None,
        }
    }

    #[test]
    fn test_first_tab_is_default() {
        let mut host = Host::new();
        let mut tabs = Tabs::new(three());
        host.mount(&mut tabs).unwrap();
        assert_eq!(tabs.active(), Some("a"));
        let panel = tabs.panel(&host, "a").unwrap();
        assert!(host.document.has_class(panel, "active"));
    }

    #[test]
    fn test_activate_before_render_is_silent() {
        let mut host = Host::new();
        let fired = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = fired.clone();
        let mut tabs =
            Tabs::new(three()).on_change(move |id: &str| sink.borrow_mut().push(id.to_string()));
        assert!(tabs.activate(&mut host, "c"));
        assert!(!tabs.activate(&mut host, "missing"));
        host.mount(&mut tabs).unwrap();

        let tab = tabs.tab(&host, "c").unwrap();
        assert!(host.document.has_class(tab, "active"));
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_click_on_active_tab_still_fires() {
        let mut host = Host::new();
        let fired = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = fired.clone();
        let mut tabs =
            Tabs::new(three()).on_change(move |id: &str| sink.borrow_mut().push(id.to_string()));
        host.mount(&mut tabs).unwrap();
        let a = tabs.tab(&host, "a").unwrap();
        host.dispatch(&mut tabs, UiEvent::click(a)).unwrap();
        host.dispatch(&mut tabs, UiEvent::click(a)).unwrap();
        assert_eq!(*fired.borrow(), vec!["a", "a"]);
    }

    #[test]
    fn test_mount_without_tabs() {
        let mut host = Host::new();
        let empty = host.document.element("div", "tabs-demo", "");
        assert!(Tabs::mount(&mut host, empty).is_none());
    }
}
