use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

impl Crumb {
    pub fn new(label: &str, href: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            href: href.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbsOptions {
    pub items: Vec<Crumb>,
    pub separator: String,
}

impl Default for BreadcrumbsOptions {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            separator: "/".to_string(),
        }
    }
}

pub struct Breadcrumbs {
    options: BreadcrumbsOptions,
    handle: Option<NodeId>,
    list: Option<NodeId>,
    bindings: Bindings,
    on_navigate: Option<Callback<usize>>,
}

impl Breadcrumbs {
    pub fn new(options: BreadcrumbsOptions) -> Self {
        Self {
            options,
            handle: None,
            list: None,
            bindings: Bindings::new(),
            on_navigate: None,
        }
    }

    /// Called with the index of a clicked, non-current crumb
    pub fn on_navigate(mut self, f: impl FnMut(&usize) + 'static) -> Self {
        self.on_navigate = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &BreadcrumbsOptions {
        &self.options
    }

    pub fn set_items(&mut self, host: &mut Host, items: Vec<Crumb>) {
        self.options.items = items;
        if self.list.is_some() {
            self.build_items(host);
        }
    }

    fn build_items(&mut self, host: &mut Host) {
        let Some(list) = self.list else {
            return;
        };
        let doc = &mut host.document;
        self.bindings.release_listeners(doc);
        doc.clear_children(list);

        let last = self.options.items.len().saturating_sub(1);
        for (index, crumb) in self.options.items.iter().enumerate() {
            if index > 0 {
                let sep = doc.element("li", "breadcrumb-separator", &self.options.separator);
                doc.set_attr(sep, "aria-hidden", "true");
                doc.append_child(list, sep);
            }
            let item = doc.element("li", "breadcrumb-item", "");
            if index == last {
                doc.add_class(item, "active");
                doc.set_attr(item, "aria-current", "page");
                doc.set_text(item, crumb.label.clone());
            } else {
                let link = doc.element("a", "breadcrumb-link", &crumb.label);
                doc.set_attr(link, "href", crumb.href.clone().unwrap_or_else(|| "#".to_string()));
                doc.set_attr(link, "data-index", index.to_string());
                doc.append_child(item, link);
                self.bindings.listen(doc, link, EventKind::Click);
            }
            doc.append_child(list, item);
        }
    }
}

impl FromOptions for Breadcrumbs {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Breadcrumbs {
    fn name(&self) -> &'static str {
        "breadcrumbs"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let doc = &mut host.document;
        let nav = doc.element("nav", "breadcrumbs", "");
        doc.set_attr(nav, "aria-label", "Breadcrumb");
        let list = doc.element("ol", "breadcrumb-list", "");
        doc.append_child(nav, list);

        self.handle = Some(nav);
        self.list = Some(list);
        self.build_items(host);
        Ok(nav)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(index) = host
            .document
            .attr(delivery.current_target, "data-index")
            .and_then(|v| v.parse::<usize>().ok())
        else {
            return Ok(ComponentAction::None);
        };
        emit(&mut self.on_navigate, &index);
        Ok(ComponentAction::Activated)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.list = None;
    }
}
