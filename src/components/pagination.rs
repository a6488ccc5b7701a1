use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationOptions {
    pub total_items: u32,
    pub items_per_page: u32,
    pub current_page: u32,
    /// Width of the page-button window
    pub visible_pages: u32,
    pub show_prev_next: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            total_items: 0,
            items_per_page: 10,
            current_page: 1,
            visible_pages: 5,
            show_prev_next: true,
        }
    }
}

/// Number of pages needed for `total_items`; zero items per page yields none
pub fn total_pages(total_items: u32, items_per_page: u32) -> u32 {
    if items_per_page == 0 {
        return 0;
    }
    total_items.div_ceil(items_per_page)
}

/// Page numbers shown around `current`: `visible` wide, clamped to
/// `[1, total]`
pub fn page_window(current: u32, total: u32, visible: u32) -> Vec<u32> {
    if total == 0 || visible == 0 {
        return Vec::new();
    }
    let visible = visible.min(total);
    let start = current.saturating_sub(visible / 2).max(1);
    let end = (start + visible - 1).min(total);
    let start = (end + 1).saturating_sub(visible).max(1);
    (start..=end).collect()
}

/// Page selector. `set_page` is the single entry point for page changes;
/// out-of-range pages and the current page are ignored.
pub struct Pagination {
    options: PaginationOptions,
    handle: Option<NodeId>,
    bindings: Bindings,
    on_page_change: Option<Callback<u32>>,
}

impl Pagination {
    pub fn new(mut options: PaginationOptions) -> Self {
        let pages = total_pages(options.total_items, options.items_per_page);
        options.current_page = options.current_page.clamp(1, pages.max(1));
        Self {
            options,
            handle: None,
            bindings: Bindings::new(),
            on_page_change: None,
        }
    }

    pub fn on_page_change(mut self, f: impl FnMut(&u32) + 'static) -> Self {
        self.on_page_change = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    pub fn current_page(&self) -> u32 {
        self.options.current_page
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.options.total_items, self.options.items_per_page)
    }

    pub fn visible_pages(&self) -> Vec<u32> {
        page_window(
            self.options.current_page,
            self.total_pages(),
            self.options.visible_pages,
        )
    }

    /// Move to `page` and notify. Returns false, changing nothing, when
    /// the page is out of range or already current.
    pub fn set_page(&mut self, host: &mut Host, page: u32) -> bool {
        if page < 1 || page > self.total_pages() || page == self.options.current_page {
            debug!("ignoring page {} (current {})", page, self.options.current_page);
            return false;
        }
        self.options.current_page = page;
        self.rebuild(host);
        emit(&mut self.on_page_change, &page);
        true
    }

    /// Change the item count; the current page is clamped silently
    pub fn set_total_items(&mut self, host: &mut Host, total_items: u32) {
        self.options.total_items = total_items;
        let pages = self.total_pages();
        self.options.current_page = self.options.current_page.clamp(1, pages.max(1));
        self.rebuild(host);
    }

    pub fn page_button(&self, host: &Host, page: u32) -> Option<NodeId> {
        self.handle
            .and_then(|nav| host.document.find_by_attr(nav, "data-page", &page.to_string()))
    }

    pub fn prev_button(&self, host: &Host) -> Option<NodeId> {
        self.handle
            .and_then(|nav| host.document.first_by_class(nav, "page-prev"))
    }

    pub fn next_button(&self, host: &Host) -> Option<NodeId> {
        self.handle
            .and_then(|nav| host.document.first_by_class(nav, "page-next"))
    }

    fn rebuild(&self, host: &mut Host) {
        let Some(nav) = self.handle else {
            return;
        };
        let current = self.options.current_page;
        let pages = self.total_pages();
        let doc = &mut host.document;
        doc.clear_children(nav);

        if self.options.show_prev_next {
            let prev = doc.element("button", "page-btn page-prev", "\u{2039}");
            doc.set_attr(prev, "aria-label", "Previous page");
            doc.set_flag(prev, "disabled", current <= 1);
            doc.append_child(nav, prev);
        }
        for page in self.visible_pages() {
            let button = doc.element("button", "page-btn page-number", &page.to_string());
            doc.set_attr(button, "data-page", page.to_string());
            if page == current {
                doc.add_class(button, "active");
                doc.set_attr(button, "aria-current", "page");
            }
            doc.append_child(nav, button);
        }
        if self.options.show_prev_next {
            let next = doc.element("button", "page-btn page-next", "\u{203A}");
            doc.set_attr(next, "aria-label", "Next page");
            doc.set_flag(next, "disabled", current >= pages);
            doc.append_child(nav, next);
        }
    }
}

impl FromOptions for Pagination {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Pagination {
    fn name(&self) -> &'static str {
        "pagination"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        let nav = host.document.element("nav", "pagination", "");
        host.document.set_attr(nav, "aria-label", "Pagination");
        // one delegated listener survives the button rebuilds
        self.bindings.listen(&mut host.document, nav, EventKind::Click);
        self.handle = Some(nav);
        self.rebuild(host);
        Ok(nav)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let Some(nav) = self.handle else {
            return Ok(ComponentAction::None);
        };
        let doc = &host.document;
        let target = delivery.target();
        let current = self.options.current_page;
        let page = if let Some(button) = doc.closest_with_attr(target, "data-page", nav) {
            doc.attr(button, "data-page").and_then(|p| p.parse().ok())
        } else if doc.closest_with_class(target, "page-prev", nav).is_some() {
            current.checked_sub(1)
        } else if doc.closest_with_class(target, "page-next", nav).is_some() {
            Some(current + 1)
        } else {
            None
        };
        match page {
            Some(page) if self.set_page(host, page) => Ok(ComponentAction::Changed),
            _ => Ok(ComponentAction::None),
        }
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

    fn recording(options: PaginationOptions) -> (Pagination, Rc<RefCell<Vec<u32>>>) {
        let pages = Rc::new(RefCell::new(Vec::new()));
        let sink = pages.clone();
        let pagination = Pagination::new(options).on_page_change(move |p| sink.borrow_mut().push(*p));
        (pagination, pages)
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(95, 10), 10);
        assert_eq!(total_pages(100, 10), 10);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_page_window_is_clamped() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
        assert!(page_window(1, 0, 5).is_empty());
    }

    #[test]
    fn test_set_page_guards() {
        let mut host = Host::new();
        let (mut pagination, pages) = recording(PaginationOptions {
            total_items: 95,
            ..Default::default()
        });
        host.mount(&mut pagination).unwrap();
        assert_eq!(pagination.total_pages(), 10);

        assert!(!pagination.set_page(&mut host, 11));
        assert!(!pagination.set_page(&mut host, 0));
        assert!(!pagination.set_page(&mut host, 1));
        assert_eq!(pagination.current_page(), 1);

        assert!(pagination.set_page(&mut host, 5));
        assert_eq!(*pages.borrow(), vec![5]);
        let button = pagination.page_button(&host, 5).unwrap();
        assert!(host.document.has_class(button, "active"));
    }

    #[test]
    fn test_prev_next_buttons() {
        let mut host = Host::new();
        let (mut pagination, pages) = recording(PaginationOptions {
            total_items: 30,
            ..Default::default()
        });
        host.mount(&mut pagination).unwrap();

        let prev = pagination.prev_button(&host).unwrap();
        assert!(host.document.has_attr(prev, "disabled"));
        host.dispatch(&mut pagination, UiEvent::click(prev)).unwrap();

        for _ in 0..3 {
            let next = pagination.next_button(&host).unwrap();
            host.dispatch(&mut pagination, UiEvent::click(next)).unwrap();
        }
        assert_eq!(pagination.current_page(), 3);
        assert_eq!(*pages.borrow(), vec![2, 3]);

        let one = pagination.page_button(&host, 1).unwrap();
        host.dispatch(&mut pagination, UiEvent::click(one)).unwrap();
        assert_eq!(*pages.borrow(), vec![2, 3, 1]);
    }

    #[test]
    fn test_set_page_before_render() {
        let mut host = Host::new();
        let (mut pagination, pages) = recording(PaginationOptions {
            total_items: 50,
            ..Default::default()
        });
        assert!(pagination.set_page(&mut host, 4));
        host.mount(&mut pagination).unwrap();
        let button = pagination.page_button(&host, 4).unwrap();
        assert!(host.document.has_class(button, "active"));
        assert_eq!(*pages.borrow(), vec![4]);
    }

    #[test]
    fn test_shrinking_total_clamps_current_page() {
        let mut host = Host::new();
        let (mut pagination, pages) = recording(PaginationOptions {
            total_items: 100,
            current_page: 9,
            ..Default::default()
        });
        pagination.set_total_items(&mut host, 20);
        assert_eq!(pagination.current_page(), 2);
        assert!(pages.borrow().is_empty());
    }
}
