use super::component::{emit, Bindings, Callback, Component, ComponentAction};
use super::options::{resolve, OptionsError};
use super::registry::FromOptions;
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::Host;
use crate::timers::TimerId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Quiet period before search input is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub type Row = Map<String, Value>;

static MISSING: Value = Value::Null;

/// Produces the display text of a cell from its raw value and its row
pub type CellRenderer = Box<dyn Fn(&Value, &Row) -> String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub sortable: bool,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            key: String::new(),
            label: String::new(),
            sortable: true,
        }
    }
}

impl Column {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    pub columns: Vec<Column>,
    pub data: Vec<Row>,
    pub items_per_page: usize,
    pub searchable: bool,
    pub search_placeholder: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            data: Vec::new(),
            items_per_page: 10,
            searchable: true,
            search_placeholder: "Search...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn class(self) -> &'static str {
        match self {
            SortDirection::Asc => "sort-asc",
            SortDirection::Desc => "sort-desc",
        }
    }
}

/// Order of value kinds when a column mixes types. Missing cells are null
/// and sort first.
fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Three-way comparison of raw cell values. Values of different kinds are
/// ordered by kind (null, bool, number, string, array, object); numbers
/// compare numerically, strings and booleans by their natural order, and
/// arrays or objects are equal to each other.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Plain display text of a raw value
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether any field of `row` contains `term`, ignoring case
pub fn row_matches(row: &Row, term: &str) -> bool {
    let term = term.to_lowercase();
    term.is_empty()
        || row
            .values()
            .any(|v| cell_text(v).to_lowercase().contains(&term))
}

/// Sortable, searchable, paged data table.
///
/// Rows are kept in their sorted order; search narrows the rendered rows
/// and resets to the first page.
pub struct Table {
    options: TableOptions,
    renderers: HashMap<String, CellRenderer>,
    sort: Option<(String, SortDirection)>,
    term: String,
    pending_term: Option<String>,
    page: usize,
    handle: Option<NodeId>,
    search: Option<NodeId>,
    head: Option<NodeId>,
    body: Option<NodeId>,
    info: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    search_timer: Option<TimerId>,
    bindings: Bindings,
    row_listeners: Vec<ListenerId>,
    on_row_click: Option<Callback<Row>>,
}

impl Table {
    pub fn new(options: TableOptions) -> Self {
        Self {
            options,
            renderers: HashMap::new(),
            sort: None,
            term: String::new(),
            pending_term: None,
            page: 1,
            handle: None,
            search: None,
            head: None,
            body: None,
            info: None,
            prev: None,
            next: None,
            search_timer: None,
            bindings: Bindings::new(),
            row_listeners: Vec::new(),
            on_row_click: None,
        }
    }

    /// Render the cells of column `key` through `renderer`
    pub fn with_renderer(
        mut self,
        key: &str,
        renderer: impl Fn(&Value, &Row) -> String + 'static,
    ) -> Self {
        self.renderers.insert(key.to_string(), Box::new(renderer));
        self
    }

    pub fn on_row_click(mut self, f: impl FnMut(&Row) + 'static) -> Self {
        self.on_row_click = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn sort_state(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(k, d)| (k.as_str(), *d))
    }

    pub fn search_term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn search_input(&self) -> Option<NodeId> {
        self.search
    }

    /// Header cell of column `key`
    pub fn header(&self, host: &Host, key: &str) -> Option<NodeId> {
        self.head
            .and_then(|head| host.document.find_by_attr(head, "data-key", key))
    }

    pub fn prev_button(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next_button(&self) -> Option<NodeId> {
        self.next
    }

    /// Rows matching the current search, in sorted order
    pub fn filtered_rows(&self) -> Vec<&Row> {
        self.options
            .data
            .iter()
            .filter(|row| row_matches(row, &self.term))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        let per_page = self.options.items_per_page.max(1);
        self.filtered_rows().len().div_ceil(per_page).max(1)
    }

    /// Rows of the current page
    pub fn visible_rows(&self) -> Vec<&Row> {
        let per_page = self.options.items_per_page.max(1);
        self.filtered_rows()
            .into_iter()
            .skip((self.page - 1) * per_page)
            .take(per_page)
            .collect()
    }

    /// Display text of one cell, through the column renderer if any
    pub fn render_cell(&self, key: &str, row: &Row) -> String {
        let value = row.get(key).unwrap_or(&MISSING);
        match self.renderers.get(key) {
            Some(renderer) => renderer(value, row),
            None => cell_text(value),
        }
    }

    /// Sort by `key`, ascending, or reverse the direction when already
    /// sorted by it
    pub fn sort(&mut self, host: &mut Host, key: &str) {
        let direction = match &self.sort {
            Some((current, SortDirection::Asc)) if current == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.options.data.sort_by(|a, b| {
            let ordering = compare_values(
                a.get(key).unwrap_or(&MISSING),
                b.get(key).unwrap_or(&MISSING),
            );
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        debug!("sorted table by {} {:?}", key, direction);
        self.sort = Some((key.to_string(), direction));
        self.sync_header(host);
        self.rebuild_rows(host);
    }

    /// Apply a search term now, returning to the first page
    pub fn search(&mut self, host: &mut Host, term: &str) {
        self.bindings.cancel(&mut host.timers, &mut self.search_timer);
        self.pending_term = None;
        self.term = term.trim().to_string();
        self.page = 1;
        if let Some(input) = self.search {
            host.document.set_attr(input, "value", term);
        }
        self.rebuild_rows(host);
    }

    pub fn set_page(&mut self, host: &mut Host, page: usize) -> bool {
        if page < 1 || page > self.page_count() || page == self.page {
            return false;
        }
        self.page = page;
        self.rebuild_rows(host);
        true
    }

    /// Replace the rows; the current sort is reapplied
    pub fn set_data(&mut self, host: &mut Host, data: Vec<Row>) {
        self.options.data = data;
        self.page = 1;
        if let Some((key, direction)) = self.sort.take() {
            // sort() flips an ascending sort, so seed the opposite state
            self.sort = match direction {
                SortDirection::Asc => None,
                SortDirection::Desc => Some((key.clone(), SortDirection::Asc)),
            };
            self.sort(host, &key);
        } else {
            self.rebuild_rows(host);
        }
    }

    fn sync_header(&self, host: &mut Host) {
        let Some(head) = self.head else {
            return;
        };
        let doc = &mut host.document;
        for th in doc.query_all(head, |d, n| d.has_attr(n, "data-key")) {
            doc.remove_class(th, "sort-asc");
            doc.remove_class(th, "sort-desc");
            if let Some((key, direction)) = &self.sort {
                if doc.attr(th, "data-key") == Some(key.as_str()) {
                    doc.add_class(th, direction.class());
                }
            }
        }
    }

    fn rebuild_rows(&mut self, host: &mut Host) {
        let Some(body) = self.body else {
            return;
        };
        for id in self.row_listeners.drain(..) {
            self.bindings.unlisten(&mut host.document, id);
        }
        let total = self.filtered_rows().len();
        let per_page = self.options.items_per_page.max(1);
        let first = (self.page - 1) * per_page;

        let rows: Vec<Vec<String>> = self
            .visible_rows()
            .into_iter()
            .map(|row| {
                self.options
                    .columns
                    .iter()
                    .map(|c| self.render_cell(&c.key, row))
                    .collect()
            })
            .collect();

        let doc = &mut host.document;
        doc.clear_children(body);
        if rows.is_empty() {
            let tr = doc.element("tr", "table-empty", "");
            let td = doc.element("td", "", "No matching records");
            doc.set_attr(td, "colspan", self.options.columns.len().to_string());
            doc.append_child(tr, td);
            doc.append_child(body, tr);
        }
        for (offset, cells) in rows.into_iter().enumerate() {
            let tr = doc.element("tr", "", "");
            doc.set_attr(tr, "data-row", (first + offset).to_string());
            for text in cells {
                let td = doc.element("td", "", &text);
                doc.append_child(tr, td);
            }
            doc.append_child(body, tr);
            if let Some(id) = self.bindings.listen(doc, tr, EventKind::Click) {
                self.row_listeners.push(id);
            }
        }

        if let Some(info) = self.info {
            let label = if total == 0 {
                "No entries".to_string()
            } else {
                format!(
                    "Showing {}\u{2013}{} of {}",
                    first + 1,
                    (first + per_page).min(total),
                    total
                )
            };
            doc.set_text(info, label);
        }
        let pages = total.div_ceil(per_page).max(1);
        if let Some(prev) = self.prev {
            doc.set_flag(prev, "disabled", self.page <= 1);
        }
        if let Some(next) = self.next {
            doc.set_flag(next, "disabled", self.page >= pages);
        }
    }
}

impl FromOptions for Table {
    fn from_options(options: Value) -> Result<Self, OptionsError> {
        Ok(Self::new(resolve(options)?))
    }
}

impl Component for Table {
    fn name(&self) -> &'static str {
        "table"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        self.bindings.teardown(host, self.handle.take());
        self.row_listeners.clear();
        self.search_timer = None;
        self.pending_term = None;

        let doc = &mut host.document;
        let wrapper = doc.element("div", "table-wrapper", "");
        self.search = None;
        if self.options.searchable {
            let input = doc.element("input", "table-search form-input", "");
            doc.set_attr(input, "type", "search");
            doc.set_attr(input, "placeholder", self.options.search_placeholder.clone());
            doc.set_attr(input, "value", self.term.clone());
            doc.append_child(wrapper, input);
            self.bindings.listen(doc, input, EventKind::Input);
            self.search = Some(input);
        }

        let table = doc.element("table", "data-table", "");
        let thead = doc.element("thead", "", "");
        let head_row = doc.element("tr", "", "");
        for column in &self.options.columns {
            let th = doc.element("th", "", &column.label);
            doc.set_attr(th, "data-key", column.key.clone());
            if column.sortable {
                doc.add_class(th, "sortable");
                self.bindings.listen(doc, th, EventKind::Click);
            }
            doc.append_child(head_row, th);
        }
        doc.append_child(thead, head_row);
        let tbody = doc.element("tbody", "", "");
        doc.append_child(table, thead);
        doc.append_child(table, tbody);
        doc.append_child(wrapper, table);

        let footer = doc.element("div", "table-footer", "");
        let info = doc.element("span", "table-info", "");
        let prev = doc.element("button", "table-prev", "Previous");
        let next = doc.element("button", "table-next", "Next");
        doc.append_child(footer, info);
        doc.append_child(footer, prev);
        doc.append_child(footer, next);
        doc.append_child(wrapper, footer);
        self.bindings.listen(doc, prev, EventKind::Click);
        self.bindings.listen(doc, next, EventKind::Click);

        self.handle = Some(wrapper);
        self.head = Some(thead);
        self.body = Some(tbody);
        self.info = Some(info);
        self.prev = Some(prev);
        self.next = Some(next);
        self.sync_header(host);
        self.rebuild_rows(host);
        Ok(wrapper)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        let node = delivery.current_target;
        if Some(node) == self.search {
            let term = delivery.event.value.clone().unwrap_or_default();
            self.bindings.cancel(&mut host.timers, &mut self.search_timer);
            self.pending_term = Some(term);
            self.search_timer = Some(self.bindings.schedule(&mut host.timers, SEARCH_DEBOUNCE));
            return Ok(ComponentAction::None);
        }
        if Some(node) == self.prev {
            let page = self.page.saturating_sub(1);
            return Ok(if self.set_page(host, page) {
                ComponentAction::Update
            } else {
                ComponentAction::None
            });
        }
        if Some(node) == self.next {
            let page = self.page + 1;
            return Ok(if self.set_page(host, page) {
                ComponentAction::Update
            } else {
                ComponentAction::None
            });
        }
        if let Some(key) = host.document.attr(node, "data-key").map(str::to_string) {
            self.sort(host, &key);
            return Ok(ComponentAction::Update);
        }
        if let Some(index) = host
            .document
            .attr(node, "data-row")
            .and_then(|r| r.parse::<usize>().ok())
        {
            let Some(row) = self.filtered_rows().get(index).map(|r| (*r).clone()) else {
                warn!("Table row {} is no longer present", index);
                return Ok(ComponentAction::None);
            };
            emit(&mut self.on_row_click, &row);
            return Ok(ComponentAction::Activated);
        }
        Ok(ComponentAction::None)
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        self.bindings.fired(timer);
        if self.search_timer != Some(timer) {
            return Ok(ComponentAction::None);
        }
        self.search_timer = None;
        if let Some(term) = self.pending_term.take() {
            self.term = term.trim().to_string();
            self.page = 1;
            debug!("table search '{}' matched {} rows", self.term, self.filtered_rows().len());
            self.rebuild_rows(host);
        }
        Ok(ComponentAction::Update)
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.bindings.owns_timer(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        self.bindings.teardown(host, self.handle.take());
        self.row_listeners.clear();
        self.search_timer = None;
        self.search = None;
        self.head = None;
        self.body = None;
        self.info = None;
        self.prev = None;
        self.next = None;
    }
}
