//! Behavioural contracts every widget keeps, driven through a real host.
//!
//! Each test mounts widgets on an in-memory page, dispatches events to them
//! the way the showcase does and checks both widget state and the UI tree.

mod common;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::time::Duration;

use common::recorder;
use componentry::components::table::SEARCH_DEBOUNCE;
use componentry::components::*;
use componentry::dom::UiEvent;
use componentry::host::{Clipboard, Host, NoticeVariant};

// ============================================================================
// SETTERS BEFORE RENDER
// ============================================================================

#[test]
fn test_display_widget_setters_apply_on_render() -> Result<()> {
    // Given: display widgets configured through setters before render
    let mut host = Host::new();

    let mut button = Button::new(ButtonOptions::default());
    button.set_text(&mut host, "Save");
    button.set_variant(&mut host, "danger");
    button.set_disabled(&mut host, true);

    let mut card = Card::new(CardOptions::default());
    card.set_title(&mut host, "Quarterly report");
    card.set_content(&mut host, "Revenue is up");

    let mut alert = Alert::new(AlertOptions::default());
    alert.set_message(&mut host, "Disk almost full");
    alert.set_variant(&mut host, NoticeVariant::Warning);

    let mut toast = Toast::new(ToastOptions::default());
    toast.set_message(&mut host, "Saved");

    let mut progress = ProgressBar::new(ProgressOptions::default());
    progress.set_max(&mut host, 200.0);
    progress.set_value(&mut host, 50.0);
    progress.set_variant(&mut host, "success");

    let mut crumbs = Breadcrumbs::new(BreadcrumbsOptions::default());
    crumbs.set_items(
        &mut host,
        vec![Crumb::new("Home", Some("/")), Crumb::new("Docs", None)],
    );

    // When: each is rendered
    let button_node = host.mount(&mut button)?;
    let card_node = host.mount(&mut card)?;
    let alert_node = host.mount(&mut alert)?;
    let toast_node = host.mount(&mut toast)?;
    let progress_node = host.mount(&mut progress)?;
    let crumbs_node = host.mount(&mut crumbs)?;

    // Then: the rendered tree reflects the setters
    let doc = &host.document;
    assert!(doc.text_content(button_node).contains("Save"));
    assert!(doc.has_class(button_node, "btn-danger"));
    assert!(doc.has_attr(button_node, "disabled"));
    assert!(doc.text_content(card_node).contains("Quarterly report"));
    assert!(doc.text_content(card_node).contains("Revenue is up"));
    assert!(doc.text_content(alert_node).contains("Disk almost full"));
    assert!(doc.has_class(alert_node, "alert-warning"));
    assert!(doc.text_content(toast_node).contains("Saved"));
    assert_eq!(progress.percentage(), 25);
    assert!(doc.text_content(progress_node).contains("25%"));
    let text = doc.text_content(crumbs_node);
    assert!(text.contains("Home") && text.contains("Docs"));
    Ok(())
}

#[test]
fn test_input_widget_setters_apply_on_render() -> Result<()> {
    // Given: form widgets configured through setters before render
    let mut host = Host::new();

    let mut input = Input::new(InputOptions::new("text", "city"));
    input.set_value(&mut host, "Lisbon");

    let mut select = Select::new(SelectOptions::default());
    select.set_options(
        &mut host,
        vec![SelectOption::new("pt", "Portugal"), SelectOption::new("es", "Spain")],
    );
    assert!(select.set_value(&mut host, "es"));

    let mut slider = Slider::new(SliderOptions::default());
    slider.set_value(&mut host, 30.0);

    let mut range = RangeSlider::new(RangeSliderOptions {
        min: 0.0,
        max: 100.0,
        step: 1.0,
        low: 10.0,
        high: 90.0,
        ..Default::default()
    });
    range.set_values(&mut host, 25.0, 75.0);

    let mut group = CheckboxGroup::new(CheckboxGroupOptions {
        name: "langs".to_string(),
        options: vec![ChoiceOption::new("rs", "Rust"), ChoiceOption::new("go", "Go")],
        ..Default::default()
    });
    group.set_values(&mut host, &["go"]);

    let mut radios = RadioGroup::new(RadioGroupOptions {
        name: "size".to_string(),
        options: vec![ChoiceOption::new("s", "Small"), ChoiceOption::new("l", "Large")],
        ..Default::default()
    });
    radios.set_value(&mut host, "l");

    // When: each is rendered
    host.mount(&mut input)?;
    host.mount(&mut select)?;
    host.mount(&mut slider)?;
    host.mount(&mut range)?;
    host.mount(&mut group)?;
    host.mount(&mut radios)?;

    // Then: controls carry the values set earlier
    let doc = &host.document;
    let control = input.control().context("input control")?;
    assert_eq!(doc.attr(control, "value"), Some("Lisbon"));
    assert_eq!(select.value(), "es");
    assert_eq!(slider.value(), 30.0);
    let control = slider.control().context("slider control")?;
    assert_eq!(doc.attr(control, "value"), Some("30"));
    assert_eq!(range.values(), (25.0, 75.0));
    assert_eq!(group.values(), ["go".to_string()]);
    assert!(group.children()[1].is_checked());
    assert!(!group.children()[0].is_checked());
    assert_eq!(radios.value(), "l");
    Ok(())
}

#[test]
fn test_navigation_and_overlay_setters_apply_on_render() -> Result<()> {
    // Given: navigational and overlay widgets changed before render
    let mut host = Host::new();

    let mut tabs = Tabs::new(TabsOptions {
        tabs: vec![
            TabItem::new("one", "One", "first"),
            TabItem::new("two", "Two", "second"),
        ],
        active: None,
    });
    assert!(tabs.activate(&mut host, "two"));

    let mut accordion = Accordion::new(AccordionOptions {
        items: vec![
            AccordionItem::new("a", "A", "alpha"),
            AccordionItem::new("b", "B", "beta"),
        ],
        allow_multiple: false,
    });
    accordion.open(&mut host, "b");

    let mut pagination = Pagination::new(PaginationOptions {
        total_items: 50,
        ..Default::default()
    });
    assert!(pagination.set_page(&mut host, 3));

    let mut carousel = Carousel::new(CarouselOptions {
        slides: vec![
            Slide::new("First", "one"),
            Slide::new("Second", "two"),
            Slide::new("Third", "three"),
        ],
        ..Default::default()
    });
    assert!(carousel.go_to(&mut host, 2));

    let mut tooltip = Tooltip::new(TooltipOptions::default());
    tooltip.set_text(&mut host, "More details");
    tooltip.set_placement(&mut host, Placement::Bottom);

    let mut dropdown = Dropdown::new(DropdownOptions::default());
    dropdown.set_label(&mut host, "Actions");

    // When: each is rendered
    host.mount(&mut tabs)?;
    host.mount(&mut accordion)?;
    let nav = host.mount(&mut pagination)?;
    let slides_root = host.mount(&mut carousel)?;
    let tip_root = host.mount(&mut tooltip)?;
    let menu_root = host.mount(&mut dropdown)?;

    // Then: the rendered state matches the pre-render changes
    let doc = &host.document;
    let tab = tabs.tab(&host, "two").context("tab two")?;
    assert!(doc.has_class(tab, "active"));
    assert_eq!(accordion.open_items(), vec!["b"]);
    let header = accordion.header("b").context("header b")?;
    assert!(doc.has_class(header, "active"));
    let page = pagination.page_button(&host, 3).context("page 3")?;
    assert!(doc.has_class(page, "active"));
    assert!(doc.is_descendant(page, nav));
    let slides = doc.find_by_class(slides_root, "carousel-slide");
    assert_eq!(slides.len(), 3);
    assert!(doc.has_class(slides[2], "active"));
    assert_eq!(carousel.current(), 2);
    let tip = doc.first_by_class(tip_root, "tooltip").context("tooltip node")?;
    assert_eq!(doc.text(tip), "More details");
    assert!(doc.has_class(tip, "tooltip-bottom"));
    assert!(doc.text_content(menu_root).contains("Actions"));
    Ok(())
}

// ============================================================================
// REGISTRY
// ============================================================================

#[test]
fn test_duplicate_registration_keeps_first() -> Result<()> {
    // Given: a registry with the built-in widgets
    let mut registry = Registry::with_builtins();
    let before = registry.len();

    // When: a second constructor is registered under an existing name
    let result = registry.register("button", construct::<Card>);

    // Then: the call fails and the original constructor is still used
    assert_eq!(result, Err(RegistryError::Duplicate("button".to_string())));
    assert_eq!(registry.len(), before);
    let component = registry
        .create("button", json!({ "text": "Still a button" }))
        .context("button should be creatable")?;
    assert_eq!(component.name(), "button");
    Ok(())
}

#[test]
fn test_registry_creates_every_builtin_by_name() -> Result<()> {
    // Given: the built-in registry and an empty page
    let registry = Registry::with_builtins();
    let mut host = Host::new();

    // When/Then: every registered name builds and renders from empty options
    for name in registry.names() {
        let mut component = registry
            .create(name, json!({}))
            .with_context(|| format!("create {}", name))?;
        assert_eq!(component.name(), name);
        let handle = host.mount(component.as_mut())?;
        assert!(host.document.is_attached(handle), "{} not attached", name);
        component.destroy(&mut host);
        assert!(!host.document.contains(handle), "{} not removed", name);
    }
    Ok(())
}

#[test]
fn test_unknown_name_and_bad_options_create_nothing() {
    let registry = Registry::with_builtins();
    assert!(registry.create("spinner", json!({})).is_none());
    assert!(registry
        .create("pagination", json!({ "totalItems": "many" }))
        .is_none());
}

// ============================================================================
// PAGINATION
// ============================================================================

#[test]
fn test_pagination_rejects_out_of_range_and_current_page() -> Result<()> {
    // Given: a rendered pagination on page 2 of 5
    let mut host = Host::new();
    let (pages, sink) = recorder::<u32>();
    let mut pagination = Pagination::new(PaginationOptions {
        total_items: 50,
        items_per_page: 10,
        current_page: 2,
        ..Default::default()
    })
    .on_page_change(move |p| sink.borrow_mut().push(*p));
    host.mount(&mut pagination)?;
    let before = host.document.outline(pagination.handle().context("handle")?);

    // When: invalid pages are requested
    let rejected = [0, 6, 2]
        .into_iter()
        .map(|p| pagination.set_page(&mut host, p))
        .collect::<Vec<_>>();

    // Then: nothing changes and no callback fires
    assert_eq!(rejected, vec![false, false, false]);
    assert_eq!(pagination.current_page(), 2);
    assert!(pages.borrow().is_empty());
    let after = host.document.outline(pagination.handle().context("handle")?);
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn test_pagination_ninety_five_items() -> Result<()> {
    // Given: 95 items at 10 per page
    let mut host = Host::new();
    let (pages, sink) = recorder::<u32>();
    let mut pagination = Pagination::new(PaginationOptions {
        total_items: 95,
        items_per_page: 10,
        ..Default::default()
    })
    .on_page_change(move |p| sink.borrow_mut().push(*p));
    host.mount(&mut pagination)?;

    // Then: there are ten pages
    assert_eq!(pagination.total_pages(), 10);

    // When: page 11 is requested
    assert!(!pagination.set_page(&mut host, 11));
    assert_eq!(pagination.current_page(), 1);

    // When: page 5 is requested
    assert!(pagination.set_page(&mut host, 5));

    // Then: the change is reported exactly once
    assert_eq!(pagination.current_page(), 5);
    assert_eq!(*pages.borrow(), vec![5]);
    let button = pagination.page_button(&host, 5).context("page 5")?;
    assert!(host.document.has_class(button, "active"));
    Ok(())
}

#[test]
fn test_pagination_buttons_drive_the_page() -> Result<()> {
    // Given: a rendered pagination on page 1 of 10
    let mut host = Host::new();
    let (pages, sink) = recorder::<u32>();
    let mut pagination = Pagination::new(PaginationOptions {
        total_items: 95,
        items_per_page: 10,
        ..Default::default()
    })
    .on_page_change(move |p| sink.borrow_mut().push(*p));
    host.mount(&mut pagination)?;

    // When: previous is clicked on the first page
    let prev = pagination.prev_button(&host).context("prev")?;
    assert!(host.document.has_attr(prev, "disabled"));
    host.dispatch(&mut pagination, UiEvent::click(prev))?;
    assert_eq!(pagination.current_page(), 1);

    // When: next, then a numbered button are clicked
    let next = pagination.next_button(&host).context("next")?;
    host.dispatch(&mut pagination, UiEvent::click(next))?;
    let three = pagination.page_button(&host, 3).context("page 3")?;
    host.dispatch(&mut pagination, UiEvent::click(three))?;

    // Then: each click moved the page once
    assert_eq!(*pages.borrow(), vec![2, 3]);
    assert_eq!(pagination.visible_pages(), vec![1, 2, 3, 4, 5]);
    Ok(())
}

// ============================================================================
// RANGE SLIDER
// ============================================================================

#[test]
fn test_range_slider_keeps_low_below_high() -> Result<()> {
    // Given: a range slider at 20..60
    let mut host = Host::new();
    let (changes, sink) = recorder::<(f64, f64)>();
    let mut range = RangeSlider::new(RangeSliderOptions {
        min: 0.0,
        max: 100.0,
        step: 5.0,
        low: 20.0,
        high: 60.0,
        ..Default::default()
    })
    .on_change(move |v| sink.borrow_mut().push(*v));
    host.mount(&mut range)?;
    let low = range.low_control().context("low")?;
    let high = range.high_control().context("high")?;

    // When: the low thumb is dragged past the high one
    host.dispatch(&mut range, UiEvent::input(low, "80"))?;
    let (l, h) = range.values();
    assert!(l <= h);
    assert_eq!((l, h), (80.0, 80.0));

    // When: the high thumb is dragged below the low one
    host.dispatch(&mut range, UiEvent::input(high, "10"))?;
    let (l, h) = range.values();
    assert!(l <= h);
    assert_eq!((l, h), (10.0, 10.0));

    // When: a value off the step grid arrives
    host.dispatch(&mut range, UiEvent::input(high, "47"))?;

    // Then: it is snapped and the invariant still holds
    let (l, h) = range.values();
    assert!(l <= h);
    assert_eq!(h % 5.0, 0.0);
    assert_eq!(changes.borrow().len(), 3);
    assert_eq!(host.document.attr(high, "value"), Some(h.to_string().as_str()));
    Ok(())
}

#[test]
fn test_range_slider_set_values_orders_the_pair() -> Result<()> {
    let mut host = Host::new();
    let mut range = RangeSlider::new(RangeSliderOptions::default());
    host.mount(&mut range)?;

    range.set_values(&mut host, 70.0, 30.0);

    let (l, h) = range.values();
    assert!(l <= h);
    Ok(())
}

// ============================================================================
// TABLE
// ============================================================================

fn row(name: &str, team: &str, age: i64) -> Row {
    let mut row = Map::new();
    row.insert("name".to_string(), Value::from(name));
    row.insert("team".to_string(), Value::from(team));
    row.insert("age".to_string(), Value::from(age));
    row
}

fn names(rows: &[&Row]) -> Vec<String> {
    rows.iter()
        .map(|r| r.get("name").and_then(Value::as_str).unwrap_or_default().to_string())
        .collect()
}

fn people_table() -> Table {
    Table::new(TableOptions {
        columns: vec![
            Column::new("name", "Name"),
            Column::new("team", "Team"),
            Column::new("age", "Age"),
        ],
        data: vec![
            row("Ana", "blue", 31),
            row("Ben", "red", 25),
            row("Cai", "blue", 40),
            row("Dee", "red", 22),
            row("Eli", "blue", 35),
        ],
        items_per_page: 10,
        ..Default::default()
    })
}

#[test]
fn test_table_sort_toggles_direction() -> Result<()> {
    // Given: a rendered table
    let mut host = Host::new();
    let mut table = people_table();
    host.mount(&mut table)?;

    // When: sorted by age twice
    table.sort(&mut host, "age");
    let ascending = names(&table.filtered_rows());
    table.sort(&mut host, "age");
    let descending = names(&table.filtered_rows());

    // Then: the second call reverses the first
    assert_eq!(ascending, vec!["Dee", "Ben", "Ana", "Eli", "Cai"]);
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
    assert_eq!(table.sort_state(), Some(("age", SortDirection::Desc)));

    // When: sorted a third time
    table.sort(&mut host, "age");
    assert_eq!(names(&table.filtered_rows()), ascending);
    Ok(())
}

#[test]
fn test_table_sort_is_stable_for_equal_keys() -> Result<()> {
    // Given: rows where several share a team
    let mut host = Host::new();
    let mut table = people_table();
    host.mount(&mut table)?;

    // When: sorted by team in both directions
    table.sort(&mut host, "team");
    let ascending = names(&table.filtered_rows());
    table.sort(&mut host, "team");
    let descending = names(&table.filtered_rows());

    // Then: equal keys keep their original relative order
    assert_eq!(ascending, vec!["Ana", "Cai", "Eli", "Ben", "Dee"]);
    assert_eq!(descending, vec!["Ben", "Dee", "Ana", "Cai", "Eli"]);
    Ok(())
}

#[test]
fn test_table_sorts_columns_with_missing_and_mixed_cells() -> Result<()> {
    // Given: a score column where some rows lack the key and others mix types
    let mut host = Host::new();
    let cells = [
        ("Ana", Some(json!(7))),
        ("Ben", None),
        ("Cai", Some(json!("high"))),
        ("Dee", Some(json!(2))),
        ("Eli", None),
        ("Fay", Some(json!("low"))),
        ("Gus", Some(json!(7))),
    ];
    let data = cells
        .iter()
        .map(|(name, score)| {
            let mut row = Map::new();
            row.insert("name".to_string(), Value::from(*name));
            if let Some(score) = score {
                row.insert("score".to_string(), score.clone());
            }
            row
        })
        .collect();
    let mut table = Table::new(TableOptions {
        columns: vec![Column::new("name", "Name"), Column::new("score", "Score")],
        data,
        items_per_page: 10,
        ..Default::default()
    });
    host.mount(&mut table)?;

    // When: sorted by score in both directions
    table.sort(&mut host, "score");
    let ascending = names(&table.filtered_rows());
    table.sort(&mut host, "score");
    let descending = names(&table.filtered_rows());

    // Then: missing cells come first, then numbers, then strings, and equal
    // keys keep their original order either way
    assert_eq!(ascending, vec!["Ben", "Eli", "Dee", "Ana", "Gus", "Cai", "Fay"]);
    assert_eq!(descending, vec!["Fay", "Cai", "Ana", "Gus", "Dee", "Ben", "Eli"]);

    // When: sorted again
    table.sort(&mut host, "score");
    assert_eq!(names(&table.filtered_rows()), ascending);
    Ok(())
}

#[test]
fn test_table_header_click_sorts_and_marks_column() -> Result<()> {
    let mut host = Host::new();
    let mut table = people_table();
    host.mount(&mut table)?;
    let header = table.header(&host, "name").context("name header")?;

    host.dispatch(&mut table, UiEvent::click(header))?;
    assert_eq!(table.sort_state(), Some(("name", SortDirection::Asc)));
    assert!(host.document.has_class(header, "sort-asc"));

    host.dispatch(&mut table, UiEvent::click(header))?;
    assert_eq!(table.sort_state(), Some(("name", SortDirection::Desc)));
    assert!(host.document.has_class(header, "sort-desc"));
    assert!(!host.document.has_class(header, "sort-asc"));
    Ok(())
}

#[test]
fn test_table_search_narrows_rows_and_resets_page() -> Result<()> {
    // Given: a table showing two rows per page, on page 2
    let mut host = Host::new();
    let mut table = Table::new(TableOptions {
        items_per_page: 2,
        ..people_table().options().clone()
    });
    host.mount(&mut table)?;
    assert!(table.set_page(&mut host, 2));

    // When: searching by team
    table.search(&mut host, "RED");

    // Then: only matching rows remain, from the first page
    assert_eq!(table.page(), 1);
    assert_eq!(names(&table.filtered_rows()), vec!["Ben", "Dee"]);
    assert_eq!(table.page_count(), 1);
    Ok(())
}

#[test]
fn test_table_search_input_is_debounced() -> Result<()> {
    // Given: a rendered table with a search box
    let mut host = Host::new();
    let mut table = people_table();
    host.mount(&mut table)?;
    let input = table.search_input().context("search input")?;

    // When: typing, then waiting less than the debounce
    host.dispatch(&mut table, UiEvent::input(input, "ana"))?;
    host.advance(&mut table, SEARCH_DEBOUNCE - Duration::from_millis(1))?;
    assert_eq!(table.filtered_rows().len(), 5);

    // Then: the term applies once the debounce has elapsed
    host.advance(&mut table, Duration::from_millis(1))?;
    assert_eq!(table.search_term(), "ana");
    assert_eq!(names(&table.filtered_rows()), vec!["Ana"]);
    Ok(())
}

// ============================================================================
// ACCORDION AND TABS
// ============================================================================

#[test]
fn test_accordion_single_open() -> Result<()> {
    // Given: an accordion that allows one open item
    let mut host = Host::new();
    let (toggles, sink) = recorder::<(String, bool)>();
    let mut accordion = Accordion::new(AccordionOptions {
        items: vec![
            AccordionItem::new("a", "First", "one"),
            AccordionItem::new("b", "Second", "two"),
            AccordionItem::new("c", "Third", "three"),
        ],
        allow_multiple: false,
    })
    .on_toggle(move |t| sink.borrow_mut().push(t.clone()));
    host.mount(&mut accordion)?;

    // When: A is opened, then B
    let a = accordion.header("a").context("header a")?;
    let b = accordion.header("b").context("header b")?;
    host.dispatch(&mut accordion, UiEvent::click(a))?;
    assert_eq!(accordion.open_items(), vec!["a"]);
    host.dispatch(&mut accordion, UiEvent::click(b))?;

    // Then: only B is open
    assert_eq!(accordion.open_items(), vec!["b"]);
    assert!(!host.document.has_class(a, "active"));
    assert!(host.document.has_class(b, "active"));
    assert_eq!(
        *toggles.borrow(),
        vec![("a".to_string(), true), ("b".to_string(), true)]
    );

    // When: B is clicked again
    host.dispatch(&mut accordion, UiEvent::click(b))?;
    assert!(accordion.open_items().is_empty());
    Ok(())
}

#[test]
fn test_accordion_multiple_keeps_others_open() -> Result<()> {
    let mut host = Host::new();
    let mut accordion = Accordion::new(AccordionOptions {
        items: vec![
            AccordionItem::new("a", "First", "one"),
            AccordionItem::new("b", "Second", "two"),
        ],
        allow_multiple: true,
    });
    host.mount(&mut accordion)?;

    accordion.open(&mut host, "a");
    accordion.open(&mut host, "b");

    assert_eq!(accordion.open_items(), vec!["a", "b"]);
    Ok(())
}

#[test]
fn test_tabs_bound_to_existing_markup() -> Result<()> {
    // Given: markup for tabs a, b, c with b marked active
    let mut host = Host::new();
    let doc = &mut host.document;
    let container = doc.element("div", "tabs", "");
    let strip = doc.element("div", "tab-list", "");
    doc.append_child(container, strip);
    for id in ["a", "b", "c"] {
        let tab = doc.element("button", "tab", &id.to_uppercase());
        doc.set_attr(tab, "data-tab", id);
        if id == "b" {
            doc.add_class(tab, "active");
        }
        doc.append_child(strip, tab);
        let panel = doc.element("div", "tab-content", &format!("panel {}", id));
        doc.set_attr(panel, "id", id);
        doc.append_child(container, panel);
    }
    let root = doc.root();
    doc.append_child(root, container);

    // When: the tabs are bound
    let (changes, sink) = recorder::<String>();
    let mut tabs = Tabs::mount(&mut host, container)
        .context("markup has tabs")?
        .on_change(move |id| sink.borrow_mut().push(id.to_string()));

    // Then: b is the active tab
    assert_eq!(tabs.active(), Some("b"));
    assert!(changes.borrow().is_empty());

    // When: tab c is clicked
    let c = tabs.tab(&host, "c").context("tab c")?;
    host.dispatch(&mut tabs, UiEvent::click(c))?;

    // Then: c is active and the change fired once
    assert_eq!(tabs.active(), Some("c"));
    assert_eq!(*changes.borrow(), vec!["c".to_string()]);
    assert!(host.document.has_class(c, "active"));
    let panel = tabs.panel(&host, "c").context("panel c")?;
    assert!(host.document.has_class(panel, "active"));
    Ok(())
}

#[test]
fn test_tabs_change_fires_on_active_tab_click() -> Result<()> {
    let mut host = Host::new();
    let (changes, sink) = recorder::<String>();
    let mut tabs = Tabs::new(TabsOptions {
        tabs: vec![TabItem::new("x", "X", "ex"), TabItem::new("y", "Y", "why")],
        active: None,
    })
    .on_change(move |id| sink.borrow_mut().push(id.to_string()));
    host.mount(&mut tabs)?;

    let x = tabs.tab(&host, "x").context("tab x")?;
    host.dispatch(&mut tabs, UiEvent::click(x))?;

    assert_eq!(tabs.active(), Some("x"));
    assert_eq!(*changes.borrow(), vec!["x".to_string()]);
    Ok(())
}

// ============================================================================
// CHECKBOX GROUP
// ============================================================================

#[test]
fn test_checkbox_group_aggregate_follows_option_order() -> Result<()> {
    // Given: a group with options a, b, c and nothing checked
    let mut host = Host::new();
    let (changes, sink) = recorder::<Vec<String>>();
    let mut group = CheckboxGroup::new(CheckboxGroupOptions {
        name: "letters".to_string(),
        options: vec![
            ChoiceOption::new("a", "A"),
            ChoiceOption::new("b", "B"),
            ChoiceOption::new("c", "C"),
        ],
        ..Default::default()
    })
    .on_change(move |v| sink.borrow_mut().push(v.to_vec()));
    host.mount(&mut group)?;
    let control = |group: &CheckboxGroup, i: usize| group.children()[i].control();

    // When: c is toggled on, then a
    let c = control(&group, 2).context("control c")?;
    let a = control(&group, 0).context("control a")?;
    host.dispatch(&mut group, UiEvent::click(c))?;
    host.dispatch(&mut group, UiEvent::click(a))?;

    // Then: the aggregate lists them in option order
    assert_eq!(group.values(), ["a".to_string(), "c".to_string()]);

    // When: a is toggled off again
    host.dispatch(&mut group, UiEvent::click(a))?;

    // Then: only c remains
    assert_eq!(group.values(), ["c".to_string()]);
    assert_eq!(changes.borrow().len(), 3);
    assert_eq!(changes.borrow().last().cloned(), Some(vec!["c".to_string()]));
    Ok(())
}

// ============================================================================
// COPY CONFIRMATION
// ============================================================================

#[test]
fn test_copy_confirmation_reverts_after_feedback_duration() -> Result<()> {
    // Given: a rendered copy button with the default feedback duration
    let mut host = Host::new();
    let mut button = CopyButton::for_code("fn main() {}");
    let node = host.mount(&mut button)?;
    assert_eq!(host.document.text(node), "Copy");

    // When: the button is clicked
    host.dispatch(&mut button, UiEvent::click(node))?;

    // Then: the confirmation shows until 2000ms have passed
    assert_eq!(host.document.text(node), "Copied!");
    assert!(host.document.has_class(node, "copied"));
    assert!(button.is_confirming());
    host.advance(&mut button, Duration::from_millis(1999))?;
    assert_eq!(host.document.text(node), "Copied!");

    host.advance(&mut button, Duration::from_millis(1))?;
    assert_eq!(host.document.text(node), "Copy");
    assert!(!host.document.has_class(node, "copied"));
    assert!(!button.is_confirming());
    assert_eq!(host.clipboard().read_text().as_deref(), Some("fn main() {}"));
    Ok(())
}

#[test]
fn test_failed_copy_shows_error_without_confirmation() -> Result<()> {
    // Given: a page where no copy mechanism works
    let mut host = common::host_without_clipboard();
    let mut button = CopyButton::for_code("let x = 1;");
    let node = host.mount(&mut button)?;

    // When: the button is clicked
    host.dispatch(&mut button, UiEvent::click(node))?;

    // Then: an error notice appears and the label is unchanged
    assert_eq!(host.document.text(node), "Copy");
    let notices = host.notices.active();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].variant, NoticeVariant::Error);
    Ok(())
}

// ============================================================================
// OVERLAYS
// ============================================================================

#[test]
fn test_modal_escape_closes_after_transition() -> Result<()> {
    // Given: an open modal
    let mut host = Host::new();
    let mut modal = Modal::new(ModalOptions {
        title: "Confirm".to_string(),
        ..Default::default()
    });
    host.mount(&mut modal)?;
    modal.open(&mut host);
    host.advance(&mut modal, Duration::from_millis(10))?;
    assert_eq!(modal.state(), OverlayState::Open);

    // When: Escape is pressed anywhere on the page
    let root = host.root();
    host.dispatch(&mut modal, UiEvent::key(root, componentry::Key::Escape))?;

    // Then: it is closing and closes after the transition
    assert_eq!(modal.state(), OverlayState::Closing);
    host.advance(&mut modal, Duration::from_millis(300))?;
    assert_eq!(modal.state(), OverlayState::Closed);
    assert!(!modal.is_open());
    Ok(())
}
