//! The showcase page: every widget demo, the code samples, the icon
//! gallery, the contact form and the blob animation, wired to one host.
//!
//! Page-level helpers are methods here rather than free functions, so the
//! TUI, the CLI and the tests all drive the same controller.

use crate::blob::BlobField;
use crate::components::{
    Accordion, AccordionItem, AccordionOptions, Button, ButtonOptions, Component,
    ComponentAction, CopyButton, CopyButtonOptions, Modal, ModalOptions, Registry, TabItem, Tabs,
    TabsOptions,
};
use crate::config::Config;
use crate::contact::{ContactForm, ContactFormOptions, SimulatedTransport, Transport};
use crate::dom::{NodeId, UiEvent};
use crate::highlight::Highlighter;
use crate::host::{CopyOutcome, Host, NoticeVariant};
use crate::icons::{GalleryOptions, Glyphs, IconGallery};
use crate::samples::Framework;
use anyhow::{Context, Result};
use ratatui::text::Line;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Storage key of the selected code-sample framework
pub const PREFERENCE_KEY: &str = "preferred-framework";

/// Registry names demonstrated in the components section, in page order
pub const DEMOS: [&str; 21] = [
    "button",
    "card",
    "breadcrumbs",
    "progress",
    "alert",
    "input",
    "select",
    "checkbox",
    "checkbox-group",
    "radio",
    "radio-group",
    "slider",
    "range-slider",
    "tabs",
    "accordion",
    "pagination",
    "dropdown",
    "tooltip",
    "table",
    "carousel",
    "copy-button",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Components,
    Code,
    Icons,
    Contact,
    Blobs,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Components,
        Section::Code,
        Section::Icons,
        Section::Contact,
        Section::Blobs,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Components => "components",
            Section::Code => "code",
            Section::Icons => "icons",
            Section::Contact => "contact",
            Section::Blobs => "blobs",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Components => "Components",
            Section::Code => "Code Examples",
            Section::Icons => "Icons",
            Section::Contact => "Contact",
            Section::Blobs => "Blobs",
        }
    }
}

/// Options each demo is created with
pub fn demo_options(name: &str) -> Value {
    match name {
        "button" => json!({ "text": "Get Started", "variant": "primary" }),
        "card" => json!({
            "title": "Card Title",
            "content": "Cards group related content and actions.",
            "actions": [
                { "text": "Learn More", "variant": "primary" },
                { "text": "Dismiss", "variant": "secondary" }
            ]
        }),
        "breadcrumbs" => json!({
            "items": [
                { "label": "Home", "href": "/" },
                { "label": "Components", "href": "/components" },
                { "label": "Breadcrumbs" }
            ]
        }),
        "progress" => json!({ "value": 65, "showLabel": true, "variant": "primary" }),
        "alert" => json!({
            "title": "Heads up",
            "message": "This alert stays until you dismiss it.",
            "variant": "info",
            "dismissible": true,
            "autoDismiss": null
        }),
        "input" => json!({
            "type": "email",
            "name": "demo-email",
            "label": "Email",
            "placeholder": "you@example.com",
            "required": true
        }),
        "select" => json!({
            "name": "framework",
            "placeholder": "Choose a framework",
            "options": [
                { "value": "react", "label": "React" },
                { "value": "vue", "label": "Vue" },
                { "value": "svelte", "label": "Svelte" },
                { "value": "angular", "label": "Angular", "disabled": true }
            ]
        }),
        "checkbox" => json!({ "name": "terms", "label": "I accept the terms", "value": "yes" }),
        "checkbox-group" => json!({
            "name": "features",
            "label": "Features",
            "options": [
                { "value": "dark-mode", "label": "Dark mode" },
                { "value": "rtl", "label": "Right-to-left" },
                { "value": "a11y", "label": "Accessibility" }
            ],
            "value": ["dark-mode"]
        }),
        "radio" => json!({ "name": "newsletter", "label": "Subscribe to the newsletter", "value": "yes" }),
        "radio-group" => json!({
            "name": "plan",
            "label": "Plan",
            "options": [
                { "value": "free", "label": "Free" },
                { "value": "pro", "label": "Pro" },
                { "value": "team", "label": "Team" }
            ],
            "value": "pro"
        }),
        "slider" => json!({
            "label": "Volume",
            "min": 0,
            "max": 100,
            "step": 5,
            "value": 40,
            "showValue": true
        }),
        "range-slider" => json!({
            "label": "Price",
            "min": 0,
            "max": 1000,
            "step": 10,
            "low": 200,
            "high": 800
        }),
        "tabs" => json!({
            "tabs": [
                { "id": "overview", "label": "Overview", "content": "Tabs switch between panels." },
                { "id": "usage", "label": "Usage", "content": "Click a tab to show its panel." },
                { "id": "api", "label": "API", "content": "onChange receives the tab id." }
            ]
        }),
        "accordion" => json!({
            "items": [
                { "id": "what", "title": "What is this?", "content": "A library of UI components.", "open": true },
                { "id": "how", "title": "How do I use it?", "content": "Create a component and render it." },
                { "id": "why", "title": "Why?", "content": "Consistent behaviour everywhere." }
            ]
        }),
        "pagination" => json!({ "totalItems": 95, "itemsPerPage": 10, "currentPage": 1 }),
        "dropdown" => json!({
            "label": "Actions",
            "items": [
                { "label": "Edit", "value": "edit" },
                { "label": "Duplicate", "value": "duplicate" },
                { "label": "Delete", "value": "delete", "disabled": true }
            ]
        }),
        "tooltip" => json!({
            "label": "Show hint",
            "text": "Tooltips explain controls.",
            "placement": "top",
            "trigger": "click"
        }),
        "table" => json!({
            "columns": [
                { "key": "name", "label": "Name", "sortable": true },
                { "key": "role", "label": "Role", "sortable": true },
                { "key": "joined", "label": "Joined", "sortable": true }
            ],
            "data": table_rows(),
            "itemsPerPage": 5,
            "searchable": true
        }),
        "carousel" => json!({
            "slides": [
                { "title": "Fast", "content": "Small components that render quickly." },
                { "title": "Accessible", "content": "Keyboard friendly by default." },
                { "title": "Themeable", "content": "Variants for every state." }
            ],
            "loop": true
        }),
        "copy-button" => json!({ "content": "npm install componentry", "text": "Copy install command" }),
        _ => json!({}),
    }
}

fn table_rows() -> Value {
    let people = [
        ("Ada Lovelace", "Engineer", 2019),
        ("Grace Hopper", "Admiral", 2017),
        ("Alan Turing", "Researcher", 2021),
        ("Linus Torvalds", "Maintainer", 2018),
        ("Margaret Hamilton", "Director", 2016),
        ("Ken Thompson", "Engineer", 2020),
        ("Barbara Liskov", "Professor", 2015),
        ("Dennis Ritchie", "Engineer", 2019),
    ];
    Value::Array(
        people
            .iter()
            .map(|(name, role, joined)| json!({ "name": name, "role": role, "joined": joined }))
            .collect(),
    )
}

const FAQ: [(&str, &str, &str); 3] = [
    (
        "install",
        "How do I install the components?",
        "Copy the sample for your framework from the code tabs.",
    ),
    (
        "theme",
        "Can I change the look?",
        "Every component takes a variant and a size.",
    ),
    (
        "a11y",
        "Are the components accessible?",
        "Controls carry ARIA attributes and respond to the keyboard.",
    ),
];

/// A registry-created widget mounted in the components section
pub struct Demo {
    pub name: &'static str,
    pub component: Box<dyn Component>,
    /// Wrapper holding the demo heading and the component
    pub container: NodeId,
}

/// Flags raised by callbacks during a dispatch and consumed right after
#[derive(Default)]
struct Signals {
    framework: RefCell<Option<String>>,
    faq_opened: Cell<bool>,
    open_modal: Cell<bool>,
}

pub struct Showcase {
    host: Host,
    registry: Registry,
    sections: Vec<(Section, NodeId)>,
    demos: Vec<Demo>,
    toasts: Vec<Box<dyn Component>>,
    modal: Modal,
    modal_button: Button,
    code_tabs: Tabs,
    faq: Accordion,
    copy_button: CopyButton,
    gallery: IconGallery,
    contact: ContactForm,
    blobs: BlobField,
    highlighter: Box<dyn Highlighter>,
    highlighted: Vec<Line<'static>>,
    highlight_count: usize,
    framework: Framework,
    signals: Rc<Signals>,
}

impl Showcase {
    /// Build the page with the demo contact transport
    pub fn new(host: Host, config: &Config, highlighter: Box<dyn Highlighter>) -> Result<Self> {
        let transport = SimulatedTransport::new(config.submit_failure_rate);
        Self::with_transport(host, config, highlighter, Box::new(transport))
    }

    pub fn with_transport(
        host: Host,
        config: &Config,
        highlighter: Box<dyn Highlighter>,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        let framework = host
            .storage()
            .get(PREFERENCE_KEY)
            .and_then(|v| v.parse::<Framework>().ok())
            .unwrap_or_default();
        debug!("Starting with framework {}", framework);

        let signals = Rc::new(Signals::default());

        let tabs = Framework::ALL
            .iter()
            .map(|f| TabItem::new(f.as_str(), f.label(), f.sample()))
            .collect();
        let sink = Rc::clone(&signals);
        let code_tabs = Tabs::new(TabsOptions {
            tabs,
            active: Some(framework.as_str().to_string()),
        })
        .on_change(move |id| {
            sink.framework.replace(Some(id.to_string()));
        });

        let sink = Rc::clone(&signals);
        let faq = Accordion::new(AccordionOptions {
            items: FAQ
                .iter()
                .map(|(id, title, content)| AccordionItem::new(id, title, content))
                .collect(),
            allow_multiple: false,
        })
        .on_toggle(move |(_, open)| {
            if *open {
                sink.faq_opened.set(true);
            }
        });

        let sink = Rc::clone(&signals);
        let modal_button = Button::new(ButtonOptions {
            text: "Open Modal".to_string(),
            ..Default::default()
        })
        .on_click(move |_| sink.open_modal.set(true));

        let modal = Modal::new(ModalOptions {
            id: Some("demo-modal".to_string()),
            title: "Example Modal".to_string(),
            content: "Modals focus attention on a single task. Press Escape to close.".to_string(),
            ..Default::default()
        });

        let copy_button = CopyButton::new(CopyButtonOptions {
            content: framework.sample().to_string(),
            feedback_duration: config.timings.copy_feedback,
            ..Default::default()
        });

        let gallery = IconGallery::new(GalleryOptions {
            page_size: config.icon_page_size,
            debounce: config.timings.search_debounce,
            ..Default::default()
        })
        .with_glyphs(Box::new(Glyphs::from_config(config)));

        let contact = ContactForm::new(ContactFormOptions {
            submit_delay: config.timings.submit_delay,
            ..Default::default()
        })
        .with_transport(transport);

        let mut showcase = Self {
            host,
            registry: Registry::with_builtins(),
            sections: Vec::new(),
            demos: Vec::new(),
            toasts: Vec::new(),
            modal,
            modal_button,
            code_tabs,
            faq,
            copy_button,
            gallery,
            contact,
            blobs: BlobField::new(800.0, 600.0),
            highlighter,
            highlighted: Vec::new(),
            highlight_count: 0,
            framework,
            signals,
        };
        showcase.build()?;
        showcase.highlight_visible();
        info!("Showcase ready with {} demos", showcase.demos.len());
        Ok(showcase)
    }

    fn build(&mut self) -> Result<()> {
        let root = self.host.root();
        for section in Section::ALL {
            let node = self.host.document.element("section", "section", "");
            self.host.document.set_attr(node, "id", section.id());
            let heading = self.host.document.element("h2", "section-title", section.title());
            self.host.document.append_child(node, heading);
            self.host.document.append_child(root, node);
            self.sections.push((section, node));
        }

        let components = self.section_node(Section::Components).context("missing section")?;
        for name in DEMOS {
            let Some(mut component) = self.registry.create(name, demo_options(name)) else {
                warn!("Skipping demo '{}'", name);
                continue;
            };
            let container = self.host.document.element("div", "demo", "");
            self.host.document.set_attr(container, "data-demo", name);
            let heading = self.host.document.element("h3", "demo-title", name);
            self.host.document.append_child(container, heading);
            let handle = self
                .host
                .mount(component.as_mut())
                .with_context(|| format!("Failed to render demo '{}'", name))?;
            self.host.document.append_child(container, handle);
            self.host.document.append_child(components, container);
            self.demos.push(Demo {
                name,
                component,
                container,
            });
        }
        let button = self.host.mount(&mut self.modal_button)?;
        self.host.document.append_child(components, button);
        self.host.mount(&mut self.modal)?;

        let code = self.section_node(Section::Code).context("missing section")?;
        for component in [
            &mut self.code_tabs as &mut dyn Component,
            &mut self.copy_button,
            &mut self.faq,
        ] {
            let handle = self.host.mount(component)?;
            self.host.document.append_child(code, handle);
        }

        let icons = self.section_node(Section::Icons).context("missing section")?;
        let handle = self.host.mount(&mut self.gallery)?;
        self.host.document.append_child(icons, handle);

        let contact = self.section_node(Section::Contact).context("missing section")?;
        let handle = self.host.mount(&mut self.contact)?;
        self.host.document.append_child(contact, handle);
        Ok(())
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn section_node(&self, section: Section) -> Option<NodeId> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, n)| *n)
    }

    pub fn demos(&self) -> &[Demo] {
        &self.demos
    }

    pub fn demo(&self, name: &str) -> Option<&Demo> {
        self.demos.iter().find(|d| d.name == name)
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn modal_button(&self) -> &Button {
        &self.modal_button
    }

    pub fn code_tabs(&self) -> &Tabs {
        &self.code_tabs
    }

    pub fn faq(&self) -> &Accordion {
        &self.faq
    }

    pub fn copy_button(&self) -> &CopyButton {
        &self.copy_button
    }

    pub fn gallery(&self) -> &IconGallery {
        &self.gallery
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn blobs(&self) -> &BlobField {
        &self.blobs
    }

    pub fn blobs_mut(&mut self) -> &mut BlobField {
        &mut self.blobs
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    /// Highlighted lines of the visible code sample
    pub fn highlighted(&self) -> &[Line<'static>] {
        &self.highlighted
    }

    /// How many times the visible sample has been highlighted
    pub fn highlight_count(&self) -> usize {
        self.highlight_count
    }

    pub fn open_modal(&mut self) {
        self.modal.open(&mut self.host);
    }

    pub fn close_modal(&mut self) {
        self.modal.close(&mut self.host);
    }

    pub fn notify(&mut self, message: impl Into<String>, variant: NoticeVariant) -> NodeId {
        self.host.notify(message, variant)
    }

    /// Show a closable toast created through the registry
    pub fn toast(&mut self, message: &str, variant: NoticeVariant) -> Option<NodeId> {
        let options = json!({ "message": message, "variant": variant });
        let mut toast = self.registry.create("toast", options)?;
        match self.host.mount(toast.as_mut()) {
            Ok(node) => {
                self.toasts.push(toast);
                Some(node)
            }
            Err(e) => {
                warn!("Failed to show toast: {}", e);
                None
            }
        }
    }

    /// Copy the visible code sample
    pub fn copy_code(&mut self) -> CopyOutcome {
        self.copy_button.copy(&mut self.host)
    }

    /// Copy an icon's snippet from the gallery
    pub fn copy_icon(&mut self, name: &str) -> Option<CopyOutcome> {
        self.gallery.copy_icon(&mut self.host, name)
    }

    /// Switch the code tabs to `framework` and remember the choice
    pub fn select_framework(&mut self, framework: Framework) {
        self.code_tabs.activate(&mut self.host, framework.as_str());
        self.apply_framework(framework);
    }

    fn apply_framework(&mut self, framework: Framework) {
        self.framework = framework;
        self.copy_button.set_content(framework.sample());
        if let Err(e) = self
            .host
            .storage_mut()
            .set(PREFERENCE_KEY, framework.as_str())
        {
            warn!("Failed to save framework preference: {}", e);
        }
        self.highlight_visible();
    }

    fn highlight_visible(&mut self) {
        self.highlighted = self
            .highlighter
            .highlight(self.framework.sample(), self.framework.language());
        self.highlight_count += 1;
        debug!("Highlighted {} sample", self.framework);
    }

    fn components(&mut self) -> (&mut Host, Vec<&mut dyn Component>) {
        let mut components: Vec<&mut dyn Component> = self
            .demos
            .iter_mut()
            .map(|d| d.component.as_mut() as &mut dyn Component)
            .collect();
        components.extend(
            self.toasts
                .iter_mut()
                .map(|t| t.as_mut() as &mut dyn Component),
        );
        components.push(&mut self.modal);
        components.push(&mut self.modal_button);
        components.push(&mut self.code_tabs);
        components.push(&mut self.faq);
        components.push(&mut self.copy_button);
        components.push(&mut self.gallery);
        components.push(&mut self.contact);
        (&mut self.host, components)
    }

    /// Deliver an event to whichever widgets listen for it
    pub fn dispatch(&mut self, event: UiEvent) -> Result<Vec<ComponentAction>> {
        let (host, mut components) = self.components();
        let actions = host.dispatch_many(&mut components, event)?;
        self.consume_signals();
        Ok(actions)
    }

    /// Advance the page clock, firing due timers
    pub fn advance(&mut self, dt: Duration) -> Result<Vec<ComponentAction>> {
        let (host, mut components) = self.components();
        let actions = host.advance_many(&mut components, dt)?;
        self.toasts.retain(|t| t.handle().is_some_and(|n| self.host.document.contains(n)));
        self.consume_signals();
        Ok(actions)
    }

    /// Advance the blob animation one frame
    pub fn tick(&mut self) {
        self.blobs.tick();
    }

    fn consume_signals(&mut self) {
        let selected = self.signals.framework.take();
        if let Some(id) = selected {
            match id.parse::<Framework>() {
                Ok(framework) => self.apply_framework(framework),
                Err(_) => warn!("Unknown framework tab '{}'", id),
            }
        }
        if self.signals.faq_opened.take() {
            self.highlight_visible();
        }
        if self.signals.open_modal.take() {
            self.open_modal();
        }
    }
}
