use crate::components::Component;
use crate::config::Config;
use crate::dom::{Key, NodeId, UiEvent};
use crate::focus::{self, ControlKind, FocusRing};
use crate::highlight::SyntectHighlighter;
use crate::host::{FileStorage, Host, NoticeVariant};
use crate::samples::Framework;
use crate::showcase::{Section, Showcase};
use crate::tui::Tui;
use crate::ui::{self, ViewState};
use crate::utils::{Edit, ListStateExt, TextInput};
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Poll timeout; also the blob animation frame interval
const FRAME: Duration = Duration::from_millis(50);

/// Terminal cell size in blob-field units
const CELL_WIDTH: f64 = 8.0;
const CELL_HEIGHT: f64 = 16.0;

/// Interactive terminal showcase
pub struct App {
    tui: Tui,
    showcase: Showcase,
    view: ViewState,
    focus: FocusRing,
    should_quit: bool,
    last_tick: Instant,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let host = Host::new()
            .with_storage(Box::new(FileStorage::open(&config.preferences_file)))
            .with_notice_duration(config.notice_duration());
        let highlighter = SyntectHighlighter::new(config.theme_type());
        let showcase = Showcase::new(host, config, Box::new(highlighter))
            .context("Failed to build the showcase")?;

        let mut view = ViewState::default();
        view.sections.select_first_item(Section::ALL.len());

        Ok(Self {
            tui: Tui::new()?,
            showcase,
            view,
            focus: FocusRing::new(),
            should_quit: false,
            last_tick: Instant::now(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        if let Ok(size) = self.tui.terminal_mut().size() {
            self.resize(size.width, size.height);
        }
        info!("Showcase started");

        loop {
            self.tick()?;
            self.draw()?;

            if self.should_quit {
                break;
            }

            if let Some(event) = self.tui.poll_event(FRAME)? {
                self.handle_event(event)?;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// Advance page timers by wall time and the blob animation by a frame
    fn tick(&mut self) -> Result<()> {
        let now = Instant::now();
        let elapsed = now - self.last_tick;
        if elapsed < FRAME {
            return Ok(());
        }
        self.last_tick = now;
        self.showcase.advance(elapsed)?;
        self.showcase.tick();
        self.refresh_focus();
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.refresh_focus();
        let showcase = &self.showcase;
        let view = &mut self.view;
        self.tui.terminal_mut().draw(|frame| ui::draw(frame, showcase, view))?;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.showcase
            .blobs_mut()
            .resize(f64::from(width) * CELL_WIDTH, f64::from(height) * CELL_HEIGHT);
    }

    /// Root of the subtree keyboard focus moves in
    fn focus_scope(&self) -> Option<NodeId> {
        if self.showcase.modal().is_open() {
            return self.showcase.modal().handle();
        }
        match self.view.section() {
            Section::Blobs => None,
            Section::Icons => self.showcase.gallery().handle(),
            section => self.showcase.section_node(section),
        }
    }

    fn refresh_focus(&mut self) {
        let Some(scope) = self.focus_scope() else {
            self.focus.clear();
            self.view.focused = None;
            self.view.editing = None;
            return;
        };
        let doc = &self.showcase.host().document;
        self.focus.refresh(doc, scope);
        let focused = self.focus.current();
        if focused != self.view.focused {
            self.view.editing = None;
        }
        self.view.focused = focused;

        match focused.filter(|n| focus::control_kind(doc, *n) == ControlKind::Text) {
            Some(node) => {
                let value = doc.attr(node, "value").unwrap_or_default();
                let editing = self.view.editing.get_or_insert_with(TextInput::new);
                if editing.text() != value {
                    editing.set_text(value);
                }
            }
            None => self.view.editing = None,
        }
    }

    fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        let actions = self.showcase.dispatch(event)?;
        if !actions.is_empty() {
            debug!("Actions: {:?}", actions);
        }
        self.refresh_focus();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => {
                self.resize(width, height);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        let root = self.showcase.host().root();
        let focused = self.view.focused;
        let doc = &self.showcase.host().document;
        let kind = focused.map(|n| focus::control_kind(doc, n));

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.leave_focused()?;
                if key.code == KeyCode::Tab {
                    self.focus.next();
                } else {
                    self.focus.prev();
                }
                self.refresh_focus();
                return Ok(());
            }
            KeyCode::Esc => {
                return self.dispatch(UiEvent::key(focused.unwrap_or(root), Key::Escape));
            }
            _ => {}
        }

        if let (Some(node), Some(ControlKind::Text)) = (focused, kind) {
            return self.edit_text(node, key.code);
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.switch_section(false),
            KeyCode::Down => self.switch_section(true),
            KeyCode::Char('m') => self.showcase.open_modal(),
            KeyCode::Char('c') => {
                self.showcase.copy_code();
            }
            KeyCode::Char('t') => {
                self.showcase
                    .toast("Toasts stack in the corner and close themselves.", NoticeVariant::Info);
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.showcase.select_framework(Framework::ALL[index]);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(node) = focused {
                    let event = focus::activation(&self.showcase.host().document, node);
                    self.dispatch(event)?;
                }
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                if let Some(node) = focused {
                    let doc = &self.showcase.host().document;
                    let event = match kind {
                        Some(ControlKind::Range) => {
                            focus::step_range(doc, node, if forward { 1.0 } else { -1.0 })
                        }
                        Some(ControlKind::Choice) => focus::cycle_choice(doc, node, forward),
                        _ => Some(UiEvent::key(node, if forward { Key::Right } else { Key::Left })),
                    };
                    if let Some(event) = event {
                        self.dispatch(event)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn edit_text(&mut self, node: NodeId, code: KeyCode) -> Result<()> {
        if code == KeyCode::Enter {
            self.dispatch(UiEvent::blur(node))?;
            return self.dispatch(UiEvent::submit(node));
        }
        let Some(editing) = self.view.editing.as_mut() else {
            error!("Focused text control has no edit buffer");
            return Ok(());
        };
        match editing.handle_key(code) {
            Edit::Changed => {
                let value = editing.text().to_string();
                self.dispatch(UiEvent::input(node, value))
            }
            Edit::Moved | Edit::Ignored => Ok(()),
        }
    }

    /// Blur the focused control before focus moves away
    fn leave_focused(&mut self) -> Result<()> {
        match self.view.focused {
            Some(node) => self.dispatch(UiEvent::blur(node)),
            None => Ok(()),
        }
    }

    fn switch_section(&mut self, forward: bool) {
        if self.showcase.modal().is_open() {
            return;
        }
        let total = Section::ALL.len();
        if forward {
            self.view.sections.select_next_wrap(total);
        } else {
            self.view.sections.select_previous_wrap(total);
        }
        self.focus.clear();
        self.refresh_focus();
        debug!("Section {}", self.view.section().id());
    }
}
