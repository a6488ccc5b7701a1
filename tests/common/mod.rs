//! Shared test utilities for component and showcase integration tests.
//!
//! Provides `TestPage` - an isolated page (host, config and preference file)
//! for driving widgets end to end, with automatic cleanup via `TempDir`.
//!
//! Storage, highlighter and transport doubles are shared through `Rc` so a
//! test can inspect them after handing them to the showcase.

use anyhow::Result;
use ratatui::text::Line;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

use componentry::config::Config;
use componentry::contact::{ContactMessage, SubmitError, Transport};
use componentry::highlight::Highlighter;
use componentry::host::{FileStorage, Host, MemoryClipboard, SelectionFallback, Storage};
use componentry::Showcase;

/// Preference storage that counts reads and can be inspected from the test
#[derive(Clone, Default)]
pub struct SharedStorage {
    values: Rc<RefCell<BTreeMap<String, String>>>,
    reads: Rc<Cell<usize>>,
}

#[allow(dead_code)]
impl SharedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl Storage for SharedStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.reads.set(self.reads.get() + 1);
        self.values.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Highlighter that records every language it was asked to highlight
#[derive(Clone, Default)]
pub struct RecordingHighlighter {
    calls: Rc<RefCell<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingHighlighter {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Highlighter for RecordingHighlighter {
    fn highlight(&mut self, code: &str, language: &str) -> Vec<Line<'static>> {
        self.calls.borrow_mut().push(language.to_string());
        code.lines().map(|l| Line::from(l.to_string())).collect()
    }
}

/// Transport with a fixed outcome that keeps every delivered message
#[derive(Clone)]
pub struct FixedTransport {
    succeed: bool,
    sent: Rc<RefCell<Vec<ContactMessage>>>,
}

#[allow(dead_code)]
impl FixedTransport {
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            sent: Rc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            sent: Rc::default(),
        }
    }

    pub fn sent(&self) -> Vec<ContactMessage> {
        self.sent.borrow().clone()
    }
}

impl Transport for FixedTransport {
    fn send(&mut self, message: &ContactMessage) -> Result<(), SubmitError> {
        if !self.succeed {
            return Err(SubmitError::Rejected);
        }
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }
}

/// An isolated page environment.
///
/// Creates a temporary directory holding the config file and the
/// preference file the showcase persists to. Cleaned up when dropped.
#[allow(dead_code)]
pub struct TestPage {
    temp_dir: TempDir,
    pub config_path: PathBuf,
    pub preferences_path: PathBuf,
    pub config: Config,
}

#[allow(dead_code)]
impl TestPage {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        let preferences_path = temp_dir.path().join("preferences.toml");
        let config = Config {
            preferences_file: preferences_path.clone(),
            submit_failure_rate: 0.0,
            ..Config::default()
        };
        config.save(&config_path)?;
        Ok(Self {
            temp_dir,
            config_path,
            preferences_path,
            config,
        })
    }

    pub fn root(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// Host backed by the preference file in this environment
    pub fn file_host(&self) -> Host {
        Host::new().with_storage(Box::new(FileStorage::open(&self.preferences_path)))
    }

    /// Showcase over `host` with the given doubles
    pub fn showcase(
        &self,
        host: Host,
        highlighter: RecordingHighlighter,
        transport: FixedTransport,
    ) -> Result<Showcase> {
        Showcase::with_transport(host, &self.config, Box::new(highlighter), Box::new(transport))
    }

    /// Showcase over an in-memory host with default doubles
    pub fn default_showcase(&self) -> Result<Showcase> {
        self.showcase(
            Host::new(),
            RecordingHighlighter::default(),
            FixedTransport::succeeding(),
        )
    }
}

/// Host whose clipboard and selection fallback both fail
#[allow(dead_code)]
pub fn host_without_clipboard() -> Host {
    Host::new()
        .with_clipboard(Box::new(MemoryClipboard::unavailable()))
        .with_fallback(Box::new(SelectionFallback::disabled()))
}

/// Host whose clipboard fails but whose selection fallback works
#[allow(dead_code)]
pub fn host_with_fallback_only() -> Host {
    Host::new().with_clipboard(Box::new(MemoryClipboard::unavailable()))
}

/// Collects callback payloads for later assertions
#[allow(dead_code)]
pub fn recorder<T>() -> (Rc<RefCell<Vec<T>>>, Rc<RefCell<Vec<T>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    (calls.clone(), calls)
}
