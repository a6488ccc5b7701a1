//! Clipboard capability with a synchronous selection fallback.

use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Anything text can be copied into
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Last text written, when the implementation can report it
    fn read_text(&self) -> Option<String> {
        None
    }
}

/// Primary clipboard kept in memory; can be switched off to exercise the fallback
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    available: bool,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self {
            contents: None,
            available: true,
        }
    }

    /// A clipboard whose writes always fail
    pub fn unavailable() -> Self {
        Self {
            contents: None,
            available: false,
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.available {
            return Err(ClipboardError::Unavailable);
        }
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn read_text(&self) -> Option<String> {
        self.contents.clone()
    }
}

/// Selection-based copy: the text is placed in an off-screen selection
/// buffer and copied synchronously. Empty text is rejected.
#[derive(Debug, Clone)]
pub struct SelectionFallback {
    selection: Option<String>,
    enabled: bool,
}

impl Default for SelectionFallback {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionFallback {
    pub fn new() -> Self {
        Self {
            selection: None,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            selection: None,
            enabled: false,
        }
    }
}

impl Clipboard for SelectionFallback {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.enabled {
            return Err(ClipboardError::Unavailable);
        }
        if text.is_empty() {
            return Err(ClipboardError::Rejected("nothing selected".to_string()));
        }
        self.selection = Some(text.to_string());
        Ok(())
    }

    fn read_text(&self) -> Option<String> {
        self.selection.clone()
    }
}

/// Result of a copy attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CopiedWithFallback,
    Failed,
}

impl CopyOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, CopyOutcome::Failed)
    }
}

/// Try the primary clipboard, then the fallback. Never returns an error.
pub fn copy_with_fallback(
    primary: &mut dyn Clipboard,
    fallback: &mut dyn Clipboard,
    text: &str,
) -> CopyOutcome {
    match primary.write_text(text) {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            warn!("Clipboard write failed, using selection fallback: {}", e);
            match fallback.write_text(text) {
                Ok(()) => CopyOutcome::CopiedWithFallback,
                Err(e) => {
                    error!("Fallback copy failed: {}", e);
                    CopyOutcome::Failed
                }
            }
        }
    }
}
