//! Clipboard Operations for HTML Export
//!
//! The export panel writes through the [`ClipboardSink`] trait so that the
//! copy flow can be exercised without a display server. [`SystemClipboard`]
//! is the real sink, backed by the arboard crate.

use arboard::Clipboard;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// Failed to access clipboard
    Access(String),
    /// Failed to set clipboard content
    Write(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Access(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::Write(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Sinks
// ─────────────────────────────────────────────────────────────────────────────

/// Something that accepts text for the clipboard.
pub trait ClipboardSink {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard.
///
/// A fresh arboard handle is opened per write; holding one open for the
/// lifetime of the app keeps ownership of the X11 selection on Linux.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
