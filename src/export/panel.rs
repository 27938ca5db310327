//! Export panel state
//!
//! Holds the markup snapshot taken on "Generate HTML" and the transient
//! "Copied" confirmation. The snapshot is never refreshed on its own: it is
//! replaced only by the next [`ExportPanel::generate`].

use log::{info, warn};
use std::time::Duration;

use super::clipboard::{ClipboardError, ClipboardSink};
use crate::document::Document;
use crate::editor::{DeferredReset, COPIED_FEEDBACK};

#[derive(Debug)]
pub struct ExportPanel {
    snapshot: String,
    copied: bool,
    reset: DeferredReset,
    last_error: Option<String>,
}

impl Default for ExportPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportPanel {
    pub fn new() -> Self {
        Self {
            snapshot: String::new(),
            copied: false,
            reset: DeferredReset::new(COPIED_FEEDBACK),
            last_error: None,
        }
    }

    /// Replace the snapshot with the serialized document.
    ///
    /// With no document the snapshot becomes empty.
    pub fn generate(&mut self, document: Option<&Document>) {
        self.snapshot = document.map(Document::to_html).unwrap_or_default();
        self.last_error = None;
        info!("Generated HTML snapshot ({} bytes)", self.snapshot.len());
    }

    /// Copy the snapshot to `sink`.
    ///
    /// Returns `Ok(false)` without touching the sink when there is nothing to
    /// copy. On success the copied flag is set and the reset re-armed; on
    /// failure the flag stays false and the error is kept for display.
    pub fn copy(&mut self, sink: &mut dyn ClipboardSink, now: f64) -> Result<bool, ClipboardError> {
        if self.snapshot.is_empty() {
            return Ok(false);
        }

        match sink.write(&self.snapshot) {
            Ok(()) => {
                self.copied = true;
                self.last_error = None;
                self.reset.arm(now);
                info!("Copied HTML to clipboard");
                Ok(true)
            }
            Err(err) => {
                warn!("Failed to copy HTML: {}", err);
                self.copied = false;
                self.reset.cancel();
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Clear the copied flag once its deadline has passed.
    pub fn update(&mut self, now: f64) {
        if self.reset.fire_if_due(now) {
            self.copied = false;
        }
    }

    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// The last clipboard failure, shown under the copy button.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Time until the copied flag clears, for scheduling a repaint.
    pub fn time_until_reset(&self, now: f64) -> Option<Duration> {
        self.reset.remaining(now)
    }
}
