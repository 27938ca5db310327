//! HTML Export Module for Inkpad
//!
//! # Architecture
//!
//! - `panel.rs` - Snapshot of the serialized document and the "Copied" state
//! - `clipboard.rs` - Clipboard sinks (arboard-backed system clipboard)

pub mod clipboard;
pub mod panel;

pub use clipboard::{ClipboardError, ClipboardSink, SystemClipboard};
pub use panel::ExportPanel;
