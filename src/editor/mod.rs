//! Editor module for Inkpad
//!
//! This module contains the editor widget state, the egui surface that
//! renders and edits the document, and the deferred reset used for the
//! "Copied" confirmation.

mod surface;
mod timer;
mod widget;

pub use surface::EditorSurface;
pub use timer::{DeferredReset, COPIED_FEEDBACK};
pub use widget::{EditorWidget, FormattingState, Motion, WidgetRequest};
