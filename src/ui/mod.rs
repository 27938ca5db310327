//! UI components for Inkpad
//!
//! This module contains the toolbar, the link prompt and the export panel.

mod export_view;
mod link_dialog;
mod toolbar;

pub use export_view::{show_export_panel, ExportAction};
pub use link_dialog::{LinkDialog, LinkDialogResult};
pub use toolbar::{Toolbar, ToolbarAction};
