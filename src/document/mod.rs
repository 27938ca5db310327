//! Rich-text document model for Inkpad
//!
//! The document is an explicit value: an ordered list of blocks, each holding
//! styled inline runs and images. Every mutation goes through the editing
//! methods in `edit.rs` (used by the surface for typing) or through a
//! [`crate::commands::CommandDispatcher`] (used by the toolbar), and the
//! HTML serialization in `html.rs` is what the export panel snapshots.
//!
//! # Architecture
//!
//! - `model.rs` - Blocks, inlines and inline styles
//! - `position.rs` - Caret positions and selections
//! - `edit.rs` - Text insertion, deletion, block splitting and style mapping
//! - `html.rs` - Markup serialization (the `innerHTML` equivalent)

mod edit;
mod html;
mod model;
mod position;

pub use model::{Alignment, Block, BlockKind, Document, Inline, InlineStyle};
pub use position::{Position, Selection};
