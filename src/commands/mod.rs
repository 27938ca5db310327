//! Formatting commands for Inkpad
//!
//! Every toolbar action that changes the document is expressed as a
//! [`FormatCommand`] and executed by a [`CommandDispatcher`]. The dispatcher
//! never mutates in place: it receives the current document, selection and
//! typing style, and returns a new [`Edit`] holding the resulting state.
//!
//! [`DocumentEngine`] is the real implementation. Tests swap in fakes to
//! observe which commands the editor issues.

mod engine;

pub use engine::DocumentEngine;

use crate::document::{Alignment, Document, InlineStyle, Selection};

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// A formatting operation applied to the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    /// Toggle bold
    Bold,
    /// Toggle italic
    Italic,
    /// Toggle underline
    Underline,
    /// Align the touched blocks
    Align(Alignment),
    /// Turn the touched blocks into a heading of level 1-6
    Heading(u8),
    /// Turn the touched blocks into a preformatted code block
    CodeBlock,
    /// Link the selection to a URL
    Link(String),
    /// Insert an image (data URL) at the caret
    Image(String),
    /// Set the foreground color (`#rrggbb`)
    Color(String),
    /// Set the font family (CSS family value)
    FontFamily(String),
}

impl FormatCommand {
    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Align(Alignment::Left) => "justifyLeft",
            Self::Align(Alignment::Center) => "justifyCenter",
            Self::Align(Alignment::Right) => "justifyRight",
            Self::Heading(_) | Self::CodeBlock => "formatBlock",
            Self::Link(_) => "createLink",
            Self::Image(_) => "insertImage",
            Self::Color(_) => "foreColor",
            Self::FontFamily(_) => "fontName",
        }
    }

    /// Keyboard shortcut label, if the command has one.
    pub fn shortcut_label(&self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("Ctrl+B"),
            Self::Italic => Some("Ctrl+I"),
            Self::Underline => Some("Ctrl+U"),
            _ => None,
        }
    }

    /// Tooltip text for toolbar buttons.
    pub fn tooltip(&self) -> String {
        let name = match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::Align(Alignment::Left) => "Align Left",
            Self::Align(Alignment::Center) => "Align Center",
            Self::Align(Alignment::Right) => "Align Right",
            Self::Heading(n) => return format!("Heading {}", n),
            Self::CodeBlock => "Code Block",
            Self::Link(_) => "Insert Link",
            Self::Image(_) => "Insert Image",
            Self::Color(_) => "Text Color",
            Self::FontFamily(_) => "Font",
        };
        match self.shortcut_label() {
            Some(shortcut) => format!("{} ({})", name, shortcut),
            None => name.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// The state produced by dispatching a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub document: Document,
    pub selection: Selection,
    pub typing_style: InlineStyle,
    /// Whether the command changed anything. Unsupported or empty requests
    /// come back unapplied with the input state.
    pub applied: bool,
}

impl Edit {
    /// An edit that leaves everything as it was.
    pub fn unchanged(document: &Document, selection: Selection, typing_style: &InlineStyle) -> Self {
        Self {
            document: document.clone(),
            selection,
            typing_style: typing_style.clone(),
            applied: false,
        }
    }
}

/// Executes formatting commands against a document.
pub trait CommandDispatcher {
    fn dispatch(
        &mut self,
        document: &Document,
        selection: Selection,
        typing_style: &InlineStyle,
        command: &FormatCommand,
    ) -> Edit;
}
