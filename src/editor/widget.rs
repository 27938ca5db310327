//! Editor widget state for Inkpad
//!
//! `EditorWidget` owns everything the single editor component needs: the
//! document and selection shown by the surface, the typing style, the
//! current font choice, the theme, and the export panel. Toolbar actions
//! and keyboard edits arrive here; rendering lives in `surface.rs` and the
//! `ui` module.
//!
//! Formatting goes through a [`CommandDispatcher`], so the widget can be
//! driven by a fake in tests.

use log::{debug, info};

use crate::commands::{CommandDispatcher, DocumentEngine, FormatCommand};
use crate::config::Theme;
use crate::document::{Alignment, BlockKind, Document, InlineStyle, Position, Selection};
use crate::error::Result;
use crate::export::{ClipboardSink, ExportPanel};
use crate::fonts::FontChoice;
use crate::theme::{Presentation, ThemeManager};
use crate::ui::ToolbarAction;

// ─────────────────────────────────────────────────────────────────────────────
// Supporting Types
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting at the caret or across the selection, for toolbar highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattingState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub link: bool,
    pub align: Alignment,
    pub block: BlockKind,
}

/// Follow-up work a toolbar action needs from the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetRequest {
    /// Open the URL prompt; answer with [`EditorWidget::finish_link`]
    OpenLinkPrompt,
    /// Open the image picker; answer with [`EditorWidget::insert_image`]
    PickImage,
    /// Theme or font changed and should be saved
    PersistSettings,
}

/// Caret movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    /// Start of the current block
    BlockStart,
    /// End of the current block
    BlockEnd,
    /// Same offset in the previous block
    Up,
    /// Same offset in the next block
    Down,
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Widget
// ─────────────────────────────────────────────────────────────────────────────

pub struct EditorWidget<D: CommandDispatcher = DocumentEngine> {
    document: Document,
    /// Bumped on every document edit
    revision: u64,
    selection: Selection,
    /// Style given to newly typed text
    typing_style: InlineStyle,
    dispatcher: D,
    current_font: &'static FontChoice,
    theme: ThemeManager,
    export: ExportPanel,
    /// Set when the surface should take keyboard focus on the next frame
    focus_requested: bool,
    /// Selection captured when the link prompt opened
    pending_link: Option<Selection>,
}

impl EditorWidget<DocumentEngine> {
    pub fn new(theme: Theme, font: &'static FontChoice) -> Self {
        Self::with_dispatcher(DocumentEngine::new(), theme, font)
    }
}

impl<D: CommandDispatcher> EditorWidget<D> {
    pub fn with_dispatcher(dispatcher: D, theme: Theme, font: &'static FontChoice) -> Self {
        Self {
            document: Document::new(),
            revision: 0,
            selection: Selection::default(),
            typing_style: InlineStyle::default(),
            dispatcher,
            current_font: font,
            theme: ThemeManager::new(theme),
            export: ExportPanel::new(),
            focus_requested: true,
            pending_link: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Edit counter; differs whenever the document may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn document_mut(&mut self) -> &mut Document {
        self.revision += 1;
        &mut self.document
    }

    pub fn typing_style(&self) -> &InlineStyle {
        &self.typing_style
    }

    pub fn current_font(&self) -> &'static FontChoice {
        self.current_font
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeManager {
        &mut self.theme
    }

    pub fn presentation(&self) -> &Presentation {
        self.theme.presentation()
    }

    pub fn export(&self) -> &ExportPanel {
        &self.export
    }

    #[cfg(test)]
    pub(crate) fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Whether a link prompt is waiting for an answer.
    pub fn link_pending(&self) -> bool {
        self.pending_link.is_some()
    }

    /// Consume a pending focus request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toolbar Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle a toolbar action, returning what the host must do next.
    pub fn handle_action(&mut self, action: ToolbarAction) -> Option<WidgetRequest> {
        match action {
            ToolbarAction::ToggleTheme => {
                self.toggle_theme();
                Some(WidgetRequest::PersistSettings)
            }
            ToolbarAction::SelectFont(font) => {
                self.select_font(font);
                Some(WidgetRequest::PersistSettings)
            }
            ToolbarAction::Format(command) => {
                self.format(command);
                None
            }
            ToolbarAction::InsertLink => {
                self.begin_link();
                Some(WidgetRequest::OpenLinkPrompt)
            }
            ToolbarAction::InsertImage => {
                self.request_focus();
                Some(WidgetRequest::PickImage)
            }
        }
    }

    /// Dispatch a formatting command against the current selection.
    ///
    /// Returns whether the command changed anything. Focus returns to the
    /// surface either way.
    pub fn format(&mut self, command: FormatCommand) -> bool {
        let selection = self.selection;
        self.format_at(selection, command)
    }

    fn format_at(&mut self, selection: Selection, command: FormatCommand) -> bool {
        let edit = self.dispatcher.dispatch(
            &self.document,
            selection,
            &self.typing_style,
            &command,
        );
        let applied = edit.applied;
        if applied {
            *self.document_mut() = edit.document;
            self.selection = edit.selection;
            self.typing_style = edit.typing_style;
        }
        self.request_focus();
        applied
    }

    /// Make `font` the current choice and apply it to the selection, or to
    /// the typing style when the caret is collapsed.
    pub fn select_font(&mut self, font: &'static FontChoice) {
        info!("Font changed to {}", font.name);
        self.current_font = font;
        self.format(FormatCommand::FontFamily(font.value.to_string()));
    }

    /// Flip the theme. The document is not touched.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    /// Remember the selection the link prompt applies to.
    pub fn begin_link(&mut self) {
        self.pending_link = Some(self.selection);
    }

    /// Answer the link prompt. `None` means it was cancelled.
    ///
    /// Cancelling or confirming a blank URL leaves the document untouched.
    pub fn finish_link(&mut self, url: Option<String>) {
        let Some(selection) = self.pending_link.take() else {
            return;
        };
        self.request_focus();
        match url.map(|u| u.trim().to_string()) {
            Some(url) if !url.is_empty() => {
                self.format_at(selection, FormatCommand::Link(url));
            }
            _ => debug!("Link prompt dismissed without a URL"),
        }
    }

    /// Insert an image at the caret as it is now, replacing any selection.
    pub fn insert_image(&mut self, data_url: String) {
        self.format(FormatCommand::Image(data_url));
    }

    /// Formatting at the caret, or shared by the whole selection.
    pub fn formatting_state(&self) -> FormattingState {
        let focus_block = self.document.block(self.selection.focus.block);
        let align = focus_block.map(|b| b.align).unwrap_or_default();
        let block = focus_block.map(|b| b.kind).unwrap_or_default();

        if self.selection.is_collapsed() {
            return FormattingState {
                bold: self.typing_style.bold,
                italic: self.typing_style.italic,
                underline: self.typing_style.underline,
                link: self.typing_style.link.is_some(),
                align,
                block,
            };
        }

        let (start, end) = self.selection.range();
        let all = |test: fn(&InlineStyle) -> bool| self.document.all_text_matches(start, end, test);
        FormattingState {
            bold: all(|s| s.bold),
            italic: all(|s| s.italic),
            underline: all(|s| s.underline),
            link: all(|s| s.link.is_some()),
            align,
            block,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Snapshot the current document markup into the export panel.
    pub fn generate_html(&mut self) {
        self.export.generate(Some(&self.document));
    }

    /// Copy the snapshot. Returns `Ok(false)` when there was nothing to copy.
    pub fn copy_html(&mut self, sink: &mut dyn ClipboardSink, now: f64) -> Result<bool> {
        Ok(self.export.copy(sink, now)?)
    }

    /// Per-frame housekeeping: expire the "Copied" confirmation.
    pub fn update(&mut self, now: f64) {
        self.export.update(now);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Type `text` at the caret, replacing the selection.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = self.delete_selection();
        self.revision += 1;
        let caret = self.document.insert_text(at, text, &self.typing_style);
        self.selection = Selection::caret(caret);
    }

    /// Split the block at the caret (Enter).
    pub fn insert_newline(&mut self) {
        let at = self.delete_selection();
        let caret = self.document_mut().split_block(at);
        self.selection = Selection::caret(caret);
    }

    /// Delete the selection, or the character before the caret. At the start
    /// of a block the block is merged into the previous one.
    pub fn backspace(&mut self) {
        if !self.selection.is_collapsed() {
            self.delete_selection();
            return;
        }
        let caret = self.selection.focus;
        let from = if caret.offset > 0 {
            Position::new(caret.block, caret.offset - 1)
        } else if caret.block > 0 {
            Position::new(caret.block - 1, self.document.block_len(caret.block - 1))
        } else {
            return;
        };
        let at = self.document_mut().delete_range(from, caret);
        self.collapse_to(at);
    }

    /// Delete the selection, or the character after the caret. At the end
    /// of a block the next block is merged into this one.
    pub fn delete_forward(&mut self) {
        if !self.selection.is_collapsed() {
            self.delete_selection();
            return;
        }
        let caret = self.selection.focus;
        let to = if caret.offset < self.document.block_len(caret.block) {
            Position::new(caret.block, caret.offset + 1)
        } else if caret.block + 1 < self.document.block_count() {
            Position::new(caret.block + 1, 0)
        } else {
            return;
        };
        let at = self.document_mut().delete_range(caret, to);
        self.collapse_to(at);
    }

    /// Remove the selected content and return the collapsed caret.
    pub fn delete_selection(&mut self) -> Position {
        if self.selection.is_collapsed() {
            return self.document.clamp(self.selection.focus);
        }
        let (start, end) = self.selection.range();
        let at = self.document_mut().delete_range(start, end);
        self.selection = Selection::caret(at);
        at
    }

    /// Plain text of the selection (blocks joined by newlines).
    pub fn selected_text(&self) -> String {
        let (start, end) = self.selection.range();
        self.document.text_in_range(start, end)
    }

    /// Remove the selection and return its plain text.
    pub fn cut(&mut self) -> String {
        let text = self.selected_text();
        self.delete_selection();
        text
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Caret & Selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn select_all(&mut self) {
        self.selection = Selection::new(self.document.start(), self.document.end());
    }

    /// Place a collapsed caret at `position`.
    pub fn set_caret(&mut self, position: Position) {
        self.collapse_to(self.document.clamp(position));
    }

    /// Move the focus to `position`, keeping the anchor.
    pub fn extend_selection_to(&mut self, position: Position) {
        self.selection.focus = self.document.clamp(position);
    }

    /// Move the focus to `position`; extend the selection or collapse.
    pub fn move_to(&mut self, position: Position, extend: bool) {
        if extend {
            self.extend_selection_to(position);
        } else {
            self.set_caret(position);
        }
    }

    pub fn move_caret(&mut self, motion: Motion, extend: bool) {
        let selection = self.selection;
        if !extend && !selection.is_collapsed() {
            match motion {
                Motion::Left => return self.set_caret(selection.start()),
                Motion::Right => return self.set_caret(selection.end()),
                _ => {}
            }
        }

        let caret = selection.focus;
        let doc = &self.document;
        let target = match motion {
            Motion::Left if caret.offset > 0 => Position::new(caret.block, caret.offset - 1),
            Motion::Left if caret.block > 0 => {
                Position::new(caret.block - 1, doc.block_len(caret.block - 1))
            }
            Motion::Left => caret,
            Motion::Right if caret.offset < doc.block_len(caret.block) => {
                Position::new(caret.block, caret.offset + 1)
            }
            Motion::Right if caret.block + 1 < doc.block_count() => {
                Position::new(caret.block + 1, 0)
            }
            Motion::Right => caret,
            Motion::BlockStart => Position::new(caret.block, 0),
            Motion::BlockEnd => Position::new(caret.block, doc.block_len(caret.block)),
            Motion::Up if caret.block > 0 => Position::new(caret.block - 1, caret.offset),
            Motion::Up => doc.start(),
            Motion::Down if caret.block + 1 < doc.block_count() => {
                Position::new(caret.block + 1, caret.offset)
            }
            Motion::Down => doc.end(),
        };
        self.move_to(target, extend);
    }

    /// Collapse to `position` and pick up the style of the text before it.
    fn collapse_to(&mut self, position: Position) {
        self.selection = Selection::caret(position);
        self.typing_style = self
            .document
            .block(position.block)
            .map(|block| block.style_at(position.offset).without_link())
            .unwrap_or_default();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
