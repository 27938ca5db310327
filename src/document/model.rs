//! Blocks, inlines and inline styles.

use super::Position;
use crate::string_utils::{char_len, split_off_chars};

// ─────────────────────────────────────────────────────────────────────────────
// Block-level attributes
// ─────────────────────────────────────────────────────────────────────────────

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS `text-align` value, or `None` for the default left alignment.
    pub fn css_value(&self) -> Option<&'static str> {
        match self {
            Alignment::Left => None,
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        }
    }
}

/// The kind of container a block is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// Plain paragraph (`<div>`)
    #[default]
    Paragraph,
    /// Heading level 1-6 (`<h1>` .. `<h6>`)
    Heading(u8),
    /// Preformatted code block (`<pre>`)
    Preformatted,
}

impl BlockKind {
    /// Element name used for this block in markup.
    pub fn tag(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "div",
            BlockKind::Heading(1) => "h1",
            BlockKind::Heading(2) => "h2",
            BlockKind::Heading(3) => "h3",
            BlockKind::Heading(4) => "h4",
            BlockKind::Heading(5) => "h5",
            BlockKind::Heading(_) => "h6",
            BlockKind::Preformatted => "pre",
        }
    }

    /// Kind of the block created when Enter is pressed at the end of this one.
    pub fn continuation(&self) -> BlockKind {
        match self {
            BlockKind::Heading(_) => BlockKind::Paragraph,
            other => *other,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline content
// ─────────────────────────────────────────────────────────────────────────────

/// Character-level formatting of a text run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Hyperlink target
    pub link: Option<String>,
    /// Foreground color as `#rrggbb`
    pub color: Option<String>,
    /// CSS font-family value (see [`crate::fonts::FONT_CHOICES`])
    pub font_family: Option<String>,
}

impl InlineStyle {
    /// The same style without the hyperlink, used for text typed after a link.
    pub fn without_link(&self) -> InlineStyle {
        InlineStyle {
            link: None,
            ..self.clone()
        }
    }
}

/// A piece of inline content inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// A styled run of text
    Text { text: String, style: InlineStyle },
    /// An embedded image; `src` is usually a `data:` URL
    Image { src: String },
}

impl Inline {
    pub fn text(text: impl Into<String>, style: InlineStyle) -> Self {
        Inline::Text {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::text(text, InlineStyle::default())
    }

    /// Length in characters; images count as one.
    pub fn char_len(&self) -> usize {
        match self {
            Inline::Text { text, .. } => char_len(text),
            Inline::Image { .. } => 1,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Blocks
// ─────────────────────────────────────────────────────────────────────────────

/// A block-level container: a paragraph, heading or code block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub kind: BlockKind,
    pub align: Alignment,
    pub inlines: Vec<Inline>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            align: Alignment::default(),
            inlines: Vec::new(),
        }
    }

    /// A paragraph holding unstyled text.
    pub fn paragraph(text: &str) -> Self {
        Self::new(BlockKind::Paragraph).with_inlines(vec![Inline::plain(text)])
    }

    pub fn with_inlines(mut self, inlines: Vec<Inline>) -> Self {
        self.inlines = inlines;
        self.normalize();
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.inlines.iter().map(Inline::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.char_len() == 0
    }

    /// Text content with images omitted.
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text { text, .. } => Some(text.as_str()),
                Inline::Image { .. } => None,
            })
            .collect()
    }

    /// Style of the text a caret at `offset` continues from.
    ///
    /// That is the character before the caret, or the first character when
    /// the caret is at the start of the block. Images and empty blocks yield
    /// the default style.
    pub fn style_at(&self, offset: usize) -> InlineStyle {
        let target = offset.saturating_sub(1);
        let mut consumed = 0;
        for inline in &self.inlines {
            let len = inline.char_len();
            if target < consumed + len {
                return match inline {
                    Inline::Text { style, .. } => style.clone(),
                    Inline::Image { .. } => InlineStyle::default(),
                };
            }
            consumed += len;
        }
        InlineStyle::default()
    }

    /// Make sure an inline boundary exists at `offset`, splitting a text run
    /// if necessary. Returns the index of the first inline at or after it.
    pub(crate) fn split_at_char(&mut self, offset: usize) -> usize {
        let mut consumed = 0;
        for index in 0..self.inlines.len() {
            if consumed == offset {
                return index;
            }
            let len = self.inlines[index].char_len();
            if offset < consumed + len {
                let tail = match &mut self.inlines[index] {
                    Inline::Text { text, style } => Some(Inline::Text {
                        text: split_off_chars(text, offset - consumed),
                        style: style.clone(),
                    }),
                    Inline::Image { .. } => None,
                };
                if let Some(tail) = tail {
                    self.inlines.insert(index + 1, tail);
                }
                return index + 1;
            }
            consumed += len;
        }
        self.inlines.len()
    }

    /// Split the block at `offset`, keeping the head and returning the tail
    /// as a block of the same kind and alignment.
    pub(crate) fn split_off(&mut self, offset: usize) -> Block {
        let index = self.split_at_char(offset);
        let tail = self.inlines.split_off(index);
        self.normalize();
        Block {
            kind: self.kind,
            align: self.align,
            inlines: tail,
        }
        .normalized()
    }

    /// Drop empty text runs and merge neighbouring runs with equal styles.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Inline> = Vec::with_capacity(self.inlines.len());
        for inline in self.inlines.drain(..) {
            match inline {
                Inline::Text { text, .. } if text.is_empty() => continue,
                Inline::Text { text, style } => {
                    if let Some(Inline::Text {
                        text: prev_text,
                        style: prev_style,
                    }) = merged.last_mut()
                    {
                        if *prev_style == style {
                            prev_text.push_str(&text);
                            continue;
                        }
                    }
                    merged.push(Inline::Text { text, style });
                }
                image => merged.push(image),
            }
        }
        self.inlines = merged;
    }

    fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// The live content of the editor.
///
/// A document always holds at least one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(super) blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: a single empty paragraph.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(BlockKind::Paragraph)],
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut document = Self { blocks };
        document.normalize();
        document
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document is a single empty, left-aligned paragraph, the
    /// state of a surface nobody has typed into yet.
    pub fn is_pristine(&self) -> bool {
        matches!(self.blocks.as_slice(), [only]
            if only.is_empty()
                && only.kind == BlockKind::Paragraph
                && only.align == Alignment::Left)
    }

    /// Length of the block at `index` in characters (0 if out of range).
    pub fn block_len(&self, index: usize) -> usize {
        self.blocks.get(index).map(Block::char_len).unwrap_or(0)
    }

    /// First caret position.
    pub fn start(&self) -> Position {
        Position::new(0, 0)
    }

    /// Last caret position.
    pub fn end(&self) -> Position {
        let last = self.blocks.len() - 1;
        Position::new(last, self.block_len(last))
    }

    /// Clamp a position to a valid caret location.
    pub fn clamp(&self, position: Position) -> Position {
        let block = position.block.min(self.blocks.len() - 1);
        Position::new(block, position.offset.min(self.block_len(block)))
    }

    /// Ensure the non-empty invariant and normalize every block.
    pub(super) fn normalize(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::new(BlockKind::Paragraph));
        }
        for block in &mut self.blocks {
            block.normalize();
        }
    }
}
