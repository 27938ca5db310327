//! Editing primitives for documents.
//!
//! These methods mutate a document in place and return the caret position
//! that results from the edit. The surface calls them for typing; the
//! command engine calls them on a cloned document so that every command
//! produces a new value.

use super::{Alignment, Block, BlockKind, Document, Inline, InlineStyle, Position};
use crate::string_utils::slice_chars;

impl Document {
    /// Insert `text` at `at` using `style`. Newlines split blocks.
    ///
    /// Returns the caret position after the inserted text.
    pub fn insert_text(&mut self, at: Position, text: &str, style: &InlineStyle) -> Position {
        let mut caret = self.clamp(at);
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for (index, line) in normalized.split('\n').enumerate() {
            if index > 0 {
                caret = self.split_block(caret);
            }
            if !line.is_empty() {
                caret = self.insert_inline(caret, Inline::text(line, style.clone()));
            }
        }
        caret
    }

    /// Insert a single inline node at `at`, returning the position after it.
    pub fn insert_inline(&mut self, at: Position, inline: Inline) -> Position {
        let at = self.clamp(at);
        let len = inline.char_len();
        let block = &mut self.blocks[at.block];
        let index = block.split_at_char(at.offset);
        block.inlines.insert(index, inline);
        block.normalize();
        Position::new(at.block, at.offset + len)
    }

    /// Split the block containing `at` into two, returning the start of the
    /// new block. Headings continue as paragraphs; alignment carries over.
    pub fn split_block(&mut self, at: Position) -> Position {
        let at = self.clamp(at);
        let block = &mut self.blocks[at.block];
        let at_end = at.offset >= block.char_len();
        let mut tail = block.split_off(at.offset);
        if at_end {
            tail.kind = block.kind.continuation();
        }
        self.blocks.insert(at.block + 1, tail);
        Position::new(at.block + 1, 0)
    }

    /// Delete everything between two positions, merging blocks when the
    /// range spans more than one. Returns the collapsed caret position.
    pub fn delete_range(&mut self, from: Position, to: Position) -> Position {
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        let start = self.clamp(start);
        let end = self.clamp(end);
        if start == end {
            return start;
        }

        if start.block == end.block {
            let block = &mut self.blocks[start.block];
            let a = block.split_at_char(start.offset);
            let b = block.split_at_char(end.offset);
            block.inlines.drain(a..b);
            block.normalize();
            return start;
        }

        let tail = self.blocks[end.block].split_off(end.offset);
        self.blocks.drain(start.block + 1..=end.block);
        let head = &mut self.blocks[start.block];
        head.split_off(start.offset);
        head.inlines.extend(tail.inlines);
        head.normalize();
        start
    }

    /// Apply `apply` to the style of every text run between two positions.
    /// Images are left untouched.
    pub fn map_styles<F>(&mut self, from: Position, to: Position, mut apply: F)
    where
        F: FnMut(&mut InlineStyle),
    {
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        let start = self.clamp(start);
        let end = self.clamp(end);
        for index in start.block..=end.block {
            let block = &mut self.blocks[index];
            let len = block.char_len();
            let a_off = if index == start.block { start.offset } else { 0 };
            let b_off = if index == end.block { end.offset } else { len };
            if a_off >= b_off {
                continue;
            }
            let a = block.split_at_char(a_off);
            let b = block.split_at_char(b_off);
            for inline in &mut block.inlines[a..b] {
                if let Inline::Text { style, .. } = inline {
                    apply(style);
                }
            }
            block.normalize();
        }
    }

    /// Whether every text character between two positions satisfies `test`.
    ///
    /// Returns `false` when the range contains no text at all.
    pub fn all_text_matches<F>(&self, from: Position, to: Position, test: F) -> bool
    where
        F: Fn(&InlineStyle) -> bool,
    {
        let mut saw_text = false;
        for (index, a, b) in self.block_spans(from, to) {
            for (_, style) in self.blocks[index].text_runs_in(a, b) {
                if !test(style) {
                    return false;
                }
                saw_text = true;
            }
        }
        saw_text
    }

    /// Every block between two positions with the character range it
    /// contributes, in document order.
    fn block_spans(
        &self,
        from: Position,
        to: Position,
    ) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        let (start, end) = (self.clamp(start), self.clamp(end));
        (start.block..=end.block).map(move |index| {
            let a = if index == start.block { start.offset } else { 0 };
            let b = if index == end.block {
                end.offset
            } else {
                self.blocks[index].char_len()
            };
            (index, a, b)
        })
    }

    /// Set the kind of every block from `first` to `last` inclusive.
    pub fn set_block_kind(&mut self, first: usize, last: usize, kind: BlockKind) {
        for block in self.block_span_mut(first, last) {
            block.kind = kind;
        }
    }

    /// Set the alignment of every block from `first` to `last` inclusive.
    pub fn set_alignment(&mut self, first: usize, last: usize, align: Alignment) {
        for block in self.block_span_mut(first, last) {
            block.align = align;
        }
    }

    fn block_span_mut(&mut self, first: usize, last: usize) -> &mut [Block] {
        let max = self.blocks.len() - 1;
        let (first, last) = (first.min(max), last.min(max));
        let (first, last) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };
        &mut self.blocks[first..=last]
    }

    /// Plain text between two positions; blocks are joined with newlines and
    /// images are omitted.
    pub fn text_in_range(&self, from: Position, to: Position) -> String {
        let mut out = String::new();
        for (n, (index, a, b)) in self.block_spans(from, to).enumerate() {
            if n > 0 {
                out.push('\n');
            }
            for (text, _) in self.blocks[index].text_runs_in(a, b) {
                out.push_str(text);
            }
        }
        out
    }
}

impl Block {
    /// Text runs overlapping the character range `from..to`, clipped to it.
    fn text_runs_in(&self, from: usize, to: usize) -> impl Iterator<Item = (&str, &InlineStyle)> {
        let mut offset = 0;
        self.inlines.iter().filter_map(move |inline| {
            let start = offset;
            offset += inline.char_len();
            let (lo, hi) = (from.max(start), to.min(offset));
            match inline {
                Inline::Text { text, style } if lo < hi => {
                    Some((slice_chars(text, lo - start, hi - start), style))
                }
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> InlineStyle {
        InlineStyle {
            bold: true,
            ..InlineStyle::default()
        }
    }

    fn texts(doc: &Document) -> Vec<String> {
        doc.blocks().iter().map(Block::plain_text).collect()
    }

    #[test]
    fn test_insert_text_into_empty_document() {
        let mut doc = Document::new();
        let caret = doc.insert_text(Position::new(0, 0), "Hello", &InlineStyle::default());
        assert_eq!(caret, Position::new(0, 5));
        assert_eq!(texts(&doc), vec!["Hello"]);
    }

    #[test]
    fn test_insert_text_in_the_middle_with_style() {
        let mut doc = Document::from_blocks(vec![Block::paragraph("Hlo")]);
        let caret = doc.insert_text(Position::new(0, 1), "el", &bold());
        assert_eq!(caret, Position::new(0, 3));
        assert_eq!(
            doc.blocks()[0].inlines,
            vec![
                Inline::plain("H"),
                Inline::text("el", bold()),
                Inline::plain("lo")
            ]
        );
    }

    #[test]
    fn test_insert_text_with_newlines_splits_blocks() {
        let mut doc = Document::new();
        let caret = doc.insert_text(Position::new(0, 0), "one\r\ntwo\nthree", &InlineStyle::default());
        assert_eq!(texts(&doc), vec!["one", "two", "three"]);
        assert_eq!(caret, Position::new(2, 5));
    }

    #[test]
    fn test_split_block_after_heading_starts_paragraph() {
        let mut doc = Document::from_blocks(vec![Block::paragraph("Title")]);
        doc.set_block_kind(0, 0, BlockKind::Heading(1));
        let caret = doc.split_block(Position::new(0, 5));
        assert_eq!(caret, Position::new(1, 0));
        assert_eq!(doc.blocks()[0].kind, BlockKind::Heading(1));
        assert_eq!(doc.blocks()[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_split_block_in_middle_of_heading_keeps_kind() {
        let mut doc = Document::from_blocks(vec![Block::paragraph("Title")]);
        doc.set_block_kind(0, 0, BlockKind::Heading(2));
        doc.split_block(Position::new(0, 2));
        assert_eq!(texts(&doc), vec!["Ti", "tle"]);
        assert_eq!(doc.blocks()[1].kind, BlockKind::Heading(2));
    }

    #[test]
    fn test_delete_range_within_block() {
        let mut doc = Document::from_blocks(vec![Block::paragraph("Hello world")]);
        let caret = doc.delete_range(Position::new(0, 5), Position::new(0, 11));
        assert_eq!(caret, Position::new(0, 5));
        assert_eq!(texts(&doc), vec!["Hello"]);
    }

    #[test]
    fn test_delete_range_across_blocks_merges() {
        let mut doc = Document::from_blocks(vec![
            Block::paragraph("first"),
            Block::paragraph("middle"),
            Block::paragraph("last"),
        ]);
        let caret = doc.delete_range(Position::new(2, 1), Position::new(0, 2));
        assert_eq!(caret, Position::new(0, 2));
        assert_eq!(texts(&doc), vec!["fiast"]);
    }

    #[test]
    fn test_delete_everything_keeps_one_block() {
        let mut doc = Document::from_blocks(vec![Block::paragraph("a"), Block::paragraph("b")]);
        let end = doc.end();
        doc.delete_range(Position::new(0, 0), end);
        assert_eq!(doc.block_count(), 1);
        assert!(doc.blocks()[0].is_empty());
    }

    #[test]
    fn test_map_styles_partial_run() {
        let mut doc = Document::from_blocks(vec![Block::paragraph("Hello")]);
        doc.map_styles(Position::new(0, 1), Position::new(0, 3), |s| s.bold = true);
        assert_eq!(
            doc.blocks()[0].inlines,
            vec![
                Inline::plain("H"),
                Inline::text("el", bold()),
                Inline::plain("lo")
            ]
        );
    }

    #[test]
    fn test_map_styles_skips_images() {
        let image = Inline::Image {
            src: "data:image/png;base64,AA==".to_string(),
        };
        let mut doc = Document::from_blocks(vec![Block::new(BlockKind::Paragraph)
            .with_inlines(vec![Inline::plain("a"), image.clone(), Inline::plain("b")])]);
        doc.map_styles(Position::new(0, 0), Position::new(0, 3), |s| s.italic = true);
        assert_eq!(doc.blocks()[0].inlines[1], image);
    }

    #[test]
    fn test_all_text_matches() {
        let doc = Document::from_blocks(vec![Block::new(BlockKind::Paragraph)
            .with_inlines(vec![Inline::text("ab", bold()), Inline::plain("cd")])]);
        assert!(doc.all_text_matches(Position::new(0, 0), Position::new(0, 2), |s| s.bold));
        assert!(!doc.all_text_matches(Position::new(0, 0), Position::new(0, 3), |s| s.bold));
        assert!(!doc.all_text_matches(Position::new(0, 1), Position::new(0, 1), |s| s.bold));
    }

    #[test]
    fn test_read_only_queries_leave_runs_unsplit() {
        let doc = Document::from_blocks(vec![Block::new(BlockKind::Paragraph).with_inlines(vec![
            Inline::text("héllo", bold()),
            Inline::Image {
                src: "data:image/png;base64,AA==".to_string(),
            },
            Inline::plain("wörld"),
        ])]);
        let before = doc.clone();

        assert!(doc.all_text_matches(Position::new(0, 1), Position::new(0, 4), |s| s.bold));
        assert!(!doc.all_text_matches(Position::new(0, 4), Position::new(0, 8), |s| s.bold));
        assert_eq!(
            doc.text_in_range(Position::new(0, 8), Position::new(0, 1)),
            "éllowö"
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_set_alignment_span() {
        let mut doc = Document::from_blocks(vec![
            Block::paragraph("a"),
            Block::paragraph("b"),
            Block::paragraph("c"),
        ]);
        doc.set_alignment(2, 1, Alignment::Right);
        assert_eq!(doc.blocks()[0].align, Alignment::Left);
        assert_eq!(doc.blocks()[1].align, Alignment::Right);
        assert_eq!(doc.blocks()[2].align, Alignment::Right);
    }

    #[test]
    fn test_text_in_range_across_blocks() {
        let doc = Document::from_blocks(vec![Block::paragraph("Hello"), Block::paragraph("world")]);
        assert_eq!(
            doc.text_in_range(Position::new(0, 3), Position::new(1, 2)),
            "lo\nwo"
        );
    }

    #[test]
    fn test_text_in_range_keeps_empty_blocks_as_lines() {
        let doc = Document::from_blocks(vec![
            Block::paragraph("a"),
            Block::new(BlockKind::Paragraph),
            Block::paragraph("b"),
        ]);
        assert_eq!(doc.text_in_range(doc.start(), doc.end()), "a\n\nb");
    }
}
