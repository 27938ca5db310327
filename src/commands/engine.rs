//! Native command engine.
//!
//! Implements each [`FormatCommand`] against the explicit document model with
//! the semantics users expect from browser editing: inline marks toggle,
//! block commands apply to every block the selection touches, and commands
//! issued with a collapsed caret set the style for the next typed text.

use super::{CommandDispatcher, Edit, FormatCommand};
use crate::document::{BlockKind, Document, Inline, InlineStyle, Selection};
use log::debug;

/// The built-in [`CommandDispatcher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentEngine;

impl DocumentEngine {
    pub fn new() -> Self {
        Self
    }
}

impl CommandDispatcher for DocumentEngine {
    fn dispatch(
        &mut self,
        document: &Document,
        selection: Selection,
        typing_style: &InlineStyle,
        command: &FormatCommand,
    ) -> Edit {
        let selection = Selection::new(
            document.clamp(selection.anchor),
            document.clamp(selection.focus),
        );
        let edit = match command {
            FormatCommand::Bold => toggle_mark(document, selection, typing_style, Mark::Bold),
            FormatCommand::Italic => toggle_mark(document, selection, typing_style, Mark::Italic),
            FormatCommand::Underline => {
                toggle_mark(document, selection, typing_style, Mark::Underline)
            }
            FormatCommand::Align(align) => {
                let mut doc = document.clone();
                let (start, end) = selection.range();
                doc.set_alignment(start.block, end.block, *align);
                applied(doc, selection, typing_style.clone())
            }
            FormatCommand::Heading(level) if (1..=6).contains(level) => {
                format_block(document, selection, typing_style, BlockKind::Heading(*level))
            }
            FormatCommand::CodeBlock => {
                format_block(document, selection, typing_style, BlockKind::Preformatted)
            }
            FormatCommand::Link(url) if !url.trim().is_empty() => {
                create_link(document, selection, typing_style, url.trim())
            }
            FormatCommand::Image(src) if !src.is_empty() => {
                insert_image(document, selection, typing_style, src)
            }
            FormatCommand::Color(value) => match normalize_hex_color(value) {
                Some(color) => set_style(document, selection, typing_style, |style| {
                    style.color = Some(color.clone())
                }),
                None => Edit::unchanged(document, selection, typing_style),
            },
            FormatCommand::FontFamily(family) if !family.trim().is_empty() => {
                let family = family.trim().to_string();
                set_style(document, selection, typing_style, |style| {
                    style.font_family = Some(family.clone())
                })
            }
            _ => Edit::unchanged(document, selection, typing_style),
        };

        if edit.applied {
            debug!("Applied {} command", command.name());
        } else {
            debug!("Ignored unsupported {} request: {:?}", command.name(), command);
        }
        edit
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command implementations
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Mark {
    Bold,
    Italic,
    Underline,
}

impl Mark {
    fn get(self, style: &InlineStyle) -> bool {
        match self {
            Mark::Bold => style.bold,
            Mark::Italic => style.italic,
            Mark::Underline => style.underline,
        }
    }

    fn set(self, style: &mut InlineStyle, value: bool) {
        match self {
            Mark::Bold => style.bold = value,
            Mark::Italic => style.italic = value,
            Mark::Underline => style.underline = value,
        }
    }
}

fn applied(document: Document, selection: Selection, typing_style: InlineStyle) -> Edit {
    Edit {
        document,
        selection,
        typing_style,
        applied: true,
    }
}

/// Remove the mark when the whole selection already has it, add it otherwise.
fn toggle_mark(
    document: &Document,
    selection: Selection,
    typing_style: &InlineStyle,
    mark: Mark,
) -> Edit {
    if selection.is_collapsed() {
        let mut typing = typing_style.clone();
        mark.set(&mut typing, !mark.get(typing_style));
        return applied(document.clone(), selection, typing);
    }

    let (start, end) = selection.range();
    let value = !document.all_text_matches(start, end, |style| mark.get(style));
    let mut doc = document.clone();
    doc.map_styles(start, end, |style| mark.set(style, value));
    let mut typing = typing_style.clone();
    mark.set(&mut typing, value);
    applied(doc, selection, typing)
}

fn format_block(
    document: &Document,
    selection: Selection,
    typing_style: &InlineStyle,
    kind: BlockKind,
) -> Edit {
    let mut doc = document.clone();
    let (start, end) = selection.range();
    doc.set_block_kind(start.block, end.block, kind);
    applied(doc, selection, typing_style.clone())
}

/// Apply a style change to the selection, or to the typing style when the
/// caret is collapsed.
fn set_style<F>(
    document: &Document,
    selection: Selection,
    typing_style: &InlineStyle,
    mut change: F,
) -> Edit
where
    F: FnMut(&mut InlineStyle),
{
    let mut typing = typing_style.clone();
    change(&mut typing);
    if selection.is_collapsed() {
        return applied(document.clone(), selection, typing);
    }
    let (start, end) = selection.range();
    let mut doc = document.clone();
    doc.map_styles(start, end, change);
    applied(doc, selection, typing)
}

/// Link the selected text, or insert the URL as linked text at a caret.
fn create_link(
    document: &Document,
    selection: Selection,
    typing_style: &InlineStyle,
    url: &str,
) -> Edit {
    let mut doc = document.clone();
    if selection.is_collapsed() {
        let style = InlineStyle {
            link: Some(url.to_string()),
            ..typing_style.clone()
        };
        let caret = doc.insert_text(selection.focus, url, &style);
        return applied(doc, Selection::caret(caret), typing_style.without_link());
    }
    let (start, end) = selection.range();
    doc.map_styles(start, end, |style| style.link = Some(url.to_string()));
    applied(doc, selection, typing_style.clone())
}

/// Replace the selection with an image and place the caret after it.
fn insert_image(
    document: &Document,
    selection: Selection,
    typing_style: &InlineStyle,
    src: &str,
) -> Edit {
    let mut doc = document.clone();
    let (start, end) = selection.range();
    let at = doc.delete_range(start, end);
    let caret = doc.insert_inline(
        at,
        Inline::Image {
            src: src.to_string(),
        },
    );
    applied(doc, Selection::caret(caret), typing_style.clone())
}

/// Normalize a color to lowercase `#rrggbb`. Accepts `#rgb` and `#rrggbb`.
pub fn normalize_hex_color(value: &str) -> Option<String> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(format!("#{}", hex.to_ascii_lowercase())),
        3 => {
            let expanded: String = hex
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_lowercase();
            Some(format!("#{}", expanded))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Alignment, Block, Position};

    fn engine_apply(doc: &Document, sel: Selection, command: FormatCommand) -> Edit {
        DocumentEngine::new().dispatch(doc, sel, &InlineStyle::default(), &command)
    }

    fn hello() -> Document {
        Document::from_blocks(vec![Block::paragraph("Hello")])
    }

    fn select_all(doc: &Document) -> Selection {
        Selection::new(doc.start(), doc.end())
    }

    #[test]
    fn test_bold_then_heading_scenario() {
        let doc = hello();
        let sel = select_all(&doc);
        let edit = engine_apply(&doc, sel, FormatCommand::Bold);
        let edit = engine_apply(&edit.document, edit.selection, FormatCommand::Heading(2));
        assert_eq!(edit.document.to_html(), "<h2><b>Hello</b></h2>");
    }

    #[test]
    fn test_bold_toggles_off_when_fully_bold() {
        let doc = hello();
        let sel = select_all(&doc);
        let once = engine_apply(&doc, sel, FormatCommand::Bold);
        let twice = engine_apply(&once.document, sel, FormatCommand::Bold);
        assert_eq!(twice.document, doc);
        assert!(!twice.typing_style.bold);
    }

    #[test]
    fn test_bold_on_mixed_selection_makes_everything_bold() {
        let doc = hello();
        let partial = engine_apply(
            &doc,
            Selection::new(Position::new(0, 0), Position::new(0, 2)),
            FormatCommand::Bold,
        );
        let all = engine_apply(&partial.document, select_all(&doc), FormatCommand::Bold);
        assert_eq!(all.document.to_html(), "<div><b>Hello</b></div>");
    }

    #[test]
    fn test_collapsed_bold_changes_typing_style_only() {
        let doc = hello();
        let edit = engine_apply(&doc, Selection::caret(Position::new(0, 5)), FormatCommand::Bold);
        assert_eq!(edit.document, doc);
        assert!(edit.typing_style.bold);
        assert!(edit.applied);
    }

    #[test]
    fn test_alignment_applies_to_touched_blocks() {
        let doc = Document::from_blocks(vec![
            Block::paragraph("a"),
            Block::paragraph("b"),
            Block::paragraph("c"),
        ]);
        let sel = Selection::new(Position::new(0, 1), Position::new(1, 0));
        let edit = engine_apply(&doc, sel, FormatCommand::Align(Alignment::Center));
        let aligns: Vec<_> = edit.document.blocks().iter().map(|b| b.align).collect();
        assert_eq!(
            aligns,
            vec![Alignment::Center, Alignment::Center, Alignment::Left]
        );
    }

    #[test]
    fn test_heading_level_out_of_range_is_ignored() {
        let doc = hello();
        let edit = engine_apply(&doc, select_all(&doc), FormatCommand::Heading(7));
        assert!(!edit.applied);
        assert_eq!(edit.document, doc);
    }

    #[test]
    fn test_code_block() {
        let doc = hello();
        let edit = engine_apply(&doc, Selection::caret(Position::new(0, 2)), FormatCommand::CodeBlock);
        assert_eq!(edit.document.to_html(), "<pre>Hello</pre>");
    }

    #[test]
    fn test_link_wraps_selection() {
        let doc = hello();
        let edit = engine_apply(
            &doc,
            select_all(&doc),
            FormatCommand::Link(" https://example.com ".to_string()),
        );
        assert_eq!(
            edit.document.to_html(),
            "<div><a href=\"https://example.com\">Hello</a></div>"
        );
    }

    #[test]
    fn test_link_at_caret_inserts_url_text() {
        let doc = hello();
        let edit = engine_apply(
            &doc,
            Selection::caret(Position::new(0, 5)),
            FormatCommand::Link("https://a.io".to_string()),
        );
        assert_eq!(
            edit.document.to_html(),
            "<div>Hello<a href=\"https://a.io\">https://a.io</a></div>"
        );
        assert_eq!(edit.selection, Selection::caret(Position::new(0, 17)));
        assert!(edit.typing_style.link.is_none());
    }

    #[test]
    fn test_empty_link_is_a_no_op() {
        let doc = hello();
        let edit = engine_apply(&doc, select_all(&doc), FormatCommand::Link("   ".to_string()));
        assert!(!edit.applied);
        assert_eq!(edit.document.to_html(), doc.to_html());
    }

    #[test]
    fn test_image_replaces_selection() {
        let doc = hello();
        let sel = Selection::new(Position::new(0, 1), Position::new(0, 4));
        let edit = engine_apply(
            &doc,
            sel,
            FormatCommand::Image("data:image/png;base64,AA==".to_string()),
        );
        assert_eq!(
            edit.document.to_html(),
            "<div>H<img src=\"data:image/png;base64,AA==\">o</div>"
        );
        assert_eq!(edit.selection, Selection::caret(Position::new(0, 2)));
    }

    #[test]
    fn test_color_is_normalized() {
        let doc = hello();
        let edit = engine_apply(&doc, select_all(&doc), FormatCommand::Color("#FFAA00".to_string()));
        assert_eq!(
            edit.document.to_html(),
            "<div><font color=\"#ffaa00\">Hello</font></div>"
        );
    }

    #[test]
    fn test_invalid_color_is_ignored() {
        let doc = hello();
        let edit = engine_apply(&doc, select_all(&doc), FormatCommand::Color("red".to_string()));
        assert!(!edit.applied);
    }

    #[test]
    fn test_font_family_on_caret_sets_typing_default() {
        let doc = hello();
        let edit = engine_apply(
            &doc,
            Selection::caret(Position::new(0, 0)),
            FormatCommand::FontFamily("'Lato', sans-serif".to_string()),
        );
        assert_eq!(edit.document, doc);
        assert_eq!(
            edit.typing_style.font_family.as_deref(),
            Some("'Lato', sans-serif")
        );
    }

    #[test]
    fn test_font_family_wraps_only_the_selection() {
        let doc = hello();
        let edit = engine_apply(
            &doc,
            Selection::new(Position::new(0, 1), Position::new(0, 3)),
            FormatCommand::FontFamily("'Lato', sans-serif".to_string()),
        );
        assert!(edit.applied);
        assert_eq!(
            edit.document.to_html(),
            "<div>H<font face=\"'Lato', sans-serif\">el</font>lo</div>"
        );
        assert_eq!(edit.selection, Selection::new(Position::new(0, 1), Position::new(0, 3)));
    }

    #[test]
    fn test_normalize_hex_color() {
        assert_eq!(normalize_hex_color("#ABCDEF"), Some("#abcdef".to_string()));
        assert_eq!(normalize_hex_color("#f0a"), Some("#ff00aa".to_string()));
        assert_eq!(normalize_hex_color("abcdef"), None);
        assert_eq!(normalize_hex_color("#12345"), None);
        assert_eq!(normalize_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let doc = hello();
        let sel = Selection::new(Position::new(0, 0), Position::new(9, 99));
        let edit = engine_apply(&doc, sel, FormatCommand::Italic);
        assert_eq!(edit.document.to_html(), "<div><i>Hello</i></div>");
    }
}
