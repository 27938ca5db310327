//! Markup serialization
//!
//! Produces the same shape of markup a browser editing engine leaves in a
//! `contenteditable` region, so the export panel output can be pasted into
//! any HTML consumer.

use super::{Block, Document, Inline, InlineStyle};
use std::fmt::Write;

impl Document {
    /// Serialize the document to an HTML fragment.
    ///
    /// A pristine document (one empty paragraph) serializes to the empty
    /// string, like an untouched editable region.
    pub fn to_html(&self) -> String {
        if self.is_pristine() {
            return String::new();
        }
        let mut out = String::new();
        for block in &self.blocks {
            write_block(&mut out, block);
        }
        out
    }
}

fn write_block(out: &mut String, block: &Block) {
    let tag = block.kind.tag();
    out.push('<');
    out.push_str(tag);
    if let Some(align) = block.align.css_value() {
        let _ = write!(out, " style=\"text-align: {};\"", align);
    }
    out.push('>');

    if block.is_empty() {
        out.push_str("<br>");
    } else {
        for inline in &block.inlines {
            write_inline(out, inline);
        }
    }

    let _ = write!(out, "</{}>", tag);
}

fn write_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Image { src } => {
            let _ = write!(out, "<img src=\"{}\">", escape_attr(src));
        }
        Inline::Text { text, style } => {
            let closers = open_style(out, style);
            out.push_str(&escape_text(text));
            for closer in closers.iter().rev() {
                out.push_str(closer);
            }
        }
    }
}

/// Write opening tags for `style`, outermost first, and return the matching
/// closing tags in opening order.
fn open_style(out: &mut String, style: &InlineStyle) -> Vec<&'static str> {
    let mut closers = Vec::new();

    if let Some(href) = &style.link {
        let _ = write!(out, "<a href=\"{}\">", escape_attr(href));
        closers.push("</a>");
    }

    if style.font_family.is_some() || style.color.is_some() {
        out.push_str("<font");
        if let Some(face) = &style.font_family {
            let _ = write!(out, " face=\"{}\"", escape_attr(face));
        }
        if let Some(color) = &style.color {
            let _ = write!(out, " color=\"{}\"", escape_attr(color));
        }
        out.push('>');
        closers.push("</font>");
    }

    for (enabled, open, close) in [
        (style.bold, "<b>", "</b>"),
        (style.italic, "<i>", "</i>"),
        (style.underline, "<u>", "</u>"),
    ] {
        if enabled {
            out.push_str(open);
            closers.push(close);
        }
    }

    closers
}

/// Escape text content the way `innerHTML` serializes it.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for use inside double quotes.
fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Alignment, BlockKind};

    #[test]
    fn test_pristine_document_is_empty_string() {
        assert_eq!(Document::new().to_html(), "");
    }

    #[test]
    fn test_heading_with_bold_text() {
        let style = InlineStyle {
            bold: true,
            ..InlineStyle::default()
        };
        let mut block = Block::new(BlockKind::Heading(2));
        block.inlines.push(Inline::text("Hello", style));
        let doc = Document::from_blocks(vec![block]);
        assert_eq!(doc.to_html(), "<h2><b>Hello</b></h2>");
    }

    #[test]
    fn test_paragraphs_and_empty_block() {
        let doc = Document::from_blocks(vec![
            Block::paragraph("one"),
            Block::new(BlockKind::Paragraph),
            Block::paragraph("two"),
        ]);
        assert_eq!(doc.to_html(), "<div>one</div><div><br></div><div>two</div>");
    }

    #[test]
    fn test_alignment_style_attribute() {
        let doc = Document::from_blocks(vec![
            Block::paragraph("mid").with_align(Alignment::Center),
            Block::paragraph("end").with_align(Alignment::Right),
        ]);
        assert_eq!(
            doc.to_html(),
            "<div style=\"text-align: center;\">mid</div>\
             <div style=\"text-align: right;\">end</div>"
        );
    }

    #[test]
    fn test_nesting_order_of_inline_tags() {
        let style = InlineStyle {
            bold: true,
            italic: true,
            underline: true,
            link: Some("https://example.com/?a=1&b=2".to_string()),
            color: Some("#ff0000".to_string()),
            font_family: Some("'Roboto', sans-serif".to_string()),
        };
        let doc = Document::from_blocks(vec![
            Block::new(BlockKind::Paragraph).with_inlines(vec![Inline::text("x", style)])
        ]);
        assert_eq!(
            doc.to_html(),
            "<div><a href=\"https://example.com/?a=1&amp;b=2\">\
             <font face=\"'Roboto', sans-serif\" color=\"#ff0000\">\
             <b><i><u>x</u></i></b></font></a></div>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = Document::from_blocks(vec![Block::paragraph("a < b & \"c\"")]);
        assert_eq!(doc.to_html(), "<div>a &lt; b &amp; \"c\"</div>");
    }

    #[test]
    fn test_non_breaking_space_is_an_entity() {
        let doc = Document::from_blocks(vec![Block::paragraph("a\u{a0}b  c")]);
        assert_eq!(doc.to_html(), "<div>a&nbsp;b  c</div>");
    }

    #[test]
    fn test_attribute_escaping_keeps_angle_brackets() {
        assert_eq!(escape_attr("a<b>\"c\"&\u{a0}"), "a<b>&quot;c&quot;&amp;&nbsp;");
    }

    #[test]
    fn test_image_and_preformatted() {
        let mut block = Block::new(BlockKind::Preformatted);
        block.inlines.push(Inline::plain("fn main() {}"));
        let image = Block::new(BlockKind::Paragraph).with_inlines(vec![Inline::Image {
            src: "data:image/png;base64,iVBO\"".to_string(),
        }]);
        let doc = Document::from_blocks(vec![block, image]);
        assert_eq!(
            doc.to_html(),
            "<pre>fn main() {}</pre><div><img src=\"data:image/png;base64,iVBO&quot;\"></div>"
        );
    }
}
