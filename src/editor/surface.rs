//! Editable surface for Inkpad
//!
//! Renders the document held by an [`EditorWidget`] as one galley per block
//! and turns keyboard, clipboard and pointer input into edits on it.
//!
//! # Example
//!
//! ```ignore
//! let output = EditorSurface::new(&mut widget)
//!     .font_size(settings.font_size)
//!     .show(ui);
//! ```

use std::sync::Arc;

use eframe::egui::{
    self, text::CCursor, text::LayoutJob, Align, Color32, Event, EventFilter, FontFamily, FontId,
    Galley, Key, Pos2, Rect, Sense, Stroke, TextFormat, Ui, Vec2,
};
use log::debug;

use super::widget::{EditorWidget, Motion};
use crate::commands::{CommandDispatcher, FormatCommand};
use crate::document::{Alignment, Block, BlockKind, Inline, InlineStyle, Position, Selection};
use crate::fonts;
use crate::theme::{color_from_hex, SurfaceColors, ROUNDING};

/// Glyph drawn in place of an embedded image.
pub const IMAGE_GLYPH: &str = "🖼";

/// Vertical gap between blocks.
const BLOCK_SPACING: f32 = 6.0;

/// Padding inside the surface frame.
const SURFACE_PADDING: f32 = 16.0;

/// Font size multiplier for a heading level, as browsers render `h1`-`h6`.
pub fn heading_scale(level: u8) -> f32 {
    match level {
        1 => 2.0,
        2 => 1.5,
        3 => 1.17,
        4 => 1.0,
        5 => 0.83,
        _ => 0.67,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Everything needed to turn a block into a [`LayoutJob`].
pub struct BlockStyle<'a> {
    pub colors: &'a SurfaceColors,
    pub font_size: f32,
    /// CSS family of the current font choice, used for unstyled text
    pub default_family: &'a str,
    pub wrap_width: f32,
}

/// Build the layout job for one block.
///
/// The job text has exactly one character per document offset (images
/// become [`IMAGE_GLYPH`]), so galley cursor indices are block offsets.
/// `selected` is the highlighted character range within the block.
pub fn block_layout_job(
    block: &Block,
    selected: Option<(usize, usize)>,
    style: &BlockStyle<'_>,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = style.wrap_width;
    job.halign = match block.align {
        Alignment::Left => Align::LEFT,
        Alignment::Center => Align::Center,
        Alignment::Right => Align::RIGHT,
    };

    let (size, heading) = match block.kind {
        BlockKind::Heading(level) => (style.font_size * heading_scale(level), true),
        _ => (style.font_size, false),
    };
    let monospace = block.kind == BlockKind::Preformatted;

    if block.is_empty() {
        // An empty section still gives the row its height
        let format = TextFormat {
            font_id: base_font(size, heading, monospace, style.default_family, None),
            ..Default::default()
        };
        job.append("", 0.0, format);
        return job;
    }

    let mut offset = 0;
    for inline in &block.inlines {
        match inline {
            Inline::Text { text, style: run } => {
                let font_id = base_font(
                    size,
                    heading || run.bold,
                    monospace,
                    style.default_family,
                    run.font_family.as_deref(),
                );
                for (piece, is_selected) in split_selected(text, offset, selected) {
                    let format = text_format(run, font_id.clone(), monospace, is_selected, style);
                    job.append(piece, 0.0, format);
                }
                offset += crate::string_utils::char_len(text);
            }
            Inline::Image { .. } => {
                let is_selected = selected.is_some_and(|(a, b)| offset >= a && offset < b);
                let format = TextFormat {
                    font_id: FontId::new(size, FontFamily::Proportional),
                    color: style.colors.text,
                    background: if is_selected {
                        style.colors.selection
                    } else {
                        Color32::TRANSPARENT
                    },
                    ..Default::default()
                };
                job.append(IMAGE_GLYPH, 0.0, format);
                offset += 1;
            }
        }
    }

    job
}

fn base_font(
    size: f32,
    bold: bool,
    monospace: bool,
    default_family: &str,
    family: Option<&str>,
) -> FontId {
    if monospace {
        return FontId::monospace(size);
    }
    fonts::font_id_for(size, Some(family.unwrap_or(default_family)), bold)
}

fn text_format(
    run: &InlineStyle,
    font_id: FontId,
    monospace: bool,
    selected: bool,
    style: &BlockStyle<'_>,
) -> TextFormat {
    let colors = style.colors;
    let color = if run.link.is_some() {
        colors.link
    } else if let Some(color) = run.color.as_deref().and_then(color_from_hex) {
        color
    } else if run.bold {
        colors.strong_text
    } else {
        colors.text
    };

    let background = if selected {
        colors.selection
    } else if monospace {
        colors.code_background
    } else {
        Color32::TRANSPARENT
    };

    let underline = if run.underline || run.link.is_some() {
        Stroke::new(1.0, color)
    } else {
        Stroke::NONE
    };

    TextFormat {
        font_id,
        color,
        background,
        italics: run.italic,
        underline,
        ..Default::default()
    }
}

/// Split `text` (starting at block offset `start`) into pieces that are
/// entirely inside or outside the selected range.
fn split_selected(
    text: &str,
    start: usize,
    selected: Option<(usize, usize)>,
) -> Vec<(&str, bool)> {
    let Some((from, to)) = selected else {
        return vec![(text, false)];
    };
    let len = crate::string_utils::char_len(text);
    let a = from.saturating_sub(start).min(len);
    let b = to.saturating_sub(start).min(len);

    let byte = |chars: usize| crate::string_utils::char_to_byte(text, chars);
    [
        (&text[..byte(a)], false),
        (&text[byte(a)..byte(b)], true),
        (&text[byte(b)..], false),
    ]
    .into_iter()
    .filter(|(piece, _)| !piece.is_empty())
    .collect()
}

/// A laid-out block and where it sits on screen.
struct BlockGalley {
    galley: Arc<Galley>,
    /// Screen position the galley is painted at
    pos: Pos2,
    /// Vertical span used for hit testing, including spacing
    top: f32,
    bottom: f32,
}

impl BlockGalley {
    fn cursor_rect(&self, offset: usize) -> Rect {
        let cursor = self.galley.from_ccursor(CCursor::new(offset));
        self.galley
            .pos_from_cursor(&cursor)
            .translate(self.pos.to_vec2())
    }

    fn offset_at(&self, pos: Pos2) -> usize {
        self.galley.cursor_from_pos(pos - self.pos).ccursor.index
    }

    /// Offset one visual row up or down inside this block, if there is one.
    fn vertical_offset(&self, offset: usize, down: bool) -> Option<usize> {
        let cursor = self.galley.from_ccursor(CCursor::new(offset));
        let row = cursor.rcursor.row;
        if down && row + 1 < self.galley.rows.len() {
            Some(self.galley.cursor_down_one_row(&cursor).ccursor.index)
        } else if !down && row > 0 {
            Some(self.galley.cursor_up_one_row(&cursor).ccursor.index)
        } else {
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Surface Widget
// ─────────────────────────────────────────────────────────────────────────────

/// The editable region for an [`EditorWidget`].
pub struct EditorSurface<'a, D: CommandDispatcher> {
    widget: &'a mut EditorWidget<D>,
    font_size: f32,
    min_height: f32,
}

impl<'a, D: CommandDispatcher> EditorSurface<'a, D> {
    pub fn new(widget: &'a mut EditorWidget<D>) -> Self {
        Self {
            widget,
            font_size: 16.0,
            min_height: 240.0,
        }
    }

    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = height;
        self
    }

    /// Show the surface. The response is marked changed when the document
    /// or the selection changed this frame.
    pub fn show(self, ui: &mut Ui) -> egui::Response {
        let Self {
            widget,
            font_size,
            min_height,
        } = self;
        let id = ui.id().with("inkpad_surface");
        let colors = widget.presentation().surface.clone();
        let card_border = widget.presentation().card_border;

        let has_focus = ui.memory(|m| m.has_focus(id));
        let border = if has_focus { colors.focus } else { card_border };

        let frame = egui::Frame::none()
            .fill(colors.background)
            .stroke(Stroke::new(1.0, border))
            .rounding(ROUNDING)
            .inner_margin(egui::Margin::same(SURFACE_PADDING));

        frame
            .show(ui, |ui| {
                let width = ui.available_width().max(1.0);

                let before = (widget.revision(), widget.selection());

                // Lay out with the current state for hit testing, handle
                // input, then lay out again if anything changed
                let layouts = layout_blocks(ui, widget, &colors, font_size, width, ui.cursor().min);
                let height = layouts
                    .last()
                    .map(|l| l.bottom - ui.cursor().min.y)
                    .unwrap_or(0.0)
                    .max(min_height);
                let (_, rect) = ui.allocate_space(Vec2::new(width, height));
                let mut response = ui.interact(rect, id, Sense::click_and_drag());

                if widget.take_focus_request() || response.clicked() || response.drag_started() {
                    response.request_focus();
                }
                let has_focus = response.has_focus() || ui.memory(|m| m.has_focus(id));

                handle_pointer(ui, widget, &response, &layouts);
                if has_focus {
                    ui.memory_mut(|m| {
                        m.set_focus_lock_filter(
                            id,
                            EventFilter {
                                tab: false,
                                horizontal_arrows: true,
                                vertical_arrows: true,
                                escape: false,
                            },
                        )
                    });
                    handle_keyboard(ui, widget, &layouts);
                }

                let changed = (widget.revision(), widget.selection()) != before;
                let layouts = if changed {
                    layout_blocks(ui, widget, &colors, font_size, width, rect.min)
                } else {
                    layouts
                };

                paint(ui, widget.selection(), &layouts, &colors, has_focus, rect);
                if changed {
                    response.mark_changed();
                    ui.ctx().request_repaint();
                }

                response
            })
            .inner
    }
}

fn layout_blocks<D: CommandDispatcher>(
    ui: &Ui,
    widget: &EditorWidget<D>,
    colors: &SurfaceColors,
    font_size: f32,
    width: f32,
    origin: Pos2,
) -> Vec<BlockGalley> {
    let style = BlockStyle {
        colors,
        font_size,
        default_family: widget.current_font().value,
        wrap_width: width,
    };
    let selection = widget.selection();
    let mut y = origin.y;

    widget
        .document()
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let selected = selection.block_range(index, block.char_len());
            let job = block_layout_job(block, selected, &style);
            let galley = ui.fonts(|f| f.layout_job(job));

            // Center and right aligned rows are laid out around x = 0
            let x = match block.align {
                Alignment::Left => origin.x,
                Alignment::Center => origin.x + width / 2.0,
                Alignment::Right => origin.x + width,
            };
            let top = y;
            let pos = Pos2::new(x, y);
            y += galley.size().y + BLOCK_SPACING;
            BlockGalley {
                galley,
                pos,
                top,
                bottom: y,
            }
        })
        .collect()
}

/// Block position under a screen point, clamped to the nearest block.
fn hit_test(layouts: &[BlockGalley], pos: Pos2) -> Option<Position> {
    let index = layouts
        .iter()
        .position(|l| pos.y < l.bottom)
        .unwrap_or(layouts.len().checked_sub(1)?);
    let layout = &layouts[index];
    let clamped = Pos2::new(pos.x, pos.y.clamp(layout.top, layout.bottom - BLOCK_SPACING));
    Some(Position::new(index, layout.offset_at(clamped)))
}

fn handle_pointer<D: CommandDispatcher>(
    ui: &Ui,
    widget: &mut EditorWidget<D>,
    response: &egui::Response,
    layouts: &[BlockGalley],
) {
    if !response.is_pointer_button_down_on() {
        return;
    }
    let Some(pointer) = response.interact_pointer_pos() else {
        return;
    };
    let Some(position) = hit_test(layouts, pointer) else {
        return;
    };
    let (pressed, shift) = ui.input(|i| (i.pointer.any_pressed(), i.modifiers.shift));
    if pressed && !shift {
        widget.set_caret(position);
    } else {
        widget.extend_selection_to(position);
    }
}

fn handle_keyboard<D: CommandDispatcher>(
    ui: &Ui,
    widget: &mut EditorWidget<D>,
    layouts: &[BlockGalley],
) {
    let events = ui.input(|i| i.events.clone());
    for event in events {
        match event {
            Event::Text(text) => widget.insert_text(&text),
            Event::Paste(text) => widget.insert_text(&text),
            Event::Copy => {
                if !widget.selection().is_collapsed() {
                    ui.ctx().copy_text(widget.selected_text());
                }
            }
            Event::Cut => {
                if !widget.selection().is_collapsed() {
                    let text = widget.cut();
                    ui.ctx().copy_text(text);
                }
            }
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                let extend = modifiers.shift;
                if modifiers.command {
                    match key {
                        Key::A => widget.select_all(),
                        Key::B => {
                            widget.format(FormatCommand::Bold);
                        }
                        Key::I => {
                            widget.format(FormatCommand::Italic);
                        }
                        Key::U => {
                            widget.format(FormatCommand::Underline);
                        }
                        _ => {}
                    }
                    continue;
                }
                match key {
                    Key::Enter => widget.insert_newline(),
                    Key::Backspace => widget.backspace(),
                    Key::Delete => widget.delete_forward(),
                    Key::ArrowLeft => widget.move_caret(Motion::Left, extend),
                    Key::ArrowRight => widget.move_caret(Motion::Right, extend),
                    Key::Home => widget.move_caret(Motion::BlockStart, extend),
                    Key::End => widget.move_caret(Motion::BlockEnd, extend),
                    Key::ArrowUp | Key::ArrowDown => {
                        let down = key == Key::ArrowDown;
                        move_vertically(widget, layouts, down, extend);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

/// Move by visual row inside a wrapped block, or to the neighbouring block.
fn move_vertically<D: CommandDispatcher>(
    widget: &mut EditorWidget<D>,
    layouts: &[BlockGalley],
    down: bool,
    extend: bool,
) {
    let caret = widget.selection().focus;
    let within = layouts
        .get(caret.block)
        .and_then(|layout| layout.vertical_offset(caret.offset, down));
    match within {
        Some(offset) => widget.move_to(Position::new(caret.block, offset), extend),
        None => {
            let motion = if down { Motion::Down } else { Motion::Up };
            widget.move_caret(motion, extend);
        }
    }
    debug!("Caret moved to {:?}", widget.selection().focus);
}

fn paint(
    ui: &Ui,
    selection: Selection,
    layouts: &[BlockGalley],
    colors: &SurfaceColors,
    has_focus: bool,
    clip: Rect,
) {
    let painter = ui.painter_at(clip.expand(2.0));
    for layout in layouts {
        painter.galley(layout.pos, layout.galley.clone(), colors.text);
    }

    if has_focus {
        let caret = selection.focus;
        if let Some(layout) = layouts.get(caret.block) {
            let rect = layout.cursor_rect(caret.offset);
            painter.line_segment(
                [rect.center_top(), rect.center_bottom()],
                Stroke::new(1.5, colors.caret),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::fonts::{create_font_definitions, default_font, FontFiles};
    use crate::theme::Presentation;
    use egui::Modifiers;

    /// Headless context with the editor fonts bound.
    fn context() -> egui::Context {
        let ctx = egui::Context::default();
        ctx.set_fonts(create_font_definitions(&FontFiles::new()));
        ctx
    }

    /// Run one frame with `events`, returning the platform output and
    /// whether the surface reported a change.
    fn frame(
        ctx: &egui::Context,
        widget: &mut EditorWidget,
        events: Vec<Event>,
    ) -> (egui::PlatformOutput, bool) {
        let mut changed = false;
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let output = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                changed = EditorSurface::new(widget).show(ui).changed();
            });
        });
        (output.platform_output, changed)
    }

    /// A focused surface over an empty document.
    fn focused() -> (egui::Context, EditorWidget) {
        let ctx = context();
        let mut widget = EditorWidget::new(Theme::Light, default_font());
        frame(&ctx, &mut widget, Vec::new());
        (ctx, widget)
    }

    fn key(key: Key) -> Event {
        key_with(key, Modifiers::NONE)
    }

    fn key_with(key: Key, modifiers: Modifiers) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn text(s: &str) -> Event {
        Event::Text(s.to_string())
    }

    #[test]
    fn test_typing_and_shortcuts_then_paste() {
        let (ctx, mut widget) = focused();
        frame(&ctx, &mut widget, vec![text("Hello")]);
        frame(
            &ctx,
            &mut widget,
            vec![
                key_with(Key::A, Modifiers::COMMAND),
                key_with(Key::B, Modifiers::COMMAND),
            ],
        );
        frame(
            &ctx,
            &mut widget,
            vec![key(Key::End), Event::Paste("x\ny".to_string())],
        );
        assert_eq!(
            widget.document().to_html(),
            "<div><b>Hellox</b></div><div><b>y</b></div>"
        );
    }

    #[test]
    fn test_italic_and_underline_shortcuts() {
        let (ctx, mut widget) = focused();
        frame(
            &ctx,
            &mut widget,
            vec![
                text("ab"),
                key_with(Key::A, Modifiers::COMMAND),
                key_with(Key::I, Modifiers::COMMAND),
                key_with(Key::U, Modifiers::COMMAND),
            ],
        );
        assert_eq!(widget.document().to_html(), "<div><i><u>ab</u></i></div>");
    }

    #[test]
    fn test_enter_backspace_delete_and_home() {
        let (ctx, mut widget) = focused();
        frame(&ctx, &mut widget, vec![text("ab"), key(Key::Enter), text("cd")]);
        assert_eq!(widget.document().to_html(), "<div>ab</div><div>cd</div>");

        frame(&ctx, &mut widget, vec![key(Key::Home), key(Key::Backspace)]);
        assert_eq!(widget.document().to_html(), "<div>abcd</div>");
        assert_eq!(widget.selection(), Selection::caret(Position::new(0, 2)));

        frame(&ctx, &mut widget, vec![key(Key::Delete)]);
        assert_eq!(widget.document().to_html(), "<div>abd</div>");

        frame(&ctx, &mut widget, vec![key(Key::Home), key(Key::Delete)]);
        assert_eq!(widget.document().to_html(), "<div>bd</div>");
    }

    #[test]
    fn test_shift_arrows_extend_selection() {
        let (ctx, mut widget) = focused();
        let shift = Modifiers {
            shift: true,
            ..Modifiers::NONE
        };
        frame(
            &ctx,
            &mut widget,
            vec![
                text("Hello"),
                key_with(Key::ArrowLeft, shift),
                key_with(Key::ArrowLeft, shift),
                text("p!"),
            ],
        );
        assert_eq!(widget.document().to_html(), "<div>Help!</div>");
    }

    #[test]
    fn test_cut_copies_plain_text_and_clears_document() {
        let (ctx, mut widget) = focused();
        frame(&ctx, &mut widget, vec![text("Hello"), key(Key::Enter), text("you")]);
        let (output, changed) = frame(
            &ctx,
            &mut widget,
            vec![key_with(Key::A, Modifiers::COMMAND), Event::Cut],
        );
        assert!(changed);
        assert_eq!(output.copied_text, "Hello\nyou");
        assert_eq!(widget.document().to_html(), "");
    }

    #[test]
    fn test_copy_leaves_document_alone() {
        let (ctx, mut widget) = focused();
        frame(&ctx, &mut widget, vec![text("Hello")]);
        let (output, _) = frame(
            &ctx,
            &mut widget,
            vec![key_with(Key::A, Modifiers::COMMAND), Event::Copy],
        );
        assert_eq!(output.copied_text, "Hello");
        assert_eq!(widget.document().to_html(), "<div>Hello</div>");
    }

    #[test]
    fn test_idle_frame_reports_no_change() {
        let (ctx, mut widget) = focused();
        let (_, changed) = frame(&ctx, &mut widget, vec![text("a")]);
        assert!(changed);
        let (_, changed) = frame(&ctx, &mut widget, Vec::new());
        assert!(!changed);
    }

    fn style(colors: &SurfaceColors) -> BlockStyle<'_> {
        BlockStyle {
            colors,
            font_size: 16.0,
            default_family: "system-ui",
            wrap_width: 400.0,
        }
    }

    fn bold() -> InlineStyle {
        InlineStyle {
            bold: true,
            ..InlineStyle::default()
        }
    }

    #[test]
    fn test_heading_scales() {
        assert_eq!(heading_scale(1), 2.0);
        assert_eq!(heading_scale(2), 1.5);
        assert!(heading_scale(6) < heading_scale(5));
    }

    #[test]
    fn test_job_text_has_one_char_per_offset() {
        let colors = Presentation::light().surface;
        let block = Block::new(BlockKind::Paragraph).with_inlines(vec![
            Inline::plain("ab"),
            Inline::Image {
                src: "data:image/png;base64,AA==".to_string(),
            },
            Inline::text("cd", bold()),
        ]);
        let job = block_layout_job(&block, None, &style(&colors));
        assert_eq!(job.text, format!("ab{}cd", IMAGE_GLYPH));
        assert_eq!(job.text.chars().count(), block.char_len());
    }

    #[test]
    fn test_selection_splits_runs_with_background() {
        let colors = Presentation::light().surface;
        let block = Block::paragraph("Hello");
        let job = block_layout_job(&block, Some((1, 3)), &style(&colors));

        assert_eq!(job.sections.len(), 3);
        assert_eq!(&job.text[job.sections[1].byte_range.clone()], "el");
        assert_eq!(job.sections[1].format.background, colors.selection);
        assert_eq!(job.sections[0].format.background, Color32::TRANSPARENT);
    }

    #[test]
    fn test_split_selected_handles_multibyte() {
        let pieces = split_selected("héllo", 10, Some((11, 13)));
        assert_eq!(pieces, vec![("h", false), ("él", true), ("lo", false)]);
        assert_eq!(split_selected("abc", 5, Some((0, 2))), vec![("abc", false)]);
    }

    #[test]
    fn test_empty_block_still_has_a_section() {
        let colors = Presentation::dark().surface;
        let job = block_layout_job(&Block::new(BlockKind::Heading(1)), None, &style(&colors));
        assert_eq!(job.sections.len(), 1);
        assert_eq!(job.sections[0].format.font_id.size, 32.0);
    }

    #[test]
    fn test_alignment_maps_to_halign() {
        let colors = Presentation::light().surface;
        let block = Block::paragraph("x").with_align(Alignment::Right);
        assert_eq!(block_layout_job(&block, None, &style(&colors)).halign, Align::RIGHT);
    }

    #[test]
    fn test_link_and_code_formats() {
        let colors = Presentation::light().surface;
        let link = InlineStyle {
            link: Some("https://a.io".to_string()),
            ..InlineStyle::default()
        };
        let block = Block::new(BlockKind::Preformatted).with_inlines(vec![Inline::text("x", link)]);
        let job = block_layout_job(&block, None, &style(&colors));
        let format = &job.sections[0].format;
        assert_eq!(format.color, colors.link);
        assert_eq!(format.underline.color, colors.link);
        assert_eq!(format.background, colors.code_background);
        assert_eq!(format.font_id.family, FontFamily::Monospace);
    }

    #[test]
    fn test_custom_color_and_font_family() {
        let colors = Presentation::light().surface;
        let run = InlineStyle {
            color: Some("#ff0000".to_string()),
            font_family: Some("'Lato', sans-serif".to_string()),
            italic: true,
            ..InlineStyle::default()
        };
        let block = Block::new(BlockKind::Paragraph).with_inlines(vec![Inline::text("x", run)]);
        let job = block_layout_job(&block, None, &style(&colors));
        let format = &job.sections[0].format;
        assert_eq!(format.color, Color32::from_rgb(255, 0, 0));
        assert!(format.italics);
        assert_eq!(format.font_id.family, FontFamily::Name("Lato".into()));
    }
}
