//! Formatting toolbar for Inkpad
//!
//! A single row of controls above the editable surface: font picker,
//! heading menu, inline style toggles, alignment, link, code block, image,
//! text color and the theme toggle. Rendering returns at most one
//! [`ToolbarAction`] per frame; the editor widget decides what it does.

use crate::commands::FormatCommand;
use crate::document::{Alignment, BlockKind};
use crate::editor::FormattingState;
use crate::fonts::{self, FontChoice, FONT_CHOICES};
use crate::theme::{color_to_hex, Presentation, ROUNDING};
use eframe::egui::{self, Color32, Response, RichText, Stroke, Ui, Vec2};

/// Height of the toolbar row.
const TOOLBAR_HEIGHT: f32 = 36.0;

/// Size of icon buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(30.0, 26.0);

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    /// Flip between light and dark
    ToggleTheme,
    /// Make this the current font and apply it
    SelectFont(&'static FontChoice),
    /// Apply a formatting command to the selection
    Format(FormatCommand),
    /// Open the link prompt
    InsertLink,
    /// Open the image picker
    InsertImage,
}

/// Toolbar UI state and rendering.
#[derive(Debug, Clone)]
pub struct Toolbar {
    /// Last color chosen in the picker
    color: [u8; 3],
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolbar {
    pub fn new() -> Self {
        Self { color: [0, 0, 0] }
    }

    /// The color picker's current value as `#rrggbb`.
    pub fn color_hex(&self) -> String {
        let [r, g, b] = self.color;
        color_to_hex(Color32::from_rgb(r, g, b))
    }

    /// Render the toolbar and return any triggered action.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `colors` - Chrome colors of the current theme
    /// * `theme_icon` - Glyph and tooltip of the theme toggle
    /// * `current_font` - The font shown in the picker
    /// * `state` - Formatting at the caret, for button highlighting
    pub fn show(
        &mut self,
        ui: &mut Ui,
        colors: &Presentation,
        theme_icon: (&str, &str),
        current_font: &'static FontChoice,
        state: &FormattingState,
    ) -> Option<ToolbarAction> {
        let mut action: Option<ToolbarAction> = None;
        let bar = &colors.toolbar;

        ui.horizontal(|ui| {
            ui.set_height(TOOLBAR_HEIGHT);
            ui.spacing_mut().item_spacing.x = 4.0;

            // ═══════════════════════════════════════════════════════════════
            // Block Group
            // ═══════════════════════════════════════════════════════════════
            if let Some(font) = font_picker(ui, colors, current_font) {
                action = Some(ToolbarAction::SelectFont(font));
            }

            let heading_label = match state.block {
                BlockKind::Heading(level) => format!("H{}", level),
                _ => "H".to_string(),
            };
            ui.menu_button(RichText::new(heading_label).color(bar.icon), |ui| {
                for level in 1..=6u8 {
                    let command = FormatCommand::Heading(level);
                    let selected = state.block == BlockKind::Heading(level);
                    if ui
                        .selectable_label(selected, command.tooltip())
                        .clicked()
                    {
                        action = Some(ToolbarAction::Format(command));
                        ui.close_menu();
                    }
                }
            })
            .response
            .on_hover_text("Heading");

            vertical_separator(ui, bar.separator, TOOLBAR_HEIGHT - 12.0);

            // ═══════════════════════════════════════════════════════════════
            // Inline Group
            // ═══════════════════════════════════════════════════════════════
            let inline = [
                (FormatCommand::Bold, "B", state.bold),
                (FormatCommand::Italic, "I", state.italic),
                (FormatCommand::Underline, "U", state.underline),
            ];
            for (command, label, active) in inline {
                let text = match command {
                    FormatCommand::Bold => RichText::new(label).strong(),
                    FormatCommand::Italic => RichText::new(label).italics(),
                    _ => RichText::new(label).underline(),
                };
                if format_button(ui, colors, text, &command.tooltip(), active).clicked() {
                    action = Some(ToolbarAction::Format(command));
                }
            }

            vertical_separator(ui, bar.separator, TOOLBAR_HEIGHT - 12.0);

            // ═══════════════════════════════════════════════════════════════
            // Alignment Group
            // ═══════════════════════════════════════════════════════════════
            for align in [Alignment::Left, Alignment::Center, Alignment::Right] {
                let command = FormatCommand::Align(align);
                let text = RichText::new(alignment_icon(align));
                if format_button(ui, colors, text, &command.tooltip(), state.align == align)
                    .clicked()
                {
                    action = Some(ToolbarAction::Format(command));
                }
            }

            vertical_separator(ui, bar.separator, TOOLBAR_HEIGHT - 12.0);

            // ═══════════════════════════════════════════════════════════════
            // Insert Group
            // ═══════════════════════════════════════════════════════════════
            if format_button(ui, colors, RichText::new("🔗"), "Insert Link", state.link).clicked()
            {
                action = Some(ToolbarAction::InsertLink);
            }

            let is_code = state.block == BlockKind::Preformatted;
            let code = FormatCommand::CodeBlock;
            if format_button(ui, colors, RichText::new("{ }"), &code.tooltip(), is_code).clicked() {
                action = Some(ToolbarAction::Format(code));
            }

            if icon_button(ui, colors, "🖼", "Insert Image").clicked() {
                action = Some(ToolbarAction::InsertImage);
            }

            if ui
                .color_edit_button_srgb(&mut self.color)
                .on_hover_text("Text Color")
                .changed()
            {
                action = Some(ToolbarAction::Format(FormatCommand::Color(self.color_hex())));
            }

            // ═══════════════════════════════════════════════════════════════
            // Theme (right-aligned)
            // ═══════════════════════════════════════════════════════════════
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (icon, tooltip) = theme_icon;
                let btn = ui.add(
                    egui::Button::new(RichText::new(icon).size(16.0).color(bar.theme_icon))
                        .fill(bar.button_fill)
                        .stroke(Stroke::new(1.0, bar.button_stroke))
                        .rounding(ROUNDING)
                        .min_size(ICON_BUTTON_SIZE),
                );
                if btn.on_hover_text(tooltip).clicked() {
                    action = Some(ToolbarAction::ToggleTheme);
                }
            });
        });

        action
    }
}

/// Glyph for an alignment button.
pub fn alignment_icon(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => "⬅",
        Alignment::Center => "↔",
        Alignment::Right => "➡",
    }
}

/// Font dropdown. Each entry is drawn in its own family.
fn font_picker(
    ui: &mut Ui,
    colors: &Presentation,
    current: &'static FontChoice,
) -> Option<&'static FontChoice> {
    let mut chosen = None;
    egui::ComboBox::from_id_source("font_picker")
        .selected_text(RichText::new(current.name).color(colors.dropdown.text))
        .width(150.0)
        .show_ui(ui, |ui| {
            for font in FONT_CHOICES {
                let label = RichText::new(font.name)
                    .font(fonts::font_id_for(14.0, Some(font.value), false))
                    .color(colors.dropdown.text);
                if ui
                    .selectable_label(std::ptr::eq(font, current), label)
                    .clicked()
                {
                    chosen = Some(font);
                }
            }
        })
        .response
        .on_hover_text("Font");
    chosen
}

/// Render an icon button with consistent styling.
fn icon_button(ui: &mut Ui, colors: &Presentation, icon: &str, tooltip: &str) -> Response {
    let bar = &colors.toolbar;
    let btn = ui.add(
        egui::Button::new(RichText::new(icon).size(15.0).color(bar.icon))
            .fill(bar.button_fill)
            .stroke(Stroke::new(1.0, bar.button_stroke))
            .rounding(ROUNDING)
            .min_size(ICON_BUTTON_SIZE),
    );

    if btn.hovered() {
        ui.painter()
            .rect_stroke(btn.rect, ROUNDING, Stroke::new(1.0, colors.surface.focus));
    }

    btn.on_hover_text(tooltip)
}

/// Render a format button with active state highlighting.
fn format_button(
    ui: &mut Ui,
    colors: &Presentation,
    text: RichText,
    tooltip: &str,
    active: bool,
) -> Response {
    let bar = &colors.toolbar;
    let fill = if active { bar.button_hover } else { bar.button_fill };
    let stroke = if active {
        Stroke::new(1.0, colors.surface.focus)
    } else {
        Stroke::new(1.0, bar.button_stroke)
    };

    let btn = ui.add(
        egui::Button::new(text.size(14.0).color(bar.icon))
            .fill(fill)
            .stroke(stroke)
            .rounding(ROUNDING)
            .min_size(ICON_BUTTON_SIZE),
    );

    btn.on_hover_text(tooltip)
}

/// Draw a vertical separator line.
fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    ui.add_space(2.0);
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter()
        .line_segment([rect.center_top(), rect.center_bottom()], Stroke::new(1.0, color));
    ui.add_space(2.0);
}
