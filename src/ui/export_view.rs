//! Export panel rendering
//!
//! Draws the "Generate HTML" button, the read-only markup snapshot and the
//! copy button. State lives in [`crate::export::ExportPanel`].

use eframe::egui::{self, RichText, ScrollArea, Stroke, TextEdit, Ui};

use crate::export::ExportPanel;
use crate::theme::{Presentation, ROUNDING};

/// Actions that can be triggered from the export panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAction {
    Generate,
    Copy,
}

/// Label of the copy button for the current copied flag.
pub fn copy_label(copied: bool) -> &'static str {
    if copied {
        "✔ Copied"
    } else {
        "📋 Copy HTML"
    }
}

/// Render the export panel and return any triggered action.
pub fn show_export_panel(
    ui: &mut Ui,
    panel: &ExportPanel,
    colors: &Presentation,
) -> Option<ExportAction> {
    let mut action = None;
    let export = &colors.export;

    egui::Frame::none()
        .fill(export.background)
        .rounding(ROUNDING)
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            let generate = egui::Button::new(
                RichText::new("⚙ Generate HTML").color(export.generate_text),
            )
            .fill(export.generate_fill)
            .rounding(ROUNDING);
            if ui.add(generate).clicked() {
                action = Some(ExportAction::Generate);
            }

            if panel.snapshot().is_empty() {
                return;
            }

            ui.add_space(8.0);

            // The snapshot is read-only; edits to this copy are discarded
            let mut snapshot = panel.snapshot();
            egui::Frame::none()
                .fill(export.output_background)
                .stroke(Stroke::new(1.0, export.output_border))
                .rounding(ROUNDING)
                .inner_margin(egui::Margin::same(8.0))
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_source("export_snapshot")
                        .max_height(160.0)
                        .show(ui, |ui| {
                            ui.add(
                                TextEdit::multiline(&mut snapshot)
                                    .code_editor()
                                    .text_color(export.output_text)
                                    .frame(false)
                                    .desired_width(f32::INFINITY),
                            );
                        });
                });

            ui.add_space(8.0);

            let fill = if panel.is_copied() {
                export.copied_fill
            } else {
                export.copy_fill
            };
            let copy = egui::Button::new(
                RichText::new(copy_label(panel.is_copied())).color(export.generate_text),
            )
            .fill(fill)
            .rounding(ROUNDING);
            if ui.add(copy).clicked() {
                action = Some(ExportAction::Copy);
            }

            if let Some(error) = panel.last_error() {
                ui.add_space(4.0);
                ui.label(RichText::new(error).color(export.error).small());
            }
        });

    action
}
