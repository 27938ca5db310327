//! Modal URL prompt for link insertion.

use eframe::egui::{self, Key, RichText};

use crate::theme::Presentation;

/// State of an open link prompt.
#[derive(Debug, Clone, Default)]
pub struct LinkDialog {
    url_input: String,
}

/// Result from showing the link dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDialogResult {
    /// No action taken (dialog still open)
    None,
    /// Dialog was cancelled (button or Escape)
    Cancelled,
    /// The user confirmed; the URL is passed on untrimmed
    Confirmed(String),
}

impl LinkDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the dialog and return the result.
    pub fn show(&mut self, ctx: &egui::Context, colors: &Presentation) -> LinkDialogResult {
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            return LinkDialogResult::Cancelled;
        }

        let mut result = LinkDialogResult::None;

        egui::Window::new("🔗 Insert Link")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(colors.dropdown.fill)
                    .stroke(egui::Stroke::new(1.0, colors.dropdown.border))
                    .rounding(8.0),
            )
            .show(ctx, |ui| {
                ui.set_min_width(350.0);

                ui.add_space(8.0);
                ui.label(RichText::new("Enter URL:").color(colors.dropdown.text));
                ui.add_space(4.0);

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.url_input)
                        .hint_text("https://")
                        .desired_width(330.0),
                );
                if self.url_input.is_empty() && !response.has_focus() {
                    response.request_focus();
                }

                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("OK").clicked()
                            || (response.lost_focus() && ctx.input(|i| i.key_pressed(Key::Enter)))
                        {
                            result = LinkDialogResult::Confirmed(self.url_input.clone());
                        }

                        ui.add_space(8.0);

                        if ui.button("Cancel").clicked() {
                            result = LinkDialogResult::Cancelled;
                        }
                    });
                });

                ui.add_space(4.0);
            });

        result
    }
}
