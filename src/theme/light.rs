//! Light Theme Configuration
//!
//! Converts the `Presentation::light()` palette into egui's `Visuals`.

use eframe::egui::{self, Color32, Visuals};

use super::{apply_presentation, Presentation};

/// Create egui Visuals configured for the light theme.
pub fn create_light_visuals() -> Visuals {
    let mut visuals = Visuals::light();
    apply_presentation(&mut visuals, &Presentation::light());

    // Soft shadows on a light page
    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 2.0),
        blur: 8.0,
        spread: 0.0,
        color: Color32::from_black_alpha(25),
    };
    visuals.popup_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 4.0),
        blur: 12.0,
        spread: 0.0,
        color: Color32::from_black_alpha(30),
    };

    visuals.dark_mode = false;
    visuals
}
