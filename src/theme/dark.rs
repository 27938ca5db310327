//! Dark Theme Configuration
//!
//! Converts the `Presentation::dark()` palette into egui's `Visuals`.

use eframe::egui::{self, Color32, Visuals};

use super::{apply_presentation, Presentation};

/// Create egui Visuals configured for the dark theme.
pub fn create_dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    apply_presentation(&mut visuals, &Presentation::dark());

    // Shadows need more weight to read on dark backgrounds
    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 4.0),
        blur: 16.0,
        spread: 0.0,
        color: Color32::from_black_alpha(80),
    };
    visuals.popup_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 6.0),
        blur: 20.0,
        spread: 0.0,
        color: Color32::from_black_alpha(100),
    };

    visuals.dark_mode = true;
    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_visuals_is_dark_mode() {
        assert!(create_dark_visuals().dark_mode);
    }

    #[test]
    fn test_dark_visuals_has_dark_background() {
        let visuals = create_dark_visuals();
        assert!(visuals.panel_fill.r() < 50);
        assert!(visuals.panel_fill.g() < 50);
        assert!(visuals.panel_fill.b() < 50);
    }

    #[test]
    fn test_dark_visuals_selection_visible() {
        let visuals = create_dark_visuals();
        assert_ne!(visuals.selection.bg_fill, visuals.extreme_bg_color);
    }

    #[test]
    fn test_dark_visuals_shadows_more_pronounced() {
        let dark_visuals = create_dark_visuals();
        let light_visuals = super::super::light::create_light_visuals();
        assert!(dark_visuals.window_shadow.color.a() > light_visuals.window_shadow.color.a());
    }
}
