//! Theme System for Inkpad
//!
//! The theme only affects presentation: it never touches document content.
//!
//! # Architecture
//!
//! [`Presentation`] holds every chrome color the editor draws with, grouped
//! by the part of the window it belongs to. [`Presentation::for_theme`] is a
//! pure function of the [`Theme`], so toggling twice yields identical values.
//! `light.rs` and `dark.rs` turn a palette into egui `Visuals`, and
//! [`ThemeManager`] tracks the active theme and applies it to the context.
//!
//! # Usage
//!
//! ```ignore
//! use crate::theme::Presentation;
//! use crate::config::Theme;
//!
//! let colors = Presentation::for_theme(Theme::Dark);
//! ui.label(RichText::new("Hello").color(colors.surface.text));
//! ```

pub mod dark;
pub mod light;
pub mod manager;

pub use manager::ThemeManager;

use crate::config::Theme;
use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Palette
// ─────────────────────────────────────────────────────────────────────────────

/// Gray scale and accents used by both themes.
pub mod palette {
    use eframe::egui::Color32;

    pub const WHITE: Color32 = Color32::WHITE;
    pub const GRAY_50: Color32 = Color32::from_rgb(0xf9, 0xfa, 0xfb);
    pub const GRAY_100: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);
    pub const GRAY_200: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);
    pub const GRAY_300: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);
    pub const GRAY_600: Color32 = Color32::from_rgb(0x4b, 0x55, 0x63);
    pub const GRAY_700: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);
    pub const GRAY_800: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);
    pub const GRAY_900: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);

    pub const TEAL_400: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf);
    pub const TEAL_500: Color32 = Color32::from_rgb(0x14, 0xb8, 0xa6);
    pub const GREEN_500: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
    pub const YELLOW_400: Color32 = Color32::from_rgb(0xfa, 0xcc, 0x15);
    pub const RED_400: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);
    pub const RED_600: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
    pub const BLUE_400: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);
    pub const BLUE_600: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
}

/// Parse a `#rrggbb` string into a color.
pub fn color_from_hex(hex: &str) -> Option<Color32> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Format a color as lowercase `#rrggbb`.
pub fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

// ─────────────────────────────────────────────────────────────────────────────
// Presentation
// ─────────────────────────────────────────────────────────────────────────────

/// All colors the editor chrome is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Window background behind the card
    pub page: Color32,
    /// The card holding toolbar, surface and export panel
    pub card: Color32,
    pub card_border: Color32,
    pub surface: SurfaceColors,
    pub toolbar: ToolbarColors,
    pub dropdown: DropdownColors,
    pub export: ExportColors,
}

/// Colors of the editable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceColors {
    pub background: Color32,
    pub text: Color32,
    /// Text color of bold runs
    pub strong_text: Color32,
    pub link: Color32,
    pub selection: Color32,
    pub caret: Color32,
    /// Focus ring
    pub focus: Color32,
    pub code_background: Color32,
}

/// Colors of the toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarColors {
    pub background: Color32,
    pub button_fill: Color32,
    pub button_hover: Color32,
    pub button_stroke: Color32,
    pub icon: Color32,
    pub separator: Color32,
    /// The sun/moon glyph of the theme toggle
    pub theme_icon: Color32,
}

/// Colors of the font and heading menus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropdownColors {
    pub fill: Color32,
    pub border: Color32,
    pub text: Color32,
    pub hover: Color32,
}

/// Colors of the export panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportColors {
    pub background: Color32,
    pub output_background: Color32,
    pub output_text: Color32,
    pub output_border: Color32,
    pub generate_fill: Color32,
    pub generate_text: Color32,
    pub copy_fill: Color32,
    pub copied_fill: Color32,
    pub error: Color32,
}

impl Presentation {
    /// Colors for `theme`.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        use palette::*;
        Self {
            page: GRAY_50,
            card: WHITE,
            card_border: GRAY_200,
            surface: SurfaceColors {
                background: WHITE,
                text: GRAY_900,
                strong_text: Color32::BLACK,
                link: BLUE_600,
                selection: Color32::from_rgb(0xcc, 0xfb, 0xf1),
                caret: GRAY_900,
                focus: TEAL_500,
                code_background: GRAY_100,
            },
            toolbar: ToolbarColors {
                background: WHITE,
                button_fill: WHITE,
                button_hover: GRAY_100,
                button_stroke: GRAY_200,
                icon: GRAY_600,
                separator: GRAY_300,
                theme_icon: GRAY_600,
            },
            dropdown: DropdownColors {
                fill: WHITE,
                border: GRAY_200,
                text: GRAY_700,
                hover: GRAY_100,
            },
            export: ExportColors {
                background: GRAY_50,
                output_background: WHITE,
                output_text: GRAY_900,
                output_border: GRAY_200,
                generate_fill: TEAL_400,
                generate_text: WHITE,
                copy_fill: GRAY_700,
                copied_fill: GREEN_500,
                error: RED_600,
            },
        }
    }

    pub fn dark() -> Self {
        use palette::*;
        Self {
            page: GRAY_900,
            card: GRAY_800,
            card_border: GRAY_700,
            surface: SurfaceColors {
                background: GRAY_800,
                text: GRAY_200,
                strong_text: WHITE,
                link: BLUE_400,
                selection: Color32::from_rgb(0x11, 0x5e, 0x59),
                caret: GRAY_100,
                focus: TEAL_500,
                code_background: GRAY_900,
            },
            toolbar: ToolbarColors {
                background: GRAY_800,
                button_fill: GRAY_800,
                button_hover: GRAY_700,
                button_stroke: GRAY_600,
                icon: GRAY_100,
                separator: GRAY_600,
                theme_icon: YELLOW_400,
            },
            dropdown: DropdownColors {
                fill: GRAY_800,
                border: GRAY_700,
                text: GRAY_100,
                hover: GRAY_700,
            },
            export: ExportColors {
                background: GRAY_800,
                output_background: GRAY_900,
                output_text: GRAY_200,
                output_border: GRAY_700,
                generate_fill: TEAL_400,
                generate_text: WHITE,
                copy_fill: GRAY_700,
                copied_fill: GREEN_500,
                error: RED_400,
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Visuals
// ─────────────────────────────────────────────────────────────────────────────

/// Corner radius shared by buttons, menus and the card.
pub const ROUNDING: f32 = 6.0;

/// Map a palette onto egui's widget visuals. Shared by both themes; the
/// theme files start from egui's own light/dark base and add shadows.
fn apply_presentation(visuals: &mut Visuals, colors: &Presentation) {
    visuals.panel_fill = colors.page;
    visuals.window_fill = colors.card;
    visuals.extreme_bg_color = colors.surface.background;
    visuals.faint_bg_color = colors.export.background;
    visuals.code_bg_color = colors.surface.code_background;
    visuals.override_text_color = None;
    visuals.hyperlink_color = colors.surface.link;
    visuals.error_fg_color = colors.export.error;

    visuals.selection.bg_fill = colors.surface.selection;
    visuals.selection.stroke = Stroke::new(1.0, colors.surface.focus);

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_fill = colors.card;
    widgets.noninteractive.weak_bg_fill = colors.card;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.card_border);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.surface.text);

    widgets.inactive.bg_fill = colors.toolbar.button_fill;
    widgets.inactive.weak_bg_fill = colors.toolbar.button_fill;
    widgets.inactive.bg_stroke = Stroke::new(1.0, colors.toolbar.button_stroke);
    widgets.inactive.fg_stroke = Stroke::new(1.0, colors.toolbar.icon);

    widgets.hovered.bg_fill = colors.toolbar.button_hover;
    widgets.hovered.weak_bg_fill = colors.toolbar.button_hover;
    widgets.hovered.bg_stroke = Stroke::new(1.0, colors.toolbar.button_stroke);
    widgets.hovered.fg_stroke = Stroke::new(1.5, colors.toolbar.icon);

    widgets.active.bg_fill = colors.surface.focus;
    widgets.active.weak_bg_fill = colors.toolbar.button_hover;
    widgets.active.bg_stroke = Stroke::new(1.0, colors.surface.focus);
    widgets.active.fg_stroke = Stroke::new(2.0, colors.toolbar.icon);

    widgets.open.bg_fill = colors.dropdown.hover;
    widgets.open.weak_bg_fill = colors.dropdown.hover;
    widgets.open.bg_stroke = Stroke::new(1.0, colors.dropdown.border);
    widgets.open.fg_stroke = Stroke::new(1.0, colors.dropdown.text);

    for state in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        state.rounding = Rounding::same(ROUNDING);
    }

    visuals.window_rounding = Rounding::same(ROUNDING * 2.0);
    visuals.window_stroke = Stroke::new(1.0, colors.dropdown.border);
    visuals.menu_rounding = Rounding::same(ROUNDING);
    visuals.button_frame = true;
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_theme_selects_palette() {
        assert_eq!(Presentation::for_theme(Theme::Light), Presentation::light());
        assert_eq!(Presentation::for_theme(Theme::Dark), Presentation::dark());
        assert!(Presentation::dark().page.r() < 128);
        assert!(Presentation::light().page.r() >= 128);
    }

    #[test]
    fn test_toggle_twice_restores_presentation() {
        let theme = Theme::Light;
        let before = Presentation::for_theme(theme);
        let after = Presentation::for_theme(theme.toggled().toggled());
        assert_eq!(before, after);
    }

    #[test]
    fn test_surface_matches_original_colors() {
        assert_eq!(Presentation::light().surface.background, Color32::WHITE);
        assert_eq!(
            color_to_hex(Presentation::dark().surface.background),
            "#1f2937"
        );
    }

    #[test]
    fn test_text_contrast() {
        let light = Presentation::light();
        let dark = Presentation::dark();
        assert!(light.surface.text.r() < 50);
        assert!(dark.surface.text.r() > 200);
    }

    #[test]
    fn test_color_hex_roundtrip() {
        let color = color_from_hex("#14b8a6").unwrap();
        assert_eq!(color, palette::TEAL_500);
        assert_eq!(color_to_hex(color), "#14b8a6");
        assert_eq!(color_from_hex("14b8a6"), None);
        assert_eq!(color_from_hex("#14b8"), None);
        assert_eq!(color_from_hex("#zzzzzz"), None);
    }
}
