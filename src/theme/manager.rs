//! Theme Manager for Inkpad
//!
//! Tracks the active theme and applies it to the egui context.
//!
//! # Usage
//!
//! ```ignore
//! use crate::theme::ThemeManager;
//! use crate::config::Theme;
//!
//! let mut manager = ThemeManager::new(Theme::Light);
//! manager.apply_if_needed(&ctx);
//!
//! manager.toggle();
//! manager.apply_if_needed(&ctx);
//! ```

use eframe::egui::{Context, Visuals};
use log::{debug, info};

use super::{dark, light, Presentation};
use crate::config::Theme;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Manager
// ─────────────────────────────────────────────────────────────────────────────

/// Manages theme state and applies themes to the egui context.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    /// Current theme setting
    current_theme: Theme,
    /// Chrome colors for the current theme
    presentation: Presentation,
    /// Whether the theme needs to be reapplied
    needs_apply: bool,
}

impl ThemeManager {
    /// Create a new ThemeManager with the given initial theme.
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            presentation: Presentation::for_theme(theme),
            needs_apply: true,
        }
    }

    /// Get the current theme setting.
    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Set the theme and mark for reapplication.
    ///
    /// This doesn't apply the theme immediately - call `apply()` to update the UI.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.presentation = Presentation::for_theme(theme);
            self.needs_apply = true;
        }
    }

    /// Toggle between Light and Dark themes. Returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        let new_theme = self.current_theme.toggled();
        self.set_theme(new_theme);
        new_theme
    }

    pub fn needs_apply(&self) -> bool {
        self.needs_apply
    }

    /// Chrome colors of the current theme.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn visuals(&self) -> Visuals {
        match self.current_theme {
            Theme::Light => light::create_light_visuals(),
            Theme::Dark => dark::create_dark_visuals(),
        }
    }

    /// Apply the current theme to the egui context.
    pub fn apply(&mut self, ctx: &Context) {
        ctx.set_visuals(self.visuals());
        self.needs_apply = false;
        debug!("Applied theme: {:?}", self.current_theme);
    }

    /// Apply the theme only if it changed since the last apply.
    ///
    /// Returns `true` if the theme was applied.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        if self.needs_apply {
            self.apply(ctx);
            true
        } else {
            false
        }
    }

    /// Glyph shown on the theme toggle: the theme the button switches to.
    pub fn toggle_icon(&self) -> &'static str {
        match self.current_theme {
            Theme::Light => "🌙",
            Theme::Dark => "☀",
        }
    }

    pub fn toggle_tooltip(&self) -> &'static str {
        match self.current_theme {
            Theme::Light => "Switch to dark theme",
            Theme::Dark => "Switch to light theme",
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
