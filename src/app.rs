//! Main application module for Inkpad
//!
//! This module implements the eframe App trait: it lays out the editor card
//! (toolbar, surface, export panel), routes toolbar actions to the editor
//! widget, drives the link prompt and the background image reader, and
//! persists settings.

use crate::config::{save_config_silent, Settings, WindowSize};
use crate::editor::{EditorSurface, EditorWidget, WidgetRequest};
use crate::export::SystemClipboard;
use crate::files::{pick_image_dialog, ImageLoadEvent, ImageLoader};
use crate::fonts;
use crate::ui::{show_export_panel, ExportAction, LinkDialog, LinkDialogResult, Toolbar};
use eframe::egui;
use log::{debug, info, warn};

/// Maximum width of the editor card.
const CARD_MAX_WIDTH: f32 = 880.0;

/// Window state to persist for the given viewport.
///
/// While maximized only the flag changes, so the restored size and position
/// stay those of the normal window. Returns `None` before the viewport
/// reports its geometry.
fn window_state_from(viewport: &egui::ViewportInfo, previous: &WindowSize) -> Option<WindowSize> {
    let maximized = viewport.maximized.unwrap_or(false);
    if maximized {
        return Some(WindowSize {
            maximized,
            ..*previous
        });
    }

    let inner = viewport.inner_rect?;
    let pos = viewport.outer_rect.unwrap_or(inner).min;
    let size = inner.size();
    let moved = |old: Option<f32>, new: f32| old.map_or(true, |old| (old - new).abs() > 1.0);
    let resized = (previous.width - size.x).abs() > 1.0 || (previous.height - size.y).abs() > 1.0;

    if !resized && !moved(previous.x, pos.x) && !moved(previous.y, pos.y) && !previous.maximized {
        return Some(*previous);
    }
    Some(WindowSize {
        width: size.x,
        height: size.y,
        x: Some(pos.x),
        y: Some(pos.y),
        maximized,
    })
}

/// The main application struct that holds all state and implements eframe::App.
pub struct InkpadApp {
    /// Document, selection, theme, font and export state
    widget: EditorWidget,
    /// Persisted preferences
    settings: Settings,
    /// Toolbar UI component
    toolbar: Toolbar,
    /// Open link prompt, if any
    link_dialog: Option<LinkDialog>,
    /// Background reader for picked images
    image_loader: ImageLoader,
    /// Last image failure, shown under the toolbar until the surface changes
    status: Option<String>,
}

impl InkpadApp {
    /// Create a new InkpadApp from loaded settings.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing Inkpad");

        let font = fonts::font_by_name(&settings.font_name).unwrap_or_else(fonts::default_font);
        let mut widget = EditorWidget::new(settings.theme, font);

        widget.theme_mut().apply(&cc.egui_ctx);
        info!("Applied initial theme: {:?}", settings.theme);

        Self {
            widget,
            settings,
            toolbar: Toolbar::new(),
            link_dialog: None,
            image_loader: ImageLoader::new(),
            status: None,
        }
    }

    /// Frame clock in seconds.
    fn now(ctx: &egui::Context) -> f64 {
        ctx.input(|i| i.time)
    }

    /// Copy the current theme and font into the settings and save them.
    fn persist_settings(&mut self) {
        self.settings.theme = self.widget.theme().current_theme();
        self.settings.font_name = self.widget.current_font().name.to_string();
        if !save_config_silent(&self.settings) {
            warn!("Settings were not saved");
        }
    }

    /// Record window size, position and maximized state in settings if changed.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let Some(window_size) =
            ctx.input(|i| window_state_from(i.viewport(), &self.settings.window_size))
        else {
            return;
        };
        if window_size != self.settings.window_size {
            debug!(
                "Window state updated: {}x{} at ({:?}, {:?}), maximized: {}",
                window_size.width,
                window_size.height,
                window_size.x,
                window_size.y,
                window_size.maximized
            );
            self.settings.window_size = window_size;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Requests
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_request(&mut self, request: WidgetRequest) {
        match request {
            WidgetRequest::OpenLinkPrompt => {
                self.link_dialog = Some(LinkDialog::new());
            }
            WidgetRequest::PickImage => self.handle_pick_image(),
            WidgetRequest::PersistSettings => self.persist_settings(),
        }
    }

    fn handle_pick_image(&mut self) {
        let initial_dir = self.settings.last_image_directory.clone();
        let Some(path) = pick_image_dialog(initial_dir.as_deref()) else {
            debug!("Image picker cancelled");
            return;
        };
        if let Some(parent) = path.parent() {
            self.settings.last_image_directory = Some(parent.to_path_buf());
        }
        self.status = None;
        self.image_loader.spawn(path);
    }

    /// Insert images whose background read finished since the last frame.
    fn poll_images(&mut self) {
        for event in self.image_loader.poll() {
            match event {
                ImageLoadEvent::Loaded { path, data_url } => {
                    info!("Inserting image {}", path.display());
                    self.widget.insert_image(data_url);
                }
                ImageLoadEvent::Failed { path, message } => {
                    warn!("Could not insert image {}: {}", path.display(), message);
                    self.status = Some(message);
                }
            }
        }
    }

    fn handle_export_action(&mut self, action: ExportAction, now: f64) {
        match action {
            ExportAction::Generate => self.widget.generate_html(),
            ExportAction::Copy => {
                let mut clipboard = SystemClipboard;
                if let Err(e) = self.widget.copy_html(&mut clipboard, now) {
                    // The panel keeps the message for display
                    debug!("Copy failed: {}", e);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_ui(&mut self, ctx: &egui::Context, now: f64) {
        let colors = self.widget.presentation().clone();
        let mut request = None;
        let mut export_action = None;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(colors.page)
                    .inner_margin(egui::Margin::same(24.0)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(CARD_MAX_WIDTH);

                            egui::Frame::none()
                                .fill(colors.card)
                                .stroke(egui::Stroke::new(1.0, colors.card_border))
                                .rounding(crate::theme::ROUNDING * 2.0)
                                .inner_margin(egui::Margin::same(16.0))
                                .show(ui, |ui| {
                                    ui.with_layout(
                                        egui::Layout::top_down(egui::Align::Min),
                                        |ui| {
                                            egui::Frame::none()
                                                .fill(colors.toolbar.background)
                                                .rounding(crate::theme::ROUNDING)
                                                .inner_margin(egui::Margin::symmetric(8.0, 2.0))
                                                .show(ui, |ui| {
                                                    let theme = self.widget.theme();
                                                    let icon =
                                                        (theme.toggle_icon(), theme.toggle_tooltip());
                                                    let state = self.widget.formatting_state();
                                                    if let Some(action) = self.toolbar.show(
                                                        ui,
                                                        &colors,
                                                        icon,
                                                        self.widget.current_font(),
                                                        &state,
                                                    ) {
                                                        debug!("Toolbar action: {:?}", action);
                                                        request = self.widget.handle_action(action);
                                                    }
                                                });

                                            if let Some(status) = &self.status {
                                                ui.label(
                                                    egui::RichText::new(status)
                                                        .color(colors.export.error)
                                                        .small(),
                                                );
                                            }

                                            ui.add_space(12.0);
                                            let surface = EditorSurface::new(&mut self.widget)
                                                .font_size(self.settings.font_size)
                                                .min_height(320.0)
                                                .show(ui);
                                            if surface.changed() {
                                                self.status = None;
                                            }

                                            ui.add_space(12.0);
                                            export_action = show_export_panel(
                                                ui,
                                                self.widget.export(),
                                                &colors,
                                            );
                                        },
                                    );
                                });
                        });
                    });
            });

        if let Some(request) = request {
            self.handle_request(request);
        }
        if let Some(action) = export_action {
            self.handle_export_action(action, now);
        }
    }

    fn render_link_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.link_dialog.as_mut() else {
            return;
        };
        match dialog.show(ctx, self.widget.presentation()) {
            LinkDialogResult::None => {}
            LinkDialogResult::Cancelled => {
                self.link_dialog = None;
                self.widget.finish_link(None);
            }
            LinkDialogResult::Confirmed(url) => {
                self.link_dialog = None;
                self.widget.finish_link(Some(url));
            }
        }
    }
}

impl eframe::App for InkpadApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.widget.theme_mut().apply_if_needed(ctx);

        let now = Self::now(ctx);
        self.widget.update(now);
        if let Some(remaining) = self.widget.export().time_until_reset(now) {
            ctx.request_repaint_after(remaining);
        }

        self.poll_images();
        if self.image_loader.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        self.update_window_state(ctx);

        self.render_ui(ctx, now);
        self.render_link_dialog(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.persist_settings();
    }
}
