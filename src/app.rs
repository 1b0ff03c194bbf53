//! Main application module for Signet
//!
//! This module implements the eframe App trait. The app owns the one
//! `SignatureState` and `IconSet`, applies every form action through a state
//! transition, re-renders the fragment and reports results as toasts.

use crate::config::{save_config_silent, ClipboardFormat, Settings, Theme, WindowSize};
use crate::error::Error;
use crate::export::{copy_signature_to_clipboard, export_to_html_file};
use crate::files::dialogs::{default_export_file_name, open_image_dialog, save_html_dialog};
use crate::signature::{
    load_image_file, render, Fragment, IconSet, ImageSource, Platform, RenderConfig,
    SignatureState,
};
use crate::theme::ThemeManager;
use crate::ui::{
    apply_action, show_instructions, FormAction, FormEffect, IconPicker, IconPickerOutput,
    SignatureForm, SignaturePreview,
};
use eframe::egui;
use log::{debug, info, warn};
use std::path::Path;

/// Application name constant.
pub const APP_NAME: &str = "Signet";

/// Keyboard shortcut actions detected during input handling and run afterwards.
#[derive(Debug, Clone, Copy)]
enum KeyboardAction {
    /// Copy the signature (Ctrl+Shift+C)
    Copy,
    /// Save as HTML file (Ctrl+S)
    SaveHtml,
}

/// Right-hand panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RightTab {
    #[default]
    Preview,
    Instructions,
}

/// A temporary message shown in the status bar.
#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: f64,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct SignetApp {
    /// User preferences
    settings: Settings,
    /// Whether preferences changed since the last save
    settings_dirty: bool,
    /// Theme manager for handling theme switching
    theme_manager: ThemeManager,
    /// The signature being edited
    signature: SignatureState,
    /// Icons used for the social row
    icons: IconSet,
    render_config: RenderConfig,
    /// Rendered signature, refreshed after every change
    fragment: Fragment,
    form: SignatureForm,
    preview: SignaturePreview,
    icon_picker: IconPicker,
    tab: RightTab,
    toast: Option<Toast>,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
    /// Application start time for timing toast messages
    start_time: std::time::Instant,
}

impl SignetApp {
    /// Create a new SignetApp with the loaded preferences and a blank signature.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing {}", APP_NAME);

        let mut theme_manager = ThemeManager::new(settings.theme);
        theme_manager.apply(&cc.egui_ctx);
        info!("Applied initial theme: {:?}", settings.theme);

        let signature = SignatureState::default();
        let icons = IconSet::default();
        let render_config = RenderConfig::default();
        let fragment = render(&signature, &icons, &render_config);

        Self {
            settings,
            settings_dirty: false,
            theme_manager,
            signature,
            icons,
            render_config,
            fragment,
            form: SignatureForm::new(),
            preview: SignaturePreview::new(),
            icon_picker: IconPicker::new(),
            tab: RightTab::default(),
            toast: None,
            last_window_size: None,
            last_window_pos: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn show_toast(&mut self, message: impl Into<String>, duration: f64) {
        let expires_at = self.get_app_time() + duration;
        self.toast = Some(Toast {
            message: message.into(),
            expires_at,
        });
    }

    /// Clear the toast once it has expired.
    fn update_toast(&mut self) {
        let now = self.get_app_time();
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    fn rerender(&mut self) {
        self.fragment = render(&self.signature, &self.icons, &self.render_config);
        self.preview.invalidate_images();
    }

    fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    fn save_settings_if_dirty(&mut self) {
        if self.settings_dirty && save_config_silent(&self.settings) {
            self.settings_dirty = false;
        }
    }

    /// Update window size in settings if changed.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let Some(rect) = ctx.input(|i| i.viewport().outer_rect) else {
            return;
        };

        let size_changed = self
            .last_window_size
            .map(|s| (s - rect.size()).length() > 1.0)
            .unwrap_or(true);
        let pos_changed = self
            .last_window_pos
            .map(|p| (p - rect.min).length() > 1.0)
            .unwrap_or(true);

        if !(size_changed || pos_changed) {
            return;
        }

        self.last_window_size = Some(rect.size());
        self.last_window_pos = Some(rect.min);
        let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));

        self.settings.window_size = WindowSize {
            width: rect.width(),
            height: rect.height(),
            x: Some(rect.min.x),
            y: Some(rect.min.y),
            maximized,
        };
        self.mark_settings_dirty();

        debug!(
            "Window state updated: {}x{} at ({}, {}), maximized: {}",
            rect.width(),
            rect.height(),
            rect.min.x,
            rect.min.y,
            maximized
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Form Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_form_actions(&mut self, actions: Vec<FormAction>) {
        if actions.is_empty() {
            return;
        }

        for action in actions {
            debug!("Form action: {:?}", action);
            let state = std::mem::take(&mut self.signature);
            let (state, effect) = apply_action(state, action);
            self.signature = state;

            match effect {
                FormEffect::None | FormEffect::ColorCommitted(Ok(())) => {}
                FormEffect::ColorCommitted(Err(e)) => {
                    self.show_toast(format!("{}. Color reset to default.", e), 3.0);
                }
                FormEffect::PickLogo => self.handle_upload_logo(),
                FormEffect::PickIcon(platform) => self.icon_picker.open(platform),
            }
        }

        self.rerender();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle copying the signature to the clipboard.
    fn handle_copy(&mut self) {
        match copy_signature_to_clipboard(&self.fragment, self.settings.clipboard_format) {
            Ok(()) => self.show_toast("Signature copied to clipboard", 2.0),
            Err(e) => {
                warn!("Failed to copy signature to clipboard: {}", e);
                self.show_toast(format!("Copy failed: {}", e), 3.0);
            }
        }
    }

    /// Handle saving the signature as a standalone HTML file.
    fn handle_save_html(&mut self) {
        let default_name = default_export_file_name(self.signature.full_name());
        let Some(path) =
            save_html_dialog(self.settings.last_export_directory.as_deref(), &default_name)
        else {
            debug!("Save dialog cancelled");
            return;
        };

        match export_to_html_file(&self.fragment, &path) {
            Ok(()) => {
                self.remember_directory(&path, DirectoryKind::Export);
                self.show_toast(format!("Saved: {}", path.display()), 3.0);
            }
            Err(e) => {
                warn!("Failed to export signature: {}", e);
                self.show_toast(format!("Export failed: {}", e), 3.0);
            }
        }
    }

    fn handle_upload_logo(&mut self) {
        if let Some(logo) = self.pick_image() {
            self.signature = std::mem::take(&mut self.signature).with_company_logo(logo);
            self.show_toast("Logo updated", 2.0);
        }
    }

    fn handle_upload_icon(&mut self, platform: Platform) {
        if let Some(icon) = self.pick_image() {
            self.set_icon(platform, icon);
            self.show_toast(format!("{} icon updated", platform.display_name()), 2.0);
        }
    }

    fn set_icon(&mut self, platform: Platform, icon: ImageSource) {
        self.icons = std::mem::take(&mut self.icons).with_icon(platform, icon);
        self.rerender();
    }

    /// Ask for an image file and embed it. Failures become toasts.
    fn pick_image(&mut self) -> Option<ImageSource> {
        let path = open_image_dialog(self.settings.last_image_directory.as_deref())?;
        self.remember_directory(&path, DirectoryKind::Image);

        match load_image_file(&path, self.settings.max_image_bytes()) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Failed to load image {}: {}", path.display(), e);
                let hint = if matches!(e, Error::ImageTooLarge { .. }) {
                    " (the limit can be raised under Settings)"
                } else {
                    ""
                };
                self.show_toast(format!("{}{}", e, hint), 4.0);
                None
            }
        }
    }

    fn remember_directory(&mut self, file: &Path, kind: DirectoryKind) {
        let Some(dir) = file.parent().map(Path::to_path_buf) else {
            return;
        };
        let slot = match kind {
            DirectoryKind::Image => &mut self.settings.last_image_directory,
            DirectoryKind::Export => &mut self.settings.last_export_directory,
        };
        if slot.as_ref() != Some(&dir) {
            *slot = Some(dir);
            self.mark_settings_dirty();
        }
    }

    fn handle_set_theme(&mut self, theme: Theme, ctx: &egui::Context) {
        self.theme_manager.set_theme(theme);
        self.theme_manager.apply(ctx);
        self.settings.theme = theme;
        self.mark_settings_dirty();
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let action = ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::C) {
                Some(KeyboardAction::Copy)
            } else if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                Some(KeyboardAction::SaveHtml)
            } else {
                None
            }
        });

        match action {
            Some(KeyboardAction::Copy) => self.handle_copy(),
            Some(KeyboardAction::SaveHtml) => self.handle_save_html(),
            None => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Copy HTML        Ctrl+Shift+C").clicked() {
                        ui.close_menu();
                        self.handle_copy();
                    }
                    if ui.button("Save as HTML…    Ctrl+S").clicked() {
                        ui.close_menu();
                        self.handle_save_html();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ui.close_menu();
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Settings", |ui| {
                    ui.label(egui::RichText::new("Theme").strong());
                    for theme in Theme::all() {
                        let selected = self.theme_manager.current_theme() == *theme;
                        if ui.radio(selected, theme.label()).clicked() && !selected {
                            self.handle_set_theme(*theme, ctx);
                        }
                    }

                    ui.separator();
                    ui.label(egui::RichText::new("Clipboard format").strong());
                    for format in ClipboardFormat::all() {
                        if ui
                            .radio_value(&mut self.settings.clipboard_format, *format, format.label())
                            .changed()
                        {
                            info!("Clipboard format set to {:?}", format);
                            self.mark_settings_dirty();
                        }
                    }

                    ui.separator();
                    ui.label(egui::RichText::new("Largest embedded image").strong());
                    let response = ui.add(
                        egui::DragValue::new(&mut self.settings.max_image_size_kb)
                            .range(Settings::MIN_IMAGE_SIZE_KB..=Settings::MAX_IMAGE_SIZE_KB)
                            .suffix(" KB"),
                    );
                    if response.changed() {
                        self.mark_settings_dirty();
                    }
                });
            });
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(toast) = &self.toast {
                    ui.label(egui::RichText::new(&toast.message).italics());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION")))
                            .small()
                            .weak(),
                    );
                });
            });
        });
    }

    fn render_ui(&mut self, ctx: &egui::Context) {
        let colors = self.theme_manager.colors(ctx);

        self.render_menu_bar(ctx);
        self.render_status_bar(ctx);

        let mut actions = Vec::new();
        egui::SidePanel::left("form_panel")
            .resizable(true)
            .default_width(420.0)
            .min_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(8.0);
                    actions = self.form.show(ui, &self.signature, &self.icons, &colors);
                    ui.add_space(8.0);
                });
            });
        self.apply_form_actions(actions);

        let mut output = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, RightTab::Preview, "Preview");
                ui.selectable_value(&mut self.tab, RightTab::Instructions, "How to Use");
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                RightTab::Preview => {
                    output = Some(self.preview.show(ui, &self.fragment, &colors.preview));
                }
                RightTab::Instructions => show_instructions(ui),
            });
        });

        if let Some(output) = output {
            if output.copy_requested {
                self.handle_copy();
            }
            if output.save_requested {
                self.handle_save_html();
            }
        }

        match self.icon_picker.show(ctx, colors.is_dark()) {
            IconPickerOutput::None | IconPickerOutput::Closed => {}
            IconPickerOutput::Selected(platform, icon) => {
                info!("Selected curated icon for {}: {}", platform.id(), icon.describe());
                self.set_icon(platform, icon);
            }
            IconPickerOutput::UploadRequested(platform) => self.handle_upload_icon(platform),
        }
    }
}

/// Which remembered directory a picked path updates.
#[derive(Debug, Clone, Copy)]
enum DirectoryKind {
    Image,
    Export,
}

impl eframe::App for SignetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.theme_manager.apply_if_needed(ctx);
        self.update_toast();
        self.update_window_state(ctx);

        self.render_ui(ctx);
        self.handle_keyboard_shortcuts(ctx);

        if self.toast.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.save_settings_if_dirty();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.save_settings_if_dirty();
    }

    /// Auto-save interval in seconds.
    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}
