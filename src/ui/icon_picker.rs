//! Social icon picker
//!
//! A modal window offering the curated icons of one platform, or an upload
//! of a custom image. The picker only reports the choice; reading the file
//! and updating the `IconSet` is up to the app.

use crate::signature::{ImageSource, Platform};
use eframe::egui::{self, Color32, RichText};

/// Picker tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerTab {
    #[default]
    Default,
    Custom,
}

/// Result of showing the picker for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconPickerOutput {
    /// Nothing happened
    None,
    /// A curated icon was chosen
    Selected(Platform, ImageSource),
    /// The user wants to upload a custom icon
    UploadRequested(Platform),
    /// The picker was dismissed
    Closed,
}

/// Modal icon picker.
#[derive(Debug, Default)]
pub struct IconPicker {
    /// Platform being edited; `None` while closed
    platform: Option<Platform>,
    tab: PickerTab,
}

impl IconPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the picker for `platform` on the curated tab.
    pub fn open(&mut self, platform: Platform) {
        self.platform = Some(platform);
        self.tab = PickerTab::Default;
    }

    pub fn close(&mut self) {
        self.platform = None;
    }

    pub fn is_open(&self) -> bool {
        self.platform.is_some()
    }

    /// Show the picker if it is open.
    pub fn show(&mut self, ctx: &egui::Context, is_dark: bool) -> IconPickerOutput {
        let Some(platform) = self.platform else {
            return IconPickerOutput::None;
        };

        let mut output = IconPickerOutput::None;

        let screen_rect = ctx.screen_rect();
        let overlay_color = if is_dark {
            Color32::from_rgba_unmultiplied(0, 0, 0, 180)
        } else {
            Color32::from_rgba_unmultiplied(0, 0, 0, 120)
        };

        egui::Area::new(egui::Id::new("icon_picker_overlay"))
            .order(egui::Order::Middle)
            .fixed_pos(screen_rect.min)
            .show(ctx, |ui| {
                let response = ui.allocate_response(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(screen_rect, 0.0, overlay_color);
                if response.clicked() {
                    output = IconPickerOutput::Closed;
                }
            });

        let mut open = true;
        egui::Window::new(format!("Select {} Icon", platform.display_name()))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(360.0)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    output = IconPickerOutput::Closed;
                }

                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.tab, PickerTab::Default, "Default Icons");
                    ui.selectable_value(&mut self.tab, PickerTab::Custom, "Upload Custom");
                });
                ui.separator();

                match self.tab {
                    PickerTab::Default => {
                        if let Some(url) = curated_grid(ui, platform) {
                            output = IconPickerOutput::Selected(platform, ImageSource::remote(url));
                        }
                    }
                    PickerTab::Custom => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(12.0);
                            ui.label("Upload your custom icon");
                            ui.label(RichText::new("Recommended size: 32×32 pixels").small().weak());
                            ui.add_space(8.0);
                            if ui.button("Select File…").clicked() {
                                output = IconPickerOutput::UploadRequested(platform);
                            }
                            ui.add_space(12.0);
                        });
                    }
                }
            });

        if !open {
            output = IconPickerOutput::Closed;
        }

        if output != IconPickerOutput::None {
            self.close();
        }
        output
    }
}

/// Three-column grid of the platform's curated icons. Returns the clicked URL.
fn curated_grid(ui: &mut egui::Ui, platform: Platform) -> Option<&'static str> {
    let mut chosen = None;

    egui::Grid::new("curated_icons")
        .num_columns(3)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (index, url) in platform.curated_icon_urls().iter().enumerate() {
                let label = format!("{} #{}\n{}", platform.display_name(), index + 1, icon_file_name(url));
                if ui
                    .add_sized([100.0, 56.0], egui::Button::new(label))
                    .on_hover_text(*url)
                    .clicked()
                {
                    chosen = Some(*url);
                }
            }
            ui.end_row();
        });

    chosen
}

/// Last path segment of an icon URL.
fn icon_file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close() {
        let mut picker = IconPicker::new();
        assert!(!picker.is_open());

        picker.tab = PickerTab::Custom;
        picker.open(Platform::Instagram);
        assert!(picker.is_open());
        assert_eq!(picker.tab, PickerTab::Default);

        picker.close();
        assert!(!picker.is_open());
    }

    #[test]
    fn test_closed_picker_shows_nothing() {
        let ctx = egui::Context::default();
        let mut picker = IconPicker::new();
        let mut output = IconPickerOutput::Closed;
        let _ = ctx.run(Default::default(), |ctx| {
            output = picker.show(ctx, false);
        });
        assert_eq!(output, IconPickerOutput::None);
    }

    #[test]
    fn test_icon_file_name() {
        assert_eq!(
            icon_file_name("https://cdn-icons-png.flaticon.com/512/174/174848.png"),
            "174848.png"
        );
        assert_eq!(icon_file_name("plain"), "plain");
    }
}
