//! Sidebar Widget
//! Left panel with page navigation, data source info and actions.

use crate::config::DashboardSettings;
use crate::dashboard::View;
use egui::{Color32, RichText};

/// Left side panel: navigation radio, data source and action buttons.
pub struct Sidebar {
    pub view: View,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            view: View::default(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the sidebar
    pub fn show(&mut self, ui: &mut egui::Ui, settings: &DashboardSettings) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚇 Delhi Metro Dashboard")
                    .size(20.0)
                    .color(Color32::WHITE),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("Navigate").size(14.0).strong());
        ui.add_space(5.0);
        for view in View::ALL {
            if ui
                .radio_value(&mut self.view, view, view.label())
                .changed()
            {
                action = SidebarAction::Navigate(view);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = settings
                    .data
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| settings.data.display().to_string());
                ui.label(RichText::new(file_name).size(12.0).color(Color32::WHITE));
                ui.label(
                    RichText::new(format!("Seed {}", settings.seed))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });

        ui.add_space(10.0);

        // ===== Actions =====
        ui.vertical_centered(|ui| {
            let reload = egui::Button::new(RichText::new("⟳ Reload data").size(14.0))
                .min_size(egui::vec2(180.0, 30.0));
            if ui.add(reload).clicked() {
                action = SidebarAction::Reload;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let export = egui::Button::new(RichText::new("📄 Export").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(export).clicked() {
                    action = SidebarAction::Export;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Actions triggered by the sidebar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SidebarAction {
    None,
    Navigate(View),
    Reload,
    Export,
}
