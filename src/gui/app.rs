//! Delhi Metro Dashboard Main Application
//! Main window with navigation sidebar and the current page.

use crate::charts::color32;
use crate::charts::palette::{BACKGROUND, SIDEBAR};
use crate::config::DashboardSettings;
use crate::dashboard::render_view;
use crate::data::TableCache;
use crate::export::export_dashboard;
use crate::gui::{Sidebar, SidebarAction, ViewPanel};
use egui::{CentralPanel, SidePanel};
use tracing::{error, info, warn};

/// Main application window.
///
/// Every interaction re-derives the current page from the cached base table.
pub struct DashboardApp {
    settings: DashboardSettings,
    cache: TableCache,
    sidebar: Sidebar,
    view_panel: ViewPanel,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: DashboardSettings) -> Self {
        apply_theme(&cc.egui_ctx);

        let mut app = Self {
            settings,
            cache: TableCache::new(),
            sidebar: Sidebar::new(),
            view_panel: ViewPanel::new(),
        };
        app.refresh();
        app
    }

    /// Load (or reuse) the base table and render the selected page.
    fn refresh(&mut self) {
        let view = self.sidebar.view;
        let base = match self.cache.get_or_load(&self.settings.data) {
            Ok(base) => base,
            Err(e) => {
                error!(error = %e, "Failed to load station table");
                self.view_panel.clear();
                self.sidebar.export_enabled = false;
                self.sidebar.set_status(format!("Error: {e}"));
                return;
            }
        };

        match render_view(&base, view, &self.settings) {
            Ok(model) => {
                self.view_panel.set_model(model);
                self.sidebar.export_enabled = true;
                self.sidebar
                    .set_status(format!("{} stations loaded", base.height()));
            }
            Err(e) => {
                warn!(view = view.slug(), error = %e, "Render failed");
                self.view_panel.clear();
                self.sidebar.set_status(format!("Error: {e}"));
            }
        }
    }

    fn handle_reload(&mut self) {
        self.cache.reset();
        self.refresh();
    }

    /// Ask for a folder, export every page there and reveal it.
    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_title("Export dashboard")
            .pick_folder()
        else {
            return; // User cancelled
        };

        let base = match self.cache.get_or_load(&self.settings.data) {
            Ok(base) => base,
            Err(e) => {
                self.sidebar.set_status(format!("Error: {e}"));
                return;
            }
        };

        match export_dashboard(&base, &self.settings, &dir, true) {
            Ok(written) => {
                info!(dir = %dir.display(), files = written.len(), "Dashboard exported");
                self.sidebar
                    .set_status(format!("Exported {} files", written.len()));
                if let Err(e) = open::that(&dir) {
                    warn!(error = %e, "Could not open export folder");
                }
            }
            Err(e) => {
                error!(error = %e, "Export failed");
                self.sidebar.set_status(format!("Error: {e:#}"));
            }
        }
    }
}

fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = color32(BACKGROUND);
    visuals.window_fill = color32(BACKGROUND);
    visuals.extreme_bg_color = color32(BACKGROUND);
    ctx.set_visuals(visuals);
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("sidebar")
            .min_width(240.0)
            .max_width(300.0)
            .frame(
                egui::Frame::none()
                    .fill(color32(SIDEBAR))
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.sidebar.show(ui, &self.settings) {
                        SidebarAction::Navigate(view) => {
                            info!(view = view.slug(), "Navigate");
                            self.refresh();
                        }
                        SidebarAction::Reload => self.handle_reload(),
                        SidebarAction::Export => self.handle_export(),
                        SidebarAction::None => {}
                    }
                });
            });

        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(color32(BACKGROUND))
                    .inner_margin(16.0),
            )
            .show(ctx, |ui| {
                self.view_panel.show(ui);
            });
    }
}
