//! View Panel Widget
//! Central scrollable area showing the current page's metrics and charts.

use crate::charts::palette::TEXT;
use crate::charts::{color32, ChartPlotter};
use crate::dashboard::RenderModel;
use egui::{Color32, RichText, ScrollArea};

const PANEL_SPACING: f32 = 15.0;

/// Shows one rendered dashboard page.
#[derive(Default)]
pub struct ViewPanel {
    model: Option<RenderModel>,
}

impl ViewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model(&mut self, model: RenderModel) {
        self.model = Some(model);
    }

    pub fn clear(&mut self) {
        self.model = None;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(model) = &self.model else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(
                    RichText::new(&model.title)
                        .size(28.0)
                        .strong()
                        .color(color32(TEXT)),
                );
                ui.add_space(PANEL_SPACING);

                if !model.metrics.is_empty() {
                    ui.columns(model.metrics.len(), |columns| {
                        for (column, metric) in columns.iter_mut().zip(&model.metrics) {
                            column.label(RichText::new(&metric.label).size(13.0).color(Color32::GRAY));
                            column.label(
                                RichText::new(&metric.value)
                                    .size(26.0)
                                    .color(color32(TEXT)),
                            );
                        }
                    });
                    ui.add_space(PANEL_SPACING);
                }

                for (i, panel) in model.panels.iter().enumerate() {
                    egui::Frame::none()
                        .rounding(8.0)
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(&panel.subheader).size(20.0).strong());
                            ui.add_space(6.0);
                            let id = format!("{}_{i}", model.view.slug());
                            ChartPlotter::draw_chart(ui, &id, &panel.chart, true);
                        });
                    ui.add_space(PANEL_SPACING);
                }
            });
    }
}
