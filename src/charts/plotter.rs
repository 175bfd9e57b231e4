//! Chart Plotter Module
//! Draws render-model charts interactively using egui_plot.

use super::palette::{heat_color, normalize, GRID, TEXT};
use crate::dashboard::model::{BarChart, HeatmapChart, LineChart};
use crate::dashboard::Chart;
use egui::{Color32, RichText};
use egui_plot::{Bar, GridInput, GridMark, Line, Plot, PlotPoints, Points};

pub const PLOT_HEIGHT: f32 = 360.0;
const COMPACT_HEIGHT: f32 = 220.0;

/// Convert a palette entry to an egui color.
pub fn color32(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// One grid mark per category index so every bar gets its label.
fn category_marks(count: usize) -> impl Fn(GridInput) -> Vec<GridMark> {
    move |_input| {
        (0..count)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }
}

/// Draws dashboard charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw any chart kind under a title.
    pub fn draw_chart(ui: &mut egui::Ui, id: &str, chart: &Chart, full_size: bool) {
        ui.label(
            RichText::new(chart.title())
                .size(16.0)
                .strong()
                .color(color32(TEXT)),
        );
        ui.add_space(4.0);

        if chart.is_empty() {
            ui.label(RichText::new("No data").color(Color32::GRAY));
            return;
        }

        match chart {
            Chart::Bar(bar) => Self::draw_bar_chart(ui, id, bar, full_size),
            Chart::Line(line) => Self::draw_line_chart(ui, id, line, full_size),
            Chart::Heatmap(heat) => Self::draw_heatmap(ui, id, heat, full_size),
        }
    }

    /// Bars shaded by value along the chart's color scale.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, chart: &BarChart, full_size: bool) {
        let height = if full_size { PLOT_HEIGHT } else { COMPACT_HEIGHT };
        let (min, max) = chart.value_range();
        let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
        let count = labels.len();

        let bars: Vec<Bar> = chart
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Bar::new(i as f64, b.value)
                    .width(0.7)
                    .name(&b.label)
                    .fill(color32(chart.scale.color_for(b.value, min, max)))
            })
            .collect();

        Plot::new(format!("bar_{id}"))
            .height(height)
            .allow_zoom(full_size)
            .allow_drag(full_size)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .include_y(0.0)
            .x_grid_spacer(category_marks(count))
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(egui_plot::BarChart::new(bars).name(&chart.y_label));
            });
    }

    /// Line with markers; x ticks use the point labels.
    pub fn draw_line_chart(ui: &mut egui::Ui, id: &str, chart: &LineChart, full_size: bool) {
        let height = if full_size { PLOT_HEIGHT } else { COMPACT_HEIGHT };
        let color = color32(chart.color);
        let points: Vec<[f64; 2]> = chart.points.iter().map(|p| [p.x, p.y]).collect();
        let tick_chart = chart.clone();

        Plot::new(format!("line_{id}"))
            .height(height)
            .allow_zoom(full_size)
            .allow_drag(full_size)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .x_axis_formatter(move |mark, _range| {
                tick_chart
                    .label_at(mark.value)
                    .map(str::to_string)
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(2.0)
                        .name(&chart.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(color),
                );
            });
    }

    /// Weighted station positions, longitude on x and latitude on y.
    pub fn draw_heatmap(ui: &mut egui::Ui, id: &str, chart: &HeatmapChart, full_size: bool) {
        let height = if full_size { 480.0 } else { COMPACT_HEIGHT };
        let (min, max) = chart.weight_range();
        let (center_lat, center_lon) = chart.center;

        Plot::new(format!("heat_{id}"))
            .height(height)
            .data_aspect(1.0)
            .allow_zoom(full_size)
            .allow_drag(full_size)
            .allow_scroll(false)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .show(ui, |plot_ui| {
                // Outer halo first so the core stays visible.
                for (radius, alpha) in [(14.0_f32, 0.25_f32), (8.0, 0.5), (4.0, 0.9)] {
                    for p in &chart.points {
                        let t = normalize(p.weight, min, max).max(0.4);
                        plot_ui.points(
                            Points::new(PlotPoints::from_iter([[p.lon, p.lat]]))
                                .radius(radius)
                                .color(color32(heat_color(t)).gamma_multiply(alpha)),
                        );
                    }
                }
                plot_ui.points(
                    Points::new(PlotPoints::from_iter([[center_lon, center_lat]]))
                        .radius(3.0)
                        .shape(egui_plot::MarkerShape::Cross)
                        .color(color32(GRID).gamma_multiply(2.0))
                        .name("Center"),
                );
            });
    }
}
