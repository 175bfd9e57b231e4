//! Static Chart Renderer
//! Draws render-model charts to PNG bytes with plotters, for export.
//!
//! Layout per image: caption on top, axis descriptions, dark background
//! matching the dashboard window.

use super::palette::{heat_color, normalize, BACKGROUND, GRID, TEXT};
use crate::dashboard::model::{BarChart, HeatmapChart, LineChart};
use crate::dashboard::Chart;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 1400;
pub const DEFAULT_HEIGHT: u32 = 800;

#[derive(Error, Debug)]
pub enum ChartRenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Bitmap buffer does not match {0}x{1}")]
    Buffer(u32, u32),
}

type DrawResult = Result<(), Box<dyn std::error::Error>>;

fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

fn text_style(size: f64) -> TextStyle<'static> {
    ("sans-serif", size).into_font().color(&rgb(TEXT))
}

/// Renders charts into in-memory PNG images.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Render a chart to PNG bytes.
    pub fn render_chart_png(
        chart: &Chart,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ChartRenderError> {
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, chart).map_err(|e| ChartRenderError::Draw(e.to_string()))?;
        }

        let image =
            RgbImage::from_raw(width, height, buffer).ok_or(ChartRenderError::Buffer(width, height))?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn draw(root: &DrawingArea<BitMapBackend, Shift>, chart: &Chart) -> DrawResult {
        root.fill(&rgb(BACKGROUND))?;
        if chart.is_empty() {
            root.draw(&Text::new(
                format!("{}: no data", chart.title()),
                (40, 40),
                text_style(22.0),
            ))?;
        } else {
            match chart {
                Chart::Bar(bar) => Self::draw_bar_chart(root, bar)?,
                Chart::Line(line) => Self::draw_line_chart(root, line)?,
                Chart::Heatmap(heat) => Self::draw_heatmap(root, heat)?,
            }
        }
        root.present()?;
        Ok(())
    }

    fn draw_bar_chart(root: &DrawingArea<BitMapBackend, Shift>, chart: &BarChart) -> DrawResult {
        let n = chart.bars.len();
        let (min, max) = chart.value_range();
        let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, text_style(24.0))
            .margin(30)
            .x_label_area_size(90)
            .y_label_area_size(90)
            .build_cartesian_2d(0..n, 0f64..y_max)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .bold_line_style(rgb(GRID))
            .light_line_style(rgb(BACKGROUND))
            .axis_style(rgb(GRID))
            .x_labels(n)
            .x_label_formatter(&|idx| chart.bars.get(*idx).map(|b| b.label.clone()).unwrap_or_default())
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .label_style(text_style(13.0))
            .axis_desc_style(text_style(15.0))
            .draw()?;

        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            let color = rgb(chart.scale.color_for(bar.value, min, max));
            let mut rect = Rectangle::new([(i, 0.0), (i + 1, bar.value)], color.filled());
            rect.set_margin(0, 0, 6, 6);
            rect
        }))?;
        Ok(())
    }

    fn draw_line_chart(root: &DrawingArea<BitMapBackend, Shift>, chart: &LineChart) -> DrawResult {
        let x_min = chart.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let x_max = chart.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let (x_min, x_max) = if x_max > x_min {
            (x_min, x_max)
        } else {
            (x_min - 1.0, x_max + 1.0)
        };
        let (_, y_max) = chart.y_range();
        let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
        let color = rgb(chart.color);

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, text_style(24.0))
            .margin(30)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        ctx.configure_mesh()
            .bold_line_style(rgb(GRID))
            .light_line_style(rgb(BACKGROUND))
            .axis_style(rgb(GRID))
            .x_label_formatter(&|x| {
                chart
                    .points
                    .iter()
                    .find(|p| (p.x - *x).abs() < 0.5)
                    .map(|p| p.label.clone())
                    .unwrap_or_default()
            })
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .label_style(text_style(13.0))
            .axis_desc_style(text_style(15.0))
            .draw()?;

        let series: Vec<(f64, f64)> = chart.points.iter().map(|p| (p.x, p.y)).collect();
        ctx.draw_series(LineSeries::new(series.clone(), color.stroke_width(3)))?;
        ctx.draw_series(series.iter().map(|&point| Circle::new(point, 5, color.filled())))?;
        Ok(())
    }

    fn draw_heatmap(root: &DrawingArea<BitMapBackend, Shift>, chart: &HeatmapChart) -> DrawResult {
        let (lat_min, lat_max) = bounds(chart.points.iter().map(|p| p.lat));
        let (lon_min, lon_max) = bounds(chart.points.iter().map(|p| p.lon));
        let (w_min, w_max) = chart.weight_range();

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, text_style(24.0))
            .margin(30)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(lon_min..lon_max, lat_min..lat_max)?;

        ctx.configure_mesh()
            .bold_line_style(rgb(GRID))
            .light_line_style(rgb(BACKGROUND))
            .axis_style(rgb(GRID))
            .x_desc("Longitude")
            .y_desc("Latitude")
            .label_style(text_style(13.0))
            .axis_desc_style(text_style(15.0))
            .draw()?;

        for (radius, alpha) in [(18, 0.2), (11, 0.4), (5, 0.9)] {
            ctx.draw_series(chart.points.iter().map(|p| {
                let t = normalize(p.weight, w_min, w_max).max(0.4);
                Circle::new((p.lon, p.lat), radius, rgb(heat_color(t)).mix(alpha).filled())
            }))?;
        }
        Ok(())
    }
}

/// Padded min/max so single points still get a visible range.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_infinite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.1).max(0.01);
    (min - pad, max + pad)
}
