//! Render model: everything a page shows, independent of how it is drawn.

use super::View;
use crate::charts::ColorScale;
use serde::Serialize;

/// One fully derived dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub view: View,
    pub title: String,
    pub metrics: Vec<Metric>,
    pub panels: Vec<Panel>,
}

/// Headline number shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub subheader: String,
    pub chart: Chart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Bar(BarChart),
    Line(LineChart),
    Heatmap(HeatmapChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(c) => &c.title,
            Chart::Line(c) => &c.title,
            Chart::Heatmap(c) => &c.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Chart::Bar(c) => c.bars.is_empty(),
            Chart::Line(c) => c.points.is_empty(),
            Chart::Heatmap(c) => c.points.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    pub scale: ColorScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl BarChart {
    /// Smallest and largest bar value, `(0, 0)` when there are no bars.
    pub fn value_range(&self) -> (f64, f64) {
        value_range(self.bars.iter().map(|b| b.value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<LinePoint>,
    pub color: [u8; 3],
}

/// A point on a line chart; `label` is the x tick text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub x: f64,
    pub label: String,
    pub y: f64,
}

impl LineChart {
    pub fn y_range(&self) -> (f64, f64) {
        value_range(self.points.iter().map(|p| p.y))
    }

    /// Tick label for an x position, if a point sits there.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        self.points
            .iter()
            .find(|p| (p.x - x).abs() < 1e-9)
            .map(|p| p.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: String,
    /// `(latitude, longitude)` the map is centered on.
    pub center: (f64, f64),
    pub points: Vec<HeatPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lon: f64,
    pub weight: f64,
}

impl HeatmapChart {
    pub fn weight_range(&self) -> (f64, f64) {
        value_range(self.points.iter().map(|p| p.weight))
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_infinite() {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}
