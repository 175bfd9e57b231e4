//! Page derivation: turns the augmented table into a `RenderModel`.

use super::model::{
    Bar, BarChart, Chart, HeatPoint, HeatmapChart, LineChart, LinePoint, Metric, Panel,
    RenderModel,
};
use super::View;
use crate::charts::palette::{ColorScale, PEAK_LINE, TREND_LINE};
use crate::config::DashboardSettings;
use crate::data::aggregate::{
    FROM_STATION, METRO_LINE, STATION_NAMES, TO_STATION, USAGE_SCORE,
};
use crate::data::augment::{
    ACTIVE_USERS, AVG_SESSIONS_PER_USER, HOUR, PASSENGER_COUNT, TOTAL_SESSIONS, TOTAL_USERS,
};
use crate::data::frame::{optional_f64_values, string_values};
use crate::data::{augment, seeded_rng, AggregateError, Aggregator, AugmentError};
use polars::prelude::*;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Augment(#[from] AugmentError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Seed a fresh generator, augment the base table and derive `view`.
///
/// Every call starts from the same seed, so navigating back to a page shows
/// the same numbers.
pub fn render_view(
    base: &DataFrame,
    view: View,
    settings: &DashboardSettings,
) -> Result<RenderModel, RenderError> {
    let mut rng = seeded_rng(settings.seed);
    let table = augment(base, &mut rng)?;
    render(view, &table, settings, &mut rng)
}

/// Derive one page from an already augmented table.
pub fn render<R: Rng>(
    view: View,
    table: &DataFrame,
    settings: &DashboardSettings,
    rng: &mut R,
) -> Result<RenderModel, RenderError> {
    debug!(view = view.slug(), rows = table.height(), "Rendering view");
    match view {
        View::DashboardOverview => overview(table),
        View::MetroMaps => metro_maps(table, settings, rng),
        View::PeakHourAnalysis => peak_hours(table, settings),
        View::ActiveUsersTrend => active_users(settings, rng),
    }
}

fn overview(table: &DataFrame) -> Result<RenderModel, RenderError> {
    let metrics = Aggregator::overview_metrics(table)?;
    let totals = Aggregator::line_totals(table)?;
    let lines = string_values(&totals, METRO_LINE)?;

    Ok(RenderModel {
        view: View::DashboardOverview,
        title: "Delhi Metro Data Dashboard".to_string(),
        metrics: vec![
            metric("Total Users", format_thousands(metrics.total_users)),
            metric("Total Sessions", format_thousands(metrics.total_sessions)),
            metric(
                "Avg Sessions per User",
                format!("{:.2}", metrics.avg_sessions_per_user),
            ),
        ],
        panels: vec![
            panel(
                "Total Users per Metro Line",
                line_bars(
                    &totals,
                    &lines,
                    TOTAL_USERS,
                    "Total Users per Metro Line",
                    "Total Users",
                    ColorScale::Blues,
                )?,
            ),
            panel(
                "Total Sessions per Metro Line",
                line_bars(
                    &totals,
                    &lines,
                    TOTAL_SESSIONS,
                    "Total Sessions per Metro Line",
                    "Total Sessions",
                    ColorScale::Greens,
                )?,
            ),
            panel(
                "Average Sessions per User",
                line_bars(
                    &totals,
                    &lines,
                    AVG_SESSIONS_PER_USER,
                    "Average Sessions per User by Metro Line",
                    "Avg Sessions/User",
                    ColorScale::Oranges,
                )?,
            ),
        ],
    })
}

/// One bar per metro line for a column of the line totals.
fn line_bars(
    totals: &DataFrame,
    lines: &[String],
    column: &str,
    title: &str,
    y_label: &str,
    scale: ColorScale,
) -> Result<Chart, RenderError> {
    Ok(Chart::Bar(BarChart {
        title: title.to_string(),
        x_label: "Metro Line".to_string(),
        y_label: y_label.to_string(),
        bars: bars(lines, &optional_f64_values(totals, column)?),
        scale,
    }))
}

fn metro_maps<R: Rng>(
    table: &DataFrame,
    settings: &DashboardSettings,
    rng: &mut R,
) -> Result<RenderModel, RenderError> {
    let routes = Aggregator::route_sample(table, settings.routes, rng)?;
    let labels: Vec<String> = string_values(&routes, FROM_STATION)?
        .into_iter()
        .zip(string_values(&routes, TO_STATION)?)
        .map(|(from, to)| format!("{from} → {to}"))
        .collect();
    let scores = optional_f64_values(&routes, USAGE_SCORE)?;

    let mut panels = vec![panel(
        &format!("Top {} Used Routes", settings.routes),
        Chart::Bar(BarChart {
            title: format!("Top {} Most Used Routes", settings.routes),
            x_label: "Route".to_string(),
            y_label: "Usage Score".to_string(),
            bars: bars(&labels, &scores),
            scale: ColorScale::Viridis,
        }),
    )];

    let heat = Aggregator::heatmap_points(table)?;
    if let (Some(center), false) = (heat.center, heat.points.is_empty()) {
        panels.push(panel(
            "Heatmap of Metro User Density",
            Chart::Heatmap(HeatmapChart {
                title: "Metro User Density".to_string(),
                center,
                points: heat
                    .points
                    .into_iter()
                    .map(|(lat, lon, weight)| HeatPoint { lat, lon, weight })
                    .collect(),
            }),
        ));
    }

    Ok(RenderModel {
        view: View::MetroMaps,
        title: "Metro Maps and Heatmap".to_string(),
        metrics: Vec::new(),
        panels,
    })
}

fn peak_hours(table: &DataFrame, settings: &DashboardSettings) -> Result<RenderModel, RenderError> {
    let hourly = Aggregator::hourly_aggregate(table)?;
    let hours = optional_f64_values(&hourly, HOUR)?;
    let sums = optional_f64_values(&hourly, PASSENGER_COUNT)?;
    let points = hours
        .iter()
        .zip(&sums)
        .filter_map(|(h, s)| {
            let hour = (*h)?;
            Some(LinePoint {
                x: hour,
                label: format!("{hour:.0}"),
                y: s.unwrap_or(0.0),
            })
        })
        .collect();

    let top = Aggregator::top_n(table, PASSENGER_COUNT, settings.top_n)?;
    let names = string_values(&top, STATION_NAMES)?;
    let counts = optional_f64_values(&top, PASSENGER_COUNT)?;

    Ok(RenderModel {
        view: View::PeakHourAnalysis,
        title: "Peak Hour Analysis".to_string(),
        metrics: Vec::new(),
        panels: vec![
            panel(
                "Passenger Count by Hour",
                Chart::Line(LineChart {
                    title: "Passenger Flow Across the Day".to_string(),
                    x_label: "Hour".to_string(),
                    y_label: "Passenger Count".to_string(),
                    points,
                    color: PEAK_LINE,
                }),
            ),
            panel(
                &format!("Top {} Stations During Peak Hour", settings.top_n),
                Chart::Bar(BarChart {
                    title: format!("Top {} Stations by Peak Hour Load", settings.top_n),
                    x_label: "Station".to_string(),
                    y_label: "Passenger Count".to_string(),
                    bars: bars(&names, &counts),
                    scale: ColorScale::Reds,
                }),
            ),
        ],
    })
}

fn active_users<R: Rng>(
    settings: &DashboardSettings,
    rng: &mut R,
) -> Result<RenderModel, RenderError> {
    let series = Aggregator::daily_series(settings.days, rng)?;
    let dates = Aggregator::dates(&series)?;
    let active = optional_f64_values(&series, ACTIVE_USERS)?;
    let points = dates
        .iter()
        .zip(&active)
        .enumerate()
        .map(|(i, (date, value))| LinePoint {
            x: i as f64,
            label: date.format("%Y-%m-%d").to_string(),
            y: value.unwrap_or(0.0),
        })
        .collect();

    Ok(RenderModel {
        view: View::ActiveUsersTrend,
        title: "Daily Active Users Trend".to_string(),
        metrics: Vec::new(),
        panels: vec![panel(
            "Daily Active Users Over Time",
            Chart::Line(LineChart {
                title: "Daily Active Users Over Time".to_string(),
                x_label: "Date".to_string(),
                y_label: "Active Users".to_string(),
                points,
                color: TREND_LINE,
            }),
        )],
    })
}

fn bars(labels: &[String], values: &[Option<f64>]) -> Vec<Bar> {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| Bar {
            label: label.clone(),
            value: value.unwrap_or(0.0),
        })
        .collect()
}

fn panel(subheader: &str, chart: Chart) -> Panel {
    Panel {
        subheader: subheader.to_string(),
        chart,
    }
}

fn metric(label: &str, value: String) -> Metric {
    Metric {
        label: label.to_string(),
        value,
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
