//! Aggregator Module
//! Derived, read-only projections of the augmented station table.

use super::augment::{
    ACTIVE_USERS, AVG_SESSIONS_PER_USER, HOUR, PASSENGER_COUNT, TOTAL_SESSIONS, TOTAL_USERS,
};
use super::frame::{f64_values, i64_values, optional_f64_values, string_values};
use chrono::{Days, NaiveDate};
use polars::prelude::*;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::debug;

pub const STATION_NAMES: &str = "Station_Names";
pub const METRO_LINE: &str = "Metro_Line";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const FROM_STATION: &str = "From_Station";
pub const TO_STATION: &str = "To_Station";
pub const USAGE_SCORE: &str = "Usage_Score";
pub const DATE: &str = "Date";

pub const USAGE_SCORE_RANGE: RangeInclusive<i64> = 100..=999;
pub const DAILY_ACTIVE_RANGE: RangeInclusive<i64> = 500..=29_999;

/// First day of the synthetic daily series.
pub fn series_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Requested {requested} rows but only {available} are available")]
    InsufficientData { requested: usize, available: usize },
    #[error("A {days}-day series starting {start} runs past the last representable date")]
    SeriesOutOfRange { days: usize, start: NaiveDate },
}

/// Headline numbers for the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub total_users: i64,
    pub total_sessions: i64,
    pub avg_sessions_per_user: f64,
}

/// Weighted points for the user-density heatmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapPoints {
    /// Mean latitude and longitude; `None` when no coordinates exist.
    pub center: Option<(f64, f64)>,
    /// `(latitude, longitude, weight)` triples.
    pub points: Vec<(f64, f64, f64)>,
}

/// Handles the derived views of the augmented table.
pub struct Aggregator;

impl Aggregator {
    /// The `n` rows with the largest `column`, ties kept in original order.
    pub fn top_n(df: &DataFrame, column: &str, n: usize) -> Result<DataFrame, AggregateError> {
        let sorted = df.sort(
            [column],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )?;
        Ok(sorted.head(Some(n)))
    }

    /// Sample `n` distinct rows and relabel them as synthetic routes.
    ///
    /// From/To names are drawn with replacement from every station name, so a
    /// route may start and end at the same station.
    pub fn route_sample<R: Rng>(
        df: &DataFrame,
        n: usize,
        rng: &mut R,
    ) -> Result<DataFrame, AggregateError> {
        let available = df.height();
        if available == 0 {
            return Ok(Self::empty_routes(df)?);
        }
        if n > available {
            return Err(AggregateError::InsufficientData {
                requested: n,
                available,
            });
        }

        let picked: Vec<IdxSize> = index::sample(rng, available, n)
            .into_iter()
            .map(|i| i as IdxSize)
            .collect();
        let mut routes = df.take(&IdxCa::from_vec("idx".into(), picked))?;

        let names = string_values(df, STATION_NAMES)?;
        let from: Vec<String> = (0..n)
            .filter_map(|_| names.choose(rng).cloned())
            .collect();
        let to: Vec<String> = (0..n)
            .filter_map(|_| names.choose(rng).cloned())
            .collect();
        let scores: Vec<i64> = (0..n)
            .map(|_| rng.gen_range(USAGE_SCORE_RANGE))
            .collect();

        routes.with_column(Column::new(FROM_STATION.into(), from))?;
        routes.with_column(Column::new(TO_STATION.into(), to))?;
        routes.with_column(Column::new(USAGE_SCORE.into(), scores))?;

        debug!(requested = n, available, "Sampled routes");
        Ok(routes)
    }

    fn empty_routes(df: &DataFrame) -> PolarsResult<DataFrame> {
        let mut routes = df.clear();
        routes.with_column(Column::new(FROM_STATION.into(), Vec::<String>::new()))?;
        routes.with_column(Column::new(TO_STATION.into(), Vec::<String>::new()))?;
        routes.with_column(Column::new(USAGE_SCORE.into(), Vec::<i64>::new()))?;
        Ok(routes)
    }

    /// Passenger totals per hour present in the data, ordered by hour.
    pub fn hourly_aggregate(df: &DataFrame) -> Result<DataFrame, AggregateError> {
        let hourly = df
            .clone()
            .lazy()
            .group_by([col(HOUR)])
            .agg([col(PASSENGER_COUNT).sum()])
            .sort([HOUR], SortMultipleOptions::default())
            .collect()?;
        Ok(hourly)
    }

    /// `n_days` consecutive dates from the anchor, each with a random count.
    pub fn daily_series<R: Rng>(n_days: usize, rng: &mut R) -> Result<DataFrame, AggregateError> {
        let anchor = series_anchor();
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();

        let out_of_range = AggregateError::SeriesOutOfRange {
            days: n_days,
            start: anchor,
        };
        if n_days > 0 && anchor.checked_add_days(Days::new(n_days as u64 - 1)).is_none() {
            return Err(out_of_range);
        }

        let days = (0..n_days)
            .map(|offset| {
                let date = anchor.checked_add_days(Days::new(offset as u64))?;
                i32::try_from((date - epoch).num_days()).ok()
            })
            .collect::<Option<Vec<i32>>>()
            .ok_or(out_of_range)?;
        let active: Vec<i64> = (0..n_days)
            .map(|_| rng.gen_range(DAILY_ACTIVE_RANGE))
            .collect();

        let dates = Column::new(DATE.into(), days).cast(&DataType::Date)?;
        let series = DataFrame::new(vec![dates, Column::new(ACTIVE_USERS.into(), active)])?;
        Ok(series)
    }

    /// Read a `Date` column back as calendar dates.
    pub fn dates(df: &DataFrame) -> Result<Vec<NaiveDate>, AggregateError> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
        let days = df.column(DATE)?.cast(&DataType::Int32)?;
        Ok(days
            .i32()?
            .into_iter()
            .flatten()
            .filter_map(|d| epoch.checked_add_signed(chrono::Duration::days(d as i64)))
            .collect())
    }

    /// Users and sessions summed per metro line, with the mean ratio.
    pub fn line_totals(df: &DataFrame) -> Result<DataFrame, AggregateError> {
        let totals = df
            .clone()
            .lazy()
            .group_by([col(METRO_LINE)])
            .agg([
                col(TOTAL_USERS).sum(),
                col(TOTAL_SESSIONS).sum(),
                col(AVG_SESSIONS_PER_USER).mean(),
            ])
            .sort([METRO_LINE], SortMultipleOptions::default())
            .collect()?;
        Ok(totals)
    }

    /// Totals across all stations; an empty table reports zeros.
    pub fn overview_metrics(df: &DataFrame) -> Result<OverviewMetrics, AggregateError> {
        let total_users = i64_values(df, TOTAL_USERS)?.iter().sum();
        let total_sessions = i64_values(df, TOTAL_SESSIONS)?.iter().sum();
        let ratios = f64_values(df, AVG_SESSIONS_PER_USER)?;
        let avg_sessions_per_user = if ratios.is_empty() {
            0.0
        } else {
            ratios.iter().mean()
        };

        Ok(OverviewMetrics {
            total_users,
            total_sessions,
            avg_sessions_per_user,
        })
    }

    /// Coordinates weighted by total users, for rows that have both.
    ///
    /// A table without coordinate columns yields no points.
    pub fn heatmap_points(df: &DataFrame) -> Result<HeatmapPoints, AggregateError> {
        if df.column(LATITUDE).is_err() || df.column(LONGITUDE).is_err() {
            return Ok(HeatmapPoints::default());
        }
        let lats = optional_f64_values(df, LATITUDE)?;
        let lons = optional_f64_values(df, LONGITUDE)?;
        let weights = optional_f64_values(df, TOTAL_USERS)?;

        let points: Vec<(f64, f64, f64)> = lats
            .iter()
            .zip(&lons)
            .zip(&weights)
            .filter_map(|((lat, lon), w)| Some(((*lat)?, (*lon)?, w.unwrap_or(0.0))))
            .collect();

        let present_lats: Vec<f64> = lats.iter().flatten().copied().collect();
        let present_lons: Vec<f64> = lons.iter().flatten().copied().collect();
        let center = if present_lats.is_empty() || present_lons.is_empty() {
            None
        } else {
            Some((present_lats.iter().mean(), present_lons.iter().mean()))
        };

        Ok(HeatmapPoints { center, points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::augment::{augment, seeded_rng, DEFAULT_SEED};
    use std::collections::HashMap;

    fn augmented(n: usize) -> DataFrame {
        let names: Vec<String> = (0..n).map(|i| format!("Station {i}")).collect();
        let lines: Vec<String> = (0..n).map(|i| format!("Line {}", i % 3)).collect();
        let base = df!(STATION_NAMES => names, METRO_LINE => lines).unwrap();
        augment(&base, &mut seeded_rng(DEFAULT_SEED)).unwrap()
    }

    #[test]
    fn test_top_n_sorted_descending() {
        let df = augmented(40);
        let top = Aggregator::top_n(&df, TOTAL_USERS, 10).unwrap();
        let values = i64_values(&top, TOTAL_USERS).unwrap();

        assert_eq!(values.len(), 10);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));

        let max = i64_values(&df, TOTAL_USERS).unwrap().into_iter().max().unwrap();
        assert_eq!(values[0], max);
    }

    #[test]
    fn test_top_n_larger_than_table_returns_every_row() {
        let df = augmented(3);
        let top = Aggregator::top_n(&df, TOTAL_USERS, 10).unwrap();

        assert_eq!(top.height(), 3);
        let mut names = string_values(&top, STATION_NAMES).unwrap();
        names.sort();
        assert_eq!(names, vec!["Station 0", "Station 1", "Station 2"]);
        let values = i64_values(&top, TOTAL_USERS).unwrap();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_top_n_ties_keep_row_order() {
        let df = df!(
            STATION_NAMES => ["a", "b", "c", "d"],
            "score" => [5i64, 9, 5, 5]
        )
        .unwrap();
        let top = Aggregator::top_n(&df, "score", 3).unwrap();
        assert_eq!(string_values(&top, STATION_NAMES).unwrap(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_route_sample_distinct_rows() {
        let df = augmented(15);
        let routes = Aggregator::route_sample(&df, 10, &mut seeded_rng(3)).unwrap();

        assert_eq!(routes.height(), 10);
        let mut picked = string_values(&routes, STATION_NAMES).unwrap();
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 10);

        let all = string_values(&df, STATION_NAMES).unwrap();
        for name in string_values(&routes, FROM_STATION)
            .unwrap()
            .into_iter()
            .chain(string_values(&routes, TO_STATION).unwrap())
        {
            assert!(all.contains(&name));
        }
        let scores = i64_values(&routes, USAGE_SCORE).unwrap();
        assert!(scores.iter().all(|s| USAGE_SCORE_RANGE.contains(s)));
    }

    #[test]
    fn test_route_sample_insufficient_data() {
        let df = augmented(4);
        let err = Aggregator::route_sample(&df, 10, &mut seeded_rng(3)).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::InsufficientData {
                requested: 10,
                available: 4
            }
        ));
    }

    #[test]
    fn test_route_sample_empty_table() {
        let df = augmented(0);
        let routes = Aggregator::route_sample(&df, 10, &mut seeded_rng(3)).unwrap();
        assert_eq!(routes.height(), 0);
        assert!(routes.column(USAGE_SCORE).is_ok());
    }

    #[test]
    fn test_hourly_aggregate_sums_per_hour() {
        let df = augmented(60);
        let hourly = Aggregator::hourly_aggregate(&df).unwrap();

        let hours = i64_values(&df, HOUR).unwrap();
        let passengers = i64_values(&df, PASSENGER_COUNT).unwrap();
        let mut expected: HashMap<i64, i64> = HashMap::new();
        for (h, p) in hours.iter().zip(&passengers) {
            *expected.entry(*h).or_default() += p;
        }

        let out_hours = i64_values(&hourly, HOUR).unwrap();
        let out_sums = i64_values(&hourly, PASSENGER_COUNT).unwrap();
        assert_eq!(out_hours.len(), expected.len());
        assert!(out_hours.windows(2).all(|w| w[0] < w[1]));
        for (h, s) in out_hours.iter().zip(&out_sums) {
            assert_eq!(expected.get(h), Some(s));
        }
    }

    #[test]
    fn test_hourly_aggregate_omits_missing_hours() {
        let df = df!(HOUR => [3i64, 3, 17], PASSENGER_COUNT => [100i64, 250, 40]).unwrap();
        let hourly = Aggregator::hourly_aggregate(&df).unwrap();

        assert_eq!(i64_values(&hourly, HOUR).unwrap(), vec![3, 17]);
        assert_eq!(i64_values(&hourly, PASSENGER_COUNT).unwrap(), vec![350, 40]);
    }

    #[test]
    fn test_daily_series_consecutive_dates() {
        let series = Aggregator::daily_series(30, &mut seeded_rng(DEFAULT_SEED)).unwrap();
        assert_eq!(series.height(), 30);

        let dates = Aggregator::dates(&series).unwrap();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], series_anchor());
        assert!(dates.windows(2).all(|w| w[1] == w[0] + Days::new(1)));

        let active = i64_values(&series, ACTIVE_USERS).unwrap();
        assert!(active.iter().all(|v| DAILY_ACTIVE_RANGE.contains(v)));
    }

    #[test]
    fn test_daily_series_past_last_date_is_an_error() {
        let err = Aggregator::daily_series(100_000_000, &mut seeded_rng(1)).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::SeriesOutOfRange { days: 100_000_000, .. }
        ));
    }

    #[test]
    fn test_daily_series_zero_days() {
        let series = Aggregator::daily_series(0, &mut seeded_rng(1)).unwrap();
        assert_eq!(series.height(), 0);
        assert!(Aggregator::dates(&series).unwrap().is_empty());
    }

    #[test]
    fn test_line_totals() {
        let df = df!(
            METRO_LINE => ["Red", "Blue", "Red"],
            TOTAL_USERS => [10i64, 20, 30],
            TOTAL_SESSIONS => [1i64, 2, 3],
            AVG_SESSIONS_PER_USER => [0.1f64, 0.1, 0.2]
        )
        .unwrap();
        let totals = Aggregator::line_totals(&df).unwrap();

        assert_eq!(string_values(&totals, METRO_LINE).unwrap(), vec!["Blue", "Red"]);
        assert_eq!(i64_values(&totals, TOTAL_USERS).unwrap(), vec![20, 40]);
        assert_eq!(i64_values(&totals, TOTAL_SESSIONS).unwrap(), vec![2, 4]);
        let avg = f64_values(&totals, AVG_SESSIONS_PER_USER).unwrap();
        assert!((avg[1] - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_overview_metrics_empty_table() {
        let metrics = Aggregator::overview_metrics(&augmented(0)).unwrap();
        assert_eq!(metrics.total_users, 0);
        assert_eq!(metrics.total_sessions, 0);
        assert_eq!(metrics.avg_sessions_per_user, 0.0);
    }

    #[test]
    fn test_heatmap_points_skip_missing_coordinates() {
        let df = df!(
            LATITUDE => [Some(28.0f64), None, Some(30.0)],
            LONGITUDE => [Some(77.0f64), Some(77.5), Some(79.0)],
            TOTAL_USERS => [100i64, 200, 300]
        )
        .unwrap();
        let heat = Aggregator::heatmap_points(&df).unwrap();

        assert_eq!(heat.points, vec![(28.0, 77.0, 100.0), (30.0, 79.0, 300.0)]);
        let (lat, lon) = heat.center.unwrap();
        assert!((lat - 29.0).abs() < 1e-9);
        assert!((lon - 77.833_333_333).abs() < 1e-6);
    }

    #[test]
    fn test_heatmap_points_without_coordinate_columns() {
        let heat = Aggregator::heatmap_points(&augmented(5)).unwrap();
        assert!(heat.points.is_empty());
        assert!(heat.center.is_none());
    }

    #[test]
    fn test_heatmap_points_propagates_cast_failure() {
        let lats = Column::new(
            LATITUDE.into(),
            vec![Series::new("".into(), [28.0f64, 28.1])],
        );
        let df = DataFrame::new(vec![
            lats,
            Column::new(LONGITUDE.into(), [77.0f64]),
            Column::new(TOTAL_USERS.into(), [100i64]),
        ])
        .unwrap();

        assert!(matches!(
            Aggregator::heatmap_points(&df),
            Err(AggregateError::PolarsError(_))
        ));
    }
}
