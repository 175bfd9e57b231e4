//! Synthetic Augmenter Module
//! Attaches seeded demo metrics to the station table.

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::debug;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

pub const TOTAL_USERS: &str = "total_users";
pub const TOTAL_SESSIONS: &str = "total_sessions";
pub const AVG_SESSIONS_PER_USER: &str = "avg_sessions_per_user";
pub const PASSENGER_COUNT: &str = "Passenger_Count";
pub const HOUR: &str = "Hour";
pub const ACTIVE_USERS: &str = "Active_Users";

pub const TOTAL_USERS_RANGE: RangeInclusive<i64> = 5_000..=99_999;
pub const TOTAL_SESSIONS_RANGE: RangeInclusive<i64> = 1_000..=49_999;
pub const PASSENGER_COUNT_RANGE: RangeInclusive<i64> = 500..=9_999;
pub const HOUR_RANGE: RangeInclusive<i64> = 0..=23;
pub const ACTIVE_USERS_RANGE: RangeInclusive<i64> = 1_000..=29_999;

#[derive(Error, Debug)]
pub enum AugmentError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Build the deterministic generator used for all demo data.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn draw_column<R: Rng>(rng: &mut R, len: usize, range: RangeInclusive<i64>) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}

/// Return a copy of `df` with the synthetic demo columns attached.
///
/// Columns are drawn one after another, each filled for every row before the
/// next starts, so the same seed always reproduces the same table.
pub fn augment<R: Rng>(df: &DataFrame, rng: &mut R) -> Result<DataFrame, AugmentError> {
    let n = df.height();

    let users = draw_column(rng, n, TOTAL_USERS_RANGE);
    let sessions = draw_column(rng, n, TOTAL_SESSIONS_RANGE);
    let avg: Vec<f64> = users
        .iter()
        .zip(&sessions)
        .map(|(&u, &s)| round2(s as f64 / u as f64))
        .collect();
    let passengers = draw_column(rng, n, PASSENGER_COUNT_RANGE);
    let hours = draw_column(rng, n, HOUR_RANGE);
    let active = draw_column(rng, n, ACTIVE_USERS_RANGE);

    let mut out = df.clone();
    out.with_column(Column::new(TOTAL_USERS.into(), users))?;
    out.with_column(Column::new(TOTAL_SESSIONS.into(), sessions))?;
    out.with_column(Column::new(AVG_SESSIONS_PER_USER.into(), avg))?;
    out.with_column(Column::new(PASSENGER_COUNT.into(), passengers))?;
    out.with_column(Column::new(HOUR.into(), hours))?;
    out.with_column(Column::new(ACTIVE_USERS.into(), active))?;

    debug!(rows = n, "Attached synthetic columns");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::{f64_values, i64_values, string_values};

    fn stations(n: usize) -> DataFrame {
        let names: Vec<String> = (0..n).map(|i| format!("Station {i}")).collect();
        let lines: Vec<&str> = (0..n)
            .map(|i| if i % 2 == 0 { "Blue line" } else { "Yellow line" })
            .collect();
        df!("Station_Names" => names, "Metro_Line" => lines).unwrap()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.123), 0.12);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_columns_stay_in_range() {
        let out = augment(&stations(200), &mut seeded_rng(DEFAULT_SEED)).unwrap();

        let check = |name: &str, range: RangeInclusive<i64>| {
            let values = i64_values(&out, name).unwrap();
            assert_eq!(values.len(), 200);
            assert!(values.iter().all(|v| range.contains(v)), "{name} out of range");
        };
        check(TOTAL_USERS, TOTAL_USERS_RANGE);
        check(TOTAL_SESSIONS, TOTAL_SESSIONS_RANGE);
        check(PASSENGER_COUNT, PASSENGER_COUNT_RANGE);
        check(HOUR, HOUR_RANGE);
        check(ACTIVE_USERS, ACTIVE_USERS_RANGE);
    }

    #[test]
    fn test_avg_sessions_matches_ratio() {
        let out = augment(&stations(50), &mut seeded_rng(7)).unwrap();
        let users = i64_values(&out, TOTAL_USERS).unwrap();
        let sessions = i64_values(&out, TOTAL_SESSIONS).unwrap();
        let avg = f64_values(&out, AVG_SESSIONS_PER_USER).unwrap();

        for ((u, s), a) in users.iter().zip(&sessions).zip(&avg) {
            assert!(*u > 0);
            assert_eq!(*a, round2(*s as f64 / *u as f64));
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let base = stations(25);
        let first = augment(&base, &mut seeded_rng(DEFAULT_SEED)).unwrap();
        let second = augment(&base, &mut seeded_rng(DEFAULT_SEED)).unwrap();
        assert!(first.equals_missing(&second));

        let other = augment(&base, &mut seeded_rng(DEFAULT_SEED + 1)).unwrap();
        assert!(!first.equals_missing(&other));
    }

    #[test]
    fn test_keeps_source_columns() {
        let base = stations(3);
        let out = augment(&base, &mut seeded_rng(DEFAULT_SEED)).unwrap();
        assert_eq!(out.height(), 3);
        assert_eq!(out.width(), base.width() + 6);
        assert_eq!(
            string_values(&out, "Station_Names").unwrap(),
            string_values(&base, "Station_Names").unwrap()
        );
    }

    #[test]
    fn test_empty_table() {
        let out = augment(&stations(0), &mut seeded_rng(DEFAULT_SEED)).unwrap();
        assert_eq!(out.height(), 0);
        assert!(out.column(AVG_SESSIONS_PER_USER).is_ok());
    }
}
