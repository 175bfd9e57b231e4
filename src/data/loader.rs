//! CSV Data Loader Module
//! Reads the station CSV with Polars and normalizes its column names.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Columns every station file must provide after normalization.
pub const REQUIRED_COLUMNS: [&str; 2] = ["Station_Names", "Metro_Line"];

/// Optional coordinate columns, cast to Float64 when present.
pub const COORDINATE_COLUMNS: [&str; 2] = ["Latitude", "Longitude"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Required column '{0}' not found")]
    MissingColumn(String),
}

/// Normalize a raw header: trim, spaces to underscores, drop parentheses.
///
/// `" Opened(Year) "` becomes `"OpenedYear"`, `"Station Names"` becomes
/// `"Station_Names"`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect()
}

/// Loads the station table from disk.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file, normalize headers and validate required columns.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        std::fs::metadata(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let df = Self::normalize(df)?;
        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "Loaded station table"
        );
        Ok(df)
    }

    /// Apply header normalization and coordinate typing to a raw frame.
    pub fn normalize(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| normalize_column_name(s))
            .collect();
        debug!(?names, "Normalized column names");
        df.set_column_names(names)?;

        for required in REQUIRED_COLUMNS {
            if df.column(required).is_err() {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        for coord in COORDINATE_COLUMNS {
            if let Ok(column) = df.column(coord) {
                let typed = column.cast(&DataType::Float64)?;
                df.with_column(typed)?;
            }
        }

        Ok(df)
    }
}
