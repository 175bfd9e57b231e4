//! Column extraction helpers shared by the aggregator and the renderer.

use polars::prelude::*;

/// Read a column as strings; nulls become empty strings.
pub fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Read a numeric column as `f64`, keeping nulls.
pub fn optional_f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

/// Read a numeric column as `f64`; nulls are skipped.
pub fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(optional_f64_values(df, name)?.into_iter().flatten().collect())
}

/// Read an integer column as `i64`; nulls are skipped.
pub fn i64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<i64>> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_values_casts_numbers() {
        let df = df!("id" => [1i64, 2, 3]).unwrap();
        assert_eq!(string_values(&df, "id").unwrap(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_f64_values_skips_nulls() {
        let df = df!("lat" => [Some(28.6f64), None, Some(28.7)]).unwrap();
        assert_eq!(f64_values(&df, "lat").unwrap(), vec![28.6, 28.7]);
        assert_eq!(optional_f64_values(&df, "lat").unwrap()[1], None);
    }

    #[test]
    fn test_missing_column_is_error() {
        let df = df!("a" => [1i64]).unwrap();
        assert!(i64_values(&df, "b").is_err());
    }
}
