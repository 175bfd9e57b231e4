//! Base table cache.
//! Holds the loaded station table for the lifetime of the application.

use super::loader::{DataLoader, LoaderError};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Lazily loaded, resettable holder of the base table.
///
/// The first `get_or_load` reads the file; later calls for the same path hand
/// back the same `Arc` without touching the disk until `reset` is called.
#[derive(Default)]
pub struct TableCache {
    entry: Option<(PathBuf, Arc<DataFrame>)>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first access.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<DataFrame>, LoaderError> {
        if let Some((cached_path, table)) = &self.entry {
            if cached_path == path {
                debug!(path = %path.display(), "Base table cache hit");
                return Ok(Arc::clone(table));
            }
            info!(
                old = %cached_path.display(),
                new = %path.display(),
                "Data path changed, replacing cached table"
            );
        }

        let table = Arc::new(DataLoader::load_csv(path)?);
        self.entry = Some((path.to_path_buf(), Arc::clone(&table)));
        Ok(table)
    }

    /// Drop the cached table so the next access re-reads the file.
    pub fn reset(&mut self) {
        if self.entry.take().is_some() {
            info!("Base table cache reset");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.entry.is_some()
    }

    /// Path of the currently cached table, if any.
    pub fn path(&self) -> Option<&Path> {
        self.entry.as_ref().map(|(path, _)| path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_csv(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_repeated_load_returns_same_table() {
        let path = temp_csv(
            "delhi_metro_cache_same.csv",
            "Station Names,Metro Line\nKashmere Gate,Red line\n",
        );
        let mut cache = TableCache::new();

        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_loaded());
        assert_eq!(cache.path(), Some(path.as_path()));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_cached_table_ignores_file_changes_until_reset() {
        let path = temp_csv(
            "delhi_metro_cache_reset.csv",
            "Station Names,Metro Line\nKashmere Gate,Red line\n",
        );
        let mut cache = TableCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert_eq!(first.height(), 1);

        fs::write(
            &path,
            "Station Names,Metro Line\nKashmere Gate,Red line\nShastri Park,Red line\n",
        )
        .unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().height(), 1);

        cache.reset();
        assert!(!cache.is_loaded());

        let reloaded = cache.get_or_load(&path).unwrap();
        assert_eq!(reloaded.height(), 2);
        assert!(!Arc::ptr_eq(&first, &reloaded));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_failed_load_leaves_cache_empty() {
        let mut cache = TableCache::new();
        let missing = env::temp_dir().join("delhi_metro_cache_missing.csv");

        assert!(cache.get_or_load(&missing).is_err());
        assert!(!cache.is_loaded());
    }
}
