//! Data module - CSV loading, synthetic augmentation and derived views

pub mod aggregate;
pub mod augment;
pub mod cache;
pub mod frame;
pub mod loader;

pub use aggregate::{AggregateError, Aggregator, HeatmapPoints, OverviewMetrics};
pub use augment::{augment, seeded_rng, AugmentError, DEFAULT_SEED};
pub use cache::TableCache;
pub use loader::{DataLoader, LoaderError};
