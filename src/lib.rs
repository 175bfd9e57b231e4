//! Delhi Metro Dashboard - station data with synthetic demo metrics
//!
//! Loads the station CSV, attaches seeded demo columns and derives the four
//! dashboard pages as plain render models that the GUI and exporter draw.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod export;
pub mod gui;
