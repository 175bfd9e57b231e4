//! Command line and dashboard settings.

use crate::dashboard::View;
use crate::data::DEFAULT_SEED;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_DATA_PATH: &str = "data/Delhi metro.csv";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_ROUTES: usize = 10;
pub const DEFAULT_DAYS: usize = 30;

#[derive(Parser, Debug)]
#[command(name = "delhi_metro_dashboard")]
#[command(about = "Delhi Metro station dashboard with synthetic demo metrics", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: DashboardSettings,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the dashboard window (default)
    Gui,
    /// Print one view's render model as JSON
    Render {
        /// "overview", "maps", "peak-hours", "active-users" or a view title
        #[arg(value_name = "VIEW")]
        view: View,
    },
    /// Write every view as JSON (and PNG charts) into a directory
    Export {
        #[arg(value_name = "DIR")]
        out_dir: PathBuf,

        /// Skip PNG chart rendering
        #[arg(long, default_value_t = false)]
        no_images: bool,
    },
}

/// Everything a render pass needs besides the table itself.
#[derive(Args, Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSettings {
    /// Station CSV file
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Seed for the synthetic demo metrics
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of stations in top-N charts
    #[arg(long, global = true, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Number of sampled routes on the maps page
    #[arg(long, global = true, default_value_t = DEFAULT_ROUTES)]
    pub routes: usize,

    /// Length of the daily active users series
    #[arg(long, global = true, default_value_t = DEFAULT_DAYS)]
    pub days: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA_PATH),
            seed: DEFAULT_SEED,
            top_n: DEFAULT_TOP_N,
            routes: DEFAULT_ROUTES,
            days: DEFAULT_DAYS,
        }
    }
}

impl DashboardSettings {
    pub fn log(&self) {
        info!(
            data = %self.data.display(),
            seed = self.seed,
            top_n = self.top_n,
            routes = self.routes,
            days = self.days,
            "Dashboard settings"
        );
    }
}
