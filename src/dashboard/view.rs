//! The four navigable dashboard pages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    DashboardOverview,
    MetroMaps,
    PeakHourAnalysis,
    ActiveUsersTrend,
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown view '{0}' (expected overview, maps, peak-hours or active-users)")]
pub struct ParseViewError(String);

impl View {
    /// Sidebar order.
    pub const ALL: [View; 4] = [
        View::DashboardOverview,
        View::MetroMaps,
        View::PeakHourAnalysis,
        View::ActiveUsersTrend,
    ];

    /// Title shown in the navigation control.
    pub fn label(self) -> &'static str {
        match self {
            View::DashboardOverview => "Dashboard Overview",
            View::MetroMaps => "Metro Maps",
            View::PeakHourAnalysis => "Peak Hour Analysis",
            View::ActiveUsersTrend => "Active Users Trend",
        }
    }

    /// Short name used on the command line and in export file names.
    pub fn slug(self) -> &'static str {
        match self {
            View::DashboardOverview => "overview",
            View::MetroMaps => "maps",
            View::PeakHourAnalysis => "peak-hours",
            View::ActiveUsersTrend => "active-users",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        View::ALL
            .into_iter()
            .find(|v| v.slug() == wanted || v.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseViewError(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug_and_label() {
        assert_eq!("maps".parse::<View>().unwrap(), View::MetroMaps);
        assert_eq!(
            "Peak Hour Analysis".parse::<View>().unwrap(),
            View::PeakHourAnalysis
        );
        assert_eq!(
            "active users trend".parse::<View>().unwrap(),
            View::ActiveUsersTrend
        );
        assert!("heatmap".parse::<View>().is_err());
    }

    #[test]
    fn test_slug_round_trip() {
        for view in View::ALL {
            assert_eq!(view.slug().parse::<View>().unwrap(), view);
        }
    }
}
