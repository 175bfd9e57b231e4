//! Color scales for bar shading and the density heatmap.

use serde::Serialize;

/// Dark page background (#0f1116).
pub const BACKGROUND: [u8; 3] = [15, 17, 22];
/// Sidebar background (#181a20).
pub const SIDEBAR: [u8; 3] = [24, 26, 32];
/// Grid lines (#333333).
pub const GRID: [u8; 3] = [51, 51, 51];
pub const TEXT: [u8; 3] = [255, 255, 255];

/// Line color on the peak hour page (#00CC96).
pub const PEAK_LINE: [u8; 3] = [0, 204, 150];
/// Line color on the active users page (#1f77b4).
pub const TREND_LINE: [u8; 3] = [31, 119, 180];

/// Continuous scale used to shade bars by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScale {
    Blues,
    Greens,
    Oranges,
    Reds,
    Viridis,
}

impl ColorScale {
    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            ColorScale::Blues => &[[198, 219, 239], [107, 174, 214], [8, 48, 107]],
            ColorScale::Greens => &[[199, 233, 192], [116, 196, 118], [0, 68, 27]],
            ColorScale::Oranges => &[[253, 208, 162], [253, 141, 60], [127, 39, 4]],
            ColorScale::Reds => &[[252, 187, 161], [251, 106, 74], [103, 0, 13]],
            ColorScale::Viridis => &[
                [68, 1, 84],
                [59, 82, 139],
                [33, 145, 140],
                [94, 201, 98],
                [253, 231, 37],
            ],
        }
    }

    /// Color for a position in [0, 1]; out-of-range input is clamped.
    pub fn color_at(self, t: f64) -> [u8; 3] {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        lerp(stops[lower], stops[upper], scaled - lower as f64)
    }

    /// Color for `value` within `[min, max]`.
    pub fn color_for(self, value: f64, min: f64, max: f64) -> [u8; 3] {
        self.color_at(normalize(value, min, max))
    }
}

/// Map `value` into [0, 1]; a flat range maps everything to the top.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        1.0
    }
}

/// Heatmap gradient: yellow at 0.4, orange at 0.65, red at 1.0.
pub fn heat_color(t: f64) -> [u8; 3] {
    const YELLOW: [u8; 3] = [255, 255, 0];
    const ORANGE: [u8; 3] = [255, 165, 0];
    const RED: [u8; 3] = [255, 0, 0];

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t <= 0.4 {
        YELLOW
    } else if t <= 0.65 {
        lerp(YELLOW, ORANGE, (t - 0.4) / 0.25)
    } else {
        lerp(ORANGE, RED, (t - 0.65) / 0.35)
    }
}

fn lerp(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}
