//! Charts module - color scales, interactive plots and static rendering

pub mod palette;
mod plotter;
mod renderer;

pub use palette::ColorScale;
pub use plotter::{color32, ChartPlotter};
pub use renderer::{ChartRenderError, ChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
