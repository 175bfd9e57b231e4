//! Dashboard module - page selection and render models

pub mod model;
mod render;
mod view;

pub use model::{Chart, Panel, RenderModel};
pub use render::{format_thousands, render, render_view, RenderError};
pub use view::{ParseViewError, View};
