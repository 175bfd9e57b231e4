//! GUI module - User interface components

mod app;
mod sidebar;
mod view_panel;

pub use app::DashboardApp;
pub use sidebar::{Sidebar, SidebarAction};
pub use view_panel::ViewPanel;
