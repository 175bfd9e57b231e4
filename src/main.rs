//! Delhi Metro Dashboard - station explorer with synthetic demo metrics
//!
//! Opens the dashboard window by default; `render` and `export` run the same
//! pipeline headless.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use delhi_metro_dashboard::config::{Cli, Commands, DashboardSettings};
use delhi_metro_dashboard::dashboard::{render_view, View};
use delhi_metro_dashboard::data::DataLoader;
use delhi_metro_dashboard::export::export_dashboard;
use delhi_metro_dashboard::gui::DashboardApp;
use eframe::egui;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn main() -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();
    cli.settings.log();

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => run_gui(cli.settings),
        Commands::Render { view } => run_render(&cli.settings, view),
        Commands::Export { out_dir, no_images } => run_export(&cli.settings, &out_dir, !no_images),
    }
}

fn run_gui(settings: DashboardSettings) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Delhi Metro Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Delhi Metro Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow!("GUI failed: {e}"))
}

fn run_render(settings: &DashboardSettings, view: View) -> Result<()> {
    let base = DataLoader::load_csv(&settings.data)
        .with_context(|| format!("loading {}", settings.data.display()))?;
    let model = render_view(&base, view, settings)
        .with_context(|| format!("rendering {}", view.label()))?;
    debug!(view = view.slug(), panels = model.panels.len(), "Rendered view");

    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}

fn run_export(settings: &DashboardSettings, out_dir: &Path, with_images: bool) -> Result<()> {
    let base = DataLoader::load_csv(&settings.data)
        .with_context(|| format!("loading {}", settings.data.display()))?;
    let written = export_dashboard(&base, settings, out_dir, with_images)?;
    for path in &written {
        info!(path = %path.display(), "Written");
    }
    Ok(())
}
