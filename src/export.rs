//! Dashboard export: every page as JSON, every chart as PNG.

use crate::charts::{ChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::config::DashboardSettings;
use crate::dashboard::{render_view, RenderModel, View};
use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Render all four pages from `base` and write them into `out_dir`.
///
/// Returns the written paths, JSON files first.
pub fn export_dashboard(
    base: &DataFrame,
    settings: &DashboardSettings,
    out_dir: &Path,
    with_images: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating export directory {}", out_dir.display()))?;

    let models = View::ALL
        .into_iter()
        .map(|view| {
            render_view(base, view, settings)
                .with_context(|| format!("rendering {}", view.label()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut written = write_models(&models, out_dir)?;
    if with_images {
        written.extend(write_chart_images(&models, out_dir)?);
    }

    info!(
        dir = %out_dir.display(),
        files = written.len(),
        with_images,
        "Export complete"
    );
    Ok(written)
}

/// Write `<slug>.json` for each model.
pub fn write_models(models: &[RenderModel], out_dir: &Path) -> Result<Vec<PathBuf>> {
    models
        .iter()
        .map(|model| {
            let path = out_dir.join(format!("{}.json", model.view.slug()));
            let file =
                File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), model)
                .with_context(|| format!("writing {}", path.display()))?;
            debug!(path = %path.display(), "Wrote render model");
            Ok(path)
        })
        .collect()
}

/// Render every panel to `<slug>-<index>.png`, in parallel.
pub fn write_chart_images(models: &[RenderModel], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let jobs: Vec<(PathBuf, &RenderModel, usize)> = models
        .iter()
        .flat_map(|model| {
            (0..model.panels.len()).map(move |i| {
                (
                    out_dir.join(format!("{}-{}.png", model.view.slug(), i + 1)),
                    model,
                    i,
                )
            })
        })
        .collect();

    jobs.par_iter()
        .map(|(path, model, i)| {
            let chart = &model.panels[*i].chart;
            let png = ChartRenderer::render_chart_png(chart, DEFAULT_WIDTH, DEFAULT_HEIGHT)
                .with_context(|| format!("rendering chart '{}'", chart.title()))?;
            fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
            Ok(path.clone())
        })
        .collect()
}
