use std::fs;
use std::path::Path;

use log::{debug, info};
use plotters::prelude::*;

use crate::data::model::Roster;
use crate::error::{Error, Result};
use crate::stats;

/// Rendered image size in pixels.
pub const IMAGE_WIDTH: u32 = 900;
pub const IMAGE_HEIGHT: u32 = 600;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw the rating distribution as a bar histogram PNG.
///
/// Parent directories are created first and an existing file at `output` is
/// overwritten. One bar per integer rating between the roster's bounds.
pub fn render(roster: &Roster, output: &Path) -> Result<()> {
    let bins = stats::rating_bins(roster)?;
    let (min, max) = stats::rating_bounds(roster)?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    // counts[i] covers the [bins[i], bins[i] + 1) bucket
    let mut counts = vec![0u32; bins.len() - 1];
    for p in roster.players() {
        counts[usize::from(p.rating - min)] += 1;
    }
    let tallest = counts.iter().copied().max().unwrap_or(0);

    let root = BitMapBackend::new(output, (IMAGE_WIDTH, IMAGE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Rating distribution", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(u32::from(min)..u32::from(max) + 1, 0u32..tallest + 1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Rating")
        .y_desc("Players")
        .disable_x_mesh()
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(bins.windows(2).zip(&counts).map(|(edge, &n)| {
            Rectangle::new([(edge[0], 0), (edge[1], n)], BLUE.mix(0.6).filled())
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    info!("rendered rating histogram to {}", output.display());
    Ok(())
}

/// Render only when no image exists yet at `output`.
///
/// Existing histograms are never implicitly refreshed; a caller wanting a
/// fresh image deletes the file or calls [`render`] directly. Returns
/// whether an image was produced.
pub fn render_if_absent(roster: &Roster, output: &Path) -> Result<bool> {
    if output.exists() {
        debug!("histogram {} already present, keeping it", output.display());
        return Ok(false);
    }
    render(roster, output)?;
    Ok(true)
}

fn draw_err(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}
