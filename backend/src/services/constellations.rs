//! Constellation line projection and culling.

use log::debug;

use crate::algorithms::{equatorial_to_horizontal, transform_batch, SiderealFrame};
use crate::error::SkyResult;
use crate::models::{ConstellationFigure, ConstellationResult, EquatorialPosition, LinePoint};

use super::figure_cache::FigureCache;

/// Arithmetic mean of the figure's raw RA and Dec values.
///
/// RA is averaged as published, without unwrapping. Returns `None` for a
/// figure without vertices.
pub fn figure_centroid(figure: &ConstellationFigure) -> Option<EquatorialPosition> {
    let count = figure.vertex_count();
    if count == 0 {
        return None;
    }
    let (ra_sum, dec_sum) = figure
        .segments
        .iter()
        .flatten()
        .fold((0.0, 0.0), |(ra, dec), v| (ra + v.ra_deg(), dec + v.dec_deg()));
    Some(EquatorialPosition::new(ra_sum / count as f64, dec_sum / count as f64))
}

/// Project one figure. Returns `None` when no segment survives culling.
pub fn project_figure(
    figure: &ConstellationFigure,
    frame: &SiderealFrame,
    force_all_segments: bool,
) -> SkyResult<Option<ConstellationResult>> {
    let mut lines = Vec::with_capacity(figure.segments.len());
    for segment in figure.segments.iter().filter(|s| !s.is_empty()) {
        let projected = transform_batch(segment, frame)?;
        if force_all_segments || projected.iter().any(|p| p.is_above_horizon()) {
            lines.push(projected.into_iter().map(LinePoint::from).collect::<Vec<_>>());
        }
    }

    if lines.is_empty() {
        return Ok(None);
    }
    let Some(centroid) = figure_centroid(figure) else {
        return Ok(None);
    };

    Ok(Some(ConstellationResult {
        id: figure.id.clone(),
        name: figure.name.clone(),
        centroid: equatorial_to_horizontal(&centroid, frame)?.into(),
        lines,
    }))
}

/// Every constellation with at least one surviving segment.
///
/// Segments with no vertex above the horizon are culled unless
/// `force_all_segments` is set.
pub async fn get_constellations(
    cache: &FigureCache,
    frame: &SiderealFrame,
    force_all_segments: bool,
) -> SkyResult<Vec<ConstellationResult>> {
    let figures = cache.figures().await?;
    let mut results = Vec::with_capacity(figures.len());
    for figure in figures.iter() {
        if let Some(result) = project_figure(figure, frame, force_all_segments)? {
            results.push(result);
        }
    }
    debug!(
        "{} of {} constellations have lines to draw",
        results.len(),
        figures.len()
    );
    Ok(results)
}
