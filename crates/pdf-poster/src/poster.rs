//! The two-stage poster pipeline: tile the input, fit the tiled document to
//! the media size, then write the finished document once.

use crate::fit::fit_to_media_size;
use crate::geometry::{default_media, pdf_dimensions, resolve_page_dim};
use crate::io::{load_pdf, save_pdf};
use crate::margin::compute_margin;
use crate::options::PosterOptions;
use crate::tile::tile;
use crate::types::*;
use log::info;
use lopdf::Document;

/// Resolved sizes for a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterGeometry {
    pub input: Dimension,
    pub orientation: Orientation,
    pub poster: Dimension,
    pub media: Dimension,
    pub margin: f64,
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PosterSummary {
    pub geometry: PosterGeometry,
    pub tile: TileReport,
    pub fit: FitReport,
}

/// Resolve input, poster and media sizes and the margin for `source`.
pub fn resolve_geometry(source: &Document, options: &PosterOptions) -> Result<PosterGeometry> {
    let (input, orientation) = pdf_dimensions(source)?;

    let poster = resolve_page_dim(input, orientation, options.poster.as_deref())?;
    let media_default = default_media(&options.default_media, orientation)?;
    let media = resolve_page_dim(media_default, orientation, options.media.as_deref())?;
    let margin = compute_margin(media, options.cut_percent, options.cut_margin.as_deref())?;

    info!(
        "Input {:.2} x {:.2} pt, poster {:.2} x {:.2} pt, media {:.2} x {:.2} pt, margin {:.2} pt",
        input.width, input.height, poster.width, poster.height, media.width, media.height, margin
    );

    Ok(PosterGeometry {
        input,
        orientation,
        poster,
        media,
        margin,
    })
}

/// Turn `options.input_file` into a tiled, media-sized `options.output_file`.
pub async fn make_poster(options: &PosterOptions) -> Result<PosterSummary> {
    options.validate()?;

    let source = load_pdf(&options.input_file).await?;
    let opts = options.clone();
    let (fitted, geometry, tile_report, fit_report) = tokio::task::spawn_blocking(move || {
        let geometry = resolve_geometry(&source, &opts)?;
        let (tiled, tile_report) = tile(
            &source,
            geometry.input,
            geometry.poster,
            geometry.media,
            geometry.margin,
        )?;
        let (fitted, fit_report) = fit_to_media_size(tiled, geometry.media)?;
        Ok::<_, PosterError>((fitted, geometry, tile_report, fit_report))
    })
    .await??;

    save_pdf(fitted, &options.output_file).await?;

    Ok(PosterSummary {
        geometry,
        tile: tile_report,
        fit: fit_report,
    })
}
