//! Post-fit resizing
//!
//! Tiled pages are one margin larger than the media in each direction. This
//! pass scales the whole document uniformly so its pages come back to the
//! media size, and it runs on the already tiled document rather than on the
//! input.

use crate::geometry::pdf_dimensions;
use crate::io::{read_pdf, write_pdf_atomic};
use crate::render::{scale_page_boxes, wrap_content};
use crate::types::*;
use log::{debug, info};
use lopdf::{Document, ObjectId};
use std::path::Path;

/// Scale that brings a `current`-sized page within `media`: the smaller of
/// the two rounded side ratios.
pub fn fit_scale(current: Dimension, media: Dimension) -> f64 {
    let x_scale = ratio(media.width, current.width);
    let y_scale = ratio(media.height, current.height);
    x_scale.min(y_scale)
}

/// Scale every page of `doc` so its first page fits `media`.
///
/// A scale of exactly 1.00 leaves the document as it is, so fitting an
/// already fitted document changes nothing.
pub fn fit_to_media_size(mut doc: Document, media: Dimension) -> Result<(Document, FitReport)> {
    media.validate("media")?;
    let (before, _) = pdf_dimensions(&doc)?;
    before.validate("document page")?;

    let scale = fit_scale(before, media);
    if scale <= 0.0 {
        return Err(PosterError::InvalidGeometry(format!(
            "cannot fit {} x {} pages onto {} x {} media",
            before.width, before.height, media.width, media.height
        )));
    }

    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    info!(
        "Resizing {} page(s) by {:.2} to fit {:.2} x {:.2} pt",
        page_ids.len(),
        scale,
        media.width,
        media.height
    );

    if scale != 1.0 {
        let prefix = format!("q {} 0 0 {} 0 0 cm", scale, scale);
        for &page_id in &page_ids {
            wrap_content(&mut doc, page_id, &prefix, "Q\n")?;
            scale_page_boxes(&mut doc, page_id, scale)?;
        }
        let pruned = doc.prune_objects();
        debug!("Pruned {} unreferenced objects", pruned.len());
    } else {
        debug!("Document already fits, leaving pages untouched");
    }

    let (after, _) = pdf_dimensions(&doc)?;
    Ok((
        doc,
        FitReport {
            scale,
            pages: page_ids.len(),
            before,
            after,
        },
    ))
}

/// Fit the PDF at `path` to `media` and replace it in place.
///
/// The result is written to a uniquely named file next to `path` which then
/// replaces the input file.
pub fn fit_file_to_media_size(path: impl AsRef<Path>, media: Dimension) -> Result<FitReport> {
    let path = path.as_ref();
    let doc = read_pdf(path)?;
    let (mut doc, report) = fit_to_media_size(doc, media)?;
    write_pdf_atomic(&mut doc, path)?;
    Ok(report)
}
