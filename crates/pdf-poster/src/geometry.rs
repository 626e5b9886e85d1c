//! Page geometry resolution: input page size, poster size and media size

use crate::paper::paper_dimension;
use crate::render::{first_page_id, page_media_box};
use crate::types::*;
use crate::units::{looks_like_dimensions, parse_dimensions};
use lopdf::Document;

/// Size and orientation of the document's first page.
///
/// Width and height come from the (possibly inherited) MediaBox and are
/// rounded to two decimals.
pub fn pdf_dimensions(doc: &Document) -> Result<(Dimension, Orientation)> {
    let page_id = first_page_id(doc)?;
    let media_box = page_media_box(doc, page_id)?;

    let orientation = Orientation::of(media_box.width, media_box.height);
    Ok((media_box.dimension().rounded(), orientation))
}

/// Resolve a paper name or an explicit `"W U x H U"` size.
///
/// Named papers are rotated to `orientation`; explicit sizes are taken as
/// written. Both are rounded to two decimals like [`pdf_dimensions`], so
/// sizes that are exact multiples in their own unit stay exact in points.
pub fn resolve_paper_size(size: &str, orientation: Orientation) -> Result<Dimension> {
    let dim = if looks_like_dimensions(size) {
        parse_dimensions(size)?
    } else {
        paper_dimension(size)?.rotated_to(orientation)
    };
    Ok(dim.rounded())
}

/// `default` unless the user gave an override, which is resolved with
/// [`resolve_paper_size`].
pub fn resolve_page_dim(
    default: Dimension,
    orientation: Orientation,
    user_override: Option<&str>,
) -> Result<Dimension> {
    match user_override {
        None => Ok(default),
        Some(size) => resolve_paper_size(size, orientation),
    }
}

/// Canonical size of the default media paper, rotated to `orientation` and
/// rounded to two decimals
pub fn default_media(name: &str, orientation: Orientation) -> Result<Dimension> {
    Ok(paper_dimension(name)?.rotated_to(orientation).rounded())
}
