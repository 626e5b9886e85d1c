//! Poster tiling
//!
//! This module orchestrates the tiling stage:
//! 1. Compute the content scale and the grid
//! 2. Embed the poster page once as a form XObject
//! 3. Emit one margin-expanded page per grid cell, columns first
//! 4. Merge a margin overlay onto each page when the margin is non-zero

use crate::grid::{GridLayout, TileCell, create_grid_layout, enumerate_cells};
use crate::overlay::render_overlay;
use crate::render::{
    create_page, create_page_xobject, finish_document, first_page_id, merge_overlay,
    new_document, placement_command,
};
use crate::types::*;
use log::{debug, info};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Resource name of the embedded poster page
const POSTER_XOBJECT: &str = "Poster";

/// Resource name of the merged margin overlay
const OVERLAY_XOBJECT: &str = "Overlay";

/// Everything the tiling stage will do, computed without touching a document
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlan {
    pub grid: GridLayout,
    /// Scale applied to the input content to reach poster size
    pub content_scale: f64,
    pub margin: f64,
    pub media: Dimension,
    /// Size of each tile page: media plus one margin
    pub page_size: Dimension,
    /// Cells in output page order
    pub cells: Vec<TileCell>,
}

impl TilePlan {
    pub fn total_pages(&self) -> usize {
        self.cells.len()
    }

    pub fn report(&self) -> TileReport {
        TileReport {
            columns: self.grid.columns,
            rows: self.grid.rows,
            total_pages: self.total_pages(),
            content_scale: self.content_scale,
            margin: self.margin,
            page_size: self.page_size,
        }
    }
}

/// Uniform scale taking the input page to poster size: the smaller of the
/// two rounded side ratios.
pub fn content_scale(input: Dimension, poster: Dimension) -> f64 {
    let x_scale = ratio(poster.width, input.width);
    let y_scale = ratio(poster.height, input.height);
    x_scale.min(y_scale)
}

/// Plan the tiling of an `input`-sized page blown up to `poster` on `media`
/// paper with the given cut `margin`.
pub fn plan_tiles(
    input: Dimension,
    poster: Dimension,
    media: Dimension,
    margin: f64,
) -> Result<TilePlan> {
    input.validate("input page")?;
    if !margin.is_finite() || margin < 0.0 {
        return Err(PosterError::InvalidGeometry(format!(
            "margin must be non-negative, got {}",
            margin
        )));
    }

    let grid = create_grid_layout(poster, media)?;

    let scale = content_scale(input, poster);
    if scale <= 0.0 {
        return Err(PosterError::InvalidGeometry(format!(
            "poster {} x {} is too small for input {} x {}",
            poster.width, poster.height, input.width, input.height
        )));
    }

    Ok(TilePlan {
        grid,
        content_scale: scale,
        margin,
        media,
        page_size: Dimension::new(media.width + margin, media.height + margin),
        cells: enumerate_cells(&grid, media, margin),
    })
}

/// Split the first page of `source` into poster tiles.
pub fn tile(
    source: &Document,
    input: Dimension,
    poster: Dimension,
    media: Dimension,
    margin: f64,
) -> Result<(Document, TileReport)> {
    tile_with_progress(source, input, poster, media, margin, |_| {})
}

/// [`tile`], calling `on_page` after each page has been appended.
pub fn tile_with_progress(
    source: &Document,
    input: Dimension,
    poster: Dimension,
    media: Dimension,
    margin: f64,
    mut on_page: impl FnMut(&TileCell),
) -> Result<(Document, TileReport)> {
    let plan = plan_tiles(input, poster, media, margin)?;
    info!(
        "Total number of pages: {} ({} columns x {} rows)",
        plan.total_pages(),
        plan.grid.columns,
        plan.grid.rows
    );
    debug!(
        "Content scale {:.2}, margin {:.2} pt",
        plan.content_scale, plan.margin
    );

    let source_page_id = first_page_id(source)?;
    let (mut output, pages_tree_id) = new_document();

    // The poster page is embedded once; every tile page is its own object
    // that paints it through its own transformation and page box.
    let mut cache = HashMap::new();
    let poster_xobject = create_page_xobject(&mut output, source, source_page_id, &mut cache)?;

    let mut page_refs = Vec::with_capacity(plan.total_pages());
    for cell in &plan.cells {
        let page_id = render_tile(&mut output, pages_tree_id, poster_xobject, &plan, cell)?;
        page_refs.push(Object::Reference(page_id));
        debug!(
            "Created page {} for cell ({},{})",
            cell.page_number, cell.column, cell.row
        );
        on_page(cell);
    }

    finish_document(&mut output, pages_tree_id, page_refs);
    Ok((output, plan.report()))
}

/// Build the page for one cell
fn render_tile(
    output: &mut Document,
    pages_tree_id: ObjectId,
    poster_xobject: ObjectId,
    plan: &TilePlan,
    cell: &TileCell,
) -> Result<ObjectId> {
    let mut xobjects = Dictionary::new();
    xobjects.set(POSTER_XOBJECT, Object::Reference(poster_xobject));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let page_id = create_page(
        output,
        pages_tree_id,
        &cell.media_box,
        placement_command(POSTER_XOBJECT, plan.content_scale),
        resources,
    );

    if plan.margin > 0.0 {
        let media_box = &cell.media_box;
        let overlay = render_overlay(
            plan.page_size.width,
            plan.page_size.height,
            (media_box.x, media_box.y),
            (media_box.right(), media_box.top()),
            plan.margin,
            cell.column,
            cell.row,
        )?;
        merge_overlay(output, page_id, &overlay, OVERLAY_XOBJECT)?;
    }

    Ok(page_id)
}
