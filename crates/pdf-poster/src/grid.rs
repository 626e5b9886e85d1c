//! Grid layout calculation
//!
//! This module handles the geometric partition of the poster into tiles:
//! grid dimensions, per-cell crop boxes and the margin-expanded page boxes.

use crate::constants::MAX_TILE_PAGES;
use crate::types::*;

/// The rows × columns partition of a poster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of columns of tiles
    pub columns: usize,
    /// Number of rows of tiles
    pub rows: usize,
    /// Width of each cell in poster space (points)
    pub cell_width: f64,
    /// Height of each cell in poster space (points)
    pub cell_height: f64,
}

impl GridLayout {
    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }
}

/// One tile of the poster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCell {
    /// 1-based output page number
    pub page_number: usize,
    /// 1-based column index
    pub column: usize,
    /// 1-based row index, counted from the bottom
    pub row: usize,
    /// The part of the poster this tile shows
    pub crop_box: Rect,
    /// The tile's page box, grown by the margin on the left and bottom
    pub media_box: Rect,
}

// =============================================================================
// Grid Creation
// =============================================================================

/// Number of media lengths needed to cover a poster length: the ceiling of
/// their ratio. Ratios too large for `usize` saturate.
pub fn tile_count(poster_len: f64, media_len: f64) -> usize {
    (poster_len / media_len).ceil().max(0.0) as usize
}

/// Create the grid for a poster printed on media paper.
pub fn create_grid_layout(poster: Dimension, media: Dimension) -> Result<GridLayout> {
    poster.validate("poster")?;
    media.validate("media")?;

    let columns = tile_count(poster.width, media.width);
    let rows = tile_count(poster.height, media.height);
    if columns == 0 || rows == 0 {
        return Err(PosterError::InvalidGeometry(format!(
            "poster {} x {} yields an empty grid on media {} x {}",
            poster.width, poster.height, media.width, media.height
        )));
    }

    let cells = columns
        .checked_mul(rows)
        .filter(|&cells| cells <= MAX_TILE_PAGES);
    if cells.is_none() {
        return Err(PosterError::InvalidGeometry(format!(
            "poster {} x {} needs more than {} pages on media {} x {}",
            poster.width, poster.height, MAX_TILE_PAGES, media.width, media.height
        )));
    }

    Ok(GridLayout {
        columns,
        rows,
        cell_width: poster.width / columns as f64,
        cell_height: poster.height / rows as f64,
    })
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Crop box of the cell at 1-based (`column`, `row`). Index 0 is treated
/// as 1.
pub fn cell_crop_box(grid: &GridLayout, column: usize, row: usize) -> Rect {
    Rect::new(
        column.saturating_sub(1) as f64 * grid.cell_width,
        row.saturating_sub(1) as f64 * grid.cell_height,
        grid.cell_width,
        grid.cell_height,
    )
}

/// Page box of a tile: the crop box's lower-left corner moved out by the
/// margin, and the upper-right corner one media size from the crop corner.
pub fn cell_media_box(crop_box: &Rect, media: Dimension, margin: f64) -> Rect {
    Rect::from_corners(
        crop_box.x - margin,
        crop_box.y - margin,
        crop_box.x + media.width,
        crop_box.y + media.height,
    )
}

/// All cells in output order: columns outermost, rows innermost.
pub fn enumerate_cells(grid: &GridLayout, media: Dimension, margin: f64) -> Vec<TileCell> {
    let mut cells = Vec::with_capacity(grid.cell_count());
    for column in 1..=grid.columns {
        for row in 1..=grid.rows {
            let crop_box = cell_crop_box(grid, column, row);
            cells.push(TileCell {
                page_number: cells.len() + 1,
                column,
                row,
                crop_box,
                media_box: cell_media_box(&crop_box, media, margin),
            });
        }
    }
    cells
}
