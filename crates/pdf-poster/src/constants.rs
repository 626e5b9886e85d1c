//! Shared constants for poster tiling
//!
//! This module centralizes magic numbers and constants used throughout
//! the tiling and fitting process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = POINTS_PER_INCH / MM_PER_INCH; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Defaults
// =============================================================================

/// Media paper used when none is given
pub const DEFAULT_MEDIA: &str = "a4";

/// Cut margin as a percentage of the media width
pub const DEFAULT_CUT_PERCENT: f64 = 5.0;

// =============================================================================
// Grid
// =============================================================================

/// Largest number of tile pages a single poster may produce
pub const MAX_TILE_PAGES: usize = 10_000;

// =============================================================================
// Margin Overlay
// =============================================================================

/// Base font for the grid label
pub const OVERLAY_FONT: &str = "Times-Roman";

/// Font size of the grid label (points)
pub const OVERLAY_FONT_SIZE: f64 = 15.0;

/// Horizontal offset of the label from the left guide (points)
pub const OVERLAY_LABEL_X_OFFSET: f64 = 10.0;

/// Dash length of the guide lines (points)
pub const OVERLAY_DASH_ON: f64 = 5.0;

/// Gap between guide line dashes (points)
pub const OVERLAY_DASH_OFF: f64 = 7.0;

/// Line width of the guide lines (points)
pub const OVERLAY_LINE_WIDTH: f64 = 0.25;

/// Gray level used for guides and label (same value for R, G and B)
pub const OVERLAY_GRAY: f64 = 0.68;

// =============================================================================
// Files
// =============================================================================

/// Attempts at creating a uniquely named temporary file before giving up
pub const TEMP_FILE_ATTEMPTS: usize = 3;
