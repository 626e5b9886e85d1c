use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("Unrecognized unit in length: {0:?}")]
    UnrecognizedUnit(String),
    #[error("Invalid length: {0:?}")]
    InvalidLength(String),
    #[error("Unknown paper name: {0:?}")]
    UnknownPaperName(String),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Document has no pages")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// Round to two decimal digits, half away from zero.
///
/// Every scale factor, page dimension and margin goes through this before
/// it is used, so output sizes are reproducible to the hundredth of a point.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ratio of two lengths rounded to two decimals
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    round2(numerator / denominator)
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width >= height
    Landscape,
}

impl Orientation {
    /// Orientation of a `width` × `height` rectangle. Square counts as landscape.
    pub fn of(width: f64, height: f64) -> Self {
        if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// A width/height pair in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width, self.height)
    }

    /// Swap width and height if needed so the result has `orientation`
    pub fn rotated_to(self, orientation: Orientation) -> Self {
        if self.orientation() == orientation || self.width == self.height {
            self
        } else {
            Self::new(self.height, self.width)
        }
    }

    /// Both sides rounded to two decimals
    pub fn rounded(self) -> Self {
        Self::new(round2(self.width), round2(self.height))
    }

    /// Fail with `InvalidGeometry` unless both sides are finite and positive
    pub fn validate(&self, what: &str) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(PosterError::InvalidGeometry(format!(
                "{} must have positive width and height, got {} x {}",
                what, self.width, self.height
            )))
        }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (bottom edge)
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from lower-left and upper-right corners
    pub fn from_corners(llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        Self::new(llx, lly, urx - llx, ury - lly)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    /// Whether the interiors of two rectangles intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }
}

/// Outcome of the tiling stage
#[derive(Debug, Clone, PartialEq)]
pub struct TileReport {
    pub columns: usize,
    pub rows: usize,
    pub total_pages: usize,
    /// Scale applied to the input content before cropping
    pub content_scale: f64,
    pub margin: f64,
    /// Size of each tiled page before the fit pass
    pub page_size: Dimension,
}

/// Outcome of the fit pass
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub scale: f64,
    pub pages: usize,
    pub before: Dimension,
    pub after: Dimension,
}
