//! Named paper sizes
//!
//! Canonical sizes are stored in portrait orientation in the unit the
//! standard defines them in.

use crate::types::{Dimension, PosterError, Result};
use crate::units::Unit;

/// A named paper size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedPaper {
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
    pub unit: Unit,
}

impl NamedPaper {
    const fn mm(name: &'static str, width: f64, height: f64) -> Self {
        Self {
            name,
            width,
            height,
            unit: Unit::Millimeter,
        }
    }

    const fn inch(name: &'static str, width: f64, height: f64) -> Self {
        Self {
            name,
            width,
            height,
            unit: Unit::Inch,
        }
    }

    /// Portrait size in points
    pub fn dimension(&self) -> Dimension {
        Dimension::new(self.unit.to_points(self.width), self.unit.to_points(self.height))
    }

    /// Human readable size, e.g. `210mm x 297mm`
    pub fn describe(&self) -> String {
        let suffix = self.unit.suffix();
        format!("{}{} x {}{}", self.width, suffix, self.height, suffix)
    }
}

pub const PAPERS: &[NamedPaper] = &[
    NamedPaper::mm("a0", 841.0, 1189.0),
    NamedPaper::mm("a1", 594.0, 841.0),
    NamedPaper::mm("a2", 420.0, 594.0),
    NamedPaper::mm("a3", 297.0, 420.0),
    NamedPaper::mm("a4", 210.0, 297.0),
    NamedPaper::mm("a5", 148.0, 210.0),
    NamedPaper::mm("a6", 105.0, 148.0),
    NamedPaper::mm("a7", 74.0, 105.0),
    NamedPaper::mm("a8", 52.0, 74.0),
    NamedPaper::mm("a9", 37.0, 52.0),
    NamedPaper::mm("a10", 26.0, 37.0),
    NamedPaper::mm("b0", 1000.0, 1414.0),
    NamedPaper::mm("b1", 707.0, 1000.0),
    NamedPaper::mm("b2", 500.0, 707.0),
    NamedPaper::mm("b3", 353.0, 500.0),
    NamedPaper::mm("b4", 250.0, 353.0),
    NamedPaper::mm("b5", 176.0, 250.0),
    NamedPaper::mm("b6", 125.0, 176.0),
    NamedPaper::mm("b7", 88.0, 125.0),
    NamedPaper::mm("b8", 62.0, 88.0),
    NamedPaper::mm("b9", 44.0, 62.0),
    NamedPaper::mm("b10", 31.0, 44.0),
    NamedPaper::mm("c0", 917.0, 1297.0),
    NamedPaper::mm("c1", 648.0, 917.0),
    NamedPaper::mm("c2", 458.0, 648.0),
    NamedPaper::mm("c3", 324.0, 458.0),
    NamedPaper::mm("c4", 229.0, 324.0),
    NamedPaper::mm("c5", 162.0, 229.0),
    NamedPaper::mm("c6", 114.0, 162.0),
    NamedPaper::mm("c7", 81.0, 114.0),
    NamedPaper::mm("c8", 57.0, 81.0),
    NamedPaper::mm("c9", 40.0, 57.0),
    NamedPaper::mm("c10", 28.0, 40.0),
    NamedPaper::inch("letter", 8.5, 11.0),
    NamedPaper::inch("legal", 8.5, 14.0),
    NamedPaper::inch("half-letter", 5.5, 8.5),
    NamedPaper::inch("junior-legal", 5.0, 8.0),
    NamedPaper::inch("executive", 7.25, 10.5),
    NamedPaper::inch("tabloid", 11.0, 17.0),
    NamedPaper::inch("ledger", 11.0, 17.0),
    NamedPaper::inch("arch-a", 9.0, 12.0),
    NamedPaper::inch("arch-b", 12.0, 18.0),
    NamedPaper::inch("arch-c", 18.0, 24.0),
    NamedPaper::inch("arch-d", 24.0, 36.0),
    NamedPaper::inch("arch-e", 36.0, 48.0),
];

/// Look up a paper by name (case-insensitive)
pub fn find_paper(name: &str) -> Result<&'static NamedPaper> {
    let name = name.trim();
    PAPERS
        .iter()
        .find(|paper| paper.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| PosterError::UnknownPaperName(name.to_string()))
}

/// Portrait size of a named paper in points
pub fn paper_dimension(name: &str) -> Result<Dimension> {
    find_paper(name).map(NamedPaper::dimension)
}

/// All supported papers sorted by name
pub fn supported_papers() -> Vec<&'static NamedPaper> {
    let mut papers: Vec<_> = PAPERS.iter().collect();
    papers.sort_by_key(|paper| paper.name);
    papers
}
