//! Standard paper size recognition

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-axis match tolerance in millimeters
pub const PAPER_MATCH_TOLERANCE_MM: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Ledger,
}

/// Lookup table. Order decides ties: the first matching entry wins.
pub const STANDARD_PAPER_SIZES: [PaperSize; 7] = [
    PaperSize::A3,
    PaperSize::A4,
    PaperSize::A5,
    PaperSize::Letter,
    PaperSize::Legal,
    PaperSize::Tabloid,
    PaperSize::Ledger,
];

impl PaperSize {
    pub fn label(&self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Tabloid => "Tabloid",
            PaperSize::Ledger => "Ledger",
        }
    }

    /// Reference (width, height) in millimeters
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Ledger => (431.8, 279.4),
        }
    }

    /// Parse a label such as "a4" or "LETTER"
    pub fn from_label(label: &str) -> Option<Self> {
        STANDARD_PAPER_SIZES
            .iter()
            .copied()
            .find(|size| size.label().eq_ignore_ascii_case(label.trim()))
    }

    fn matches(&self, width_mm: f64, height_mm: f64) -> bool {
        let (ref_w, ref_h) = self.dimensions_mm();
        let near = |a: f64, b: f64| (a - b).abs() < PAPER_MATCH_TOLERANCE_MM;

        (near(width_mm, ref_w) && near(height_mm, ref_h))
            || (near(width_mm, ref_h) && near(height_mm, ref_w))
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identify a standard paper size from millimeter dimensions.
///
/// Both axis orderings are tried for every entry, so a landscape A4 page is
/// still "A4". Returns `None` when nothing is within tolerance.
pub fn identify_paper_size(width_mm: f64, height_mm: f64) -> Option<PaperSize> {
    STANDARD_PAPER_SIZES
        .iter()
        .copied()
        .find(|size| size.matches(width_mm, height_mm))
}
