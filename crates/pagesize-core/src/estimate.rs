//! Settings for formats without intrinsic page geometry
//!
//! Text and spreadsheets are paginated by a heuristic and every page gets
//! the configured paper size.

use crate::convert::pt_from_mm;
use crate::paper::PaperSize;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHARS_PER_PAGE: usize = 1800;
pub const DEFAULT_ROWS_PER_PAGE: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateOptions {
    /// Unicode characters per printed page of text
    pub chars_per_page: usize,
    /// Non-empty spreadsheet rows per printed page
    pub rows_per_page: usize,
    /// Paper assumed for every page
    pub default_paper: PaperSize,
    /// Custom (width, height) in millimeters; overrides `default_paper`
    pub custom_paper_mm: Option<(f64, f64)>,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            chars_per_page: DEFAULT_CHARS_PER_PAGE,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            default_paper: PaperSize::A4,
            custom_paper_mm: None,
        }
    }
}

impl EstimateOptions {
    /// Paper size in millimeters after applying the custom override
    pub fn paper_mm(&self) -> (f64, f64) {
        self.custom_paper_mm
            .unwrap_or_else(|| self.default_paper.dimensions_mm())
    }

    /// Paper size in points
    pub fn paper_pt(&self) -> (f64, f64) {
        let (width_mm, height_mm) = self.paper_mm();
        (pt_from_mm(width_mm), pt_from_mm(height_mm))
    }
}
