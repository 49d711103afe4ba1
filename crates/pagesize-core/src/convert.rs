//! Point to millimeter/inch conversion and orientation classification
//!
//! 1 point = 1/72 inch, 1 inch = 25.4 mm. Every derived value is rounded to
//! two decimal places once, here; later stages compare the rounded values.

use crate::error::{PageSizeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const POINTS_PER_INCH: f64 = 72.0;
pub const MM_PER_INCH: f64 = 25.4;

/// Absolute point difference under which a page counts as square.
/// Independent of the clustering tolerance.
pub const SQUARE_THRESHOLD_PT: f64 = 1.0;

/// Raw page size as reported by a document source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMeasurement {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Page width in points
    pub width_pt: f64,
    /// Page height in points
    pub height_pt: f64,
}

impl PageMeasurement {
    pub fn new(page_number: u32, width_pt: f64, height_pt: f64) -> Self {
        Self {
            page_number,
            width_pt,
            height_pt,
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
}

impl Orientation {
    /// Classify a width/height pair given in points.
    ///
    /// Any page wider than tall is landscape, so the square band only
    /// catches pages up to 1 pt taller than wide.
    pub fn classify(width_pt: f64, height_pt: f64) -> Self {
        if width_pt > height_pt {
            Orientation::Landscape
        } else if (width_pt - height_pt).abs() < SQUARE_THRESHOLD_PT {
            Orientation::Square
        } else {
            Orientation::Portrait
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::Square => "square",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived geometry for a single page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDimensions {
    pub page_number: u32,
    pub width_pt: f64,
    pub height_pt: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub width_inches: f64,
    pub height_inches: f64,
    pub orientation: Orientation,
}

impl PageDimensions {
    /// Derive dimensions for one page.
    ///
    /// Fails with `InvalidDimension` for page number 0 or for sizes that are
    /// not finite and strictly positive.
    pub fn from_measurement(measurement: &PageMeasurement) -> Result<Self> {
        let PageMeasurement {
            page_number,
            width_pt,
            height_pt,
        } = *measurement;

        if page_number == 0 {
            return Err(PageSizeError::InvalidDimension(
                "page numbers must be >= 1".into(),
            ));
        }
        validate_extent("width", page_number, width_pt)?;
        validate_extent("height", page_number, height_pt)?;

        let width_pt = round2(width_pt);
        let height_pt = round2(height_pt);

        Ok(Self {
            page_number,
            width_pt,
            height_pt,
            width_mm: round2(mm_from_pt(width_pt)),
            height_mm: round2(mm_from_pt(height_pt)),
            width_inches: round2(inches_from_pt(width_pt)),
            height_inches: round2(inches_from_pt(height_pt)),
            orientation: Orientation::classify(width_pt, height_pt),
        })
    }
}

fn validate_extent(axis: &str, page_number: u32, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PageSizeError::InvalidDimension(format!(
            "page {} has {} {} pt",
            page_number, axis, value
        )));
    }
    Ok(())
}

/// Derive dimensions for every page, in input order
pub fn page_dimensions(measurements: &[PageMeasurement]) -> Result<Vec<PageDimensions>> {
    measurements
        .iter()
        .map(PageDimensions::from_measurement)
        .collect()
}

#[inline]
pub fn mm_from_pt(pt: f64) -> f64 {
    pt / POINTS_PER_INCH * MM_PER_INCH
}

#[inline]
pub fn inches_from_pt(pt: f64) -> f64 {
    pt / POINTS_PER_INCH
}

#[inline]
pub fn pt_from_mm(mm: f64) -> f64 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}

/// Round to two decimal places, halves away from zero
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
