//! Page size uniformity check
//!
//! Groups pages into clusters of "same size within tolerance" in a single
//! ordered pass. A cluster is represented by its first page; later members
//! never move the representative, so results can depend on input order when
//! tolerance bands chain (100, 100.4, 100.8 with tolerance 0.5).

use crate::convert::{Orientation, PageDimensions};
use serde::Serialize;

/// Default per-axis tolerance in points
pub const DEFAULT_TOLERANCE_PT: f64 = 0.5;

/// Pages sharing one size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeCluster {
    pub width_pt: f64,
    pub height_pt: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub width_inches: f64,
    pub height_inches: f64,
    pub orientation: Orientation,
    /// Member page numbers, in input order
    pub page_numbers: Vec<u32>,
}

impl SizeCluster {
    fn seeded_by(page: &PageDimensions) -> Self {
        Self {
            width_pt: page.width_pt,
            height_pt: page.height_pt,
            width_mm: page.width_mm,
            height_mm: page.height_mm,
            width_inches: page.width_inches,
            height_inches: page.height_inches,
            orientation: page.orientation,
            page_numbers: vec![page.page_number],
        }
    }

    fn accepts(&self, page: &PageDimensions, tolerance: f64) -> bool {
        (self.width_pt - page.width_pt).abs() < tolerance
            && (self.height_pt - page.height_pt).abs() < tolerance
    }

    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniformityResult {
    pub is_uniform: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_size: Option<SizeCluster>,
    /// Every cluster, in creation order
    pub unique_sizes: Vec<SizeCluster>,
}

/// Cluster pages by size.
///
/// An empty input is vacuously uniform: `is_uniform` is true, there is no
/// common size and `unique_sizes` is empty.
pub fn check_uniformity(pages: &[PageDimensions], tolerance: f64) -> UniformityResult {
    let mut clusters: Vec<SizeCluster> = Vec::new();

    for page in pages {
        match clusters.iter_mut().find(|c| c.accepts(page, tolerance)) {
            Some(cluster) => cluster.page_numbers.push(page.page_number),
            None => {
                tracing::debug!(
                    "New size cluster {} x {} pt at page {}",
                    page.width_pt,
                    page.height_pt,
                    page.page_number
                );
                clusters.push(SizeCluster::seeded_by(page));
            }
        }
    }

    let is_uniform = clusters.len() <= 1;
    let common_size = if clusters.len() == 1 {
        clusters.first().cloned()
    } else {
        None
    };

    UniformityResult {
        is_uniform,
        common_size,
        unique_sizes: clusters,
    }
}
