//! Human-oriented summary of a document's page sizes

use crate::convert::Orientation;
use crate::paper::identify_paper_size;
use crate::uniformity::{SizeCluster, UniformityResult};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub page_count: u32,
    pub has_uniform_pages: bool,
    /// e.g. "210 × 297 mm"; set only when pages are uniform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_size_inches: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<String>,
    /// Per-size breakdown; set only when pages are not uniform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_sizes: Option<Vec<UniqueSizeSummary>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueSizeSummary {
    pub size: String,
    pub size_inches: String,
    pub orientation: Orientation,
    pub page_count: usize,
    pub pages: Vec<u32>,
}

impl From<&SizeCluster> for UniqueSizeSummary {
    fn from(cluster: &SizeCluster) -> Self {
        Self {
            size: format_mm(cluster),
            size_inches: format_inches(cluster),
            orientation: cluster.orientation,
            page_count: cluster.page_count(),
            pages: cluster.page_numbers.clone(),
        }
    }
}

/// Compose the summary for a clustered document
pub fn summarize(page_count: u32, uniformity: &UniformityResult) -> Summary {
    let mut summary = Summary {
        page_count,
        has_uniform_pages: uniformity.is_uniform,
        common_size: None,
        common_size_inches: None,
        orientation: None,
        paper_size: None,
        unique_sizes: None,
    };

    if uniformity.is_uniform {
        if let Some(common) = &uniformity.common_size {
            summary.common_size = Some(format_mm(common));
            summary.common_size_inches = Some(format_inches(common));
            summary.orientation = Some(common.orientation);
            summary.paper_size = identify_paper_size(common.width_mm, common.height_mm)
                .map(|paper| paper.label().to_string());
        }
    } else {
        summary.unique_sizes = Some(
            uniformity
                .unique_sizes
                .iter()
                .map(UniqueSizeSummary::from)
                .collect(),
        );
    }

    summary
}

fn format_mm(cluster: &SizeCluster) -> String {
    format!("{} × {} mm", cluster.width_mm, cluster.height_mm)
}

fn format_inches(cluster: &SizeCluster) -> String {
    format!("{} × {} inches", cluster.width_inches, cluster.height_inches)
}
