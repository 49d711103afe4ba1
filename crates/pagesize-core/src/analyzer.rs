//! Page geometry analysis over a document source
//!
//! `PageAnalyzer` exposes the four entry points callers use: page count,
//! per-page dimensions, uniformity and summary. Every result is computed
//! fresh from the source; nothing is cached between calls.

use crate::convert::{page_dimensions, PageDimensions, PageMeasurement};
use crate::error::{PageSizeError, Result, Stage};
use crate::estimate::EstimateOptions;
use crate::pdf::PdfOptions;
use crate::source::DocumentSource;
use crate::summary::{summarize, Summary};
use crate::uniformity::{self, UniformityResult, DEFAULT_TOLERANCE_PT};
use serde::{Deserialize, Serialize};

/// A4 in whole points, used when a page's geometry cannot be read
pub const DEFAULT_FALLBACK_SIZE_PT: (f64, f64) = (595.0, 842.0);

/// What to do when a source cannot report a page's size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Fail the whole analysis
    Propagate,
    /// Use a fixed size for that page and keep going
    Substitute { width_pt: f64, height_pt: f64 },
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Substitute {
            width_pt: DEFAULT_FALLBACK_SIZE_PT.0,
            height_pt: DEFAULT_FALLBACK_SIZE_PT.1,
        }
    }
}

/// Per-session analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Per-axis clustering tolerance in points
    pub tolerance_pt: f64,
    pub fallback: FallbackPolicy,
    pub pdf: PdfOptions,
    /// Paginating text and spreadsheets
    pub estimate: EstimateOptions,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            tolerance_pt: DEFAULT_TOLERANCE_PT,
            fallback: FallbackPolicy::default(),
            pdf: PdfOptions::default(),
            estimate: EstimateOptions::default(),
        }
    }
}

pub struct PageAnalyzer<S> {
    source: S,
    config: AnalyzerConfig,
}

impl<S: DocumentSource> PageAnalyzer<S> {
    pub fn new(source: S, config: AnalyzerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Estimation remarks from the source, empty for measured formats
    pub fn notes(&self) -> Vec<String> {
        self.source.notes()
    }

    /// Number of pages. Only asks the source for its count, so this works
    /// even when page geometry is unreadable.
    pub fn count_pages(&self) -> Result<u32> {
        self.source
            .page_count()
            .map_err(|e| e.during(Stage::Counting))
    }

    /// Raw per-page sizes in page order, with the fallback policy applied
    pub fn measurements(&self) -> Result<Vec<PageMeasurement>> {
        let count = self.count_pages()?;
        let mut measurements = Vec::with_capacity(count as usize);

        for page_number in 1..=count {
            let (width_pt, height_pt) = match self.source.page_dimensions(page_number) {
                Ok(size) => size,
                Err(err) => match &self.config.fallback {
                    FallbackPolicy::Substitute {
                        width_pt,
                        height_pt,
                    } => {
                        tracing::warn!(
                            "Page {}: size unavailable ({}), using {} x {} pt",
                            page_number,
                            err,
                            width_pt,
                            height_pt
                        );
                        (*width_pt, *height_pt)
                    }
                    FallbackPolicy::Propagate => return Err(err.during(Stage::Sizing)),
                },
            };
            measurements.push(PageMeasurement::new(page_number, width_pt, height_pt));
        }

        Ok(measurements)
    }

    /// Derived dimensions for every page
    pub fn get_page_info(&self) -> Result<Vec<PageDimensions>> {
        let measurements = self.measurements()?;
        page_dimensions(&measurements).map_err(|e| e.during(Stage::Sizing))
    }

    /// Cluster pages by size with a caller-supplied tolerance in points
    pub fn check_uniformity(&self, tolerance: f64) -> Result<UniformityResult> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(PageSizeError::InvalidTolerance(tolerance).during(Stage::Clustering));
        }

        let pages = self.get_page_info()?;
        Ok(uniformity::check_uniformity(&pages, tolerance))
    }

    /// Summary using the configured tolerance
    pub fn get_summary(&self) -> Result<Summary> {
        let result = self.check_uniformity(self.config.tolerance_pt)?;
        let page_count: usize = result.unique_sizes.iter().map(|c| c.page_count()).sum();

        tracing::info!(
            "Analyzed {} pages in {} size group(s)",
            page_count,
            result.unique_sizes.len()
        );

        Ok(summarize(page_count as u32, &result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Orientation;
    use crate::source::StaticSource;
    use pretty_assertions::assert_eq;

    /// Source whose page count works but whose geometry never does
    struct SizelessSource(u32);

    impl DocumentSource for SizelessSource {
        fn page_count(&self) -> Result<u32> {
            Ok(self.0)
        }

        fn page_dimensions(&self, _page_number: u32) -> Result<(f64, f64)> {
            Err(PageSizeError::ParseError("no MediaBox".into()))
        }
    }

    struct BrokenSource;

    impl DocumentSource for BrokenSource {
        fn page_count(&self) -> Result<u32> {
            Err(PageSizeError::ParseError("missing trailer".into()))
        }

        fn page_dimensions(&self, _page_number: u32) -> Result<(f64, f64)> {
            Err(PageSizeError::ParseError("missing trailer".into()))
        }
    }

    fn propagating() -> AnalyzerConfig {
        AnalyzerConfig {
            fallback: FallbackPolicy::Propagate,
            ..Default::default()
        }
    }

    #[test]
    fn test_count_pages_ignores_sizing_failure() {
        let analyzer = PageAnalyzer::new(SizelessSource(7), propagating());
        assert_eq!(analyzer.count_pages().unwrap(), 7);

        let err = analyzer.get_page_info().unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Sizing));
        assert!(matches!(err.root(), PageSizeError::ParseError(_)));
    }

    #[test]
    fn test_substitute_fallback_fills_default_size() {
        let analyzer = PageAnalyzer::new(SizelessSource(3), AnalyzerConfig::default());
        let summary = analyzer.get_summary().unwrap();
        assert_eq!(summary.page_count, 3);
        assert!(summary.has_uniform_pages);
        assert_eq!(summary.paper_size.as_deref(), Some("A4"));
    }

    #[test]
    fn test_counting_failure_is_tagged() {
        let analyzer = PageAnalyzer::new(BrokenSource, AnalyzerConfig::default());
        let err = analyzer.get_summary().unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Counting));
    }

    #[test]
    fn test_invalid_dimension_is_not_substituted() {
        let source = StaticSource::new(vec![(612.0, 792.0), (0.0, 792.0)]);
        let analyzer = PageAnalyzer::new(source, AnalyzerConfig::default());
        let err = analyzer.get_page_info().unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Sizing));
        assert!(matches!(err.root(), PageSizeError::InvalidDimension(_)));
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        let analyzer = PageAnalyzer::new(StaticSource::default(), AnalyzerConfig::default());
        for tolerance in [-0.1, f64::NAN, f64::INFINITY] {
            let err = analyzer.check_uniformity(tolerance).unwrap_err();
            assert_eq!(err.stage(), Some(Stage::Clustering));
        }
    }

    #[test]
    fn test_caller_tolerance_is_used() {
        let source = StaticSource::new(vec![(100.0, 200.0), (102.0, 200.0)]);
        let analyzer = PageAnalyzer::new(source, AnalyzerConfig::default());
        assert!(!analyzer.check_uniformity(0.5).unwrap().is_uniform);
        assert!(analyzer.check_uniformity(3.0).unwrap().is_uniform);
    }

    #[test]
    fn test_page_info_in_order() {
        let source = StaticSource::new(vec![(595.0, 842.0), (842.0, 595.0)]);
        let analyzer = PageAnalyzer::new(source, AnalyzerConfig::default());
        let pages = analyzer.get_page_info().unwrap();
        let summary: Vec<(u32, Orientation)> =
            pages.iter().map(|p| (p.page_number, p.orientation)).collect();
        assert_eq!(
            summary,
            vec![(1, Orientation::Portrait), (2, Orientation::Landscape)]
        );
    }

    #[test]
    fn test_empty_document_summary() {
        let analyzer = PageAnalyzer::new(StaticSource::default(), AnalyzerConfig::default());
        let summary = analyzer.get_summary().unwrap();
        assert_eq!(summary.page_count, 0);
        assert!(summary.has_uniform_pages);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: AnalyzerConfig = serde_json::from_str(
            r#"{"tolerance_pt": 1.5, "fallback": {"mode": "propagate"}}"#,
        )
        .unwrap();
        assert_eq!(config.tolerance_pt, 1.5);
        assert_eq!(config.fallback, FallbackPolicy::Propagate);
        assert_eq!(config.estimate, EstimateOptions::default());
    }
}
