//! Page geometry analysis
//!
//! Answers "how many pages", "what size are they" and "are they consistent"
//! for paginated documents.
//!
//! - `convert`: points to mm/inches, orientation
//! - `paper`: standard paper size recognition
//! - `uniformity`: tolerance-based size clustering
//! - `summary`: presentation-oriented summary
//! - `analyzer`: the four entry points over any `DocumentSource`
//! - `pdf` / `text` / `xlsx`: concrete sources (lopdf, character and row
//!   heuristics)

pub mod analyzer;
pub mod command;
pub mod convert;
pub mod detect;
pub mod error;
pub mod estimate;
pub mod paper;
pub mod pdf;
pub mod source;
pub mod summary;
pub mod text;
pub mod uniformity;
pub mod xlsx;

pub use analyzer::{AnalyzerConfig, FallbackPolicy, PageAnalyzer};
pub use command::{execute, AnalysisCommand, ProcessMetrics, ProcessResult};
pub use convert::{Orientation, PageDimensions, PageMeasurement};
pub use detect::{detect_format, open_document, open_document_as, DocumentFormat};
pub use error::{PageSizeError, Result, Stage};
pub use estimate::EstimateOptions;
pub use paper::{identify_paper_size, PaperSize};
pub use pdf::{PdfOptions, PdfSource};
pub use source::{DocumentSource, StaticSource};
pub use summary::{summarize, Summary, UniqueSizeSummary};
pub use text::TextSource;
pub use uniformity::{check_uniformity, SizeCluster, UniformityResult, DEFAULT_TOLERANCE_PT};
pub use xlsx::XlsxSource;

/// Open a document and count its pages
pub fn count_pages(bytes: &[u8], filename: Option<&str>, config: &AnalyzerConfig) -> Result<u32> {
    let source = open_document(bytes, filename, config).map_err(|e| e.during(Stage::Counting))?;
    PageAnalyzer::new(source, config.clone()).count_pages()
}

/// Open a document and summarize its page sizes
pub fn get_summary(
    bytes: &[u8],
    filename: Option<&str>,
    config: &AnalyzerConfig,
) -> Result<Summary> {
    let source = open_document(bytes, filename, config).map_err(|e| e.during(Stage::Counting))?;
    PageAnalyzer::new(source, config.clone()).get_summary()
}
