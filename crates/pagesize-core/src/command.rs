//! JSON command envelope over the analyzer

use crate::analyzer::{AnalyzerConfig, PageAnalyzer};
use crate::detect::{detect_format, open_document_as, DocumentFormat};
use crate::error::{PageSizeError, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum AnalysisCommand {
    CountPages,
    PageInfo,
    Uniformity {
        /// Overrides the configured tolerance
        #[serde(default)]
        tolerance: Option<f64>,
    },
    Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub success: bool,
    /// Set whenever detection succeeded, even if analysis then failed
    pub detected_format: Option<DocumentFormat>,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    /// How estimated formats were paginated
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub metrics: Option<ProcessMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessMetrics {
    pub input_size_bytes: usize,
    pub page_count: u32,
    pub processing_time_ms: u64,
}

struct Outcome {
    data: serde_json::Value,
    page_count: u32,
    notes: Vec<String>,
}

/// Run one command against raw document bytes.
///
/// Failures are reported in the result, never returned as partial data.
pub fn execute(
    command: &AnalysisCommand,
    bytes: &[u8],
    filename: Option<&str>,
    config: &AnalyzerConfig,
) -> ProcessResult {
    let started = Instant::now();
    let detected_format = detect_format(filename, bytes);

    let outcome = match detected_format {
        Some(format) => run(command, format, bytes, config),
        None => Err(PageSizeError::UnsupportedFormat(
            filename.unwrap_or("<unnamed input>").to_string(),
        )),
    };

    match outcome {
        Ok(outcome) => ProcessResult {
            success: true,
            detected_format,
            data: Some(outcome.data),
            error: None,
            notes: outcome.notes,
            metrics: Some(ProcessMetrics {
                input_size_bytes: bytes.len(),
                page_count: outcome.page_count,
                processing_time_ms: started.elapsed().as_millis() as u64,
            }),
        },
        Err(err) => {
            tracing::warn!("Analysis failed: {}", err);
            ProcessResult {
                success: false,
                detected_format,
                data: None,
                error: Some(err.to_string()),
                notes: Vec::new(),
                metrics: None,
            }
        }
    }
}

fn run(
    command: &AnalysisCommand,
    format: DocumentFormat,
    bytes: &[u8],
    config: &AnalyzerConfig,
) -> Result<Outcome> {
    let source = open_document_as(format, bytes, config)?;
    let analyzer = PageAnalyzer::new(source, config.clone());
    let page_count = analyzer.count_pages()?;

    let data = match command {
        AnalysisCommand::CountPages => serde_json::json!({ "pageCount": page_count }),
        AnalysisCommand::PageInfo => to_value(&analyzer.get_page_info()?)?,
        AnalysisCommand::Uniformity { tolerance } => {
            let tolerance = tolerance.unwrap_or(config.tolerance_pt);
            to_value(&analyzer.check_uniformity(tolerance)?)?
        }
        AnalysisCommand::Summary => to_value(&analyzer.get_summary()?)?,
    };

    Ok(Outcome {
        data,
        page_count,
        notes: analyzer.notes(),
    })
}

fn to_value<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| PageSizeError::SerializationError(e.to_string()))
}
