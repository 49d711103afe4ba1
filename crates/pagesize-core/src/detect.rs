//! Input format detection

use crate::analyzer::AnalyzerConfig;
use crate::error::{PageSizeError, Result};
use crate::pdf::PdfSource;
use crate::source::DocumentSource;
use crate::text::TextSource;
use crate::xlsx::XlsxSource;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Text,
    Markdown,
    Xlsx,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => f.write_str("pdf"),
            DocumentFormat::Text => f.write_str("text"),
            DocumentFormat::Markdown => f.write_str("markdown"),
            DocumentFormat::Xlsx => f.write_str("xlsx"),
        }
    }
}

/// Detect format from the filename extension, then from content.
///
/// Content sniffing recognizes the `%PDF` header, treats any ZIP container
/// (`PK`) as a workbook, and otherwise accepts input made only of ASCII
/// 0x20..=0x7f plus tab, CR and LF as text.
pub fn detect_format(filename: Option<&str>, bytes: &[u8]) -> Option<DocumentFormat> {
    if let Some(name) = filename {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            return Some(DocumentFormat::Pdf);
        }
        if lower.ends_with(".md") || lower.ends_with(".markdown") {
            return Some(DocumentFormat::Markdown);
        }
        if lower.ends_with(".txt") {
            return Some(DocumentFormat::Text);
        }
        if lower.ends_with(".xlsx") || lower.ends_with(".xlsm") {
            return Some(DocumentFormat::Xlsx);
        }
    }

    if bytes.starts_with(b"%PDF") {
        return Some(DocumentFormat::Pdf);
    }

    // docx and other ZIP containers land here too and fail to parse
    if bytes.starts_with(b"PK") {
        return Some(DocumentFormat::Xlsx);
    }

    if bytes
        .iter()
        .all(|b| matches!(*b, b'\t' | b'\n' | b'\r' | 0x20..=0x7f))
    {
        return Some(DocumentFormat::Text);
    }

    None
}

/// Detect the format and open a matching source
pub fn open_document(
    bytes: &[u8],
    filename: Option<&str>,
    config: &AnalyzerConfig,
) -> Result<Box<dyn DocumentSource>> {
    let format = detect_format(filename, bytes).ok_or_else(|| {
        PageSizeError::UnsupportedFormat(filename.unwrap_or("<unnamed input>").to_string())
    })?;

    tracing::debug!("Detected {} input ({} bytes)", format, bytes.len());

    open_document_as(format, bytes, config)
}

/// Open a source for an already-known format
pub fn open_document_as(
    format: DocumentFormat,
    bytes: &[u8],
    config: &AnalyzerConfig,
) -> Result<Box<dyn DocumentSource>> {
    let source: Box<dyn DocumentSource> = match format {
        DocumentFormat::Pdf => Box::new(PdfSource::load(bytes, &config.pdf)?),
        DocumentFormat::Text => Box::new(TextSource::new(bytes, &config.estimate)?),
        DocumentFormat::Markdown => Box::new(TextSource::markdown(bytes, &config.estimate)?),
        DocumentFormat::Xlsx => Box::new(XlsxSource::new(bytes, &config.estimate)?),
    };

    Ok(source)
}
