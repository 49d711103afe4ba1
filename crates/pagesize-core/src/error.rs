use std::fmt;
use thiserror::Error;

/// Analysis stage in which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Asking the document for its page count
    Counting,
    /// Reading or converting per-page geometry
    Sizing,
    /// Grouping pages by size
    Clustering,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Counting => f.write_str("page counting"),
            Stage::Sizing => f.write_str("page sizing"),
            Stage::Clustering => f.write_str("size clustering"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PageSizeError {
    #[error("Failed to parse document: {0}")]
    ParseError(String),

    #[error("Invalid page dimension: {0}")]
    InvalidDimension(String),

    #[error("Invalid tolerance: {0} (must be finite and >= 0)")]
    InvalidTolerance(f64),

    #[error("Page {page} does not exist (document has {count} pages)")]
    PageOutOfRange { page: u32, count: u32 },

    #[error("Unsupported or unrecognized format: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<PageSizeError>,
    },
}

impl PageSizeError {
    /// Tag this error with the stage it surfaced in.
    ///
    /// Errors already carrying a stage are returned unchanged.
    pub fn during(self, stage: Stage) -> Self {
        match self {
            already @ PageSizeError::Stage { .. } => already,
            other => PageSizeError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage the error was tagged with, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PageSizeError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with any stage wrapper removed
    pub fn root(&self) -> &PageSizeError {
        match self {
            PageSizeError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, PageSizeError>;
