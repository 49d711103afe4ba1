//! Page estimation for plain text and markdown
//!
//! Page count is a characters per page heuristic. Markdown is counted as
//! plain text; images and embedded content are not considered.

use crate::error::{PageSizeError, Result};
use crate::estimate::EstimateOptions;
use crate::source::DocumentSource;

#[derive(Debug, Clone)]
pub struct TextSource {
    page_count: u32,
    page_size_pt: (f64, f64),
    notes: Vec<String>,
}

impl TextSource {
    pub fn new(bytes: &[u8], options: &EstimateOptions) -> Result<Self> {
        if options.chars_per_page == 0 {
            return Err(PageSizeError::InvalidDimension(
                "chars_per_page must be > 0".into(),
            ));
        }

        let text = std::str::from_utf8(bytes)
            .map_err(|e| PageSizeError::ParseError(format!("Text not valid UTF-8: {}", e)))?;

        let chars = text.chars().count();
        let page_count = chars.div_ceil(options.chars_per_page) as u32;

        tracing::debug!(
            "Text estimate: {} chars, {} per page, {} pages",
            chars,
            options.chars_per_page,
            page_count
        );

        Ok(Self {
            page_count,
            page_size_pt: options.paper_pt(),
            notes: vec![format!(
                "chars: {}, chars_per_page: {}",
                chars, options.chars_per_page
            )],
        })
    }

    /// Markdown counted as text, with a note saying so
    pub fn markdown(bytes: &[u8], options: &EstimateOptions) -> Result<Self> {
        let mut source = Self::new(bytes, options)?;
        source
            .notes
            .push("Markdown parsed as text; images/embedded content not considered.".into());
        Ok(source)
    }
}

impl DocumentSource for TextSource {
    fn page_count(&self) -> Result<u32> {
        Ok(self.page_count)
    }

    fn page_dimensions(&self, page_number: u32) -> Result<(f64, f64)> {
        if page_number == 0 || page_number > self.page_count {
            return Err(PageSizeError::PageOutOfRange {
                page: page_number,
                count: self.page_count,
            });
        }
        Ok(self.page_size_pt)
    }

    fn notes(&self) -> Vec<String> {
        self.notes.clone()
    }
}
