//! Page estimation for Excel workbooks
//!
//! Each sheet prints as ceil(rows / rows_per_page) pages, where rows runs up
//! to the last row holding a non-empty cell. Sheets are concatenated in
//! workbook order and every page gets the configured paper size.

use crate::error::{PageSizeError, Result};
use crate::estimate::EstimateOptions;
use crate::source::DocumentSource;
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

/// Pages contributed by one worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEstimate {
    pub name: String,
    pub rows: usize,
    pub pages: u32,
}

#[derive(Debug, Clone)]
pub struct XlsxSource {
    sheets: Vec<SheetEstimate>,
    page_count: u32,
    page_size_pt: (f64, f64),
    notes: Vec<String>,
}

impl XlsxSource {
    pub fn new(bytes: &[u8], options: &EstimateOptions) -> Result<Self> {
        if options.rows_per_page == 0 {
            return Err(PageSizeError::InvalidDimension(
                "rows_per_page must be > 0".into(),
            ));
        }

        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| PageSizeError::ParseError(format!("XLSX: {}", e)))?;

        let mut sheets = Vec::new();
        let mut notes = Vec::new();

        for name in workbook.sheet_names().to_vec() {
            let range = match workbook.worksheet_range(&name) {
                Ok(range) => range,
                Err(e) => {
                    tracing::warn!("Skipping sheet '{}': {}", name, e);
                    notes.push(format!("Could not read sheet '{}'", name));
                    continue;
                }
            };

            let rows = range
                .rows()
                .enumerate()
                .filter(|(_, row)| row.iter().any(|cell| !matches!(cell, Data::Empty)))
                .map(|(index, _)| index + 1)
                .last()
                .unwrap_or(0);
            let pages = rows.div_ceil(options.rows_per_page) as u32;

            if pages > 0 {
                notes.push(format!(
                    "Sheet '{}' rows: {}, pages: {}",
                    name, rows, pages
                ));
            } else {
                notes.push(format!("Sheet '{}' empty; 0 pages", name));
            }
            sheets.push(SheetEstimate { name, rows, pages });
        }

        let page_count: u32 = sheets.iter().map(|s| s.pages).sum();
        if page_count == 0 {
            notes.push("Workbook appears empty or unreadable; returning 0 pages.".into());
        }

        tracing::debug!(
            "Workbook estimate: {} sheet(s), {} rows per page, {} pages",
            sheets.len(),
            options.rows_per_page,
            page_count
        );

        Ok(Self {
            sheets,
            page_count,
            page_size_pt: options.paper_pt(),
            notes,
        })
    }

    /// Per-sheet breakdown in workbook order
    pub fn sheets(&self) -> &[SheetEstimate] {
        &self.sheets
    }
}

impl DocumentSource for XlsxSource {
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
