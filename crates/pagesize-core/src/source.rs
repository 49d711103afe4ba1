//! Document access contract
//!
//! The analysis engine never touches document bytes. A `DocumentSource`
//! reports how many pages a document has and the raw size of each page.

use crate::error::{PageSizeError, Result};

pub trait DocumentSource {
    /// Number of pages in the document
    fn page_count(&self) -> Result<u32>;

    /// Raw (width, height) in points of a page (1-indexed)
    fn page_dimensions(&self, page_number: u32) -> Result<(f64, f64)>;

    /// Remarks about how the page count was estimated
    fn notes(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn page_count(&self) -> Result<u32> {
        (**self).page_count()
    }

    fn page_dimensions(&self, page_number: u32) -> Result<(f64, f64)> {
        (**self).page_dimensions(page_number)
    }

    fn notes(&self) -> Vec<String> {
        (**self).notes()
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    fn page_count(&self) -> Result<u32> {
        (**self).page_count()
    }

    fn page_dimensions(&self, page_number: u32) -> Result<(f64, f64)> {
        (**self).page_dimensions(page_number)
    }

    fn notes(&self) -> Vec<String> {
        (**self).notes()
    }
}

/// Source backed by an already-decoded list of page sizes
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    sizes: Vec<(f64, f64)>,
}

impl StaticSource {
    pub fn new(sizes: Vec<(f64, f64)>) -> Self {
        Self { sizes }
    }
}

impl FromIterator<(f64, f64)> for StaticSource {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DocumentSource for StaticSource {
    fn page_count(&self) -> Result<u32> {
        Ok(self.sizes.len() as u32)
    }

    fn page_dimensions(&self, page_number: u32) -> Result<(f64, f64)> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.sizes.get(index as usize))
            .copied()
            .ok_or(PageSizeError::PageOutOfRange {
                page: page_number,
                count: self.sizes.len() as u32,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_is_one_indexed() {
        let source = StaticSource::new(vec![(612.0, 792.0), (842.0, 595.0)]);
        assert_eq!(source.page_count().unwrap(), 2);
        assert_eq!(source.page_dimensions(2).unwrap(), (842.0, 595.0));
    }

    #[test]
    fn test_static_source_out_of_range() {
        let source: StaticSource = std::iter::once((612.0, 792.0)).collect();
        assert!(matches!(
            source.page_dimensions(0),
            Err(PageSizeError::PageOutOfRange { page: 0, count: 1 })
        ));
        assert!(matches!(
            source.page_dimensions(2),
            Err(PageSizeError::PageOutOfRange { page: 2, count: 1 })
        ));
    }

    #[test]
    fn test_boxed_source_delegates() {
        let boxed: Box<dyn DocumentSource> = Box::new(StaticSource::new(vec![(1.0, 2.0)]));
        assert_eq!(boxed.page_count().unwrap(), 1);
        assert_eq!(boxed.page_dimensions(1).unwrap(), (1.0, 2.0));
        assert!(boxed.notes().is_empty());
    }
}
