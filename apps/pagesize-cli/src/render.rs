//! Plain text output

use pagesize_core::{PageDimensions, Summary, UniformityResult};
use std::fmt::Write;

pub fn count(pages: u32) -> String {
    format!("Pages: {}\n", pages)
}

pub fn page_info(pages: &[PageDimensions], detail_limit: usize) -> String {
    let mut out = format!("Pages: {}\n", pages.len());
    if pages.len() > detail_limit {
        let _ = writeln!(
            out,
            "(per-page listing skipped above {} pages; use --format json)",
            detail_limit
        );
        return out;
    }

    for page in pages {
        let _ = writeln!(
            out,
            "Page {}: {} × {} pt, {} × {} mm, {} × {} in, {}",
            page.page_number,
            page.width_pt,
            page.height_pt,
            page.width_mm,
            page.height_mm,
            page.width_inches,
            page.height_inches,
            page.orientation
        );
    }
    out
}

pub fn uniformity(result: &UniformityResult) -> String {
    let mut out = format!(
        "Uniform: {}\n",
        if result.is_uniform { "yes" } else { "no" }
    );
    for (i, cluster) in result.unique_sizes.iter().enumerate() {
        let _ = writeln!(
            out,
            "Size {}: {} × {} mm ({}), pages {}",
            i + 1,
            cluster.width_mm,
            cluster.height_mm,
            cluster.orientation,
            join_pages(&cluster.page_numbers)
        );
    }
    out
}

pub fn summary(summary: &Summary) -> String {
    let mut out = format!("Pages: {}\n", summary.page_count);

    if let Some(size) = &summary.common_size {
        let _ = writeln!(out, "Size: {}", size);
        if let Some(inches) = &summary.common_size_inches {
            let _ = writeln!(out, "      {}", inches);
        }
        if let Some(orientation) = summary.orientation {
            let _ = writeln!(out, "Orientation: {}", orientation);
        }
        let _ = writeln!(
            out,
            "Paper: {}",
            summary.paper_size.as_deref().unwrap_or("non-standard")
        );
    }

    if let Some(sizes) = &summary.unique_sizes {
        let _ = writeln!(out, "Mixed sizes: {}", sizes.len());
        for size in sizes {
            let _ = writeln!(
                out,
                "  {} ({}): {} page(s): {}",
                size.size,
                size.orientation,
                size.page_count,
                join_pages(&size.pages)
            );
        }
    }

    out
}

/// Estimation notes, one per line
pub fn notes(notes: &[String]) -> String {
    notes.iter().map(|note| format!("Note: {}\n", note)).collect()
}

fn join_pages(pages: &[u32]) -> String {
    pages
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesize_core::{check_uniformity, convert::page_dimensions, summarize, PageMeasurement};
    use pretty_assertions::assert_eq;

    fn pages(sizes: &[(f64, f64)]) -> Vec<PageDimensions> {
        let measurements: Vec<PageMeasurement> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| PageMeasurement::new(i as u32 + 1, w, h))
            .collect();
        page_dimensions(&measurements).unwrap()
    }

    #[test]
    fn test_uniform_summary_text() {
        let pages = pages(&[(612.0, 792.0); 2]);
        let text = summary(&summarize(2, &check_uniformity(&pages, 0.5)));
        assert_eq!(
            text,
            "Pages: 2\nSize: 215.9 × 279.4 mm\n      8.5 × 11 inches\nOrientation: portrait\nPaper: Letter\n"
        );
    }

    #[test]
    fn test_mixed_summary_text() {
        let pages = pages(&[(595.0, 842.0), (842.0, 595.0), (595.0, 842.0)]);
        let text = summary(&summarize(3, &check_uniformity(&pages, 0.5)));
        assert_eq!(
            text,
            "Pages: 3\nMixed sizes: 2\n  209.9 × 297.04 mm (portrait): 2 page(s): 1, 3\n  297.04 × 209.9 mm (landscape): 1 page(s): 2\n"
        );
    }

    #[test]
    fn test_page_info_respects_detail_limit() {
        let many = pages(&[(612.0, 792.0); 25]);
        let text = page_info(&many, 20);
        assert!(text.starts_with("Pages: 25\n"));
        assert!(!text.contains("Page 1:"));

        let few = pages(&[(612.0, 792.0)]);
        assert_eq!(
            page_info(&few, 20),
            "Pages: 1\nPage 1: 612 × 792 pt, 215.9 × 279.4 mm, 8.5 × 11 in, portrait\n"
        );
    }

    #[test]
    fn test_uniformity_text() {
        let result = check_uniformity(&pages(&[(100.0, 100.0)]), 0.5);
        assert_eq!(
            uniformity(&result),
            "Uniform: yes\nSize 1: 35.28 × 35.28 mm (square), pages 1\n"
        );
    }

    #[test]
    fn test_notes_text() {
        assert_eq!(notes(&[]), "");
        assert_eq!(
            notes(&["chars: 10, chars_per_page: 1800".to_string()]),
            "Note: chars: 10, chars_per_page: 1800\n"
        );
    }
}
