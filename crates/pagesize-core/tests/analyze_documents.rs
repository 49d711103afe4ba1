//! End-to-end analysis of in-memory PDFs
//!
//! Run with: cargo test -p pagesize-core --test analyze_documents

use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};
use pagesize_core::{
    count_pages, get_summary, open_document, AnalyzerConfig, FallbackPolicy, Orientation,
    PageAnalyzer, PageSizeError, PdfOptions, Stage,
};
use pretty_assertions::assert_eq;

/// Create a PDF with one page per (width, height) in points.
/// `None` leaves the page without any box.
fn create_pdf(sizes: &[Option<(i64, i64)>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();

    for (i, size) in sizes.iter().enumerate() {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(72), Object::Integer(72)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i + 1).into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        if let Some((width, height)) = size {
            page.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(*width),
                    Object::Integer(*height),
                ]),
            );
        }
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(sizes.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

#[test]
fn letter_document_summary() {
    let pdf = create_pdf(&[Some((612, 792)); 5]);
    let summary = get_summary(&pdf, Some("contract.pdf"), &AnalyzerConfig::default()).unwrap();

    assert_eq!(summary.page_count, 5);
    assert!(summary.has_uniform_pages);
    assert_eq!(summary.paper_size.as_deref(), Some("Letter"));
    assert_eq!(summary.orientation, Some(Orientation::Portrait));
    assert_eq!(summary.common_size.as_deref(), Some("215.9 × 279.4 mm"));
    assert!(summary.unique_sizes.is_none());
}

#[test]
fn mixed_orientation_breakdown() {
    let pdf = create_pdf(&[Some((595, 842)), Some((595, 842)), Some((842, 595))]);
    let source = open_document(&pdf, None, &AnalyzerConfig::default()).unwrap();
    let analyzer = PageAnalyzer::new(source, AnalyzerConfig::default());

    let result = analyzer.check_uniformity(0.5).unwrap();
    assert!(!result.is_uniform);
    assert_eq!(result.unique_sizes.len(), 2);
    assert_eq!(result.unique_sizes[0].page_numbers, vec![1, 2]);
    assert_eq!(result.unique_sizes[1].page_numbers, vec![3]);

    let summary = analyzer.get_summary().unwrap();
    let breakdown = summary.unique_sizes.unwrap();
    assert_eq!(breakdown[1].orientation, Orientation::Landscape);
    assert_eq!(breakdown[1].pages, vec![3]);
}

#[test]
fn page_without_box_uses_fallback() {
    let pdf = create_pdf(&[Some((595, 842)), None]);
    let source = open_document(&pdf, Some("scan.pdf"), &AnalyzerConfig::default()).unwrap();
    let analyzer = PageAnalyzer::new(source, AnalyzerConfig::default());

    let pages = analyzer.get_page_info().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].width_pt, 595.0);
    assert_eq!(pages[1].height_pt, 842.0);
    assert!(analyzer.check_uniformity(0.5).unwrap().is_uniform);
}

#[test]
fn page_without_box_fails_when_propagating() {
    let pdf = create_pdf(&[Some((595, 842)), None]);
    let config = AnalyzerConfig {
        fallback: FallbackPolicy::Propagate,
        ..Default::default()
    };

    assert_eq!(count_pages(&pdf, Some("scan.pdf"), &config).unwrap(), 2);

    let err = get_summary(&pdf, Some("scan.pdf"), &config).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Sizing));
    assert!(matches!(err.root(), PageSizeError::ParseError(_)));
}

#[test]
fn rotation_honored_from_config() {
    let mut doc = Document::load_mem(&create_pdf(&[Some((612, 792))])).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    doc.get_object_mut(page_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Rotate", Object::Integer(90));
    let mut pdf = Vec::new();
    doc.save_to(&mut pdf).unwrap();

    let config = AnalyzerConfig {
        pdf: PdfOptions {
            honor_rotation: true,
        },
        ..Default::default()
    };
    let summary = get_summary(&pdf, None, &config).unwrap();
    assert_eq!(summary.orientation, Some(Orientation::Landscape));
    assert_eq!(summary.paper_size.as_deref(), Some("Letter"));
}

#[test]
fn corrupt_pdf_fails_counting() {
    let err = count_pages(b"%PDF-1.7\ngarbage", None, &AnalyzerConfig::default()).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Counting));
    assert!(matches!(err.root(), PageSizeError::ParseError(_)));
}
