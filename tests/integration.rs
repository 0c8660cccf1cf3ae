//! Integration tests for the pdf-tools library
//!
//! Fixture PDFs are generated with lopdf so the tests are self-contained: one
//! page object per text, a shared Courier font, and optional Info metadata.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use tempfile::TempDir;

use pdf_tools::compare::{compare_pages, summarize};
use pdf_tools::pdf::{
    compress_pdf, count_pages, extract_metadata, extract_page_texts, CompressMethod,
    CompressOptions, Quality,
};

/// Write a PDF with one page per text entry and an optional document title
fn write_test_pdf(path: &Path, pages: &[&str], title: Option<&str>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
            "Resources" => resources_id,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    doc.save(path).expect("save test PDF");
}

#[test]
fn test_extract_page_texts_preserves_page_order() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("two-pages.pdf");
    write_test_pdf(&path, &["First page content", "Second page content"], None);

    let pages = extract_page_texts(&path).expect("extract text");

    assert_eq!(pages.len(), 2);
    assert!(
        pages[0].contains("First page content"),
        "unexpected page 1 text: {:?}",
        pages[0]
    );
    assert!(
        pages[1].contains("Second page content"),
        "unexpected page 2 text: {:?}",
        pages[1]
    );
}

#[test]
fn test_compare_identical_files() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path_a = temp_dir.path().join("a.pdf");
    let path_b = temp_dir.path().join("b.pdf");
    let texts = ["Shared first page", "Shared second page"];
    write_test_pdf(&path_a, &texts, None);
    write_test_pdf(&path_b, &texts, None);

    let pages_a = extract_page_texts(&path_a).expect("extract a");
    let pages_b = extract_page_texts(&path_b).expect("extract b");

    let comparisons = compare_pages(&pages_a, &pages_b);
    let summary = summarize(&comparisons, pages_a.len(), pages_b.len());

    assert_eq!(comparisons.len(), 2);
    for comp in &comparisons {
        assert!(comp.identical, "page {} should be identical", comp.page);
        assert_eq!(comp.similarity, 100.0);
        assert!(comp.diff.is_empty());
    }
    assert!(summary.files_identical);
    assert_eq!(summary.identical_pages, 2);
    assert_eq!(summary.different_pages, 0);
}

#[test]
fn test_compare_detects_changed_page() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path_a = temp_dir.path().join("old.pdf");
    let path_b = temp_dir.path().join("new.pdf");
    write_test_pdf(&path_a, &["Original opening page", "Common closing page"], None);
    write_test_pdf(&path_b, &["Revised opening page", "Common closing page"], None);

    let pages_a = extract_page_texts(&path_a).expect("extract a");
    let pages_b = extract_page_texts(&path_b).expect("extract b");

    let comparisons = compare_pages(&pages_a, &pages_b);
    let summary = summarize(&comparisons, pages_a.len(), pages_b.len());

    assert_eq!(comparisons.len(), 2);
    assert!(!comparisons[0].identical);
    assert!(comparisons[0].similarity > 0.0 && comparisons[0].similarity < 100.0);
    assert!(comparisons[0].diff.iter().any(|l| l.starts_with('-')));
    assert!(comparisons[0].diff.iter().any(|l| l.starts_with('+')));

    assert!(comparisons[1].identical);

    assert!(!summary.files_identical);
    assert_eq!(summary.identical_pages, 1);
    assert_eq!(summary.different_pages, 1);
}

#[test]
fn test_compare_documents_with_different_page_counts() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path_a = temp_dir.path().join("long.pdf");
    let path_b = temp_dir.path().join("short.pdf");
    write_test_pdf(&path_a, &["Same page", "Extra page"], None);
    write_test_pdf(&path_b, &["Same page"], None);

    let pages_a = extract_page_texts(&path_a).expect("extract a");
    let pages_b = extract_page_texts(&path_b).expect("extract b");

    let comparisons = compare_pages(&pages_a, &pages_b);
    let summary = summarize(&comparisons, pages_a.len(), pages_b.len());

    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[1].text_b, "");
    assert!(!comparisons[1].identical);
    assert_eq!(comparisons[1].similarity, 0.0);
    assert!(!summary.files_identical);
    assert_eq!(summary.total_pages_a, 2);
    assert_eq!(summary.total_pages_b, 1);
}

#[test]
fn test_count_pages_and_metadata() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("titled.pdf");
    write_test_pdf(&path, &["one", "two", "three"], Some("Quarterly Report"));

    assert_eq!(count_pages(&path).expect("count pages"), 3);

    let metadata = extract_metadata(&path).expect("extract metadata");
    assert_eq!(metadata.page_count, 3);
    assert_eq!(metadata.title.as_deref(), Some("Quarterly Report"));
    assert_eq!(metadata.author, None);

    // Absent fields render as N/A in reports
    let fields = metadata.fields();
    assert!(fields.contains(&("Author", "N/A".to_string())));
}

#[test]
fn test_compress_with_lopdf_fallback() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let input = temp_dir.path().join("input.pdf");
    let output = temp_dir.path().join("out").join("compressed.pdf");
    write_test_pdf(&input, &["Some content to carry through compression"], None);

    let options = CompressOptions {
        input_path: input.clone(),
        output_path: Some(output.clone()),
        quality: Quality::Ebook,
        skip_ghostscript: true,
    };

    let outcome = compress_pdf(&options).expect("compress");

    assert_eq!(outcome.method, CompressMethod::Lopdf);
    assert_eq!(outcome.output_path, output);
    assert!(output.exists(), "compressed PDF was not created");
    assert!(outcome.compressed_size > 0);

    // Output must still be a loadable one-page PDF
    assert_eq!(count_pages(&output).expect("count output pages"), 1);
}

#[test]
fn test_compress_default_output_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let input = temp_dir.path().join("report.pdf");
    write_test_pdf(&input, &["content"], None);

    let options = CompressOptions {
        input_path: input.clone(),
        output_path: None,
        quality: Quality::Ebook,
        skip_ghostscript: true,
    };

    let outcome = compress_pdf(&options).expect("compress");
    assert_eq!(outcome.output_path, temp_dir.path().join("report_compressed.pdf"));
    assert!(outcome.output_path.exists());
}
