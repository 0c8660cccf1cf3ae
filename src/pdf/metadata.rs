//! PDF metadata extraction

use std::path::Path;
use lopdf::{Dictionary, Document, Object};
use crate::error::{Error, Result};

/// Document metadata read from the Info dictionary plus the page count
///
/// Absent fields stay `None`; presentation layers decide how to render that
/// (the report renderers show "N/A").
#[derive(Debug, Clone, Default)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
}

impl PdfMetadata {
    /// Named fields in report order, absent values rendered as "N/A"
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let na = || "N/A".to_string();
        vec![
            ("Title", self.title.clone().unwrap_or_else(na)),
            ("Author", self.author.clone().unwrap_or_else(na)),
            ("Subject", self.subject.clone().unwrap_or_else(na)),
            ("Creator", self.creator.clone().unwrap_or_else(na)),
            ("Producer", self.producer.clone().unwrap_or_else(na)),
        ]
    }
}

/// Count pages by reading the Count field from the Pages dictionary.
/// This is more reliable than get_pages() which doesn't handle nested page trees.
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|_| Error::General("No Pages reference in catalog".to_string()))?;

    let pages_dict = doc
        .get_object(pages_id)
        .and_then(Object::as_dict)
        .map_err(|_| Error::General("Pages is not a dictionary".to_string()))?;

    let count = pages_dict
        .get(b"Count")
        .and_then(Object::as_i64)
        .map_err(|_| Error::General("No Count in Pages dictionary".to_string()))?;

    Ok(count as usize)
}

/// Decode a PDF text string: UTF-16BE when BOM-prefixed, else treated as UTF-8
/// with lossy replacement (covers the ASCII subset of PDFDocEncoding).
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Read one string-valued field from the Info dictionary
fn info_field(info: &Dictionary, key: &[u8]) -> Option<String> {
    info.get(key)
        .and_then(Object::as_str)
        .ok()
        .map(decode_text_string)
}

/// Extract metadata from an already loaded document
pub fn metadata_from_document(doc: &Document) -> Result<PdfMetadata> {
    let page_count = count_pages_from_catalog(doc)?;

    let mut metadata = PdfMetadata {
        page_count,
        ..PdfMetadata::default()
    };

    if let Ok(info_id) = doc.trailer.get(b"Info").and_then(Object::as_reference) {
        if let Ok(info) = doc.get_object(info_id).and_then(Object::as_dict) {
            metadata.title = info_field(info, b"Title");
            metadata.author = info_field(info, b"Author");
            metadata.subject = info_field(info, b"Subject");
            metadata.creator = info_field(info, b"Creator");
            metadata.producer = info_field(info, b"Producer");
        }
    }

    Ok(metadata)
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = crate::pdf::load_document(path)?;
    let metadata = metadata_from_document(&doc)?;

    if metadata.page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(metadata)
}

/// Count the number of pages in a PDF file
///
/// This is a quick operation that reads the Count field from the Pages dictionary.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = crate::pdf::load_document(path)?;
    count_pages_from_catalog(&doc)
}
