//! Per-page text extraction
//!
//! Extraction is best-effort at page granularity: a page whose content stream
//! cannot be decoded contributes an empty string rather than failing the whole
//! document, and pages are never dropped or reordered. Failing to load the
//! document at all is a hard [`Error::DocumentUnreadable`].

use std::path::Path;
use lopdf::Document;
use crate::error::{Error, Result};

/// Load a PDF document, attempting empty-password decryption when needed.
///
/// Any failure maps to [`Error::DocumentUnreadable`] so callers can surface
/// the broken file before a comparison is attempted.
pub fn load_document(path: &Path) -> Result<Document> {
    let mut doc = Document::load(path).map_err(|e| Error::DocumentUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if doc.is_encrypted() {
        doc.decrypt("").map_err(|e| Error::DocumentUnreadable {
            path: path.to_path_buf(),
            reason: format!("encrypted document: {}", e),
        })?;
    }

    Ok(doc)
}

/// Extract the text of every page, in page order, from a loaded document.
///
/// One entry per page; a page with no extractable text yields "".
pub fn page_texts(doc: &Document) -> Vec<String> {
    let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    page_numbers.sort_unstable();

    page_numbers
        .into_iter()
        .map(|page_number| match doc.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to extract text from page {}: {}", page_number, e);
                String::new()
            }
        })
        .collect()
}

/// Load a PDF and extract per-page text in one step
pub fn extract_page_texts(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let doc = load_document(path)?;
    Ok(page_texts(&doc))
}
