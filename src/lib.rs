//! PDF Tools Library
//!
//! A cross-platform library for comparing PDF text content and compressing
//! PDF file size. This library provides functionality to:
//! - Extract per-page text and document metadata
//! - Compare two documents page by page (similarity score + unified diff)
//! - Summarize a comparison and render it as text, Markdown or HTML
//! - Compress PDFs via Ghostscript with a lopdf fallback
//!
//! # Example
//!
//! ```no_run
//! use pdf_tools::compare::{compare_pages, summarize};
//! use pdf_tools::pdf::extract_page_texts;
//! use std::path::Path;
//!
//! let pages_a = extract_page_texts(Path::new("a.pdf")).expect("load a.pdf");
//! let pages_b = extract_page_texts(Path::new("b.pdf")).expect("load b.pdf");
//!
//! let comparisons = compare_pages(&pages_a, &pages_b);
//! let summary = summarize(&comparisons, pages_a.len(), pages_b.len());
//! println!("identical: {}", summary.files_identical);
//! ```

pub mod compare;
pub mod diff;
pub mod error;
pub mod matcher;
pub mod pdf;
pub mod report;

// Re-export commonly used items
pub use error::{Error, Result};
