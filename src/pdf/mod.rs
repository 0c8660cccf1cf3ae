//! PDF document access and compression

pub mod compress;
pub mod metadata;
pub mod text;

// Re-export commonly used items
pub use compress::{
    compress_pdf, default_output_path, find_ghostscript, CompressMethod, CompressOptions,
    CompressOutcome, Quality,
};
pub use metadata::{count_pages, extract_metadata, metadata_from_document, PdfMetadata};
pub use text::{extract_page_texts, load_document, page_texts};
