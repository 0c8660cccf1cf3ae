//! Error types for the pdf-tools library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdf-tools library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Document could not be loaded or decrypted
    #[error("Document unreadable: {}: {reason}", .path.display())]
    DocumentUnreadable { path: PathBuf, reason: String },

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// No Ghostscript binary could be located
    #[error("Ghostscript not found. Install it for better compression.")]
    GhostscriptNotFound,

    /// Ghostscript ran but failed
    #[error("Ghostscript error: {0}")]
    Ghostscript(String),

    /// Every available compression method failed
    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No PDF files found matching pattern: {0}")]
    NoFilesMatched(String),

    /// General error
    #[error("{0}")]
    General(String),
}
