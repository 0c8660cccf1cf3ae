//! PDF file-size compression
//!
//! Compression is delegated to an external Ghostscript process when one can be
//! located, since it re-encodes images and fonts and gives far better results.
//! When Ghostscript is missing or fails, a library fallback compresses the
//! existing object streams in place with lopdf.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use lopdf::Document;
use crate::error::{Error, Result};

/// Ghostscript quality presets
///
/// - screen: lowest quality, smallest size (72 dpi)
/// - ebook: medium quality, good for reading (150 dpi)
/// - printer: high quality (300 dpi)
/// - prepress: highest quality, largest size (300 dpi, color preserving)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    Screen,
    #[default]
    Ebook,
    Printer,
    Prepress,
}

impl Quality {
    /// The `-dPDFSETTINGS` value Ghostscript expects
    fn pdf_settings(self) -> &'static str {
        match self {
            Quality::Screen => "/screen",
            Quality::Ebook => "/ebook",
            Quality::Printer => "/printer",
            Quality::Prepress => "/prepress",
        }
    }
}

impl FromStr for Quality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "screen" => Ok(Quality::Screen),
            "ebook" => Ok(Quality::Ebook),
            "printer" => Ok(Quality::Printer),
            "prepress" => Ok(Quality::Prepress),
            other => Err(Error::General(format!(
                "Unknown quality '{}' (expected screen, ebook, printer or prepress)",
                other
            ))),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Screen => "screen",
            Quality::Ebook => "ebook",
            Quality::Printer => "printer",
            Quality::Prepress => "prepress",
        };
        f.write_str(name)
    }
}

/// Which backend produced the compressed file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressMethod {
    Ghostscript,
    Lopdf,
}

impl fmt::Display for CompressMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressMethod::Ghostscript => f.write_str("Ghostscript"),
            CompressMethod::Lopdf => f.write_str("lopdf"),
        }
    }
}

/// Options for a single compression run
#[derive(Debug, Clone)]
pub struct CompressOptions {
    /// Input PDF file path
    pub input_path: PathBuf,
    /// Output path; `<stem>_compressed.pdf` next to the input when absent
    pub output_path: Option<PathBuf>,
    /// Ghostscript quality preset
    pub quality: Quality,
    /// Skip Ghostscript entirely and go straight to the library fallback
    pub skip_ghostscript: bool,
}

/// Result of a successful compression run
#[derive(Debug, Clone)]
pub struct CompressOutcome {
    pub output_path: PathBuf,
    pub method: CompressMethod,
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressOutcome {
    /// Size reduction as a percentage of the original; negative when the
    /// output grew
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (self.original_size as f64 - self.compressed_size as f64) / self.original_size as f64
            * 100.0
    }
}

/// Command names tried on PATH, in order
const GHOSTSCRIPT_COMMANDS: &[&str] = &["gs", "gswin64c", "gswin32c"];

/// Well-known install locations for bundled apps that don't inherit PATH
const GHOSTSCRIPT_COMMON_PATHS: &[&str] = &[
    "/opt/homebrew/bin/gs",
    "/usr/local/bin/gs",
    "/usr/bin/gs",
    "/opt/local/bin/gs",
    "C:\\Program Files\\gs\\gs10.02.1\\bin\\gswin64c.exe",
    "C:\\Program Files (x86)\\gs\\gs10.02.1\\bin\\gswin32c.exe",
];

fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let with_exe = dir.join(format!("{}.exe", name));
            if with_exe.is_file() {
                return Some(with_exe);
            }
        }
    }
    None
}

/// Locate a Ghostscript executable on PATH or in well-known install locations
pub fn find_ghostscript() -> Option<PathBuf> {
    for name in GHOSTSCRIPT_COMMANDS {
        if let Some(path) = find_in_path(name) {
            return Some(path);
        }
    }

    GHOSTSCRIPT_COMMON_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Run Ghostscript over `input_path`, writing the re-encoded PDF to
/// `output_path`
fn compress_with_ghostscript(
    gs_path: &Path,
    input_path: &Path,
    output_path: &Path,
    quality: Quality,
) -> Result<()> {
    let output = Command::new(gs_path)
        .arg("-sDEVICE=pdfwrite")
        .arg("-dCompatibilityLevel=1.4")
        .arg(format!("-dPDFSETTINGS={}", quality.pdf_settings()))
        .arg("-dNOPAUSE")
        .arg("-dQUIET")
        .arg("-dBATCH")
        .arg("-dCompressFonts=true")
        .arg("-dSubsetFonts=true")
        .arg("-dColorImageDownsampleType=/Bicubic")
        .arg("-dGrayImageDownsampleType=/Bicubic")
        .arg("-dMonoImageDownsampleType=/Bicubic")
        .arg(format!("-sOutputFile={}", output_path.display()))
        .arg(input_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        };
        return Err(Error::Ghostscript(detail));
    }

    Ok(())
}

/// Library fallback: compress the document's existing streams with lopdf
fn compress_with_lopdf(input_path: &Path, output_path: &Path) -> Result<()> {
    let mut doc = Document::load(input_path)?;
    doc.compress();
    doc.save(output_path)?;
    Ok(())
}

/// Default output path: `<stem>_compressed.<ext>` next to the input
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let mut name = format!("{}_compressed", stem);
    if let Some(ext) = input_path.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    input_path.with_file_name(name)
}

/// Compress a PDF file.
///
/// Tries Ghostscript first (unless `skip_ghostscript` is set), then falls back
/// to lopdf stream compression. Fails only when every available method fails.
pub fn compress_pdf(options: &CompressOptions) -> Result<CompressOutcome> {
    let input_path = &options.input_path;
    if !input_path.exists() {
        return Err(Error::FileNotFound(input_path.clone()));
    }

    let output_path = options
        .output_path
        .clone()
        .unwrap_or_else(|| default_output_path(input_path));
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let original_size = fs::metadata(input_path)?.len();
    log::info!(
        "Compressing {} ({} bytes, quality {})",
        input_path.display(),
        original_size,
        options.quality
    );

    let mut method = None;
    let mut last_error = None;

    if !options.skip_ghostscript {
        match find_ghostscript() {
            Some(gs_path) => {
                log::debug!("Using Ghostscript at {}", gs_path.display());
                match compress_with_ghostscript(&gs_path, input_path, &output_path, options.quality)
                {
                    Ok(()) => method = Some(CompressMethod::Ghostscript),
                    Err(e) => {
                        log::warn!("Ghostscript compression failed: {}", e);
                        last_error = Some(e);
                    }
                }
            }
            None => {
                log::info!("Ghostscript not found, using lopdf fallback");
                last_error = Some(Error::GhostscriptNotFound);
            }
        }
    }

    if method.is_none() {
        match compress_with_lopdf(input_path, &output_path) {
            Ok(()) => method = Some(CompressMethod::Lopdf),
            Err(e) => {
                log::warn!("lopdf compression failed: {}", e);
                last_error = Some(e);
            }
        }
    }

    let method = match method {
        Some(m) => m,
        None => {
            let detail = last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no compression method available".to_string());
            return Err(Error::CompressionFailed(detail));
        }
    };

    let compressed_size = fs::metadata(&output_path)?.len();
    let outcome = CompressOutcome {
        output_path,
        method,
        original_size,
        compressed_size,
    };

    if outcome.compressed_size >= outcome.original_size {
        log::warn!(
            "Compressed file is not smaller than the original ({} -> {} bytes); \
             the input may already be well-optimized",
            outcome.original_size,
            outcome.compressed_size
        );
    }

    Ok(outcome)
}
