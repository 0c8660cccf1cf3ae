//! PDF Tools CLI
//!
//! A command-line tool for comparing PDF text content and compressing PDFs.

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, Subcommand};
use glob::glob;
use std::fs;
use std::path::PathBuf;
use std::process;

use pdf_tools::compare::{compare_pages, summarize};
use pdf_tools::pdf::{
    compress_pdf, load_document, metadata_from_document, page_texts, CompressOptions, Quality,
};
use pdf_tools::report::{ComparisonReport, FileInfo, ReportFormat};

/// PDF Tools - Compare PDF text content and compress PDF files
#[derive(Parser)]
#[command(name = "pdf-tools")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Compare two PDFs and print a summary
    pdf-tools compare old.pdf new.pdf

    # Compare and write a Markdown report with per-page diffs
    pdf-tools compare old.pdf new.pdf --report report.md --format markdown

    # Compress every PDF in the current directory at ebook quality
    pdf-tools compress \"*.pdf\"

    # Compress one file in place, best quality
    pdf-tools compress big.pdf --quality prepress --replace")]
struct Cli {
    /// Increase output verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the text content of two PDF files page by page
    Compare {
        /// First PDF file
        pdf1: PathBuf,

        /// Second PDF file
        pdf2: PathBuf,

        /// Write a report file in addition to the stdout summary
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Report file format (text, markdown, html)
        #[arg(short, long, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Print per-page diffs to stdout as well
        #[arg(long)]
        show_diff: bool,
    },

    /// Compress PDF files. Supports glob patterns like "*.pdf"
    Compress {
        /// Input PDF files (glob patterns allowed)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output file path (only valid with a single input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compression quality preset (screen, ebook, printer, prepress)
        #[arg(short, long, default_value_t = Quality::Ebook)]
        quality: Quality,

        /// Skip Ghostscript and use the lopdf fallback directly
        #[arg(long)]
        no_ghostscript: bool,

        /// Replace each original file with its compressed version
        #[arg(long, conflicts_with = "output")]
        replace: bool,

        /// Open the compressed file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    let result = match cli.command {
        Commands::Compare {
            pdf1,
            pdf2,
            report,
            format,
            show_diff,
        } => cmd_compare(pdf1, pdf2, report, format, show_diff),
        Commands::Compress {
            inputs,
            output,
            quality,
            no_ghostscript,
            replace,
            open,
        } => cmd_compress(inputs, output, quality, no_ghostscript, replace, open),
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Expand glob patterns in input paths
fn expand_globs(patterns: Vec<String>) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        // Check if pattern contains glob characters
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let mut matched = false;
            for entry in glob(&pattern).with_context(|| format!("invalid pattern {}", pattern))? {
                match entry {
                    Ok(path) => {
                        paths.push(path);
                        matched = true;
                    }
                    Err(e) => eprintln!("Warning: glob error for {}: {}", pattern, e),
                }
            }
            if !matched {
                bail!("No files matched pattern: {}", pattern);
            }
        } else {
            // No glob characters, treat as literal path
            paths.push(PathBuf::from(pattern));
        }
    }

    // Sort paths for consistent ordering
    paths.sort();

    Ok(paths)
}

/// Open a file with the system default application
fn open_file(path: &PathBuf) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Compare two PDFs and print/write the results
fn cmd_compare(
    pdf1: PathBuf,
    pdf2: PathBuf,
    report_path: Option<PathBuf>,
    format: ReportFormat,
    show_diff: bool,
) -> anyhow::Result<()> {
    for path in [&pdf1, &pdf2] {
        if !path.exists() {
            bail!("Input file not found: {}", path.display());
        }
    }

    let doc_a = load_document(&pdf1)?;
    let doc_b = load_document(&pdf2)?;

    let pages_a = page_texts(&doc_a);
    let pages_b = page_texts(&doc_b);

    log::info!(
        "Comparing {} pages against {} pages",
        pages_a.len(),
        pages_b.len()
    );

    let comparisons = compare_pages(&pages_a, &pages_b);
    let summary = summarize(&comparisons, pages_a.len(), pages_b.len());

    let report = ComparisonReport {
        file_a: FileInfo {
            size_bytes: fs::metadata(&pdf1)?.len(),
            metadata: metadata_from_document(&doc_a)?,
            path: pdf1,
        },
        file_b: FileInfo {
            size_bytes: fs::metadata(&pdf2)?.len(),
            metadata: metadata_from_document(&doc_b)?,
            path: pdf2,
        },
        summary,
        comparisons,
        generated_at: Local::now(),
    };

    print!("{}", report.render(ReportFormat::Text));

    if show_diff {
        for comp in &report.comparisons {
            if comp.identical {
                continue;
            }
            println!("\nPage {} diff:", comp.page);
            for line in &comp.diff {
                print!("{}", ensure_newline(line));
            }
        }
    }

    if let Some(path) = report_path {
        let rendered = report.render(format);
        fs::write(&path, rendered)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        eprintln!("Report written to: {}", path.display());
    }

    Ok(())
}

/// Diff content lines keep their endings; header lines have none
fn ensure_newline(line: &str) -> String {
    if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{}\n", line)
    }
}

/// Compress one or more PDFs
fn cmd_compress(
    inputs: Vec<String>,
    output: Option<PathBuf>,
    quality: Quality,
    no_ghostscript: bool,
    replace: bool,
    open: bool,
) -> anyhow::Result<()> {
    let inputs = expand_globs(inputs)?;

    if output.is_some() && inputs.len() > 1 {
        bail!("--output is only valid with a single input file");
    }

    for path in &inputs {
        if !path.exists() {
            bail!("Input file not found: {}", path.display());
        }
    }

    let mut last_output = None;

    for input in inputs {
        let target = if replace {
            // Compress to a sibling temp file, then swap it over the original
            Some(input.with_extension("pdf.compress-tmp"))
        } else {
            output.clone()
        };

        let options = CompressOptions {
            input_path: input.clone(),
            output_path: target,
            quality,
            skip_ghostscript: no_ghostscript,
        };

        let outcome = compress_pdf(&options)
            .with_context(|| format!("failed to compress {}", input.display()))?;

        let final_path = if replace {
            fs::rename(&outcome.output_path, &input)
                .with_context(|| format!("failed to replace {}", input.display()))?;
            input
        } else {
            outcome.output_path.clone()
        };

        println!(
            "{}: {:.2} MB -> {:.2} MB ({:.1}% reduction, {})",
            final_path.display(),
            outcome.original_size as f64 / (1024.0 * 1024.0),
            outcome.compressed_size as f64 / (1024.0 * 1024.0),
            outcome.reduction_percent(),
            outcome.method
        );

        if outcome.compressed_size >= outcome.original_size {
            eprintln!("Warning: compressed file is not smaller than the original.");
        }

        last_output = Some(final_path);
    }

    if open {
        if let Some(path) = last_output {
            open_file(&path)?;
        }
    }

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }

    let metadata = pdf_tools::pdf::extract_metadata(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    for (name, value) in metadata.fields() {
        println!("{}: {}", name, value);
    }

    Ok(())
}
