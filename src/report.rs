//! Comparison report rendering
//!
//! Turns a [`ComparisonSummary`] plus its per-page comparisons into a
//! human-readable report. Three formats: plain text for terminals, Markdown
//! with fenced diff blocks, and a self-contained styled HTML page. Rendering
//! is deterministic given a fixed generation timestamp.

use std::fmt;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Local};

use crate::compare::{ComparisonSummary, PageComparison};
use crate::error::Error;
use crate::pdf::PdfMetadata;

/// Output format for a comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Markdown,
    Html,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "html" => Ok(ReportFormat::Html),
            other => Err(Error::General(format!(
                "Unknown report format '{}' (expected text, markdown or html)",
                other
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => f.write_str("text"),
            ReportFormat::Markdown => f.write_str("markdown"),
            ReportFormat::Html => f.write_str("html"),
        }
    }
}

/// Identity of one compared file as shown in reports
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub metadata: PdfMetadata,
}

impl FileInfo {
    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// Everything a renderer needs for one comparison run
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub file_a: FileInfo,
    pub file_b: FileInfo,
    pub summary: ComparisonSummary,
    pub comparisons: Vec<PageComparison>,
    pub generated_at: DateTime<Local>,
}

const RULE: &str = "------------------------------------------------------------";
const BANNER: &str = "============================================================";

impl ComparisonReport {
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => self.render_text(),
            ReportFormat::Markdown => self.render_markdown(),
            ReportFormat::Html => self.render_html(),
        }
    }

    fn verdict(&self) -> &'static str {
        if self.summary.files_identical {
            "THE FILES ARE IDENTICAL"
        } else {
            "THE FILES ARE DIFFERENT"
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;

        let _ = writeln!(out, "{}", BANNER);
        let _ = writeln!(out, "PDF COMPARISON SUMMARY");
        let _ = writeln!(out, "{}\n", BANNER);

        for (label, file) in [("PDF 1", &self.file_a), ("PDF 2", &self.file_b)] {
            let _ = writeln!(out, "{}: {}", label, file.file_name());
            let _ = writeln!(out, "       {}", file.path.display());
            let _ = writeln!(out, "       Size: {:.1} KB\n", file.size_kb());
        }

        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "COMPARISON RESULTS");
        let _ = writeln!(out, "{}\n", RULE);
        let _ = writeln!(out, "{}\n", self.verdict());
        let _ = writeln!(out, "Pages in PDF 1:       {}", s.total_pages_a);
        let _ = writeln!(out, "Pages in PDF 2:       {}", s.total_pages_b);
        let _ = writeln!(out, "Identical pages:      {}", s.identical_pages);
        let _ = writeln!(out, "Different pages:      {}", s.different_pages);
        let _ = writeln!(out, "Average similarity:   {:.1}%\n", s.average_similarity);

        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "METADATA COMPARISON");
        let _ = writeln!(out, "{}\n", RULE);
        let _ = writeln!(out, "{:<15} {:<30} {:<30}", "Property", "PDF 1", "PDF 2");
        let fields_a = self.file_a.metadata.fields();
        let fields_b = self.file_b.metadata.fields();
        for ((name, value_a), (_, value_b)) in fields_a.iter().zip(fields_b.iter()) {
            let _ = writeln!(
                out,
                "{:<15} {:<30} {:<30}",
                name,
                truncate(value_a, 28),
                truncate(value_b, 28)
            );
        }
        let _ = writeln!(
            out,
            "{:<15} {:<30} {:<30}",
            "Pages",
            self.file_a.metadata.page_count,
            self.file_b.metadata.page_count
        );

        let _ = writeln!(out, "\n{}", RULE);
        let _ = writeln!(out, "PAGE-BY-PAGE SIMILARITY");
        let _ = writeln!(out, "{}\n", RULE);
        for comp in &self.comparisons {
            let status = if comp.identical {
                "identical"
            } else {
                "different"
            };
            let _ = writeln!(
                out,
                "Page {:3}: {:5.1}% {}",
                comp.page, comp.similarity, status
            );
        }

        out
    }

    fn render_markdown(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;

        let _ = writeln!(out, "# PDF Comparison Report\n");
        let _ = writeln!(
            out,
            "*Generated on {}*\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        );

        let _ = writeln!(out, "## File Information\n");
        let _ = writeln!(out, "| Property | PDF 1 | PDF 2 |");
        let _ = writeln!(out, "|----------|-------|-------|");
        let _ = writeln!(
            out,
            "| **File** | `{}` | `{}` |",
            self.file_a.file_name(),
            self.file_b.file_name()
        );
        let _ = writeln!(
            out,
            "| **Size** | {:.1} KB | {:.1} KB |",
            self.file_a.size_kb(),
            self.file_b.size_kb()
        );
        let _ = writeln!(
            out,
            "| **Pages** | {} | {} |\n",
            s.total_pages_a, s.total_pages_b
        );

        let _ = writeln!(out, "## Comparison Summary\n");
        let _ = writeln!(out, "**{}**\n", self.verdict());
        let _ = writeln!(out, "- **Identical pages:** {}", s.identical_pages);
        let _ = writeln!(out, "- **Different pages:** {}", s.different_pages);
        let _ = writeln!(
            out,
            "- **Average similarity:** {:.1}%\n",
            s.average_similarity
        );

        let _ = writeln!(out, "## Metadata Comparison\n");
        let _ = writeln!(out, "| Property | PDF 1 | PDF 2 | Match |");
        let _ = writeln!(out, "|----------|-------|-------|-------|");
        let fields_a = self.file_a.metadata.fields();
        let fields_b = self.file_b.metadata.fields();
        for ((name, value_a), (_, value_b)) in fields_a.iter().zip(fields_b.iter()) {
            let matches = if value_a == value_b { "yes" } else { "no" };
            let _ = writeln!(out, "| {} | {} | {} | {} |", name, value_a, value_b, matches);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## Page-by-Page Comparison\n");
        let _ = writeln!(out, "| Page | Similarity | Status |");
        let _ = writeln!(out, "|------|------------|--------|");
        for comp in &self.comparisons {
            let status = if comp.identical {
                "Identical"
            } else {
                "Different"
            };
            let _ = writeln!(out, "| {} | {:.1}% | {} |", comp.page, comp.similarity, status);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## Detailed Differences\n");
        for comp in &self.comparisons {
            let _ = writeln!(
                out,
                "### Page {} (Similarity: {:.1}%)\n",
                comp.page, comp.similarity
            );
            if comp.identical {
                let _ = writeln!(out, "*Pages are identical*\n");
            } else {
                let _ = writeln!(out, "```diff");
                for line in &comp.diff {
                    // Backticks would terminate the fence early in some renderers
                    let _ = writeln!(out, "{}", line.trim_end_matches('\n').replace('`', "'"));
                }
                let _ = writeln!(out, "```\n");
            }
        }

        out
    }

    fn render_html(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;

        let _ = writeln!(out, "<!DOCTYPE html>");
        let _ = writeln!(out, "<html lang=\"en\">");
        let _ = writeln!(out, "<head>");
        let _ = writeln!(out, "<meta charset=\"UTF-8\">");
        let _ = writeln!(out, "<title>PDF Comparison Report</title>");
        let _ = writeln!(out, "<style>{}</style>", HTML_STYLE);
        let _ = writeln!(out, "</head>");
        let _ = writeln!(out, "<body>");
        let _ = writeln!(out, "<h1>PDF Comparison Report</h1>");
        let _ = writeln!(
            out,
            "<p class=\"timestamp\">Generated on {}</p>",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        );

        let verdict_class = if s.files_identical {
            "identical"
        } else {
            "different"
        };
        let _ = writeln!(out, "<div class=\"summary-box\">");
        let _ = writeln!(out, "<h2>Summary</h2>");
        let _ = writeln!(
            out,
            "<p class=\"{}\">{}</p>",
            verdict_class,
            self.verdict()
        );
        let _ = writeln!(out, "<table>");
        let _ = writeln!(out, "<tr><th>Metric</th><th>Value</th></tr>");
        let _ = writeln!(
            out,
            "<tr><td>Pages in PDF 1</td><td>{}</td></tr>",
            s.total_pages_a
        );
        let _ = writeln!(
            out,
            "<tr><td>Pages in PDF 2</td><td>{}</td></tr>",
            s.total_pages_b
        );
        let _ = writeln!(
            out,
            "<tr><td>Identical pages</td><td>{}</td></tr>",
            s.identical_pages
        );
        let _ = writeln!(
            out,
            "<tr><td>Different pages</td><td>{}</td></tr>",
            s.different_pages
        );
        let _ = writeln!(
            out,
            "<tr><td>Average similarity</td><td>{:.1}%</td></tr>",
            s.average_similarity
        );
        let _ = writeln!(out, "</table>");
        let _ = writeln!(out, "</div>");

        let _ = writeln!(out, "<div class=\"summary-box\">");
        let _ = writeln!(out, "<h2>File Information</h2>");
        let _ = writeln!(out, "<table>");
        let _ = writeln!(out, "<tr><th>Property</th><th>PDF 1</th><th>PDF 2</th></tr>");
        let _ = writeln!(
            out,
            "<tr><td>Filename</td><td><code>{}</code></td><td><code>{}</code></td></tr>",
            html_escape(&self.file_a.file_name()),
            html_escape(&self.file_b.file_name())
        );
        let _ = writeln!(
            out,
            "<tr><td>Size</td><td>{:.1} KB</td><td>{:.1} KB</td></tr>",
            self.file_a.size_kb(),
            self.file_b.size_kb()
        );
        let fields_a = self.file_a.metadata.fields();
        let fields_b = self.file_b.metadata.fields();
        for ((name, value_a), (_, value_b)) in fields_a.iter().zip(fields_b.iter()) {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                name,
                html_escape(value_a),
                html_escape(value_b)
            );
        }
        let _ = writeln!(out, "</table>");
        let _ = writeln!(out, "</div>");

        let _ = writeln!(out, "<div class=\"summary-box\">");
        let _ = writeln!(out, "<h2>Page-by-Page Results</h2>");
        let _ = writeln!(out, "<table>");
        let _ = writeln!(
            out,
            "<tr><th>Page</th><th>Similarity</th><th>Status</th></tr>"
        );
        for comp in &self.comparisons {
            let (class, label) = if comp.identical {
                ("status-identical", "Identical")
            } else {
                ("status-different", "Different")
            };
            let _ = writeln!(
                out,
                "<tr><td>Page {}</td><td>{:.1}%</td><td><span class=\"page-status {}\">{}</span></td></tr>",
                comp.page, comp.similarity, class, label
            );
        }
        let _ = writeln!(out, "</table>");
        let _ = writeln!(out, "</div>");

        let _ = writeln!(out, "<div class=\"summary-box\">");
        let _ = writeln!(out, "<h2>Detailed Differences</h2>");
        for comp in &self.comparisons {
            let _ = writeln!(
                out,
                "<h3>Page {} (Similarity: {:.1}%)</h3>",
                comp.page, comp.similarity
            );
            if comp.identical {
                let _ = writeln!(out, "<p><em>Pages are identical</em></p>");
            } else {
                let _ = writeln!(out, "<div class=\"diff-block\">");
                for line in &comp.diff {
                    let text = html_escape(line.trim_end_matches('\n'));
                    let class = diff_line_class(line);
                    let _ = writeln!(out, "<span class=\"{}\">{}</span>", class, text);
                }
                let _ = writeln!(out, "</div>");
            }
        }
        let _ = writeln!(out, "</div>");

        let _ = writeln!(out, "</body>");
        let _ = writeln!(out, "</html>");
        out
    }
}

const HTML_STYLE: &str = "\
body { font-family: sans-serif; max-width: 1200px; margin: 0 auto; padding: 20px; background: #f5f5f5; }\n\
h1 { color: #333; border-bottom: 2px solid #007acc; padding-bottom: 10px; }\n\
h2 { color: #007acc; margin-top: 30px; }\n\
h3 { color: #555; }\n\
.summary-box { background: white; padding: 20px; border-radius: 8px; margin: 20px 0; }\n\
.identical { color: green; font-weight: bold; font-size: 1.2em; }\n\
.different { color: red; font-weight: bold; font-size: 1.2em; }\n\
table { border-collapse: collapse; width: 100%; margin: 15px 0; background: white; }\n\
th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }\n\
th { background: #007acc; color: white; }\n\
.diff-block { background: #1e1e1e; color: #d4d4d4; padding: 15px; border-radius: 5px; font-family: monospace; white-space: pre; overflow-x: auto; }\n\
.diff-block span { display: block; }\n\
.diff-added { color: #4ec9b0; }\n\
.diff-removed { color: #f14c4c; }\n\
.diff-header { color: #569cd6; font-weight: bold; }\n\
.page-status { padding: 3px 8px; border-radius: 3px; font-size: 0.9em; }\n\
.status-identical { background: #d4edda; color: #155724; }\n\
.status-different { background: #f8d7da; color: #721c24; }\n\
.timestamp { color: #888; font-style: italic; }";

/// CSS class for one diff output line
fn diff_line_class(line: &str) -> &'static str {
    if line.starts_with("@@") || line.starts_with("---") || line.starts_with("+++") {
        "diff-header"
    } else if line.starts_with('+') {
        "diff-added"
    } else if line.starts_with('-') {
        "diff-removed"
    } else {
        "diff-context"
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare_pages, summarize};
    use chrono::TimeZone;

    fn sample_report() -> ComparisonReport {
        let pages_a = vec!["Hello world\n".to_string(), "shared page\n".to_string()];
        let pages_b = vec!["Hello there\n".to_string(), "shared page\n".to_string()];
        let comparisons = compare_pages(&pages_a, &pages_b);
        let summary = summarize(&comparisons, 2, 2);

        let metadata = PdfMetadata {
            page_count: 2,
            title: Some("A <Title>".to_string()),
            ..PdfMetadata::default()
        };

        ComparisonReport {
            file_a: FileInfo {
                path: PathBuf::from("/docs/first.pdf"),
                size_bytes: 2048,
                metadata: metadata.clone(),
            },
            file_b: FileInfo {
                path: PathBuf::from("/docs/second.pdf"),
                size_bytes: 1024,
                metadata,
            },
            summary,
            comparisons,
            generated_at: Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("markdown".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("HTML".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_text_report_contents() {
        let text = sample_report().render(ReportFormat::Text);
        assert!(text.contains("THE FILES ARE DIFFERENT"));
        assert!(text.contains("Pages in PDF 1:       2"));
        assert!(text.contains("Identical pages:      1"));
        assert!(text.contains("first.pdf"));
        assert!(text.contains("Size: 2.0 KB"));
    }

    #[test]
    fn test_markdown_report_contents() {
        let md = sample_report().render(ReportFormat::Markdown);
        assert!(md.contains("# PDF Comparison Report"));
        assert!(md.contains("*Generated on 2026-01-02 03:04:05*"));
        assert!(md.contains("| 1 | "));
        assert!(md.contains("```diff"));
        assert!(md.contains("-Hello world"));
        assert!(md.contains("+Hello there"));
        assert!(md.contains("*Pages are identical*"));
    }

    #[test]
    fn test_html_report_escapes_markup() {
        let html = sample_report().render(ReportFormat::Html);
        assert!(html.contains("A &lt;Title&gt;"));
        assert!(!html.contains("A <Title>"));
        assert!(html.contains("class=\"diff-removed\""));
        assert!(html.contains("class=\"diff-added\""));
    }

    #[test]
    fn test_render_is_deterministic() {
        let report = sample_report();
        assert_eq!(
            report.render(ReportFormat::Html),
            report.render(ReportFormat::Html)
        );
    }
}
