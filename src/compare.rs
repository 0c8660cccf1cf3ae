//! Page-by-page text comparison
//!
//! The comparator takes two ordered sequences of per-page text and produces a
//! [`PageComparison`] for every page position, plus an aggregate
//! [`ComparisonSummary`]. Both operations are pure: they never fail, never
//! touch the filesystem, and a shorter document is simply padded with empty
//! pages rather than treated as an error.

use crate::diff::{split_lines, unified_diff, DEFAULT_CONTEXT};
use crate::matcher::SequenceMatcher;

/// Comparison result for a single page position
#[derive(Debug, Clone)]
pub struct PageComparison {
    /// 1-based page number
    pub page: usize,
    /// Extracted text of this page in the first document ("" if absent)
    pub text_a: String,
    /// Extracted text of this page in the second document ("" if absent)
    pub text_b: String,
    /// Similarity score in [0, 100]; 100 for two empty pages
    pub similarity: f64,
    /// Unified diff lines between the two page texts (empty when identical)
    pub diff: Vec<String>,
    /// Exact string equality of the two page texts
    pub identical: bool,
}

/// Aggregate result over a whole document pair
#[derive(Debug, Clone)]
pub struct ComparisonSummary {
    pub total_pages_a: usize,
    pub total_pages_b: usize,
    pub identical_pages: usize,
    pub different_pages: usize,
    /// Mean page similarity; 0 when there are no pages at all
    pub average_similarity: f64,
    /// True only if every compared page is identical and page counts match
    pub files_identical: bool,
}

/// Character-level similarity of two texts, in [0, 100].
///
/// `2 * M / T` scaled to a percentage, where `M` is the total length of the
/// greedy longest matching blocks and `T` the combined text length. Two empty
/// texts score 100.
pub fn similarity_score(text_a: &str, text_b: &str) -> f64 {
    let a: Vec<char> = text_a.chars().collect();
    let b: Vec<char> = text_b.chars().collect();
    SequenceMatcher::new(&a, &b).ratio() * 100.0
}

/// Compare two documents page by page.
///
/// Returns one [`PageComparison`] per page position, 1-based and contiguous,
/// with exactly `max(pages_a.len(), pages_b.len())` entries.
pub fn compare_pages(pages_a: &[String], pages_b: &[String]) -> Vec<PageComparison> {
    let page_count = pages_a.len().max(pages_b.len());
    let mut comparisons = Vec::with_capacity(page_count);

    for i in 0..page_count {
        let text_a = pages_a.get(i).map(String::as_str).unwrap_or("");
        let text_b = pages_b.get(i).map(String::as_str).unwrap_or("");

        let a_lines = split_lines(text_a);
        let b_lines = split_lines(text_b);
        let diff = unified_diff(
            &a_lines,
            &b_lines,
            &format!("PDF1 - Page {}", i + 1),
            &format!("PDF2 - Page {}", i + 1),
            DEFAULT_CONTEXT,
        );

        comparisons.push(PageComparison {
            page: i + 1,
            text_a: text_a.to_string(),
            text_b: text_b.to_string(),
            similarity: similarity_score(text_a, text_b),
            diff,
            identical: text_a == text_b,
        });
    }

    comparisons
}

/// Aggregate per-page comparisons into a summary.
///
/// `total_pages_a` / `total_pages_b` are the page counts of the source
/// documents, which feed the `files_identical` verdict: padded pages make
/// every page of a truncated document compare non-identical, but equal counts
/// are still required so an empty-vs-empty trailing page can never mask a
/// removed page.
pub fn summarize(
    comparisons: &[PageComparison],
    total_pages_a: usize,
    total_pages_b: usize,
) -> ComparisonSummary {
    let identical_pages = comparisons.iter().filter(|c| c.identical).count();
    let average_similarity = if comparisons.is_empty() {
        0.0
    } else {
        comparisons.iter().map(|c| c.similarity).sum::<f64>() / comparisons.len() as f64
    };

    ComparisonSummary {
        total_pages_a,
        total_pages_b,
        identical_pages,
        different_pages: comparisons.len() - identical_pages,
        average_similarity,
        files_identical: identical_pages == comparisons.len() && total_pages_a == total_pages_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_compare_document_with_itself() {
        let doc = pages(&["first page\n", "second page\n", ""]);
        let comparisons = compare_pages(&doc, &doc);

        assert_eq!(comparisons.len(), 3);
        for (i, comp) in comparisons.iter().enumerate() {
            assert_eq!(comp.page, i + 1);
            assert!(comp.identical);
            assert_eq!(comp.similarity, 100.0);
            assert!(comp.diff.is_empty());
        }
    }

    #[test]
    fn test_compare_empty_documents() {
        let comparisons = compare_pages(&[], &[]);
        assert!(comparisons.is_empty());

        let summary = summarize(&comparisons, 0, 0);
        assert_eq!(summary.average_similarity, 0.0);
        assert!(summary.files_identical);
        assert_eq!(summary.identical_pages, 0);
        assert_eq!(summary.different_pages, 0);
    }

    #[test]
    fn test_compare_length_is_max_of_inputs() {
        let a = pages(&["one", "two", "three"]);
        let b = pages(&["one"]);
        assert_eq!(compare_pages(&a, &b).len(), 3);
        assert_eq!(compare_pages(&b, &a).len(), 3);
        assert_eq!(compare_pages(&a, &[]).len(), 3);
    }

    #[test]
    fn test_similar_but_different_page() {
        let a = pages(&["Hello world"]);
        let b = pages(&["Hello there"]);
        let comparisons = compare_pages(&a, &b);

        assert_eq!(comparisons.len(), 1);
        let comp = &comparisons[0];
        assert!(!comp.identical);
        assert!(comp.similarity > 0.0 && comp.similarity < 100.0);
        assert!(comp.diff.contains(&"-Hello world".to_string()));
        assert!(comp.diff.contains(&"+Hello there".to_string()));
    }

    #[test]
    fn test_missing_trailing_page_reads_as_empty() {
        let a = pages(&["A", "B"]);
        let b = pages(&["A"]);
        let comparisons = compare_pages(&a, &b);

        assert_eq!(comparisons.len(), 2);
        assert!(comparisons[0].identical);
        assert_eq!(comparisons[0].similarity, 100.0);

        assert!(!comparisons[1].identical);
        assert_eq!(comparisons[1].text_b, "");
        assert_eq!(comparisons[1].similarity, 0.0);
    }

    #[test]
    fn test_two_empty_pages_are_fully_similar() {
        assert_eq!(similarity_score("", ""), 100.0);
    }

    #[test]
    fn test_similarity_symmetry() {
        let forward = similarity_score("page one text", "page 1 text");
        let backward = similarity_score("page 1 text", "page one text");
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_summary_counts_are_consistent() {
        let a = pages(&["same", "left only", "shared tail"]);
        let b = pages(&["same", "right only"]);
        let comparisons = compare_pages(&a, &b);
        let summary = summarize(&comparisons, a.len(), b.len());

        assert_eq!(
            summary.identical_pages + summary.different_pages,
            comparisons.len()
        );
        assert_eq!(summary.identical_pages, 1);
        assert!(!summary.files_identical);
        assert_eq!(summary.total_pages_a, 3);
        assert_eq!(summary.total_pages_b, 2);
    }

    #[test]
    fn test_identical_pages_but_unequal_counts_not_identical_files() {
        // Both compare entries identical would need padding to be identical
        // too, which an empty trailing page can produce
        let a = pages(&["same", ""]);
        let b = pages(&["same"]);
        let comparisons = compare_pages(&a, &b);
        assert!(comparisons.iter().all(|c| c.identical));

        let summary = summarize(&comparisons, 2, 1);
        assert!(!summary.files_identical);
    }
}
