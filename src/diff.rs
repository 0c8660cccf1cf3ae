//! Unified diff generation
//!
//! Produces classic unified-diff output over pre-split line slices: `---`/`+++`
//! file headers, `@@` hunk ranges, and `+`/`-`/` ` content lines. Lines are
//! expected with their endings preserved so the diff reproduces the input
//! byte-for-byte; two identical inputs produce no output at all.

use crate::matcher::{OpTag, SequenceMatcher};

/// Default number of unchanged lines shown around each change
pub const DEFAULT_CONTEXT: usize = 3;

/// Format one side of a `@@` hunk header.
///
/// Ranges are 1-based; a one-line range prints as a bare line number and an
/// empty range points at the line before the insertion.
fn format_range(start: usize, end: usize) -> String {
    let length = end - start;
    if length == 1 {
        return format!("{}", start + 1);
    }
    let beginning = if length == 0 { start } else { start + 1 };
    format!("{},{}", beginning, length)
}

/// Compute a unified diff between two line sequences.
///
/// Returns the diff as a list of output lines. Content lines carry whatever
/// line endings the input lines had; the `---`, `+++` and `@@` lines carry
/// none. Empty when the inputs are identical.
pub fn unified_diff(
    a: &[&str],
    b: &[&str],
    from_label: &str,
    to_label: &str,
    context: usize,
) -> Vec<String> {
    let matcher = SequenceMatcher::new(a, b);
    let mut output = Vec::new();

    for group in matcher.grouped_opcodes(context) {
        if output.is_empty() {
            output.push(format!("--- {}", from_label));
            output.push(format!("+++ {}", to_label));
        }

        let first = group.first().expect("group is never empty");
        let last = group.last().expect("group is never empty");
        output.push(format!(
            "@@ -{} +{} @@",
            format_range(first.a_start, last.a_end),
            format_range(first.b_start, last.b_end),
        ));

        for op in &group {
            match op.tag {
                OpTag::Equal => {
                    for line in &a[op.a_start..op.a_end] {
                        output.push(format!(" {}", line));
                    }
                }
                OpTag::Replace => {
                    for line in &a[op.a_start..op.a_end] {
                        output.push(format!("-{}", line));
                    }
                    for line in &b[op.b_start..op.b_end] {
                        output.push(format!("+{}", line));
                    }
                }
                OpTag::Delete => {
                    for line in &a[op.a_start..op.a_end] {
                        output.push(format!("-{}", line));
                    }
                }
                OpTag::Insert => {
                    for line in &b[op.b_start..op.b_end] {
                        output.push(format!("+{}", line));
                    }
                }
            }
        }
    }

    output
}

/// Split text into lines, keeping each line's ending attached
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}
