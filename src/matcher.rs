//! Greedy longest-matching-block sequence alignment
//!
//! The matcher repeatedly finds the longest run of elements common to both
//! sequences, then recurses on the pieces to the left and right of it. It is
//! generic over the element type so the same routine drives both the
//! character-level similarity ratio and the line-level diff.

use std::collections::HashMap;
use std::hash::Hash;

/// A maximal matching run: `a[a_start..a_start + size] == b[b_start..b_start + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// How a range of `a` relates to a range of `b` in the edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    /// Ranges are identical
    Equal,
    /// Range of `a` was replaced by range of `b`
    Replace,
    /// Range of `a` has no counterpart in `b`
    Delete,
    /// Range of `b` has no counterpart in `a`
    Insert,
}

/// One edit-script operation over half-open index ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

/// Pairwise sequence matcher over two element slices
///
/// Construction indexes every position of each element in `b`, so longest-match
/// lookup only ever scans positions where a match is possible.
pub struct SequenceMatcher<'a, T: Eq + Hash> {
    a: &'a [T],
    b: &'a [T],
    /// element -> ascending positions of that element in `b`
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, element) in b.iter().enumerate() {
            b2j.entry(element).or_default().push(j);
        }
        SequenceMatcher { a, b, b2j }
    }

    /// Find the longest matching run within `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
    ///
    /// Of all maximal runs, returns the one starting earliest in `a` (ties
    /// broken by earliest start in `b`), which keeps the output deterministic.
    pub fn find_longest_match(
        &self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> Match {
        let mut best = Match {
            a_start: a_lo,
            b_start: b_lo,
            size: 0,
        };

        // run_lengths[j] = length of the longest match ending at a[i], b[j];
        // rebuilt for each i from the lengths ending at the previous row.
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();
        for i in a_lo..a_hi {
            let mut new_run_lengths: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }
                    let length = if j > b_lo {
                        run_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                    } else {
                        1
                    };
                    new_run_lengths.insert(j, length);
                    if length > best.size {
                        best = Match {
                            a_start: i + 1 - length,
                            b_start: j + 1 - length,
                            size: length,
                        };
                    }
                }
            }
            run_lengths = new_run_lengths;
        }

        best
    }

    /// All matching runs, in ascending order, with adjacent runs merged and a
    /// zero-length sentinel at `(len(a), len(b))` appended.
    pub fn matching_blocks(&self) -> Vec<Match> {
        // Explicit work stack instead of recursion; depth is unbounded on
        // pathological inputs otherwise.
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut raw_blocks = Vec::new();

        while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
            let m = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            if m.size == 0 {
                continue;
            }
            raw_blocks.push(m);
            if a_lo < m.a_start && b_lo < m.b_start {
                pending.push((a_lo, m.a_start, b_lo, m.b_start));
            }
            if m.a_start + m.size < a_hi && m.b_start + m.size < b_hi {
                pending.push((m.a_start + m.size, a_hi, m.b_start + m.size, b_hi));
            }
        }

        raw_blocks.sort_unstable();

        // Merge runs that are adjacent in both sequences
        let mut blocks: Vec<Match> = Vec::with_capacity(raw_blocks.len() + 1);
        for m in raw_blocks {
            match blocks.last_mut() {
                Some(last)
                    if last.a_start + last.size == m.a_start
                        && last.b_start + last.size == m.b_start =>
                {
                    last.size += m.size;
                }
                _ => blocks.push(m),
            }
        }

        blocks.push(Match {
            a_start: self.a.len(),
            b_start: self.b.len(),
            size: 0,
        });
        blocks
    }

    /// Edit script describing how to turn `a` into `b`
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut opcodes = Vec::new();
        let (mut a_pos, mut b_pos) = (0, 0);

        for m in self.matching_blocks() {
            let tag = match (a_pos < m.a_start, b_pos < m.b_start) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                opcodes.push(Opcode {
                    tag,
                    a_start: a_pos,
                    a_end: m.a_start,
                    b_start: b_pos,
                    b_end: m.b_start,
                });
            }
            a_pos = m.a_start + m.size;
            b_pos = m.b_start + m.size;
            if m.size > 0 {
                opcodes.push(Opcode {
                    tag: OpTag::Equal,
                    a_start: m.a_start,
                    a_end: a_pos,
                    b_start: m.b_start,
                    b_end: b_pos,
                });
            }
        }

        opcodes
    }

    /// Opcodes grouped into hunks, with equal runs trimmed to `context`
    /// elements on either side of a change. Groups that contain no change are
    /// omitted.
    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<Opcode>> {
        let mut codes = self.opcodes();
        if codes.is_empty() {
            return Vec::new();
        }

        if let Some(first) = codes.first_mut() {
            if first.tag == OpTag::Equal {
                first.a_start = first.a_start.max(first.a_end.saturating_sub(context));
                first.b_start = first.b_start.max(first.b_end.saturating_sub(context));
            }
        }
        if let Some(last) = codes.last_mut() {
            if last.tag == OpTag::Equal {
                last.a_end = last.a_end.min(last.a_start + context);
                last.b_end = last.b_end.min(last.b_start + context);
            }
        }

        let mut groups = Vec::new();
        let mut group: Vec<Opcode> = Vec::new();
        for mut code in codes {
            // A long equal run ends one hunk and starts the next
            if code.tag == OpTag::Equal && code.a_end - code.a_start > 2 * context {
                group.push(Opcode {
                    tag: OpTag::Equal,
                    a_start: code.a_start,
                    a_end: code.a_end.min(code.a_start + context),
                    b_start: code.b_start,
                    b_end: code.b_end.min(code.b_start + context),
                });
                groups.push(std::mem::take(&mut group));
                code.a_start = code.a_start.max(code.a_end.saturating_sub(context));
                code.b_start = code.b_start.max(code.b_end.saturating_sub(context));
            }
            group.push(code);
        }
        if !(group.is_empty() || (group.len() == 1 && group[0].tag == OpTag::Equal)) {
            groups.push(group);
        }
        groups
    }

    /// Matching ratio in [0, 1]: `2 * matched / (len(a) + len(b))`.
    ///
    /// Two empty sequences are fully matching by definition.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matched as f64 / total as f64
    }
}
