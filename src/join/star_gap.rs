//! Star-gap join: anchor matches separated by an unbounded-length run.

use regex::{Regex, RegexBuilder};

use crate::decompose::SubRegex;
use crate::error::MatchError;

/// Compiled pattern for the High-complexity run between two anchors.
#[derive(Debug, Clone)]
pub struct GapPattern {
    pub source: String,
    exact: Regex,
}

impl GapPattern {
    /// Concatenate the run's segment sources into one pattern. Every operand
    /// is wrapped in a non-capturing group so alternations cannot leak
    /// across segment boundaries.
    pub fn compile(run: &[SubRegex], ignore_case: bool) -> Result<Self, MatchError> {
        let source: String = run
            .iter()
            .map(|seg| format!("(?:{})", seg.predicate.regex))
            .collect();
        let anchored = format!("^(?:{source})$");
        let exact = RegexBuilder::new(&anchored)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| MatchError::invalid_regex(&anchored, e))?;
        Ok(Self { source, exact })
    }

    /// Whether the whole slice is one gap match.
    pub fn matches_exactly(&self, slice: &str) -> bool {
        self.exact.is_match(slice)
    }
}

/// Join left-anchor and right-anchor matches across the gap.
///
/// Emulates the greedy leftmost-first semantics of the monolithic pattern:
/// left anchors are visited in order, each one extends to the rightmost
/// right-anchor start whose between-slice is exactly one gap match, and the
/// scan resumes past each emitted match. Both input lists must be sorted by
/// start offset.
pub fn join(
    text: &str,
    left: &[(usize, usize)],
    right: &[(usize, usize)],
    gap: &GapPattern,
) -> Vec<(usize, usize)> {
    let mut results = Vec::new();
    let mut cursor = 0;
    for &(left_start, left_end) in left {
        if left_start < cursor {
            // overlaps a match already emitted
            continue;
        }
        let mut chosen = None;
        for &(right_start, right_end) in right.iter().rev() {
            if right_start < left_end {
                break;
            }
            if gap.matches_exactly(&text[left_end..right_start]) {
                chosen = Some((left_start, right_end));
                break;
            }
        }
        if let Some((start, end)) = chosen {
            results.push((start, end));
            cursor = end;
        }
    }
    results
}
