//! The segment model: one contiguous slice of the decomposed regex.

use std::time::Instant;

use regex::{Regex, RegexBuilder};

use crate::decompose::complexity::ComplexityLevel;
use crate::error::MatchError;
use crate::predicate::RegexPredicate;
use crate::stats::RegexStats;

/// One segment of the decomposed regex.
///
/// Segments are created once at setup and immutable afterwards except for
/// `stats` and `selectivity`, which accumulate across tuples for the
/// lifetime of one matcher instance. `original_order` is the segment's
/// position in the source regex and never changes, so adjacency between
/// segments can always be recovered after evaluation-order sorts.
#[derive(Debug, Clone)]
pub struct SubRegex {
    pub predicate: RegexPredicate,
    pub original_order: usize,
    pub complexity: ComplexityLevel,
    /// Structural lower bound on matched text length, in bytes.
    pub min_len: usize,
    /// Structural upper bound on matched text length; `None` when unbounded.
    pub max_len: Option<usize>,
    pattern: Regex,
    /// Start-anchored form, `^(?:pattern)`.
    anchored: Regex,
    pub stats: RegexStats,
    /// Cached `stats.selectivity()`, refreshed after every probe.
    pub selectivity: f64,
    /// Twin matching the textually reversed input, with its own stats.
    pub reverse: Option<Box<SubRegex>>,
}

impl SubRegex {
    pub fn compile(
        predicate: RegexPredicate,
        original_order: usize,
        complexity: ComplexityLevel,
        min_len: usize,
        max_len: Option<usize>,
    ) -> Result<Self, MatchError> {
        let pattern = compile_regex(&predicate.regex, predicate.ignore_case)?;
        let anchored = compile_regex(
            &format!("^(?:{})", predicate.regex),
            predicate.ignore_case,
        )?;
        let stats = RegexStats::new();
        let selectivity = stats.selectivity();
        Ok(Self {
            predicate,
            original_order,
            complexity,
            min_len,
            max_len,
            pattern,
            anchored,
            stats,
            selectivity,
            reverse: None,
        })
    }

    pub fn with_reverse(mut self, reverse: SubRegex) -> Self {
        self.reverse = Some(Box::new(reverse));
        self
    }

    /// Length of the match, when the segment can only match one length.
    pub fn fixed_len(&self) -> Option<usize> {
        match self.max_len {
            Some(max) if max == self.min_len => Some(max),
            _ => None,
        }
    }

    /// All match positions in `text`, including overlapping occurrences.
    /// Each occurrence carries the engine's preferred end for that start.
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        let mut at = 0;
        while let Some(m) = self.pattern.find_at(text, at) {
            out.push((m.start(), m.end()));
            // step one character past the match start so overlapping
            // occurrences are still visited
            at = match text[m.start()..].chars().next() {
                Some(c) => m.start() + c.len_utf8(),
                None => break,
            };
        }
        out
    }

    /// End offset of a match anchored at the very start of `text`, if any.
    pub fn match_prefix_len(&self, text: &str) -> Option<usize> {
        self.anchored.find(text).map(|m| m.end())
    }

    /// Standard non-overlapping leftmost-first iteration, as the compiled
    /// pattern alone would report matches. Used by the no-decomposition
    /// plan.
    pub fn find_leftmost(&self, text: &str) -> Vec<(usize, usize)> {
        self.pattern
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect()
    }

    /// Probe `text` with leftmost-first iteration, recording stats.
    pub fn probe_leftmost(&mut self, text: &str) -> Vec<(usize, usize)> {
        let started = Instant::now();
        let matches = self.find_leftmost(text);
        let cost = started.elapsed().as_secs_f64() * 1e6;
        if matches.is_empty() {
            self.stats.add_failure(cost, text.len());
        } else {
            self.stats.add_success(cost, text.len());
        }
        self.selectivity = self.stats.selectivity();
        matches
    }

    /// Probe `text`, recording cost and outcome in the segment's stats.
    pub fn probe_all(&mut self, text: &str) -> Vec<(usize, usize)> {
        let started = Instant::now();
        let matches = self.find_all(text);
        let cost = started.elapsed().as_secs_f64() * 1e6;
        if matches.is_empty() {
            self.stats.add_failure(cost, text.len());
        } else {
            self.stats.add_success(cost, text.len());
        }
        self.selectivity = self.stats.selectivity();
        matches
    }

    /// Expected probe cost, taking the cheaper direction when the reverse
    /// twin has collected data.
    pub fn expected_cost(&self) -> f64 {
        if self.is_reverse_execution_faster() {
            self.reverse.as_ref().map(|r| r.stats.expected_cost()).unwrap_or(0.0)
        } else {
            self.stats.expected_cost()
        }
    }

    pub fn is_reverse_execution_faster(&self) -> bool {
        match &self.reverse {
            // size() == 1 means only the seeded data point: nothing observed
            Some(rev) if rev.stats.size() > 1 => {
                rev.stats.expected_cost() < self.stats.expected_cost()
            }
            _ => false,
        }
    }

    /// Merge two adjacent segments into one compound segment. The merged
    /// complexity is the maximum of the inputs and the length bounds sum.
    pub fn combine(left: &SubRegex, right: &SubRegex) -> Result<SubRegex, MatchError> {
        let regex = format!("(?:{})(?:{})", left.predicate.regex, right.predicate.regex);
        let predicate = left.predicate.sub_predicate(regex);
        let complexity = left.complexity.max(right.complexity);
        let min_len = left.min_len + right.min_len;
        let max_len = match (left.max_len, right.max_len) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        };
        let order = left.original_order.min(right.original_order);
        let mut combined = SubRegex::compile(predicate, order, complexity, min_len, max_len)?;
        // reversed concatenation swaps the operand order
        if let (Some(lrev), Some(rrev)) = (&left.reverse, &right.reverse) {
            let rev_regex = format!(
                "(?:{})(?:{})",
                rrev.predicate.regex, lrev.predicate.regex
            );
            let rev_predicate = left.predicate.sub_predicate(rev_regex);
            let reverse = SubRegex::compile(rev_predicate, order, complexity, min_len, max_len)?;
            combined = combined.with_reverse(reverse);
        }
        Ok(combined)
    }
}

fn compile_regex(pattern: &str, ignore_case: bool) -> Result<Regex, MatchError> {
    RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| MatchError::invalid_regex(pattern, e))
}
