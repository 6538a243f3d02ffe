//! The join engine: combining per-segment matches into full-regex spans.
//!
//! - `adjacency`: all-pairs stitching of boundary-adjacent segment matches
//! - `star_gap`: anchors on both sides of an unbounded-length run
//! - `reverse_anchored`: right-to-left extension from a right anchor
//!
//! `JoinEngine` owns the decomposed segments, picks the join shape once at
//! setup, orders probes by observed selectivity per tuple, and keeps the
//! planner graph current.

pub mod adjacency;
pub mod reverse_anchored;
pub mod star_gap;

#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::ops::Range;

use crate::decompose::complexity::has_lazy_repetition;
use crate::decompose::{decompose, ComplexityLevel, Decomposition};
use crate::error::MatchError;
use crate::plan::ExecutionGraph;
use crate::predicate::RegexPredicate;
use crate::types::Span;

use star_gap::GapPattern;

/// Number of tuples statistics are collected over. Past this horizon the
/// evaluation order and planner graph stop changing.
pub const MAX_TUPLES_FOR_STAT_COLLECTION: usize = 1000;

/// Tuples over which forward and reverse-anchored evaluation alternate so
/// both directions acquire cost estimates.
const DIRECTION_WARM_UP_TUPLES: usize = 10;

/// Join shape selected for a decomposition, fixed at setup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanShape {
    /// No decomposition benefit: run the whole-regex pattern directly.
    Single,
    /// Low/Medium segments only, stitched at their boundaries.
    Adjacency,
    /// Anchor runs on both sides of exactly one High-complexity run.
    StarGap {
        left: Range<usize>,
        gap: Range<usize>,
        right: Range<usize>,
    },
}

/// Per-predicate matching engine. Created once at operator setup; probes,
/// statistics and the planner graph accumulate across tuples.
#[derive(Debug)]
pub struct JoinEngine {
    pub(crate) decomposition: Decomposition,
    shape: PlanShape,
    gap: Option<GapPattern>,
    graph: ExecutionGraph,
    /// Evaluation order over the probed segment ids.
    order: Vec<usize>,
    /// Most effective segment of the previous tuple.
    prev_best: Option<usize>,
    tuples_seen: usize,
}

impl JoinEngine {
    pub fn new(predicate: &RegexPredicate) -> Result<Self, MatchError> {
        let decomposition = decompose(predicate)?;
        let shape = detect_shape(&decomposition);
        let gap = match &shape {
            PlanShape::StarGap { gap, .. } => Some(GapPattern::compile(
                &decomposition.segments[gap.clone()],
                predicate.ignore_case,
            )?),
            _ => None,
        };

        let mut graph = ExecutionGraph::new();
        for seg in &decomposition.segments {
            if seg.complexity != ComplexityLevel::High {
                graph.add_node(seg.original_order);
            }
        }

        let order = match &shape {
            PlanShape::Single => Vec::new(),
            PlanShape::Adjacency => (0..decomposition.segments.len()).collect(),
            PlanShape::StarGap { left, right, .. } => {
                left.clone().chain(right.clone()).collect()
            }
        };

        log::debug!(
            "plan for '{}': {:?}, {} probed segments",
            predicate.regex,
            shape,
            order.len()
        );

        Ok(Self {
            decomposition,
            shape,
            gap,
            graph,
            order,
            prev_best: None,
            tuples_seen: 0,
        })
    }

    pub fn shape(&self) -> &PlanShape {
        &self.shape
    }

    pub fn graph(&self) -> &ExecutionGraph {
        &self.graph
    }

    /// Match one field value, returning all spans for this predicate.
    pub fn match_field(&mut self, attribute: &str, text: &str) -> Vec<Span> {
        let positions = match self.shape.clone() {
            PlanShape::Single => self.match_single(text),
            PlanShape::Adjacency => self.match_adjacency(text),
            PlanShape::StarGap { left, right, .. } => self.match_star_gap(text, left, right),
        };
        self.tuples_seen += 1;
        let pattern = self.decomposition.main.predicate.regex.as_str();
        positions
            .into_iter()
            .map(|(start, end)| Span::new(attribute, start, end, pattern, &text[start..end]))
            .collect()
    }

    fn collecting(&self) -> bool {
        self.tuples_seen < MAX_TUPLES_FOR_STAT_COLLECTION
    }

    fn match_single(&mut self, text: &str) -> Vec<(usize, usize)> {
        if self.collecting() {
            self.decomposition.main.probe_leftmost(text)
        } else {
            self.decomposition.main.find_leftmost(text)
        }
    }

    fn match_adjacency(&mut self, text: &str) -> Vec<(usize, usize)> {
        self.refresh_order();
        if self.use_reverse_anchored() {
            return self.match_reverse_anchored(text);
        }
        let Some(lists) = self.probe_ordered(text) else {
            return Vec::new();
        };
        adjacency::join(&lists)
    }

    fn match_star_gap(
        &mut self,
        text: &str,
        left: Range<usize>,
        right: Range<usize>,
    ) -> Vec<(usize, usize)> {
        self.refresh_order();
        let Some(lists) = self.probe_ordered(text) else {
            return Vec::new();
        };
        let left_spans = adjacency::join(&lists[left]);
        if left_spans.is_empty() {
            return Vec::new();
        }
        let right_spans = adjacency::join(&lists[right]);
        if right_spans.is_empty() {
            return Vec::new();
        }
        let Some(gap) = &self.gap else {
            return Vec::new();
        };
        star_gap::join(text, &left_spans, &right_spans, gap)
    }

    /// Probe every segment in `order`, short-circuiting on the first one
    /// with no matches. Returns the match lists indexed by segment id, or
    /// `None` when some segment failed.
    fn probe_ordered(&mut self, text: &str) -> Option<Vec<Vec<(usize, usize)>>> {
        let collecting = self.collecting();
        let mut lists = vec![Vec::new(); self.decomposition.segments.len()];
        let mut best: Option<(usize, usize)> = None;
        for idx in 0..self.order.len() {
            let id = self.order[idx];
            let seg = &mut self.decomposition.segments[id];
            let matches = if collecting {
                seg.probe_all(text)
            } else {
                seg.find_all(text)
            };
            let count = matches.len();
            if best.map_or(true, |(c, b)| count < c || (count == c && id < b)) {
                best = Some((count, id));
            }
            let failed = matches.is_empty();
            lists[id] = matches;
            if failed {
                self.note_effective(id);
                return None;
            }
        }
        if let Some((_, id)) = best {
            self.note_effective(id);
        }
        Some(lists)
    }

    fn match_reverse_anchored(&mut self, text: &str) -> Vec<(usize, usize)> {
        let collecting = self.collecting();
        let right = &mut self.decomposition.segments[1];
        let right_matches = if collecting {
            right.probe_all(text)
        } else {
            right.find_all(text)
        };
        if right_matches.is_empty() {
            self.note_effective(1);
            return Vec::new();
        }
        let spans = reverse_anchored::join(
            text,
            &mut self.decomposition.segments[0],
            &right_matches,
            collecting,
        );
        let effective = if spans.len() < right_matches.len() { 0 } else { 1 };
        self.note_effective(effective);
        spans
    }

    /// Re-sort the evaluation order by ascending selectivity (cheapest to
    /// fail first), ties by source order, then let the planner graph pull
    /// its favorite follow-up of the last effective segment to the front.
    fn refresh_order(&mut self) {
        if !self.collecting() {
            return;
        }
        let segments = &self.decomposition.segments;
        self.order.sort_by(|&a, &b| {
            segments[a]
                .selectivity
                .partial_cmp(&segments[b].selectivity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(&b))
        });
        if let Some(prev) = self.prev_best {
            if let Some(next) = self.graph.best_successor(prev) {
                if let Some(pos) = self.order.iter().position(|&id| id == next) {
                    let id = self.order.remove(pos);
                    self.order.insert(0, id);
                }
            }
        }
    }

    /// Record which segment proved most effective for this tuple and raise
    /// the planner edge from the previous one.
    fn note_effective(&mut self, id: usize) {
        if !self.collecting() {
            return;
        }
        if let Some(prev) = self.prev_best {
            if prev != id {
                self.graph.raise_edge(prev, id, 1.0);
            }
        }
        self.prev_best = Some(id);
    }

    /// Right-anchor driven evaluation for two-segment plans. Only taken when
    /// the left segment has a fixed match length, which keeps the result
    /// identical to the forward join.
    fn use_reverse_anchored(&self) -> bool {
        let segments = &self.decomposition.segments;
        if segments.len() != 2 {
            return false;
        }
        let left = &segments[0];
        if left.fixed_len().is_none() || left.reverse.is_none() {
            return false;
        }
        if self.tuples_seen < DIRECTION_WARM_UP_TUPLES {
            return self.tuples_seen % 2 == 1;
        }
        left.is_reverse_execution_faster()
    }

    #[cfg(test)]
    pub(crate) fn segments_mut(&mut self) -> &mut [crate::decompose::SubRegex] {
        &mut self.decomposition.segments
    }
}

/// Pick the join shape from the segment complexity sequence.
///
/// Plans with more than one High run, a High run touching either end of the
/// regex, or lazy quantifiers inside the gap fall back to the synthetic
/// whole-regex plan.
fn detect_shape(decomposition: &Decomposition) -> PlanShape {
    if !decomposition.is_decomposed() {
        return PlanShape::Single;
    }
    let segments = &decomposition.segments;
    let n = segments.len();
    let Some(start) = segments
        .iter()
        .position(|s| s.complexity == ComplexityLevel::High)
    else {
        return PlanShape::Adjacency;
    };
    let mut end = start;
    while end < n && segments[end].complexity == ComplexityLevel::High {
        end += 1;
    }
    if segments[end..]
        .iter()
        .any(|s| s.complexity == ComplexityLevel::High)
    {
        return PlanShape::Single;
    }
    if start == 0 || end == n {
        return PlanShape::Single;
    }
    for seg in &segments[start..end] {
        match regex_syntax::Parser::new().parse(&seg.predicate.regex) {
            Ok(hir) if !has_lazy_repetition(&hir) => {}
            _ => return PlanShape::Single,
        }
    }
    PlanShape::StarGap {
        left: 0..start,
        gap: start..end,
        right: end..n,
    }
}
