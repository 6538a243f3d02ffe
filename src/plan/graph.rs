//! Execution graph over segments.
//!
//! Nodes are segments identified by `original_order`; High-complexity
//! segments are excluded because their unbounded match length makes them
//! useless as scan anchors. Edge weights accumulate how often probing one
//! segment right after another proved effective; they are raised, never
//! removed, once per tuple.

use std::collections::HashMap;

/// Directed graph with weighted edges, keyed by segment ids.
#[derive(Debug, Clone, Default)]
pub struct ExecutionGraph {
    nodes: Vec<usize>,
    edges: HashMap<(usize, usize), f64>,
}

impl ExecutionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: usize) {
        if !self.nodes.contains(&id) {
            self.nodes.push(id);
        }
    }

    pub fn has_node(&self, id: usize) -> bool {
        self.nodes.contains(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add `delta` to the weight of `from → to`, creating the edge if
    /// needed. Unknown endpoints are ignored.
    pub fn raise_edge(&mut self, from: usize, to: usize, delta: f64) {
        if from == to || !self.has_node(from) || !self.has_node(to) {
            return;
        }
        *self.edges.entry((from, to)).or_insert(0.0) += delta;
    }

    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        self.edges.get(&(from, to)).copied()
    }

    /// Strongest outgoing edge of `from`: the successor most often observed
    /// as the effective follow-up. Ties resolve to the smaller id so the
    /// choice is deterministic.
    pub fn best_successor(&self, from: usize) -> Option<usize> {
        self.edges
            .iter()
            .filter(|((f, _), _)| *f == from)
            .max_by(|((_, a), wa), ((_, b), wb)| {
                wa.partial_cmp(wb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(b.cmp(a))
            })
            .map(|((_, to), _)| *to)
    }
}
