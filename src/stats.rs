//! Online cost and selectivity statistics for one segment.

/// Z-score for a ~99% confidence interval.
const CONFIDENCE_Z: f64 = 2.58;

/// Lower bound for selectivity so a segment is never filtered out
/// permanently.
const SELECTIVITY_FLOOR: f64 = 0.001;

/// Running statistics for one segment, updated after every probe against a
/// tuple's field text.
///
/// Selectivity is the empirical probability that the segment's pattern
/// matches a probed field; it is always in `(0, 1]`. Costs are running
/// averages of the observed probe times, kept separately for successful and
/// failed probes.
#[derive(Debug, Clone)]
pub struct RegexStats {
    success_count: usize,
    failure_count: usize,
    success_cost: f64,
    failure_cost: f64,
    matching_src_len: f64,
}

impl RegexStats {
    pub fn new() -> Self {
        Self {
            // seed one success so selectivity never starts at absolute zero
            success_count: 1,
            failure_count: 0,
            success_cost: 0.0,
            failure_cost: 0.0,
            matching_src_len: 0.0,
        }
    }

    /// Record a probe that produced at least one match.
    pub fn add_success(&mut self, cost: f64, matching_src_len: usize) {
        if cost > 0.0 {
            self.success_cost = (self.success_cost * self.success_count as f64 + cost)
                / (self.success_count as f64 + 1.0);
        }
        self.success_count += 1;
        self.add_matching_src_len(matching_src_len);
    }

    /// Record a probe that produced no match.
    pub fn add_failure(&mut self, cost: f64, matching_src_len: usize) {
        if cost > 0.0 {
            self.failure_cost = (self.failure_cost * self.failure_count as f64 + cost)
                / (self.failure_count as f64 + 1.0);
        }
        self.failure_count += 1;
        self.add_matching_src_len(matching_src_len);
    }

    fn add_matching_src_len(&mut self, len: usize) {
        let n = self.size() as f64;
        self.matching_src_len =
            (self.matching_src_len * (n - 1.0).max(0.0) + len as f64) / n.max(1.0);
    }

    /// Number of recorded probes (including the seed success).
    pub fn size(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Empirical match probability, floored so it is never exactly zero.
    pub fn selectivity(&self) -> f64 {
        let selectivity = self.success_count as f64 / self.size() as f64;
        if selectivity == 0.0 {
            SELECTIVITY_FLOOR
        } else {
            selectivity
        }
    }

    /// Expected probe cost, weighting the success and failure averages by
    /// selectivity.
    pub fn expected_cost(&self) -> f64 {
        let s = self.selectivity();
        self.success_cost * s + self.failure_cost * (1.0 - s)
    }

    /// Half-width of the ~99% confidence interval around the selectivity.
    pub fn confidence(&self) -> f64 {
        let s = self.selectivity();
        CONFIDENCE_Z * (s * (1.0 - s) / self.size() as f64).sqrt()
    }

    /// Average length of the field text this segment has been probed
    /// against.
    pub fn matching_src_len(&self) -> f64 {
        self.matching_src_len
    }
}

impl Default for RegexStats {
    fn default() -> Self {
        Self::new()
    }
}
