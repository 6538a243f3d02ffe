//! Reverse-anchored join: extending right-anchor matches leftwards.

use std::time::Instant;

use crate::decompose::SubRegex;

/// Join driven from the right anchor.
///
/// For every right-anchor match the prefix before it is reversed and the
/// left segment's reverse pattern is matched anchored at offset 0; a reverse
/// match of length `n` translates back to the absolute start
/// `anchor_start - n`. The caller must ensure the left segment has a fixed
/// match length, which makes the result identical to the forward adjacency
/// join — direction is purely a cost decision.
///
/// While `collecting` is set, probes are recorded against the reverse twin's
/// statistics so the planner can compare both directions.
pub fn join(
    text: &str,
    left: &mut SubRegex,
    right_matches: &[(usize, usize)],
    collecting: bool,
) -> Vec<(usize, usize)> {
    let Some(reverse) = left.reverse.as_mut() else {
        return Vec::new();
    };
    let mut results = Vec::new();
    for &(right_start, right_end) in right_matches {
        let reversed_prefix: String = text[..right_start].chars().rev().collect();
        let started = Instant::now();
        let hit = reverse.match_prefix_len(&reversed_prefix);
        let cost = started.elapsed().as_secs_f64() * 1e6;
        if let Some(len) = hit {
            results.push((right_start - len, right_end));
        }
        if collecting {
            match hit {
                Some(_) => reverse.stats.add_success(cost, reversed_prefix.len()),
                None => reverse.stats.add_failure(cost, reversed_prefix.len()),
            }
            reverse.selectivity = reverse.stats.selectivity();
        }
    }
    results.sort_unstable();
    results.dedup();
    results
}
