//! Adjacency join: stitching segment matches whose boundaries meet.

use std::collections::HashMap;

/// Join per-segment match lists, given in source order, into full matches.
///
/// A pair `(s, m)` from one list combines with `(m, e)` from the next list
/// into `(s, e)`; the fold runs left to right over the source order, so the
/// output covers the concatenation of all segments. All combinations are
/// produced, the result is sorted by `(start, end)` and deduplicated.
pub fn join(lists: &[Vec<(usize, usize)>]) -> Vec<(usize, usize)> {
    let Some(first) = lists.first() else {
        return Vec::new();
    };
    let mut acc = first.clone();
    for next in &lists[1..] {
        if acc.is_empty() {
            return Vec::new();
        }
        let mut by_start: HashMap<usize, Vec<usize>> = HashMap::new();
        for &(start, end) in next {
            by_start.entry(start).or_default().push(end);
        }
        let mut joined = Vec::new();
        for &(start, middle) in &acc {
            if let Some(ends) = by_start.get(&middle) {
                joined.extend(ends.iter().map(|&end| (start, end)));
            }
        }
        acc = joined;
    }
    acc.sort_unstable();
    acc.dedup();
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_spans_whose_boundaries_meet() {
        let a = vec![(1, 2)];
        let b = vec![(2, 3)];
        assert_eq!(join(&[a, b]), vec![(1, 3)]);
    }

    #[test]
    fn non_adjacent_spans_do_not_combine() {
        let a = vec![(0, 2)];
        let b = vec![(3, 4)];
        assert!(join(&[a, b]).is_empty());
    }

    #[test]
    fn folds_over_more_than_two_lists() {
        let a = vec![(0, 1), (5, 6)];
        let b = vec![(1, 2), (6, 7)];
        let c = vec![(2, 4)];
        assert_eq!(join(&[a, b, c]), vec![(0, 4)]);
    }

    #[test]
    fn produces_every_combination() {
        let a = vec![(0, 1), (2, 3)];
        let b = vec![(1, 2), (3, 5), (3, 6)];
        assert_eq!(join(&[a, b]), vec![(0, 2), (2, 5), (2, 6)]);
    }

    #[test]
    fn empty_input_yields_no_matches() {
        assert!(join(&[]).is_empty());
        assert!(join(&[vec![(0, 1)], vec![]]).is_empty());
    }
}
