//! Splitting a regex into its top-level concatenation segments.

use regex_syntax::hir::{Hir, HirKind};

use crate::decompose::complexity::classify;
use crate::decompose::reverse::reverse_hir;
use crate::decompose::sub_regex::SubRegex;
use crate::error::MatchError;
use crate::predicate::RegexPredicate;

/// Result of decomposing one regex.
///
/// `segments` partitions the source regex at its top-level concatenation
/// boundaries, in source order; it is empty when the top-level operator is
/// not a concatenation (nothing to decompose). `main` is the synthetic
/// whole-regex segment kept as the no-decomposition fallback plan.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub segments: Vec<SubRegex>,
    pub main: SubRegex,
}

impl Decomposition {
    /// Whether multi-segment matching is possible for this regex.
    pub fn is_decomposed(&self) -> bool {
        self.segments.len() > 1
    }
}

/// Decompose the predicate's regex. Fails before any tuple is processed if
/// the regex does not parse or can never match.
pub fn decompose(predicate: &RegexPredicate) -> Result<Decomposition, MatchError> {
    let hir = parse(&predicate.regex)?;
    let main = build_segment(predicate, &predicate.regex, &hir, 0, false)?;

    let segments = match hir.kind() {
        HirKind::Concat(subs) if subs.len() > 1 => {
            let mut segments = Vec::with_capacity(subs.len());
            for (order, sub) in subs.iter().enumerate() {
                let text = sub.to_string();
                segments.push(build_segment(predicate, &text, sub, order, true)?);
            }
            log::debug!(
                "decomposed '{}' into {} segments",
                predicate.regex,
                segments.len()
            );
            segments
        }
        _ => {
            log::debug!("regex '{}' has no top-level concatenation", predicate.regex);
            Vec::new()
        }
    };

    Ok(Decomposition { segments, main })
}

fn parse(pattern: &str) -> Result<Hir, MatchError> {
    regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|e| MatchError::invalid_regex(pattern, e))
}

fn build_segment(
    predicate: &RegexPredicate,
    text: &str,
    hir: &Hir,
    order: usize,
    with_reverse: bool,
) -> Result<SubRegex, MatchError> {
    let complexity = classify(hir);
    let props = hir.properties();
    let min_len = props
        .minimum_len()
        .ok_or_else(|| MatchError::UnmatchableRegex(text.to_string()))?;
    let max_len = props.maximum_len();

    let segment = SubRegex::compile(
        predicate.sub_predicate(text),
        order,
        complexity,
        min_len,
        max_len,
    )?;

    if !with_reverse {
        return Ok(segment);
    }
    let reversed_text = reverse_hir(hir)?.to_string();
    let reverse = SubRegex::compile(
        predicate.sub_predicate(reversed_text),
        order,
        complexity,
        min_len,
        max_len,
    )?;
    Ok(segment.with_reverse(reverse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::complexity::ComplexityLevel;

    fn predicate(regex: &str) -> RegexPredicate {
        RegexPredicate::new(regex, vec!["content".to_string()])
    }

    #[test]
    fn concatenation_splits_into_ordered_segments() {
        let d = decompose(&predicate("a.*c")).unwrap();
        assert!(d.is_decomposed());
        assert_eq!(d.segments.len(), 3);
        let levels: Vec<_> = d.segments.iter().map(|s| s.complexity).collect();
        assert_eq!(
            levels,
            vec![
                ComplexityLevel::Low,
                ComplexityLevel::High,
                ComplexityLevel::Low
            ]
        );
        for (i, seg) in d.segments.iter().enumerate() {
            assert_eq!(seg.original_order, i);
        }
        assert_eq!(d.segments[0].min_len, 1);
        assert_eq!(d.segments[0].max_len, Some(1));
        assert_eq!(d.segments[1].min_len, 0);
        assert_eq!(d.segments[1].max_len, None);
    }

    #[test]
    fn top_level_alternation_is_not_decomposed() {
        let d = decompose(&predicate("ab|cd")).unwrap();
        assert!(!d.is_decomposed());
        assert!(d.segments.is_empty());
    }

    #[test]
    fn segments_carry_reverse_twins() {
        let d = decompose(&predicate("[a-z]ing")).unwrap();
        assert_eq!(d.segments.len(), 2);
        for seg in &d.segments {
            let rev = seg.reverse.as_ref().expect("reverse twin");
            assert_eq!(rev.original_order, seg.original_order);
            assert_eq!(rev.complexity, seg.complexity);
        }
        // the reversed literal segment matches reversed text
        let rev = d.segments[1].reverse.as_ref().unwrap();
        assert_eq!(rev.find_all("gni"), vec![(0, 3)]);
    }

    #[test]
    fn decomposition_is_deterministic() {
        let a = decompose(&predicate("a[0-9]{2}.*end")).unwrap();
        let b = decompose(&predicate("a[0-9]{2}.*end")).unwrap();
        assert_eq!(a.segments.len(), b.segments.len());
        for (x, y) in a.segments.iter().zip(&b.segments) {
            assert_eq!(x.original_order, y.original_order);
            assert_eq!(x.complexity, y.complexity);
            assert_eq!(x.min_len, y.min_len);
            assert_eq!(x.max_len, y.max_len);
            assert_eq!(x.predicate.regex, y.predicate.regex);
        }
    }

    #[test]
    fn invalid_regex_is_a_setup_error() {
        assert!(matches!(
            decompose(&predicate("a(")),
            Err(MatchError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn main_segment_covers_the_whole_regex() {
        let d = decompose(&predicate("ab?c")).unwrap();
        assert_eq!(d.main.predicate.regex, "ab?c");
        assert_eq!(d.main.complexity, ComplexityLevel::High);
        assert_eq!(d.main.min_len, 2);
        assert_eq!(d.main.max_len, Some(3));
    }
}
