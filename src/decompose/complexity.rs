//! Structural complexity classification of regex subexpressions.

use regex_syntax::hir::{Hir, HirKind};
use serde::{Deserialize, Serialize};

/// How hard a subexpression is to anchor during multi-segment matching.
///
/// `Low` patterns match a fixed shape, `Medium` patterns a bounded range of
/// lengths, `High` patterns an unbounded range. The ordering is total:
/// `Low < Medium < High`, and merging two segments never lowers the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

/// Classify a parsed subexpression.
///
/// `*`, `+` or `?` anywhere at or under the expression makes it `High`.
/// Otherwise alternation, bounded repetition or capture groups make it
/// `Medium`. Everything else (literals, classes, look-arounds) is `Low`.
pub fn classify(hir: &Hir) -> ComplexityLevel {
    match hir.kind() {
        HirKind::Empty | HirKind::Literal(_) | HirKind::Class(_) | HirKind::Look(_) => {
            ComplexityLevel::Low
        }
        HirKind::Repetition(rep) => {
            if rep.max.is_none() || (rep.min == 0 && rep.max == Some(1)) {
                // star, plus, quest, or an open-ended {n,}
                ComplexityLevel::High
            } else {
                classify(&rep.sub).max(ComplexityLevel::Medium)
            }
        }
        HirKind::Capture(cap) => classify(&cap.sub).max(ComplexityLevel::Medium),
        HirKind::Alternation(subs) => subs
            .iter()
            .map(classify)
            .max()
            .unwrap_or(ComplexityLevel::Low)
            .max(ComplexityLevel::Medium),
        HirKind::Concat(subs) => subs
            .iter()
            .map(classify)
            .max()
            .unwrap_or(ComplexityLevel::Low),
    }
}

/// Whether any repetition under `hir` is lazy. Star-gap planning only
/// emulates greedy gap semantics, so lazy gaps force the fallback plan.
pub fn has_lazy_repetition(hir: &Hir) -> bool {
    match hir.kind() {
        HirKind::Empty | HirKind::Literal(_) | HirKind::Class(_) | HirKind::Look(_) => false,
        HirKind::Repetition(rep) => !rep.greedy || has_lazy_repetition(&rep.sub),
        HirKind::Capture(cap) => has_lazy_repetition(&cap.sub),
        HirKind::Concat(subs) | HirKind::Alternation(subs) => {
            subs.iter().any(has_lazy_repetition)
        }
    }
}
