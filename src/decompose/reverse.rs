//! Structural reversal of regex subexpressions.
//!
//! The reverse of a pattern matches the textually reversed input: if `P`
//! matches `T[s..e]`, then `reverse(P)` matches `reverse(T)[len-e..len-s]`.
//! Reversal is performed on the parsed expression, not on a compiled
//! automaton, so the result can be rendered back to pattern text and
//! compiled like any other regex.

use regex_syntax::hir::{Capture, Hir, HirKind, Look, Repetition};

use crate::error::MatchError;

/// Build the structural reverse of a parsed subexpression.
pub fn reverse_hir(hir: &Hir) -> Result<Hir, MatchError> {
    Ok(match hir.kind() {
        HirKind::Empty => Hir::empty(),
        HirKind::Literal(lit) => {
            let text = std::str::from_utf8(&lit.0)
                .map_err(|e| MatchError::invalid_regex(&hir.to_string(), e))?;
            let reversed: String = text.chars().rev().collect();
            Hir::literal(reversed.into_bytes().into_boxed_slice())
        }
        HirKind::Class(class) => Hir::class(class.clone()),
        HirKind::Look(look) => Hir::look(reverse_look(*look)),
        HirKind::Repetition(rep) => Hir::repetition(Repetition {
            min: rep.min,
            max: rep.max,
            greedy: rep.greedy,
            sub: Box::new(reverse_hir(&rep.sub)?),
        }),
        HirKind::Capture(cap) => Hir::capture(Capture {
            index: cap.index,
            name: cap.name.clone(),
            sub: Box::new(reverse_hir(&cap.sub)?),
        }),
        HirKind::Concat(subs) => {
            let reversed: Result<Vec<_>, _> = subs.iter().rev().map(reverse_hir).collect();
            Hir::concat(reversed?)
        }
        HirKind::Alternation(subs) => {
            let reversed: Result<Vec<_>, _> = subs.iter().map(reverse_hir).collect();
            Hir::alternation(reversed?)
        }
    })
}

/// Mirror a look-around assertion. Anchors and word-boundary edges swap
/// sides; symmetric assertions are unchanged.
fn reverse_look(look: Look) -> Look {
    match look {
        Look::Start => Look::End,
        Look::End => Look::Start,
        Look::StartLF => Look::EndLF,
        Look::EndLF => Look::StartLF,
        Look::StartCRLF => Look::EndCRLF,
        Look::EndCRLF => Look::StartCRLF,
        Look::WordStartAscii => Look::WordEndAscii,
        Look::WordEndAscii => Look::WordStartAscii,
        Look::WordStartUnicode => Look::WordEndUnicode,
        Look::WordEndUnicode => Look::WordStartUnicode,
        Look::WordStartHalfAscii => Look::WordEndHalfAscii,
        Look::WordEndHalfAscii => Look::WordStartHalfAscii,
        Look::WordStartHalfUnicode => Look::WordEndHalfUnicode,
        Look::WordEndHalfUnicode => Look::WordStartHalfUnicode,
        symmetric @ (Look::WordAscii
        | Look::WordAsciiNegate
        | Look::WordUnicode
        | Look::WordUnicodeNegate) => symmetric,
    }
}

/// Reverse a pattern string, returning the reversed pattern's text.
pub fn reverse_pattern(pattern: &str) -> Result<String, MatchError> {
    let hir = regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|e| MatchError::invalid_regex(pattern, e))?;
    Ok(reverse_hir(&hir)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn reversed(pattern: &str) -> Regex {
        Regex::new(&reverse_pattern(pattern).unwrap()).unwrap()
    }

    fn rev(text: &str) -> String {
        text.chars().rev().collect()
    }

    #[test]
    fn literal_reversal() {
        let re = reversed("abc");
        assert!(re.is_match("cba"));
        assert!(!re.is_match("abc"));
    }

    #[test]
    fn alternation_reversal() {
        let re = reversed("ab|cde");
        assert!(re.is_match("ba"));
        assert!(re.is_match("edc"));
        assert!(!re.is_match("ab"));
    }

    #[test]
    fn repetition_and_class_reversal() {
        let re = reversed("a[0-9]{2}z");
        assert!(re.is_match(&rev("a42z")));
        assert!(!re.is_match("a42z"));
    }

    #[test]
    fn anchors_swap_sides() {
        let re = reversed("^ab");
        // start anchor becomes an end anchor in reversed space
        assert!(re.is_match("xba"));
        assert!(!re.is_match("bax"));
    }

    #[test]
    fn forward_and_reverse_matches_mirror_positions() {
        // any forward match at [s, e) corresponds to a reverse match at
        // [len-e, len-s) in the reversed text
        let pattern = "b[cd]d";
        let text = "abcdbdd";
        let forward = Regex::new(pattern).unwrap();
        let reverse = reversed(pattern);
        let rev_text = rev(text);
        for m in forward.find_iter(text) {
            let (rs, re_) = (text.len() - m.end(), text.len() - m.start());
            let hit = reverse
                .find_iter(&rev_text)
                .any(|r| r.start() == rs && r.end() == re_);
            assert!(hit, "no mirrored match for {:?}", (m.start(), m.end()));
        }
    }

    #[test]
    fn multibyte_literals_reverse_by_char() {
        let re = reversed("héllo");
        assert!(re.is_match(&rev("héllo")));
    }
}
