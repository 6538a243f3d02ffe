//! Span of matched text with its originating attribute and pattern.

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` region of an attribute's text that matched a
/// pattern. Offsets are byte offsets on UTF-8 character boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Name of the attribute the match was found in.
    pub attribute: String,
    pub start: usize,
    pub end: usize,
    /// Source pattern the span originated from.
    pub pattern: String,
    /// The matched text, `field[start..end]`.
    pub text: String,
}

impl Span {
    pub fn new(
        attribute: impl Into<String>,
        start: usize,
        end: usize,
        pattern: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        debug_assert!(end >= start);
        Self {
            attribute: attribute.into(),
            start,
            end,
            pattern: pattern.into(),
            text: text.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.attribute == other.attribute && self.start < other.end && other.start < self.end
    }
}
