//! Regex predicate: the immutable query specification for one matcher.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Pattern recognizing a `<label>` directive: anything between brackets that
/// contains no bracket or escape character. `<drug\>1` is not a label because
/// the closing bracket is escaped.
const LABEL_PATTERN: &str = r"<[^<>\\]*>";

/// Pattern recognizing qualifier characters outside labels.
const QUALIFIER_PATTERN: &str = r"[^a-zA-Z0-9<> ]";

/// Kind of regex, by label content. Only `NoLabels` regexes are handled by
/// this crate; labeled variants belong to the labeled-regex processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexKind {
    NoLabels,
    LabeledWithoutQualifier,
    LabeledWithQualifiers,
}

/// Query specification for one regex matcher instance.
///
/// Identity for decomposition purposes is the regex text alone; the attribute
/// list and flags only steer where matches are searched and how results are
/// attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexPredicate {
    pub regex: String,
    /// Attributes to search. Each is probed independently and the resulting
    /// spans are unioned.
    pub attribute_names: Vec<String>,
    #[serde(default)]
    pub ignore_case: bool,
    /// Name of the list attribute the spans are attached under. `None`
    /// disables attachment: matching still runs and filters tuples, but the
    /// spans are discarded at the output boundary.
    #[serde(default)]
    pub span_list_attribute: Option<String>,
}

impl RegexPredicate {
    pub fn new(regex: impl Into<String>, attribute_names: Vec<String>) -> Self {
        Self {
            regex: regex.into(),
            attribute_names,
            ignore_case: false,
            span_list_attribute: None,
        }
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_span_list_attribute(mut self, name: impl Into<String>) -> Self {
        self.span_list_attribute = Some(name.into());
        self
    }

    /// Derive the predicate for one segment of this regex, sharing the
    /// attribute list and flags.
    pub fn sub_predicate(&self, regex: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            attribute_names: self.attribute_names.clone(),
            ignore_case: self.ignore_case,
            span_list_attribute: self.span_list_attribute.clone(),
        }
    }

    /// Classify the regex by label content.
    pub fn kind(&self) -> RegexKind {
        static LABEL: OnceLock<Regex> = OnceLock::new();
        static QUALIFIER: OnceLock<Regex> = OnceLock::new();
        let label = LABEL.get_or_init(|| Regex::new(LABEL_PATTERN).unwrap());
        if !label.is_match(&self.regex) {
            return RegexKind::NoLabels;
        }
        let qualifier = QUALIFIER.get_or_init(|| Regex::new(QUALIFIER_PATTERN).unwrap());
        if qualifier.is_match(&self.regex) {
            RegexKind::LabeledWithQualifiers
        } else {
            RegexKind::LabeledWithoutQualifier
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicate(regex: &str) -> RegexPredicate {
        RegexPredicate::new(regex, vec!["content".to_string()])
    }

    #[test]
    fn plain_regex_has_no_labels() {
        assert_eq!(predicate("a[0-9]+c").kind(), RegexKind::NoLabels);
        // escaped closing bracket is not a label
        assert_eq!(predicate(r"<drug\>1").kind(), RegexKind::NoLabels);
    }

    #[test]
    fn labeled_regex_kinds() {
        assert_eq!(
            predicate("<drug> cures <disease>").kind(),
            RegexKind::LabeledWithoutQualifier
        );
        assert_eq!(
            predicate("<drug>[0-9]+").kind(),
            RegexKind::LabeledWithQualifiers
        );
    }

    #[test]
    fn sub_predicate_shares_settings() {
        let p = predicate("abc").with_ignore_case(true);
        let sub = p.sub_predicate("a");
        assert_eq!(sub.regex, "a");
        assert!(sub.ignore_case);
        assert_eq!(sub.attribute_names, p.attribute_names);
    }
}
