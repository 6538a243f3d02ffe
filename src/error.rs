//! Error types surfaced by the matcher and its setup path.

use thiserror::Error;

/// Errors raised by decomposition, planning and the matcher operator.
///
/// Everything here is a deterministic function of configuration or schema:
/// there is nothing to retry. Absence of a match is never an error; it is an
/// empty span list.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("input operator not specified")]
    MissingInput,

    #[error("attribute '{0}' does not exist in the input schema")]
    AttributeNotFound(String),

    #[error("output attribute '{0}' already exists in the input schema")]
    AttributeCollision(String),

    #[error("invalid regex '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("regex '{0}' can never match any input")]
    UnmatchableRegex(String),

    #[error("labeled regex '{0}' is handled by the labeled-regex processor, not this operator")]
    LabeledRegex(String),

    #[error("attribute '{0}' is not a string or text attribute")]
    NotTextAttribute(String),

    #[error("operator is not open")]
    NotOpen,

    #[error("operator is already closed")]
    AlreadyClosed,
}

impl MatchError {
    pub(crate) fn invalid_regex(pattern: &str, reason: impl ToString) -> Self {
        MatchError::InvalidRegex {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
