//! Operators: the regex matcher and an in-memory source.

pub mod matcher;
pub mod source;

pub use matcher::RegexMatcher;
pub use source::TupleSource;
