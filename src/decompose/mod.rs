//! Regex decomposition: segments, complexity, structural reversal.
//!
//! - `complexity`: Low/Medium/High classification of subexpressions
//! - `reverse`: structural reversal for right-to-left matching
//! - `sub_regex`: the compiled segment model with its statistics
//! - `decomposer`: the top-level concatenation split

pub mod complexity;
pub mod decomposer;
pub mod reverse;
pub mod sub_regex;

pub use complexity::ComplexityLevel;
pub use decomposer::{decompose, Decomposition};
pub use sub_regex::SubRegex;
