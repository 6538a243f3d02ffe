pub mod decompose;
pub mod error;
pub mod join;
pub mod operator;
pub mod plan;
pub mod predicate;
pub mod record;
pub mod stats;
pub mod types;

pub use decompose::{decompose, ComplexityLevel, Decomposition, SubRegex};
pub use error::MatchError;
pub use join::{JoinEngine, PlanShape};
pub use operator::{RegexMatcher, TupleSource};
pub use plan::ExecutionGraph;
pub use predicate::{RegexKind, RegexPredicate};
pub use record::{Attribute, AttributeType, FieldValue, Operator, Schema, Tuple};
pub use stats::RegexStats;
pub use types::Span;
