//! Minimal record layer shared by operators.
//!
//! - `schema`: attribute names and types plus setup-time checks
//! - `tuple`: records and field values
//! - `operator`: the pull-based operator contract

pub mod operator;
pub mod schema;
pub mod tuple;

pub use operator::Operator;
pub use schema::{Attribute, AttributeType, Schema};
pub use tuple::{FieldValue, Tuple};
