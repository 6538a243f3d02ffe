//! Pull-based operator contract.

use crate::error::MatchError;
use crate::record::schema::Schema;
use crate::record::tuple::Tuple;

/// A pull-based record operator.
///
/// Lifecycle: `open` exactly once, then `get_next` until it returns `None`,
/// then `close`. One `get_next` call processes one record to completion;
/// nothing suspends mid-tuple.
pub trait Operator {
    fn open(&mut self) -> Result<(), MatchError>;

    /// Next output record, or `None` once the input is exhausted.
    fn get_next(&mut self) -> Result<Option<Tuple>, MatchError>;

    fn close(&mut self) -> Result<(), MatchError>;

    /// Schema of the records this operator emits. Only valid after `open`.
    fn output_schema(&self) -> Result<&Schema, MatchError>;
}
