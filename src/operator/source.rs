//! In-memory record source for tests and demos.

use std::collections::VecDeque;

use crate::error::MatchError;
use crate::record::{Operator, Schema, Tuple};

/// A source operator that replays a fixed list of records.
#[derive(Debug)]
pub struct TupleSource {
    schema: Schema,
    tuples: VecDeque<Tuple>,
    open: bool,
}

impl TupleSource {
    pub fn new(schema: Schema, tuples: Vec<Tuple>) -> Self {
        Self {
            schema,
            tuples: tuples.into(),
            open: false,
        }
    }
}

impl Operator for TupleSource {
    fn open(&mut self) -> Result<(), MatchError> {
        self.open = true;
        Ok(())
    }

    fn get_next(&mut self) -> Result<Option<Tuple>, MatchError> {
        if !self.open {
            return Err(MatchError::NotOpen);
        }
        Ok(self.tuples.pop_front())
    }

    fn close(&mut self) -> Result<(), MatchError> {
        self.open = false;
        Ok(())
    }

    fn output_schema(&self) -> Result<&Schema, MatchError> {
        Ok(&self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AttributeType, FieldValue};

    #[test]
    fn replays_tuples_in_order_and_then_ends() {
        let schema = Schema::default().with_attribute("content", AttributeType::Text);
        let tuples = vec![
            Tuple::new().with_field("content", FieldValue::Text("one".into())),
            Tuple::new().with_field("content", FieldValue::Text("two".into())),
        ];
        let mut source = TupleSource::new(schema, tuples);
        assert!(matches!(source.get_next(), Err(MatchError::NotOpen)));
        source.open().unwrap();
        assert_eq!(
            source
                .get_next()
                .unwrap()
                .unwrap()
                .field("content")
                .unwrap()
                .as_text(),
            Some("one")
        );
        assert!(source.get_next().unwrap().is_some());
        assert!(source.get_next().unwrap().is_none());
    }
}
