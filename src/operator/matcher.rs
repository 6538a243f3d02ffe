//! The regex matcher operator: per-tuple orchestration.

use crate::error::MatchError;
use crate::join::JoinEngine;
use crate::predicate::{RegexKind, RegexPredicate};
use crate::record::{AttributeType, FieldValue, Operator, Schema, Tuple};
use crate::types::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unopened,
    Ready,
    Closed,
}

/// Pull-based operator that emits, for every input record containing at
/// least one match, the record plus the list of matching spans.
///
/// Setup (first `open`) validates the schema, rejects labeled regexes, and
/// runs decomposition exactly once; each `get_next` pulls input records
/// until one produces spans. Records without matches are filtered, not
/// forwarded. One operator instance owns its segment statistics and planner
/// graph; instances must not be shared across partitions.
pub struct RegexMatcher {
    predicate: RegexPredicate,
    input: Option<Box<dyn Operator>>,
    state: State,
    engine: Option<JoinEngine>,
    output_schema: Option<Schema>,
}

impl RegexMatcher {
    pub fn new(predicate: RegexPredicate) -> Self {
        Self {
            predicate,
            input: None,
            state: State::Unopened,
            engine: None,
            output_schema: None,
        }
    }

    pub fn with_input(mut self, input: Box<dyn Operator>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn set_input(&mut self, input: Box<dyn Operator>) {
        self.input = Some(input);
    }

    pub fn predicate(&self) -> &RegexPredicate {
        &self.predicate
    }

    fn setup(&mut self) -> Result<(), MatchError> {
        let input = self.input.as_mut().ok_or(MatchError::MissingInput)?;
        input.open()?;
        let input_schema = input.output_schema()?.clone();

        for attribute in &self.predicate.attribute_names {
            input_schema.check_exists(attribute)?;
        }
        let mut output_schema = input_schema.clone();
        if let Some(name) = &self.predicate.span_list_attribute {
            input_schema.check_absent(name)?;
            output_schema = output_schema.with_attribute(name.clone(), AttributeType::SpanList);
        }

        if self.predicate.kind() != RegexKind::NoLabels {
            return Err(MatchError::LabeledRegex(self.predicate.regex.clone()));
        }

        self.engine = Some(JoinEngine::new(&self.predicate)?);
        self.output_schema = Some(output_schema);
        log::info!(
            "regex matcher ready: '{}' over {:?}",
            self.predicate.regex,
            self.predicate.attribute_names
        );
        Ok(())
    }

    /// Probe every configured attribute of one record and union the spans.
    fn process(&mut self, tuple: &Tuple) -> Result<Vec<Span>, MatchError> {
        let engine = self.engine.as_mut().ok_or(MatchError::NotOpen)?;
        let mut spans = Vec::new();
        for attribute in &self.predicate.attribute_names {
            let field = tuple
                .field(attribute)
                .ok_or_else(|| MatchError::AttributeNotFound(attribute.clone()))?;
            let text = field
                .as_text()
                .ok_or_else(|| MatchError::NotTextAttribute(attribute.clone()))?;
            spans.extend(engine.match_field(attribute, text));
        }
        Ok(spans)
    }
}

impl Operator for RegexMatcher {
    fn open(&mut self) -> Result<(), MatchError> {
        match self.state {
            State::Unopened => {
                self.setup()?;
                self.state = State::Ready;
                Ok(())
            }
            State::Ready => Ok(()),
            State::Closed => Err(MatchError::AlreadyClosed),
        }
    }

    fn get_next(&mut self) -> Result<Option<Tuple>, MatchError> {
        if self.state != State::Ready {
            return Err(MatchError::NotOpen);
        }
        loop {
            let next = self
                .input
                .as_mut()
                .ok_or(MatchError::MissingInput)?
                .get_next()?;
            let Some(tuple) = next else {
                return Ok(None);
            };
            let spans = self.process(&tuple)?;
            if spans.is_empty() {
                log::debug!("tuple filtered: no match for '{}'", self.predicate.regex);
                continue;
            }
            let mut output = tuple;
            if let Some(name) = &self.predicate.span_list_attribute {
                output.add_field(name.clone(), FieldValue::SpanList(spans));
            }
            return Ok(Some(output));
        }
    }

    fn close(&mut self) -> Result<(), MatchError> {
        if let Some(input) = self.input.as_mut() {
            input.close()?;
        }
        self.state = State::Closed;
        Ok(())
    }

    fn output_schema(&self) -> Result<&Schema, MatchError> {
        self.output_schema.as_ref().ok_or(MatchError::NotOpen)
    }
}
