//! Attribute schema for the records flowing through an operator chain.

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Type of a record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Text,
    Integer,
    Double,
    SpanList,
}

impl AttributeType {
    /// Whether a field of this type can be probed by a regex.
    pub fn is_text(self) -> bool {
        matches!(self, AttributeType::String | AttributeType::Text)
    }
}

/// A named, typed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub attr_type: AttributeType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
        }
    }
}

/// Ordered attribute list describing one record layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attr_type: AttributeType) -> Self {
        self.attributes.push(Attribute::new(name, attr_type));
        self
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Setup-time check that `name` exists in this schema.
    pub fn check_exists(&self, name: &str) -> Result<&Attribute, MatchError> {
        self.get(name)
            .ok_or_else(|| MatchError::AttributeNotFound(name.to_string()))
    }

    /// Setup-time check that `name` is free for a new output attribute.
    pub fn check_absent(&self, name: &str) -> Result<(), MatchError> {
        if self.contains(name) {
            Err(MatchError::AttributeCollision(name.to_string()))
        } else {
            Ok(())
        }
    }
}
