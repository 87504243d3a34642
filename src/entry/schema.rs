//! # Schema
//!
//! Per-workspace field definitions used by the loader to order, type-check
//! and place entry data.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use serde::{Deserialize, Serialize};
use serde_yml::{Mapping, Value};

use crate::error::{Error, Result};

/// Kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    List,
    Object,
    /// Rich text written as the document body
    Markdown,
    #[default]
    Any,
}

impl FieldKind {
    /// Whether a value is acceptable for this kind. Null is always accepted.
    pub const fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (Self::Any, _) => true,
            (Self::Text | Self::Markdown, Value::String(_)) => true,
            (Self::Number, Value::Number(_)) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::List, Value::Sequence(_)) => true,
            (Self::Object, Value::Mapping(_)) => true,
            _ => false,
        }
    }
}

/// A single named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(default)]
    pub kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered field list for a workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Schema {
    pub const fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The field stored as the document body, if any
    pub fn body_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.kind == FieldKind::Markdown)
    }

    /// Checks every declared field present in `data` against its kind.
    /// Fields not declared in the schema pass through unchecked.
    pub fn validate(&self, data: &Mapping) -> Result<()> {
        for field in &self.fields {
            if let Some(value) = data.get(field.name.as_str()) {
                if !field.kind.accepts(value) {
                    return Err(Error::Schema(format!(
                        "field '{}' expects {:?}, got {}",
                        field.name,
                        field.kind,
                        describe(value)
                    )));
                }
            }
        }
        Ok(())
    }
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "an object",
        Value::Tagged(_) => "a tagged value",
    }
}
