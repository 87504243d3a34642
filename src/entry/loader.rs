//! # Loader
//!
//! Encodes entries into their on-disk format and decodes files back into
//! documents. The change-set builder only decides *where* files go; a
//! [`Loader`] decides what their bytes are.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use serde_yml::{Mapping, Value};

use super::{parser, Entry, Schema};
use crate::{
    constants::MARKDOWN_EXTENSION,
    error::{Error, Result},
};

/// A decoded content file
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub frontmatter: Mapping,
    pub body: String,
}

impl Document {
    /// The entry id recorded in the file, if any
    pub fn id(&self) -> Option<&str> {
        self.frontmatter.get("id").and_then(Value::as_str)
    }
}

/// Serializer for entry files
pub trait Loader: Send + Sync {
    /// File extension including the leading dot (e.g. `.md`)
    fn extension(&self) -> &str;

    /// Encodes an entry's data according to its workspace schema
    fn format(&self, schema: &Schema, entry: &Entry) -> Result<Vec<u8>>;

    /// Decodes a file previously written by [`Loader::format`]
    fn parse(&self, bytes: &[u8]) -> Result<Document>;
}

/// Markdown with YAML frontmatter.
///
/// Frontmatter order: `id`, `root`, schema fields in declaration order, then
/// any remaining data in key order. The schema's markdown field (if any)
/// becomes the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownLoader;

impl Loader for MarkdownLoader {
    fn extension(&self) -> &str {
        MARKDOWN_EXTENSION
    }

    fn format(&self, schema: &Schema, entry: &Entry) -> Result<Vec<u8>> {
        schema.validate(&entry.data)?;

        let body_field = schema.body_field().map(|f| f.name.as_str());
        let mut frontmatter = Mapping::new();
        frontmatter.insert(Value::from("id"), Value::from(entry.id.as_str()));
        if !entry.root.is_empty() {
            frontmatter.insert(Value::from("root"), Value::from(entry.root.as_str()));
        }

        for field in &schema.fields {
            if Some(field.name.as_str()) == body_field {
                continue;
            }
            if let Some(value) = entry.data.get(field.name.as_str()) {
                frontmatter.insert(Value::from(field.name.as_str()), value.clone());
            }
        }

        let mut rest: Vec<(&Value, &Value)> = entry
            .data
            .iter()
            .filter(|(key, _)| {
                key.as_str()
                    .map_or(true, |k| schema.field(k).is_none() && k != "id" && k != "root")
            })
            .collect();
        rest.sort_by_key(|(key, _)| key.as_str().map(str::to_owned));
        for (key, value) in rest {
            frontmatter.insert(key.clone(), value.clone());
        }

        let body = match body_field.and_then(|name| entry.data.get(name)) {
            Some(Value::String(text)) => text.as_str(),
            _ => "",
        };

        Ok(parser::serialize(&frontmatter, body)?.into_bytes())
    }

    fn parse(&self, bytes: &[u8]) -> Result<Document> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| Error::Serialization(format!("file is not valid UTF-8: {e}")))?;
        let (frontmatter, body) = parser::parse(content)?;
        Ok(Document { frontmatter, body })
    }
}
