//! # Entry
//!
//! A structured content record: identity and location fields plus arbitrary
//! schema-typed data. Entries arrive from the dashboard (or the CLI) as YAML or
//! JSON and leave as Markdown files with YAML frontmatter.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod loader;
pub mod parser;
pub mod schema;
pub mod slug;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yml::{Mapping, Value};

pub use self::{
    loader::{Document, Loader, MarkdownLoader},
    schema::{Field, FieldKind, Schema},
    slug::slugify,
};
use crate::paths;

/// Publication state of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    #[default]
    Published,
    Archived,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// A content entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique sortable ID
    pub id: String,

    /// Workspace the entry belongs to
    pub workspace: String,

    /// Content root within the workspace
    #[serde(default)]
    pub root: String,

    /// Location within the root (e.g. `blog/hello-world`)
    #[serde(default)]
    pub url: String,

    /// Last url segment; empty or `index` for index documents
    #[serde(default)]
    pub path: String,

    /// Containing entry, for hierarchical content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, alias = "$isContainer")]
    pub is_container: bool,

    #[serde(default, alias = "$status")]
    pub status: EntryStatus,

    /// Schema-defined fields
    #[serde(flatten)]
    pub data: Mapping,
}

impl Entry {
    /// Creates an entry at `url`, deriving `path` from its last segment
    pub fn new(
        id: impl Into<String>,
        workspace: impl Into<String>,
        root: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let path = url.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            id: id.into(),
            workspace: workspace.into(),
            root: root.into(),
            url,
            path,
            parent: None,
            is_container: false,
            status: EntryStatus::default(),
            data: Mapping::new(),
        }
    }

    /// Sets a data field (builder style)
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.data.insert(Value::from(name), value.into());
        self
    }

    /// Whether this entry is the index document of its directory
    pub fn is_index(&self) -> bool {
        paths::is_index(&self.path)
    }

    /// Returns a data field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// Reads one entry or a list of entries from YAML or JSON text.
pub fn parse_entries(content: &str) -> crate::Result<Vec<Entry>> {
    let value: Value = serde_yml::from_str(content)?;
    if value.is_sequence() {
        Ok(serde_yml::from_value(value)?)
    } else {
        Ok(vec![serde_yml::from_value(value)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_path() {
        let entry = Entry::new("id1", "main", "pages", "blog/hello-world");
        assert_eq!(entry.path, "hello-world");
        assert!(!entry.is_index());
    }

    #[test]
    fn test_root_entry_is_index() {
        let entry = Entry::new("id1", "main", "pages", "");
        assert_eq!(entry.path, "");
        assert!(entry.is_index());
    }

    #[test]
    fn test_parse_json_entry() {
        let json = r#"{
            "id": "2YBXZHqCHEdmhp5sdLmoTEW73NQ",
            "workspace": "main",
            "root": "pages",
            "url": "about",
            "path": "about",
            "$isContainer": true,
            "$status": "draft",
            "title": "About us"
        }"#;
        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert!(entry.is_container);
        assert_eq!(entry.status, EntryStatus::Draft);
        assert_eq!(entry.field("title"), Some(&Value::from("About us")));
        assert!(entry.field("workspace").is_none());
    }

    #[test]
    fn test_parse_yaml_list() {
        let yaml = "
- id: a
  workspace: main
  url: one
- id: b
  workspace: main
  url: two
";
        let entries = parse_entries(yaml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].id, "b");
        assert_eq!(entries[0].status, EntryStatus::Published);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(EntryStatus::Draft.to_string(), "draft");
        assert_eq!(EntryStatus::Published.to_string(), "published");
    }
}
