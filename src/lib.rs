//! # leafpress
//!
//! Content persistence for a Git-backed static site dashboard.
//!
//! Entries are written as Markdown files with YAML frontmatter, either to the
//! local filesystem or as single commits to a GitHub repository. Media files
//! are uploaded under unique, time-sortable names.
//!
//! ## Features
//!
//! - **Sortable IDs**: 27-character base-62 identifiers ordered by creation time
//! - **Change Sets**: Moved entries have their stale files removed in the same publish
//! - **Filesystem Backend**: Bounded concurrent writes
//! - **GitHub Backend**: One commit per publish through the Git data API
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod changes;
pub mod commands;
pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod id;
pub mod index;
pub mod paths;
pub mod persistence;
pub mod ui;

pub use changes::{compute_changes, ChangeSet};
pub use config::{set_home_override, Config};
pub use entry::{Entry, EntryStatus, MarkdownLoader};
pub use error::{Error, Result};
pub use index::{ContentIndex, FileIndex, IndexSnapshot, MemoryIndex};
pub use paths::PathResolver;
pub use persistence::{
    fs::FsPersistence, github::GithubPersistence, Content, Media, MediaUpload, Persistence,
    Published, Store,
};
