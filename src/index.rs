//! # Content Index
//!
//! Tracks the last-known location of every entry id, so a publish can remove
//! files for entries that moved.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{entry::Loader, error::Result, paths::PathResolver};

/// Point-in-time map of entry id to virtual location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSnapshot {
    locations: HashMap<String, String>,
}

impl IndexSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the location of an entry
    pub fn insert(&mut self, id: impl Into<String>, location: impl Into<String>) {
        self.locations.insert(id.into(), location.into());
    }

    /// Last-known location of an entry
    pub fn location(&self, id: &str) -> Option<&str> {
        self.locations.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl<I: Into<String>, L: Into<String>> FromIterator<(I, L)> for IndexSnapshot {
    fn from_iter<T: IntoIterator<Item = (I, L)>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for (id, location) in iter {
            snapshot.insert(id, location);
        }
        snapshot
    }
}

/// Queryable store of entry locations.
///
/// `snapshot` may do blocking I/O; async callers run it on the blocking pool.
pub trait ContentIndex: Send + Sync {
    /// Returns the current id-to-location map
    fn snapshot(&self) -> Result<IndexSnapshot>;
}

/// Index held in memory, maintained by the caller
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    snapshot: IndexSnapshot,
}

impl MemoryIndex {
    pub const fn new(snapshot: IndexSnapshot) -> Self {
        Self { snapshot }
    }

    /// Records the location of an entry
    pub fn record(&mut self, id: impl Into<String>, location: impl Into<String>) {
        self.snapshot.insert(id, location);
    }
}

impl ContentIndex for MemoryIndex {
    fn snapshot(&self) -> Result<IndexSnapshot> {
        Ok(self.snapshot.clone())
    }
}

/// Index rebuilt from the files on disk on every snapshot
pub struct FileIndex {
    base: PathBuf,
    resolver: PathResolver,
    loader: Arc<dyn Loader>,
}

impl FileIndex {
    /// Indexes every workspace source directory under `base`
    pub fn new(base: impl Into<PathBuf>, resolver: PathResolver, loader: Arc<dyn Loader>) -> Self {
        Self {
            base: base.into(),
            resolver,
            loader,
        }
    }

    fn scan_workspace(&self, workspace: &str, snapshot: &mut IndexSnapshot) -> Result<()> {
        let source = self.resolver.source_dir(workspace)?;
        let dir = self.base.join(&source);
        let extension = self.loader.extension();

        let files = WalkDir::new(&dir)
            .min_depth(1)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.file_name().to_string_lossy().ends_with(extension));

        for file in files {
            let path = file.path();
            let document = match std::fs::read(path)
                .map_err(|e| crate::Error::io(path, e))
                .and_then(|bytes| self.loader.parse(&bytes))
            {
                Ok(document) => document,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable content file");
                    continue;
                }
            };

            let Some(id) = document.id() else {
                warn!(path = %path.display(), "skipping content file without id");
                continue;
            };

            let location = virtual_path(&self.base, path);
            if let Some(previous) = snapshot.location(id) {
                warn!(id, previous, location = %location, "duplicate entry id");
            }
            snapshot.insert(id, location);
        }

        Ok(())
    }
}

impl ContentIndex for FileIndex {
    fn snapshot(&self) -> Result<IndexSnapshot> {
        let mut snapshot = IndexSnapshot::new();
        for workspace in self.resolver.workspaces().keys() {
            self.scan_workspace(workspace, &mut snapshot)?;
        }
        debug!(entries = snapshot.len(), "content index scanned");
        Ok(snapshot)
    }
}

/// Converts a path under `base` into a slash-delimited location.
fn virtual_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    crate::paths::join(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::WorkspaceConfig, entry::MarkdownLoader};
    use std::{collections::BTreeMap, fs};
    use tempfile::tempdir;

    fn resolver() -> PathResolver {
        let mut workspaces = BTreeMap::new();
        workspaces.insert(
            "main".to_string(),
            WorkspaceConfig {
                source: "content".to_string(),
                media_dir: None,
                schema: Default::default(),
            },
        );
        PathResolver::new(".", workspaces)
    }

    #[test]
    fn test_snapshot_from_iter() {
        let snapshot: IndexSnapshot = [("a", "x.md"), ("b", "y.md")].into_iter().collect();
        assert_eq!(snapshot.location("a"), Some("x.md"));
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.location("c").is_none());
    }

    #[test]
    fn test_memory_index_records() {
        let mut index = MemoryIndex::default();
        index.record("a", "old.md");
        index.record("a", "new.md");
        assert_eq!(index.snapshot().unwrap().location("a"), Some("new.md"));
    }

    #[test]
    fn test_file_index_scans_sources() {
        let dir = tempdir().unwrap();
        let pages = dir.path().join("content/pages/blog");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("post.md"), "---\nid: p1\n---\n").unwrap();
        fs::write(pages.join("notes.txt"), "---\nid: ignored\n---\n").unwrap();
        fs::write(pages.join("broken.md"), "no frontmatter").unwrap();
        fs::write(pages.join("anon.md"), "---\ntitle: x\n---\n").unwrap();

        let index = FileIndex::new(dir.path(), resolver(), Arc::new(MarkdownLoader));
        let snapshot = index.snapshot().unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.location("p1"), Some("content/pages/blog/post.md"));
    }

    #[test]
    fn test_file_index_missing_source_is_empty() {
        let dir = tempdir().unwrap();
        let index = FileIndex::new(dir.path(), resolver(), Arc::new(MarkdownLoader));
        assert!(index.snapshot().unwrap().is_empty());
    }
}
