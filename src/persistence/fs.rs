//! # Filesystem Backend
//!
//! Applies change sets directly to disk with a bounded number of operations in
//! flight. Each file is written independently: a failure part-way through a
//! publish leaves earlier files in place and is not rolled back.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use futures::{stream, StreamExt};
use tracing::{debug, info};

use super::{Content, Media, MediaUpload, Persistence, Published};
use crate::{
    constants::DEFAULT_FS_CONCURRENCY,
    entry::Entry,
    error::{Error, Result},
};

/// A single filesystem operation of a publish
#[derive(Debug)]
enum FileOp {
    Remove(String),
    Write(String, Vec<u8>),
}

/// Runs `task` over `items` with at most `limit` futures in flight.
///
/// Returns the first error; tasks still in flight at that point are dropped.
pub async fn run_bounded<T, F, Fut>(items: Vec<T>, limit: usize, task: F) -> Result<()>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut results = stream::iter(items).map(task).buffer_unordered(limit.max(1));
    while let Some(result) = results.next().await {
        result?;
    }
    Ok(())
}

/// Writes content to a directory on the local disk
pub struct FsPersistence {
    base: PathBuf,
    content: Content,
    concurrency: usize,
}

impl FsPersistence {
    /// Creates a backend rooted at `base` (the project root)
    pub fn new(base: impl Into<PathBuf>, content: Content) -> Self {
        Self {
            base: base.into(),
            content,
            concurrency: DEFAULT_FS_CONCURRENCY,
        }
    }

    /// Overrides the number of filesystem operations in flight (minimum 1)
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Absolute path of a virtual location
    pub fn disk_path(&self, location: &str) -> PathBuf {
        self.base.join(location)
    }

    async fn apply(base: &Path, op: FileOp) -> Result<()> {
        match op {
            FileOp::Remove(location) => {
                let path = base.join(&location);
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => debug!(location = %location, "removed"),
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        debug!(location = %location, "already removed");
                    }
                    Err(e) => return Err(Error::io(path, e)),
                }
            }
            FileOp::Write(location, contents) => {
                write_file(&base.join(&location), &contents).await?;
                debug!(location = %location, bytes = contents.len(), "written");
            }
        }
        Ok(())
    }
}

/// Writes a file, creating missing parent directories
async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::io(path, e))
}

#[async_trait]
impl Persistence for FsPersistence {
    async fn publish(&self, entries: &[Entry]) -> Result<Published> {
        let changes = self.content.change_set(entries).await?;
        let published = Published::from_changes(&changes, None);

        let ops: Vec<FileOp> = changes
            .file_removes
            .into_iter()
            .map(FileOp::Remove)
            .chain(
                changes
                    .content_changes
                    .into_iter()
                    .map(|(location, contents)| FileOp::Write(location, contents)),
            )
            .collect();

        let base = self.base.as_path();
        run_bounded(ops, self.concurrency, |op| Self::apply(base, op)).await?;

        info!(
            written = published.written.len(),
            removed = published.removed.len(),
            "published to filesystem"
        );
        Ok(published)
    }
}

#[async_trait]
impl Media for FsPersistence {
    async fn upload(&self, workspace: &str, file: MediaUpload) -> Result<String> {
        let location = self
            .content
            .resolver()
            .media_location(workspace, &file.path)?;
        write_file(&self.disk_path(&location), &file.bytes).await?;
        info!(location = %location, bytes = file.bytes.len(), "uploaded media");
        Ok(location)
    }

    async fn download(&self, workspace: &str, location: &str) -> Result<Vec<u8>> {
        let location = self.content.resolver().media_file(workspace, location)?;
        let path = self.disk_path(&location);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound(location)),
            Err(e) => Err(Error::io(path, e)),
        }
    }
}
