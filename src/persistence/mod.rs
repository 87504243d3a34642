//! # Persistence
//!
//! Backends that apply change sets and store media: the local filesystem
//! ([`fs::FsPersistence`]) and a GitHub repository ([`github::GithubPersistence`]).
//!
//! All operations return [`crate::Result`]. Nothing here retries, and two
//! concurrent publishes on one backend are not serialized against each other.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod fs;
pub mod github;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    changes::{compute_changes, ChangeSet},
    entry::{Entry, Loader},
    error::Result,
    index::ContentIndex,
    paths::PathResolver,
};

/// Outcome of a successful publish
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Published {
    /// Locations written
    pub written: Vec<String>,

    /// Stale locations removed
    pub removed: Vec<String>,

    /// Commit created, for backends that commit
    pub commit: Option<String>,
}

impl Published {
    fn from_changes(changes: &ChangeSet, commit: Option<String>) -> Self {
        Self {
            written: changes.written(),
            removed: changes.file_removes.clone(),
            commit,
        }
    }
}

/// A binary file to store under a workspace's media directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    /// Original path relative to the media directory (e.g. `team/Photo.jpg`)
    pub path: String,

    pub bytes: Vec<u8>,
}

/// Writes batches of entries
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Persists `entries`, removing files of entries that moved
    async fn publish(&self, entries: &[Entry]) -> Result<Published>;
}

/// Stores and retrieves media files
#[async_trait]
pub trait Media: Send + Sync {
    /// Stores a file under a fresh unique name and returns its location
    async fn upload(&self, workspace: &str, file: MediaUpload) -> Result<String>;

    /// Reads a media file by location
    async fn download(&self, workspace: &str, location: &str) -> Result<Vec<u8>>;
}

/// A backend that handles both entries and media
pub trait Store: Persistence + Media {}

impl<T: Persistence + Media> Store for T {}

/// Collaborators shared by every backend: where files go, how they are
/// encoded, and where entries were last seen.
#[derive(Clone)]
pub struct Content {
    resolver: PathResolver,
    loader: Arc<dyn Loader>,
    index: Arc<dyn ContentIndex>,
}

impl Content {
    pub fn new(resolver: PathResolver, loader: Arc<dyn Loader>, index: Arc<dyn ContentIndex>) -> Self {
        Self {
            resolver,
            loader,
            index,
        }
    }

    pub const fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Computes the change set for `entries` against a fresh index snapshot.
    ///
    /// The snapshot may scan the filesystem, so it runs on the blocking pool.
    pub async fn change_set(&self, entries: &[Entry]) -> Result<ChangeSet> {
        let index = Arc::clone(&self.index);
        let snapshot = tokio::task::spawn_blocking(move || index.snapshot()).await??;
        compute_changes(&self.resolver, self.loader.as_ref(), &snapshot, entries)
    }
}
