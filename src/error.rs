//! # Errors
//!
//! Error type shared by the path, change-set and persistence layers.
//! Every persistence operation returns [`Result`]; nothing in this crate retries.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::path::PathBuf;

use thiserror::Error;

use crate::id::IdError;

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, serializing or persisting content.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or inconsistent configuration (e.g. no media directory).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The requested file does not exist (or came back empty).
    #[error("not found: {0}")]
    NotFound(String),

    /// Local filesystem failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network or HTTP failure talking to the Git-hosting API.
    #[error("remote error: {0}")]
    Remote(String),

    /// A root, url or upload directory that would climb out of its base.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A blocking background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),

    /// Entry data does not match its workspace schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// Frontmatter or payload (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Identifier generation failure.
    #[error(transparent)]
    Id(#[from] IdError),
}

impl Error {
    /// Wraps an I/O error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_yml::Error> for Error {
    fn from(err: serde_yml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(err.to_string())
    }
}
