//! # Commands
//!
//! CLI command implementations for leafpress.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod changes;
pub mod download;
pub mod id;
pub mod init;
pub mod publish;
pub mod setup;
pub mod upload;

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use tracing::debug;

pub use self::{
    changes::execute as changes,
    download::{execute as download, DownloadArgs},
    id::{execute_new as id_new, execute_parse as id_parse},
    init::execute as init,
    publish::execute as publish,
    setup::execute as setup,
    upload::{execute as upload, UploadArgs},
};
use crate::{
    config::Config,
    entry::{self, Entry, Loader, MarkdownLoader},
    index::FileIndex,
    persistence::{fs::FsPersistence, github::GithubPersistence, Content, Store},
};

/// Where published content goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Local filesystem under the project root
    Fs,
    /// The configured GitHub repository
    Github,
}

impl Backend {
    /// Explicit choice, else GitHub when configured, else the filesystem
    pub const fn resolve(choice: Option<Self>, config: &Config) -> Self {
        match choice {
            Some(backend) => backend,
            None if config.has_github() => Self::Github,
            None => Self::Fs,
        }
    }
}

/// Builds the shared content collaborators from configuration
pub fn content(config: &Config) -> Content {
    let resolver = config.resolver();
    let loader: Arc<dyn Loader> = Arc::new(MarkdownLoader);
    let index = FileIndex::new(&config.project_root, resolver.clone(), Arc::clone(&loader));
    Content::new(resolver, loader, Arc::new(index))
}

/// Opens the selected backend
pub fn open_store(config: &Config, backend: Option<Backend>) -> Result<Box<dyn Store>> {
    let backend = Backend::resolve(backend, config);
    debug!(?backend, "opening backend");

    let content = content(config);
    Ok(match backend {
        Backend::Fs => Box::new(
            FsPersistence::new(&config.project_root, content).with_concurrency(config.concurrency()),
        ),
        Backend::Github => Box::new(GithubPersistence::new(config.github_options()?, content)?),
    })
}

/// Reads entries from YAML or JSON files, in argument order
pub fn read_entries(files: &[PathBuf]) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for file in files {
        let text = fs::read_to_string(file)
            .with_context(|| format!("Failed to read entry file: {}", file.display()))?;
        let parsed = entry::parse_entries(&text)
            .with_context(|| format!("Failed to parse entry file: {}", file.display()))?;
        entries.extend(parsed);
    }
    Ok(entries)
}
