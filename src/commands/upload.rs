//! # Upload Command
//!
//! Stores a local file under a workspace's media directory and prints the
//! generated location.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use super::{open_store, Backend};
use crate::{config::Config, persistence::MediaUpload};

/// Arguments for the upload command
pub struct UploadArgs {
    pub workspace: String,
    pub file: PathBuf,
    /// Subdirectory inside the media directory
    pub dir: Option<String>,
    pub backend: Option<Backend>,
}

/// Executes the upload command.
pub async fn execute(args: UploadArgs) -> Result<()> {
    let config = Config::load()?;

    let bytes = fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file: {}", args.file.display()))?;
    // Not normalized: a `..` must reach the resolver intact
    let path = match args.dir.as_deref().map(|d| d.trim_matches('/')) {
        Some(dir) if !dir.is_empty() => format!("{dir}/{name}"),
        _ => name,
    };

    let store = open_store(&config, args.backend)?;
    let location = store
        .upload(&args.workspace, MediaUpload { path, bytes })
        .await
        .context("Failed to upload file")?;

    // Location only, for scripting
    println!("{location}");
    Ok(())
}
