//! # Download Command
//!
//! Reads a media file from the selected backend to a local file or stdout.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::{open_store, Backend};
use crate::{config::Config, persistence::Media};

/// Arguments for the download command
pub struct DownloadArgs {
    pub workspace: String,
    pub location: String,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
    pub backend: Option<Backend>,
}

/// Executes the download command.
pub async fn execute(args: DownloadArgs) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config, args.backend)?;

    let bytes = store
        .download(&args.workspace, &args.location)
        .await
        .with_context(|| format!("Failed to download {}", args.location))?;

    match args.output {
        Some(path) => {
            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Saved {} bytes to {}",
                "✓".green(),
                bytes.len(),
                path.display()
            );
        }
        None => io::stdout()
            .lock()
            .write_all(&bytes)
            .context("Failed to write to stdout")?,
    }

    Ok(())
}
