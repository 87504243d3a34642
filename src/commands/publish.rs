//! # Publish Command
//!
//! Persists entry files to the selected backend.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{open_store, read_entries, Backend};
use crate::{config::Config, ui};

/// Executes the publish command.
pub async fn execute(files: &[PathBuf], backend: Option<Backend>) -> Result<()> {
    let config = Config::load()?;
    let entries = read_entries(files)?;
    let store = open_store(&config, backend)?;

    let published = store
        .publish(&entries)
        .await
        .context("Failed to publish entries")?;

    ui::print_published(&published);
    Ok(())
}
