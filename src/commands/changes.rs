//! # Changes Command
//!
//! Shows what a publish of the given entry files would write and remove,
//! without touching any backend.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::{content, read_entries};
use crate::{config::Config, ui};

/// Executes the changes command.
pub async fn execute(files: &[PathBuf]) -> Result<()> {
    let config = Config::load()?;
    let entries = read_entries(files)?;

    let changes = content(&config).change_set(&entries).await?;
    if changes.is_empty() {
        println!("{} No changes", "·".dimmed());
        return Ok(());
    }

    ui::print_locations(&changes.written(), &changes.file_removes);
    Ok(())
}
