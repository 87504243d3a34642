//! # Init Command
//!
//! Initializes a new leafpress project in the current directory.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::fs;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::{
    config::{Config, ProjectConfig},
    constants::DEFAULT_WORKSPACE,
};

/// Executes the init command.
pub fn execute() -> Result<()> {
    let config = Config::for_init()?;

    let config_path = ProjectConfig::path(&config.project_root);
    if config_path.exists() {
        anyhow::bail!(
            "Project already initialized (found {})",
            config_path.display()
        );
    }

    ProjectConfig::save_template(&config.project_root)?;

    let source = config.resolver().source_dir(DEFAULT_WORKSPACE)?;
    let source_path = config.project_root.join(&source);
    fs::create_dir_all(&source_path).with_context(|| {
        format!(
            "Failed to create content directory: {}",
            source_path.display()
        )
    })?;

    println!("{} Initialized leafpress project", "✓".green());
    println!("  {} {}", "Config:".dimmed(), config_path.display());
    println!("  {} {}", "Content:".dimmed(), source_path.display());

    Ok(())
}
