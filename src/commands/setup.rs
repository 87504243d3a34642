//! # Setup Command
//!
//! One-time setup for leafpress: creates the global config.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::GlobalConfig;

/// Executes the setup command.
pub fn execute() -> Result<()> {
    eprintln!("{}\n", "Setting up leafpress...".bold());

    let created = GlobalConfig::create_default_if_missing()?;
    GlobalConfig::print_location(created);

    if GlobalConfig::load()?.resolve_github_token().is_none() {
        eprintln!(
            "\n  {} Set github_token (or GITHUB_TOKEN) to publish to GitHub.",
            "→".cyan()
        );
    }

    eprintln!("\n{} Setup complete!", "✓".green().bold());

    Ok(())
}
