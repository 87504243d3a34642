//! # Global Configuration
//!
//! Handles the per-user configuration stored at `~/.config/leafpress/config`:
//! commit author identity and the GitHub token.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{cell::RefCell, fs, path::PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::constants::{GITHUB_TOKEN_ENV, GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_FILENAME};

thread_local! {
    /// Thread-local override for the home directory path.
    /// Used by integration tests to redirect config to a temp directory
    /// without modifying environment variables.
    static HOME_OVERRIDE: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Sets a thread-local override for the home directory.
/// This is used by tests to redirect global config without modifying env vars.
pub fn set_home_override(path: Option<PathBuf>) {
    HOME_OVERRIDE.with(|cell| {
        *cell.borrow_mut() = path;
    });
}

fn get_home_override() -> Option<PathBuf> {
    HOME_OVERRIDE.with(|cell| cell.borrow().clone())
}

/// Global configuration stored at ~/.config/leafpress/config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Commit author name
    #[serde(default)]
    pub author_name: Option<String>,

    /// Commit author email
    #[serde(default)]
    pub author_email: Option<String>,

    /// GitHub token used for commits and raw downloads
    #[serde(default)]
    pub github_token: Option<String>,
}

impl GlobalConfig {
    /// Returns the path to the global config file (~/.config/leafpress/config)
    ///
    /// Checks for a thread-local home override first (used by tests),
    /// then falls back to $HOME/.config (XDG Base Directory).
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|dir| dir.join(GLOBAL_CONFIG_FILENAME))
    }

    /// Returns the path to the global config directory (~/.config/leafpress)
    pub fn dir() -> Option<PathBuf> {
        get_home_override()
            .or_else(dirs::home_dir)
            .map(|home| home.join(".config").join(GLOBAL_CONFIG_DIR))
    }

    /// Loads the global config. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            anyhow::bail!("Could not determine home directory");
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read global config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config: {}", path.display()))
    }

    /// Creates the global config with commented defaults.
    /// Used by `lp setup`. Returns true if created, false if already exists.
    pub fn create_default_if_missing() -> Result<bool> {
        let Some(path) = Self::path() else {
            anyhow::bail!("Could not determine config directory");
        };

        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        Self::save_with_comments(&path, &Self::default())?;
        Ok(true)
    }

    /// Saves config with comments for all options.
    /// Unset fields are shown as commented examples.
    fn save_with_comments(path: &PathBuf, config: &Self) -> Result<()> {
        let format_optional = |value: &Option<String>, key: &str, example: &str| {
            value.as_ref().map_or_else(
                || format!("# {key} = \"{example}\""),
                |v| format!("{key} = \"{v}\""),
            )
        };

        let author_name_line = format_optional(&config.author_name, "author_name", "Your Name");
        let author_email_line =
            format_optional(&config.author_email, "author_email", "you@example.com");
        let token_line = format_optional(&config.github_token, "github_token", "ghp_...");

        let content = format!(
            r"# leafpress Global Configuration
# Location: ~/.config/leafpress/config

# Author recorded on commits made by the GitHub backend.
{author_name_line}
{author_email_line}

# Token used for GitHub commits and raw downloads.
# If not set, falls back to the {GITHUB_TOKEN_ENV} environment variable.
{token_line}
"
        );

        fs::write(path, content)
            .with_context(|| format!("Failed to write global config: {}", path.display()))
    }

    /// Returns the configured token, falling back to `$GITHUB_TOKEN`
    pub fn resolve_github_token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(|| std::env::var(GITHUB_TOKEN_ENV).ok())
            .filter(|token| !token.is_empty())
    }

    /// Prints where the config lives (used after `lp setup`)
    pub fn print_location(created: bool) {
        let location = Self::path().map_or_else(
            || "~/.config/leafpress/config".to_string(),
            |p| p.display().to_string(),
        );
        if created {
            println!("{} Created {location}", "✓".green());
        } else {
            println!("{} {location} already exists", "·".dimmed());
        }
    }
}
