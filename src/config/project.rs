//! # Project Configuration
//!
//! Handles the project-level configuration stored at `leafpress.toml` in the
//! project root: content layout per workspace and the GitHub target.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_BRANCH, DEFAULT_FS_CONCURRENCY, DEFAULT_GITHUB_API_URL, DEFAULT_GITHUB_RAW_URL,
        DEFAULT_MEDIA_DIR, DEFAULT_ROOT_DIR, DEFAULT_SOURCE_DIR, DEFAULT_WORKSPACE,
        PROJECT_CONFIG_FILE,
    },
    entry::Schema,
};

/// A named group of content with its own source directory and schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Content source directory (relative to `root_dir`)
    pub source: String,

    /// Media directory (relative to `root_dir`); uploads fail without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_dir: Option<String>,

    /// Field definitions for entries in this workspace
    #[serde(default)]
    pub schema: Schema,
}

/// GitHub repository that receives commits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubSection {
    pub owner: String,

    pub repo: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// REST API base URL (override for GitHub Enterprise or tests)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Raw-content base URL
    #[serde(default = "default_raw_url")]
    pub raw_url: String,
}

/// Project configuration stored at leafpress.toml in the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Directory all content lives under (default: ".")
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Filesystem operations in flight while publishing (default: 4)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// GitHub target; publishing defaults to the filesystem without it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubSection>,

    #[serde(default)]
    pub workspaces: BTreeMap<String, WorkspaceConfig>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let mut workspaces = BTreeMap::new();
        workspaces.insert(
            DEFAULT_WORKSPACE.to_string(),
            WorkspaceConfig {
                source: DEFAULT_SOURCE_DIR.to_string(),
                media_dir: Some(DEFAULT_MEDIA_DIR.to_string()),
                schema: Schema::default(),
            },
        );
        Self {
            root_dir: default_root_dir(),
            concurrency: DEFAULT_FS_CONCURRENCY,
            github: None,
            workspaces,
        }
    }
}

fn default_root_dir() -> String {
    DEFAULT_ROOT_DIR.to_string()
}

#[allow(clippy::missing_const_for_fn)] // serde default functions can't be const
fn default_concurrency() -> usize {
    DEFAULT_FS_CONCURRENCY
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_raw_url() -> String {
    DEFAULT_GITHUB_RAW_URL.to_string()
}

impl ProjectConfig {
    /// Finds the project root by searching for leafpress.toml upward
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;

        loop {
            if current.join(PROJECT_CONFIG_FILE).exists() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the path to the project config file
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILE)
    }

    /// Loads the project config from leafpress.toml in the given directory
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path(project_root);

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse project config: {}", path.display()))
    }

    /// Parses and validates config text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        Ok(config)
    }

    /// Writes the initial commented config to leafpress.toml
    pub fn save_template(project_root: &Path) -> Result<()> {
        let path = Self::path(project_root);
        let content = format!(
            r#"# leafpress Project Configuration

# Directory all content lives under, relative to this file.
root_dir = "{DEFAULT_ROOT_DIR}"

# Filesystem operations in flight while publishing locally.
concurrency = {DEFAULT_FS_CONCURRENCY}

# Uncomment to publish to GitHub (one commit per publish).
# [github]
# owner = "your-org"
# repo = "your-site"
# branch = "{DEFAULT_BRANCH}"

[workspaces.{DEFAULT_WORKSPACE}]
source = "{DEFAULT_SOURCE_DIR}"
media_dir = "{DEFAULT_MEDIA_DIR}"

# Fields in frontmatter order. Kinds: text, number, boolean, list, object,
# markdown (written as the document body), any.
[[workspaces.{DEFAULT_WORKSPACE}.schema.fields]]
name = "title"
kind = "text"

[[workspaces.{DEFAULT_WORKSPACE}.schema.fields]]
name = "body"
kind = "markdown"
"#
        );

        fs::write(&path, content)
            .with_context(|| format!("Failed to write project config: {}", path.display()))
    }
}
