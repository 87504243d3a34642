//! # Configuration
//!
//! Merged configuration combining global (~/.config/leafpress/config) and
//! project (leafpress.toml) settings.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod global;
pub mod project;

use std::path::PathBuf;

use anyhow::{Context, Result};

pub use self::{
    global::{set_home_override, GlobalConfig},
    project::{GithubSection, ProjectConfig, WorkspaceConfig},
};
use crate::{
    paths::PathResolver,
    persistence::github::{Author, GithubOptions},
};

/// Merged configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,

    /// Project configuration
    pub project: ProjectConfig,

    /// Resolved project root path
    pub project_root: PathBuf,
}

impl Config {
    /// Loads configuration from both global and project sources
    pub fn load() -> Result<Self> {
        let global = GlobalConfig::load()?;

        let project_root = ProjectConfig::find_project_root().ok_or_else(|| {
            anyhow::anyhow!("Not in a leafpress project (no leafpress.toml found)")
        })?;

        let project = ProjectConfig::load(&project_root)?;

        Ok(Self {
            global,
            project,
            project_root,
        })
    }

    /// Creates a config for initialization (no existing project required)
    pub fn for_init() -> Result<Self> {
        let global = GlobalConfig::load()?;
        let project_root = std::env::current_dir().context("Cannot get current directory")?;

        Ok(Self {
            global,
            project: ProjectConfig::default(),
            project_root,
        })
    }

    /// Path resolver over the project's workspaces
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(
            self.project.root_dir.clone(),
            self.project.workspaces.clone(),
        )
    }

    /// Filesystem publish concurrency
    pub const fn concurrency(&self) -> usize {
        self.project.concurrency
    }

    /// Whether a GitHub target is configured
    pub const fn has_github(&self) -> bool {
        self.project.github.is_some()
    }

    /// Options for the GitHub backend.
    ///
    /// Fails when the `[github]` section, the author, or the token is missing.
    pub fn github_options(&self) -> Result<GithubOptions> {
        let github = self
            .project
            .github
            .as_ref()
            .context("No [github] section in leafpress.toml")?;

        let name = self
            .global
            .author_name
            .clone()
            .context("No author_name in ~/.config/leafpress/config")?;
        let email = self
            .global
            .author_email
            .clone()
            .context("No author_email in ~/.config/leafpress/config")?;
        let token = self
            .global
            .resolve_github_token()
            .context("No github_token configured and GITHUB_TOKEN is not set")?;

        Ok(GithubOptions {
            owner: github.owner.clone(),
            repo: github.repo.clone(),
            branch: github.branch.clone(),
            author: Author { name, email },
            token,
            api_url: github.api_url.clone(),
            raw_url: github.raw_url.clone(),
        })
    }
}
