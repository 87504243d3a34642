//! # Test Harness
//!
//! Provides utilities for integration testing leafpress without affecting user configuration.
//! Uses thread-local storage instead of environment variables to avoid any interference
//! with the user's shell environment.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tempfile::TempDir;

use leafpress::{
    config::WorkspaceConfig,
    entry::{Loader, Schema},
    set_home_override, Content, IndexSnapshot, MarkdownLoader, MemoryIndex, PathResolver,
};

/// Global lock to ensure tests run sequentially.
/// This prevents races when tests change the current directory.
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Test environment that manages temporary directories for both
/// the "home" directory (for global config) and the project directory.
pub struct TestEnv {
    /// Temporary directory simulating user's home (for ~/.config/leafpress/config)
    pub home_dir: TempDir,
    /// Temporary directory for the project
    pub project_dir: TempDir,
    /// Original current directory to restore on drop
    original_cwd: PathBuf,
    /// Guard for the test lock
    test_guard: std::sync::MutexGuard<'static, ()>,
}

impl TestEnv {
    /// Creates a new test environment with temporary directories.
    ///
    /// Uses thread-local storage to redirect global config (no env var modification).
    /// Changes to the project directory for the duration of the test.
    pub fn new() -> Self {
        // Recover from poisoned mutex (if a previous test panicked while holding the lock)
        let test_guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let home_dir = TempDir::new().expect("Failed to create temp home dir");
        let project_dir = TempDir::new().expect("Failed to create temp project dir");

        let original_cwd = env::current_dir().expect("Failed to get current dir");

        set_home_override(Some(home_dir.path().to_path_buf()));
        env::set_current_dir(project_dir.path()).expect("Failed to change to project dir");

        Self {
            home_dir,
            project_dir,
            original_cwd,
            test_guard,
        }
    }

    /// Returns the path to the project directory.
    pub fn project_path(&self) -> &Path {
        self.project_dir.path()
    }

    /// Returns the path where global config would be stored.
    pub fn global_config_path(&self) -> PathBuf {
        self.home_dir
            .path()
            .join(".config")
            .join("leafpress")
            .join("config")
    }

    /// Returns the path where project config would be stored.
    pub fn project_config_path(&self) -> PathBuf {
        self.project_dir.path().join("leafpress.toml")
    }

    /// Creates a global config file with the given content.
    pub fn write_global_config(&self, content: &str) {
        let path = self.global_config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create global config directory");
        }
        fs::write(path, content).expect("Failed to write global config");
    }

    /// Creates a project config file with the given content.
    pub fn write_project_config(&self, content: &str) {
        fs::write(self.project_config_path(), content).expect("Failed to write project config");
    }

    /// Writes a file relative to the project directory and returns its path.
    pub fn write_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.project_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Reads a file relative to the project directory.
    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.project_dir.path().join(relative)).expect("Failed to read file")
    }

    /// Lists all files below a project subdirectory as slash paths.
    pub fn list_files(&self, relative: &str) -> Vec<String> {
        list_files(self.project_dir.path(), relative)
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original_cwd);
        set_home_override(None);
    }
}

// =============================================================================
// Content Helpers
// =============================================================================

/// Workspace map with a `main` workspace (content/media) and a `docs`
/// workspace without a media directory.
pub fn workspaces() -> BTreeMap<String, WorkspaceConfig> {
    let mut workspaces = BTreeMap::new();
    workspaces.insert(
        "main".to_string(),
        WorkspaceConfig {
            source: "content".to_string(),
            media_dir: Some("media".to_string()),
            schema: Schema::default(),
        },
    );
    workspaces.insert(
        "docs".to_string(),
        WorkspaceConfig {
            source: "docs".to_string(),
            media_dir: None,
            schema: Schema::default(),
        },
    );
    workspaces
}

/// Content collaborators backed by an in-memory index.
pub fn memory_content(snapshot: IndexSnapshot) -> Content {
    let loader: Arc<dyn Loader> = Arc::new(MarkdownLoader);
    Content::new(
        PathResolver::new(".", workspaces()),
        loader,
        Arc::new(MemoryIndex::new(snapshot)),
    )
}

/// Lists all files below `base/relative` as slash paths relative to `base`, sorted.
pub fn list_files(base: &Path, relative: &str) -> Vec<String> {
    let dir = base.join(relative);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<String> = walkdir::WalkDir::new(&dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(base)
                .expect("file below base")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

// =============================================================================
// Config Builder Helpers
// =============================================================================

/// Helper to build TOML config lines from optional values.
struct ConfigLines(Vec<String>);

impl ConfigLines {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn add_string(&mut self, key: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.0.push(format!("{key} = \"{v}\""));
        }
    }

    fn build(self) -> String {
        self.0.join("\n")
    }
}

/// Builder for creating global test configurations.
pub struct GlobalConfigBuilder {
    author_name: Option<String>,
    author_email: Option<String>,
    github_token: Option<String>,
}

impl Default for GlobalConfigBuilder {
    fn default() -> Self {
        Self {
            author_name: Some("Test User".to_string()),
            author_email: Some("test@example.com".to_string()),
            github_token: None,
        }
    }
}

impl GlobalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }

    pub fn without_author(mut self) -> Self {
        self.author_name = None;
        self.author_email = None;
        self
    }

    pub fn build(&self) -> String {
        let mut lines = ConfigLines::new();
        lines.add_string("author_name", self.author_name.as_deref());
        lines.add_string("author_email", self.author_email.as_deref());
        lines.add_string("github_token", self.github_token.as_deref());
        lines.build()
    }
}

/// YAML for a single entry in the `main` workspace under the `pages` root.
pub fn entry_yaml(id: &str, url: &str, title: &str) -> String {
    let path = url.rsplit('/').next().unwrap_or_default();
    format!(
        "id: {id}\nworkspace: main\nroot: pages\nurl: \"{url}\"\npath: \"{path}\"\ntitle: {title}\n"
    )
}
