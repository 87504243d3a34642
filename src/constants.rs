//! # Constants
//!
//! Centralized constants for magic values used throughout leafpress.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

// =============================================================================
// Identifiers
// =============================================================================

/// Custom epoch for identifier timestamps, in milliseconds since the Unix epoch.
pub const ID_EPOCH_MS: i64 = 1_400_000_000_000;

/// Number of timestamp bytes at the start of an identifier.
pub const ID_TIMESTAMP_BYTES: usize = 4;

/// Number of random payload bytes following the timestamp.
pub const ID_PAYLOAD_BYTES: usize = 16;

/// Total raw identifier size in bytes.
pub const ID_BYTES: usize = ID_TIMESTAMP_BYTES + ID_PAYLOAD_BYTES;

/// Length of an encoded identifier (base-62 width of 2^160 - 1).
pub const ID_LENGTH: usize = 27;

// =============================================================================
// Entry Format
// =============================================================================

/// Maximum slug length in characters (not bytes).
pub const MAX_SLUG_LENGTH: usize = 50;

/// YAML frontmatter delimiter.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// File extension written by the Markdown loader (including the dot).
pub const MARKDOWN_EXTENSION: &str = ".md";

/// File stem used for index documents.
pub const INDEX_FILE_STEM: &str = "index";

// =============================================================================
// Publishing
// =============================================================================

/// Default number of filesystem operations in flight during a publish.
pub const DEFAULT_FS_CONCURRENCY: usize = 4;

/// Commit message used when publishing entries.
pub const PUBLISH_COMMIT_MESSAGE: &str = "Update content";

/// Commit message used when uploading media.
pub const UPLOAD_COMMIT_MESSAGE: &str = "Upload files";

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default GitHub raw-content base URL.
pub const DEFAULT_GITHUB_RAW_URL: &str = "https://raw.githubusercontent.com";

/// Default branch commits are written to.
pub const DEFAULT_BRANCH: &str = "main";

/// User agent sent with every GitHub request.
pub const USER_AGENT: &str = concat!("leafpress/", env!("CARGO_PKG_VERSION"));

/// Git file mode for regular files.
pub const GIT_FILE_MODE: &str = "100644";

// =============================================================================
// File System
// =============================================================================

/// Project configuration file name (searched upward from the working directory).
pub const PROJECT_CONFIG_FILE: &str = "leafpress.toml";

/// Default root directory for all content, relative to the project root.
pub const DEFAULT_ROOT_DIR: &str = ".";

/// Default workspace created by `lp init`.
pub const DEFAULT_WORKSPACE: &str = "main";

/// Default content source directory for the initial workspace.
pub const DEFAULT_SOURCE_DIR: &str = "content";

/// Default media directory for the initial workspace.
pub const DEFAULT_MEDIA_DIR: &str = "media";

/// Global configuration directory name (inside `~/.config`).
pub const GLOBAL_CONFIG_DIR: &str = "leafpress";

/// Global configuration file name (inside `GLOBAL_CONFIG_DIR`).
pub const GLOBAL_CONFIG_FILENAME: &str = "config";

/// Environment variable consulted when no token is configured.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LEAFPRESS_LOG";
