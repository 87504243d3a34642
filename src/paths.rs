//! # Paths
//!
//! Derives repository locations for entries and media uploads.
//!
//! Locations are slash-delimited virtual paths relative to the project (or
//! repository) root, independent of the host's separator conventions. The
//! filesystem backend maps them onto disk; the GitHub backend uses them as-is.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::{
    config::WorkspaceConfig,
    constants::INDEX_FILE_STEM,
    entry::{slugify, Entry},
    error::{Error, Result},
    id,
};

/// Joins path segments with `/`, normalizing `.`, `..` and empty segments.
///
/// `..` never climbs above the first segment.
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts: Vec<String> = Vec::new();
    for segment in segments {
        for part in segment.as_ref().split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                _ => parts.push(part.to_string()),
            }
        }
    }
    parts.join("/")
}

/// Rejects a relative path that has a `..` segment.
///
/// [`join`] would resolve such a segment against the base directory and
/// place the file outside of it.
pub fn ensure_relative(value: &str, what: &str) -> Result<()> {
    if value.split('/').any(|part| part == "..") {
        return Err(Error::InvalidPath(format!(
            "{what} '{value}' must not contain '..'"
        )));
    }
    Ok(())
}

/// Whether an entry path denotes an index document.
pub fn is_index(path: &str) -> bool {
    path.is_empty() || path == INDEX_FILE_STEM
}

/// File name (relative to the root directory) for an entry at `url`.
pub fn entry_file(url: &str, is_index: bool, extension: &str) -> String {
    if is_index {
        format!("{}/{INDEX_FILE_STEM}{extension}", url.trim_end_matches('/'))
    } else {
        format!("{url}{extension}")
    }
}

/// Splits a slash path into (directory, base name, extension with dot).
pub fn split_file_path(path: &str) -> (&str, &str, &str) {
    let (dir, file) = path.rsplit_once('/').unwrap_or(("", path));
    match file.rfind('.') {
        Some(dot) if dot > 0 => (dir, &file[..dot], &file[dot..]),
        _ => (dir, file, ""),
    }
}

/// Generated file name for an upload: `slug(base).<id><ext>`.
pub fn media_file_name(base: &str, id: &str, extension: &str) -> String {
    let slug = slugify(base);
    if slug.is_empty() {
        format!("{id}{extension}")
    } else {
        format!("{slug}.{id}{extension}")
    }
}

/// Resolves entry and media locations from workspace configuration
#[derive(Debug, Clone)]
pub struct PathResolver {
    root_dir: String,
    workspaces: BTreeMap<String, WorkspaceConfig>,
}

impl PathResolver {
    pub fn new(root_dir: impl Into<String>, workspaces: BTreeMap<String, WorkspaceConfig>) -> Self {
        Self {
            root_dir: root_dir.into(),
            workspaces,
        }
    }

    /// Root directory all locations are placed under
    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    /// Returns all configured workspaces
    pub const fn workspaces(&self) -> &BTreeMap<String, WorkspaceConfig> {
        &self.workspaces
    }

    /// Looks up a workspace by name
    pub fn workspace(&self, name: &str) -> Result<&WorkspaceConfig> {
        self.workspaces
            .get(name)
            .ok_or_else(|| Error::Configuration(format!("unknown workspace '{name}'")))
    }

    /// Content source directory of a workspace
    pub fn source_dir(&self, workspace: &str) -> Result<String> {
        let config = self.workspace(workspace)?;
        Ok(join([self.root_dir.as_str(), config.source.as_str()]))
    }

    /// Media directory of a workspace; fails if none is configured
    pub fn media_dir(&self, workspace: &str) -> Result<String> {
        let config = self.workspace(workspace)?;
        let media_dir = config.media_dir.as_deref().ok_or_else(|| {
            Error::Configuration(format!(
                "media directory not configured for workspace '{workspace}'"
            ))
        })?;
        Ok(join([self.root_dir.as_str(), media_dir]))
    }

    /// Location of an entry file. Deterministic for identical inputs.
    ///
    /// Fails with [`Error::InvalidPath`] when `root` or `url` would leave
    /// the workspace's source directory.
    pub fn resolve(
        &self,
        workspace: &str,
        root: &str,
        url: &str,
        is_index: bool,
        extension: &str,
    ) -> Result<String> {
        ensure_relative(root, "root")?;
        ensure_relative(url, "url")?;
        let source = self.source_dir(workspace)?;
        let file = entry_file(url, is_index, extension);
        Ok(join([source.as_str(), root, file.as_str()]))
    }

    /// Location of an entry's file
    pub fn resolve_entry(&self, entry: &Entry, extension: &str) -> Result<String> {
        self.resolve(
            &entry.workspace,
            &entry.root,
            &entry.url,
            entry.is_index(),
            extension,
        )
    }

    /// Fresh, unique location for an uploaded file.
    ///
    /// `file_path` is the upload's path relative to the media directory
    /// (e.g. `team/Photo Shoot.JPG`).
    pub fn media_location(&self, workspace: &str, file_path: &str) -> Result<String> {
        let media_dir = self.media_dir(workspace)?;
        let (dir, base, extension) = split_file_path(file_path);
        ensure_relative(dir, "upload directory")?;
        let name = media_file_name(base, &id::create_id()?, extension);
        Ok(join([media_dir.as_str(), dir, name.as_str()]))
    }

    /// Full location of a media file.
    ///
    /// Accepts either a location returned by an upload or a path relative to
    /// the media directory.
    pub fn media_file(&self, workspace: &str, location: &str) -> Result<String> {
        let media_dir = self.media_dir(workspace)?;
        let location = join([location]);
        if media_dir.is_empty()
            || location == media_dir
            || location.starts_with(&format!("{media_dir}/"))
        {
            Ok(location)
        } else {
            Ok(join([media_dir.as_str(), location.as_str()]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Schema;

    fn resolver() -> PathResolver {
        let mut workspaces = BTreeMap::new();
        workspaces.insert(
            "main".to_string(),
            WorkspaceConfig {
                source: "content".to_string(),
                media_dir: Some("public/media".to_string()),
                schema: Schema::default(),
            },
        );
        workspaces.insert(
            "docs".to_string(),
            WorkspaceConfig {
                source: "./docs/".to_string(),
                media_dir: None,
                schema: Schema::default(),
            },
        );
        PathResolver::new("site", workspaces)
    }

    #[test]
    fn test_join_normalizes() {
        assert_eq!(join(["./a/", "", "b//c", "."]), "a/b/c");
        assert_eq!(join(["a/b", "../c"]), "a/c");
        assert_eq!(join(["..", "a"]), "a");
        assert_eq!(join([".", ""]), "");
    }

    #[test]
    fn test_is_index() {
        assert!(is_index(""));
        assert!(is_index("index"));
        assert!(!is_index("indexes"));
    }

    #[test]
    fn test_resolve_page() {
        let path = resolver()
            .resolve("main", "pages", "blog/hello", false, ".md")
            .unwrap();
        assert_eq!(path, "site/content/pages/blog/hello.md");
    }

    #[test]
    fn test_resolve_index_is_named_index() {
        let r = resolver();
        assert_eq!(
            r.resolve("main", "pages", "", true, ".md").unwrap(),
            "site/content/pages/index.md"
        );
        assert_eq!(
            r.resolve("main", "pages", "blog", true, ".md").unwrap(),
            "site/content/pages/blog/index.md"
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let r = resolver();
        let a = r.resolve("docs", "guide", "intro", false, ".md").unwrap();
        let b = r.resolve("docs", "guide", "intro", false, ".md").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "site/docs/guide/intro.md");
    }

    #[test]
    fn test_resolve_unknown_workspace() {
        assert!(matches!(
            resolver().resolve("nope", "pages", "x", false, ".md"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_split_file_path() {
        assert_eq!(split_file_path("a/b/Photo.JPG"), ("a/b", "Photo", ".JPG"));
        assert_eq!(split_file_path("archive.tar.gz"), ("", "archive.tar", ".gz"));
        assert_eq!(split_file_path(".env"), ("", ".env", ""));
        assert_eq!(split_file_path("README"), ("", "README", ""));
    }

    #[test]
    fn test_media_file_name() {
        assert_eq!(media_file_name("Team Photo", "ID", ".jpg"), "team-photo.ID.jpg");
        assert_eq!(media_file_name("!!!", "ID", ".jpg"), "ID.jpg");
    }

    #[test]
    fn test_media_location_is_unique() {
        let r = resolver();
        let a = r.media_location("main", "team/Photo.jpg").unwrap();
        let b = r.media_location("main", "team/Photo.jpg").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("site/public/media/team/photo."));
        assert!(a.ends_with(".jpg"));
    }

    #[test]
    fn test_resolve_rejects_parent_segments() {
        let r = resolver();
        assert!(matches!(
            r.resolve("main", "pages", "../../README", false, ".md"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            r.resolve("main", "../docs", "intro", false, ".md"),
            Err(Error::InvalidPath(_))
        ));
        // Dots inside a segment are fine
        assert_eq!(
            r.resolve("main", "pages", "v1..v2", false, ".md").unwrap(),
            "site/content/pages/v1..v2.md"
        );
    }

    #[test]
    fn test_media_location_stays_in_media_dir() {
        let r = resolver();
        assert!(matches!(
            r.media_location("main", "../content/pages/x.png"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            r.media_location("main", "team/../../x.png"),
            Err(Error::InvalidPath(_))
        ));
    }

    #[test]
    fn test_media_requires_media_dir() {
        let r = resolver();
        assert!(matches!(
            r.media_location("docs", "x.png"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            r.media_file("docs", "x.png"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_media_file_accepts_both_forms() {
        let r = resolver();
        assert_eq!(
            r.media_file("main", "team/a.png").unwrap(),
            "site/public/media/team/a.png"
        );
        assert_eq!(
            r.media_file("main", "site/public/media/team/a.png").unwrap(),
            "site/public/media/team/a.png"
        );
    }
}
