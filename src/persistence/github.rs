//! # GitHub Backend
//!
//! Publishes a change set as a single commit through the Git data API:
//! blobs are created for every file, one tree is built on top of the branch
//! head (deletions included), one commit is created, and the branch ref is
//! moved without forcing. Until the ref moves nothing is visible on the
//! branch, so a failed publish never leaves it partially updated. A
//! concurrent commit to the same branch makes the ref update fail, and that
//! failure is returned as-is.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header::ACCEPT, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use super::{Content, Media, MediaUpload, Persistence, Published};
use crate::{
    constants::{GIT_FILE_MODE, PUBLISH_COMMIT_MESSAGE, UPLOAD_COMMIT_MESSAGE, USER_AGENT},
    entry::Entry,
    error::{Error, Result},
};

const GITHUB_JSON: &str = "application/vnd.github+json";
const GITHUB_RAW: &str = "application/vnd.github.v3.raw";

/// Commit author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// Connection settings for the GitHub backend
#[derive(Clone)]
pub struct GithubOptions {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub author: Author,
    pub token: String,
    /// REST API base URL (e.g. `https://api.github.com`)
    pub api_url: String,
    /// Raw-content base URL (e.g. `https://raw.githubusercontent.com`)
    pub raw_url: String,
}

impl fmt::Debug for GithubOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubOptions")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("author", &self.author)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("raw_url", &self.raw_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    tree: GitObject,
}

#[derive(Debug, Serialize)]
struct TreeEntry {
    path: String,
    mode: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    /// `None` deletes the path from the base tree
    sha: Option<String>,
}

/// Writes content to a GitHub repository
pub struct GithubPersistence {
    options: GithubOptions,
    client: Client,
    content: Content,
}

impl GithubPersistence {
    pub fn new(options: GithubOptions, content: Content) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            options,
            client,
            content,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.options.api_url.trim_end_matches('/'),
            self.options.owner,
            self.options.repo
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.options.token)
            .header(ACCEPT, GITHUB_JSON)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.repo_url(path);
        let response = self.request(Method::GET, &url).send().await?;
        Ok(check(response, "GET", &url).await?.json().await?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = self.repo_url(path);
        let label = method.to_string();
        let response = self.request(method, &url).json(body).send().await?;
        Ok(check(response, &label, &url).await?.json().await?)
    }

    /// Creates one commit on the configured branch with the given file
    /// additions and deletions. Returns the new commit sha.
    pub async fn commit_files(
        &self,
        message: &str,
        files: Vec<(String, Vec<u8>)>,
        deletions: Vec<String>,
    ) -> Result<String> {
        let branch = &self.options.branch;

        let head: RefResponse = self.get_json(&format!("git/ref/heads/{branch}")).await?;
        let parent = head.object.sha;
        let base: CommitResponse = self.get_json(&format!("git/commits/{parent}")).await?;
        debug!(branch = %branch, parent = %parent, "resolved branch head");

        let mut tree = Vec::with_capacity(files.len() + deletions.len());
        for (path, contents) in files {
            let blob: GitObject = self
                .send_json(
                    Method::POST,
                    "git/blobs",
                    &json!({ "content": STANDARD.encode(&contents), "encoding": "base64" }),
                )
                .await?;
            debug!(path = %path, sha = %blob.sha, "created blob");
            tree.push(TreeEntry {
                path,
                mode: GIT_FILE_MODE,
                kind: "blob",
                sha: Some(blob.sha),
            });
        }
        tree.extend(deletions.into_iter().map(|path| TreeEntry {
            path,
            mode: GIT_FILE_MODE,
            kind: "blob",
            sha: None,
        }));

        let new_tree: GitObject = self
            .send_json(
                Method::POST,
                "git/trees",
                &json!({ "base_tree": base.tree.sha, "tree": tree }),
            )
            .await?;

        let commit: GitObject = self
            .send_json(
                Method::POST,
                "git/commits",
                &json!({
                    "message": message,
                    "tree": new_tree.sha,
                    "parents": [parent],
                    "author": self.options.author,
                }),
            )
            .await?;

        let _: serde_json::Value = self
            .send_json(
                Method::PATCH,
                &format!("git/refs/heads/{branch}"),
                &json!({ "sha": commit.sha, "force": false }),
            )
            .await?;

        info!(branch = %branch, commit = %commit.sha, "committed to GitHub");
        Ok(commit.sha)
    }
}

/// Turns a non-success response into [`Error::Remote`]
async fn check(response: Response, method: &str, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Remote(format!("{method} {url} failed with {status}: {body}")))
}

#[async_trait]
impl Persistence for GithubPersistence {
    async fn publish(&self, entries: &[Entry]) -> Result<Published> {
        let changes = self.content.change_set(entries).await?;
        if changes.is_empty() {
            return Ok(Published::default());
        }

        let published = Published::from_changes(&changes, None);
        let commit = self
            .commit_files(
                PUBLISH_COMMIT_MESSAGE,
                changes.content_changes,
                changes.file_removes,
            )
            .await?;

        Ok(Published {
            commit: Some(commit),
            ..published
        })
    }
}

#[async_trait]
impl Media for GithubPersistence {
    async fn upload(&self, workspace: &str, file: MediaUpload) -> Result<String> {
        let location = self
            .content
            .resolver()
            .media_location(workspace, &file.path)?;
        self.commit_files(
            UPLOAD_COMMIT_MESSAGE,
            vec![(location.clone(), file.bytes)],
            Vec::new(),
        )
        .await?;
        Ok(location)
    }

    async fn download(&self, workspace: &str, location: &str) -> Result<Vec<u8>> {
        let location = self.content.resolver().media_file(workspace, location)?;
        let url = format!(
            "{}/{}/{}/{}/{location}",
            self.options.raw_url.trim_end_matches('/'),
            self.options.owner,
            self.options.repo,
            self.options.branch
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.options.token)
            .header(ACCEPT, GITHUB_RAW)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(location));
        }

        let bytes = check(response, "GET", &url).await?.bytes().await?;
        if bytes.is_empty() {
            return Err(Error::NotFound(location));
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> GithubOptions {
        GithubOptions {
            owner: "acme".to_string(),
            repo: "site".to_string(),
            branch: "main".to_string(),
            author: Author {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            token: "secret-token".to_string(),
            api_url: "https://api.example.com/".to_string(),
            raw_url: "https://raw.example.com".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", options());
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("acme"));
    }

    #[test]
    fn test_deletion_serializes_null_sha() {
        let entry = TreeEntry {
            path: "a.md".to_string(),
            mode: GIT_FILE_MODE,
            kind: "blob",
            sha: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["sha"], serde_json::Value::Null);
        assert_eq!(value["type"], "blob");
    }
}
