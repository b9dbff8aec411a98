//! Recursive tree listings.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::GitHubClient;
use crate::error::GitHubError;
use crate::repo_ref::RepoRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "blob")]
    File,
    #[serde(rename = "tree")]
    Directory,
    /// A submodule pin. Listed, never fetched.
    #[serde(rename = "commit")]
    Submodule,
}

/// One row of a recursive tree listing. Paths are unique within a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Present for files only.
    #[serde(default)]
    pub size: Option<u64>,
    /// API location of the blob content.
    #[serde(default, rename = "url")]
    pub location: Option<String>,
    pub sha: String,
}

impl TreeEntry {
    pub fn file(path: impl Into<String>, size: u64, location: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size: Some(size),
            location: Some(location.into()),
            sha: String::new(),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            size: None,
            location: None,
            sha: String::new(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

#[derive(Deserialize)]
struct TreeListing {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

impl GitHubClient {
    /// Full recursive listing of `tree_sha`. A 2xx body that is not a listing is
    /// a [`GitHubError::TreeParse`], never an empty tree.
    pub async fn fetch_tree(
        &self,
        repo: &RepoRef,
        tree_sha: &str,
    ) -> Result<Vec<TreeEntry>, GitHubError> {
        let url = self.repo_endpoint(repo, &format!("/git/trees/{tree_sha}"));
        let request = self.request(&url).query(&[("recursive", "1")]);
        let body = self.send(repo, request).await?.bytes().await?;

        let listing: TreeListing = serde_json::from_slice(&body).map_err(|e| {
            error!(repo = %repo, tree = tree_sha, error = %e, "Error parsing tree listing");
            GitHubError::TreeParse {
                owner: repo.owner.clone(),
                repo: repo.repository.clone(),
            }
        })?;

        if listing.truncated {
            warn!(
                repo = %repo,
                entries = listing.tree.len(),
                "Tree listing was truncated by GitHub"
            );
        }
        info!(repo = %repo, entries = listing.tree.len(), "Fetched tree listing");
        Ok(listing.tree)
    }
}
