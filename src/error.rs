//! Failure taxonomy for repository acquisition and credential rotation.
//!
//! `GitHubError` aborts an acquisition and is surfaced to the caller, which maps
//! it onto a user-facing status. `DecodeError` is per file and never escapes a
//! corpus build: the file is dropped and recorded as skipped instead.

use std::time::Duration;

use crate::keys::KeyGroup;

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("Invalid GitHub URL: {0}")]
    InvalidUrl(String),

    /// Any non-2xx outcome not covered by a more specific variant.
    #[error("Failed to access GitHub repository {owner}/{repo} (HTTP {status})")]
    Access {
        owner: String,
        repo: String,
        status: u16,
    },

    #[error("Repository {owner}/{repo} not found")]
    NotFound { owner: String, repo: String },

    /// 429, and also 403: GitHub answers 403 both for exhausted quotas and for
    /// missing permissions. `status` keeps the two apart.
    #[error("GitHub rate limit exceeded for repository {owner}/{repo} (HTTP {status})")]
    RateLimited {
        owner: String,
        repo: String,
        status: u16,
    },

    /// 2xx tree listing whose body is not a tree.
    #[error("Failed to get tree for repository {owner}/{repo}")]
    TreeParse { owner: String, repo: String },

    #[error("Unexpected {endpoint} response for repository {owner}/{repo}")]
    MalformedResponse {
        owner: String,
        repo: String,
        endpoint: &'static str,
    },

    #[error("Acquisition of {owner}/{repo} exceeded its deadline of {after:?}")]
    DeadlineExceeded {
        owner: String,
        repo: String,
        after: Duration,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl GitHubError {
    /// True for every upstream non-2xx outcome: the generic `Access` kind and
    /// its `NotFound` and `RateLimited` specialisations.
    pub fn is_access(&self) -> bool {
        matches!(
            self,
            GitHubError::Access { .. }
                | GitHubError::NotFound { .. }
                | GitHubError::RateLimited { .. }
        )
    }

    /// Owner and repository name, for variants tied to one repository.
    pub fn repository(&self) -> Option<(&str, &str)> {
        match self {
            GitHubError::Access { owner, repo, .. }
            | GitHubError::NotFound { owner, repo }
            | GitHubError::RateLimited { owner, repo, .. }
            | GitHubError::TreeParse { owner, repo }
            | GitHubError::MalformedResponse { owner, repo, .. }
            | GitHubError::DeadlineExceeded { owner, repo, .. } => Some((owner, repo)),
            _ => None,
        }
    }
}

/// Why a single file could not be turned into text.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unsupported blob encoding {0:?}")]
    Encoding(String),

    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("content is not UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("no API keys configured for credential group '{0}'")]
    NoKeys(KeyGroup),
}
