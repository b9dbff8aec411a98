//! Turns a repository URL into an owner/repository pair.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::GitHubError;

/// `[scheme://][www.]host/owner/repo[.git][/]` and nothing more. Anything deeper
/// (`/tree/<branch>`, `/blob/...`) is rejected instead of resolving to the last
/// two segments.
fn repo_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:[A-Za-z][A-Za-z0-9+.-]*://)?(?:www\.)?[^/\s]+/",
            r"([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$",
        ))
        .expect("repository URL pattern is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub repository: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
        }
    }

    /// Parses a repository URL such as `https://github.com/rust-lang/rust`.
    pub fn parse(url: &str) -> Result<Self, GitHubError> {
        let trimmed = url.trim();
        let captures = repo_url_pattern()
            .captures(trimmed)
            .ok_or_else(|| GitHubError::InvalidUrl(trimmed.to_string()))?;

        let owner = &captures[1];
        let repository = &captures[2];
        if owner.chars().all(|c| c == '.') || repository.chars().all(|c| c == '.') {
            return Err(GitHubError::InvalidUrl(trimmed.to_string()));
        }

        debug!(url = trimmed, owner, repository, "Resolved repository reference");
        Ok(Self::new(owner, repository))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repository)
    }
}
