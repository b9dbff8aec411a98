//! Status classification, applied to every response before its body is read.

use reqwest::StatusCode;
use tracing::warn;

use crate::error::GitHubError;
use crate::repo_ref::RepoRef;

/// Maps a completed call's status onto the failure taxonomy.
///
/// | status        | error                      |
/// |---------------|----------------------------|
/// | 2xx           | none                       |
/// | 404           | [`GitHubError::NotFound`]    |
/// | 403, 429      | [`GitHubError::RateLimited`] |
/// | other non-2xx | [`GitHubError::Access`]      |
///
/// No retry happens here; that is the caller's decision.
pub fn classify_status(status: StatusCode, repo: &RepoRef) -> Result<(), GitHubError> {
    if status.is_success() {
        return Ok(());
    }

    let owner = repo.owner.clone();
    let name = repo.repository.clone();
    let error = match status {
        StatusCode::NOT_FOUND => GitHubError::NotFound { owner, repo: name },
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimited {
            owner,
            repo: name,
            status: status.as_u16(),
        },
        other => GitHubError::Access {
            owner,
            repo: name,
            status: other.as_u16(),
        },
    };
    warn!(repo = %repo, status = status.as_u16(), error = %error, "GitHub request failed");
    Err(error)
}
