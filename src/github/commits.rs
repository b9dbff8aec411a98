//! Default branch → latest commit → tree identifier.
//!
//! Each lookup needs the previous answer, so the three calls run strictly one
//! after another and the first failure ends the chain.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::GitHubClient;
use crate::error::GitHubError;
use crate::repo_ref::RepoRef;

/// The repository state a directory tree and corpus are taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommit {
    pub branch: String,
    pub commit_sha: String,
    pub tree_sha: String,
}

#[derive(Deserialize)]
struct RepositoryBody {
    default_branch: String,
}

#[derive(Deserialize)]
struct CommitBody {
    sha: String,
}

#[derive(Deserialize)]
struct CommitTreeBody {
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    tree: ShaRef,
}

#[derive(Deserialize)]
struct ShaRef {
    sha: String,
}

impl GitHubClient {
    pub async fn default_branch(&self, repo: &RepoRef) -> Result<String, GitHubError> {
        let url = self.repo_endpoint(repo, "");
        let body: RepositoryBody = self
            .send_json(repo, self.request(&url), "repository")
            .await?;
        debug!(repo = %repo, branch = %body.default_branch, "Resolved default branch");
        Ok(body.default_branch)
    }

    pub async fn latest_commit(&self, repo: &RepoRef, branch: &str) -> Result<String, GitHubError> {
        let url = self.repo_endpoint(repo, &format!("/commits/{branch}"));
        let body: CommitBody = self.send_json(repo, self.request(&url), "commit").await?;
        debug!(repo = %repo, branch, commit = %body.sha, "Resolved latest commit");
        Ok(body.sha)
    }

    pub async fn tree_sha(&self, repo: &RepoRef, commit_sha: &str) -> Result<String, GitHubError> {
        let url = self.repo_endpoint(repo, &format!("/commits/{commit_sha}"));
        let body: CommitTreeBody = self.send_json(repo, self.request(&url), "commit").await?;
        debug!(repo = %repo, commit = commit_sha, tree = %body.commit.tree.sha, "Resolved tree");
        Ok(body.commit.tree.sha)
    }

    pub async fn resolve_commit(&self, repo: &RepoRef) -> Result<ResolvedCommit, GitHubError> {
        let branch = self.default_branch(repo).await?;
        let commit_sha = self.latest_commit(repo, &branch).await?;
        let tree_sha = self.tree_sha(repo, &commit_sha).await?;
        info!(repo = %repo, branch = %branch, commit = %commit_sha, "Resolved repository state");
        Ok(ResolvedCommit {
            branch,
            commit_sha,
            tree_sha,
        })
    }
}
