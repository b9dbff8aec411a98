use serde::{Deserialize, Serialize};

use super::GitHubClient;
use crate::error::GitHubError;
use crate::repo_ref::RepoRef;

/// Repository facts stored next to a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub num_stars: u64,
    pub num_forks: u64,
    pub language: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct RepositoryBody {
    stargazers_count: u64,
    forks_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl GitHubClient {
    pub async fn repo_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, GitHubError> {
        let url = self.repo_endpoint(repo, "");
        let body: RepositoryBody = self
            .send_json(repo, self.request(&url), "repository")
            .await?;
        Ok(RepoMetadata {
            num_stars: body.stargazers_count,
            num_forks: body.forks_count,
            language: body.language,
            description: body.description,
        })
    }
}
