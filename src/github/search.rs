use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::GitHubClient;
use crate::error::GitHubError;
use crate::repo_ref::RepoRef;

/// GitHub caps search pages at 100 results.
const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularRepo {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub stargazers_count: u64,
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<PopularRepo>,
}

impl GitHubClient {
    /// Up to `count` repositories with more than 1000 stars, most starred first.
    /// Pages are requested one at a time with `page_delay` between them.
    pub async fn popular_repos(
        &self,
        count: usize,
        page_delay: Duration,
    ) -> Result<Vec<PopularRepo>, GitHubError> {
        // Search failures are classified against a pseudo repository.
        let search = RepoRef::new("search", "repositories");
        let url = format!("{}/search/repositories", self.api_base());
        let per_page = count.clamp(1, MAX_PER_PAGE);

        let mut repos = Vec::with_capacity(count);
        let mut page = 1usize;
        while repos.len() < count {
            let request = self
                .request(&url)
                .query(&[("q", "stars:>1000"), ("sort", "stars"), ("order", "desc")])
                .query(&[("page", page), ("per_page", per_page)]);
            let batch: SearchPage = self.send_json(&search, request, "search").await?;

            let received = batch.items.len();
            repos.extend(batch.items);
            debug!(page, received, total = repos.len(), "Fetched search page");
            if received < per_page {
                break;
            }

            page += 1;
            if repos.len() < count {
                tokio::time::sleep(page_delay).await;
            }
        }

        repos.truncate(count);
        info!(count = repos.len(), "Fetched popular repositories");
        Ok(repos)
    }
}
