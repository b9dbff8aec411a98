use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::classify::classify_status;
use crate::config::GitHubSettings;
use crate::error::GitHubError;
use crate::repo_ref::RepoRef;

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Authenticated handle on the GitHub REST API. Cheap to clone: the underlying
/// connection pool is shared.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: String,
    token: Option<String>,
    archive_timeout: Duration,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSettings) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            http,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            archive_timeout: settings.archive_timeout(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub(crate) fn archive_timeout(&self) -> Duration {
        self.archive_timeout
    }

    /// `{api_base}/repos/{owner}/{repo}{suffix}`
    pub(crate) fn repo_endpoint(&self, repo: &RepoRef, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.api_base, repo.owner, repo.repository, suffix
        )
    }

    /// GET request carrying the bearer token, if one is configured.
    pub(crate) fn request(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends `request` and classifies the status before anyone reads the body.
    pub(crate) async fn send(
        &self,
        repo: &RepoRef,
        request: RequestBuilder,
    ) -> Result<Response, GitHubError> {
        let response = request.send().await.map_err(|e| {
            error!(repo = %repo, error = %e, "GitHub request could not be sent");
            GitHubError::Transport(e)
        })?;
        debug!(
            repo = %repo,
            url = %response.url(),
            status = response.status().as_u16(),
            "GitHub response"
        );
        classify_status(response.status(), repo)?;
        Ok(response)
    }

    /// Sends `request` and parses a successful body as `T`. A body that does not
    /// parse is reported as [`GitHubError::MalformedResponse`] for `endpoint`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        repo: &RepoRef,
        request: RequestBuilder,
        endpoint: &'static str,
    ) -> Result<T, GitHubError> {
        let body = self.send(repo, request).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            error!(repo = %repo, endpoint, error = %e, "Could not parse GitHub response");
            GitHubError::MalformedResponse {
                owner: repo.owner.clone(),
                repo: repo.repository.clone(),
                endpoint,
            }
        })
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("has_token", &self.token.is_some())
            .field("archive_timeout", &self.archive_timeout)
            .finish()
    }
}
