use std::fs::File;

use tokio::io::AsyncWriteExt;
use tracing::info;

use super::GitHubClient;
use crate::error::GitHubError;
use crate::repo_ref::RepoRef;

impl GitHubClient {
    /// Streams a zipball of `reference` (default branch when `None`) into an
    /// anonymous temporary file, removed once the returned handle is dropped.
    pub async fn download_archive(
        &self,
        repo: &RepoRef,
        reference: Option<&str>,
    ) -> Result<File, GitHubError> {
        let suffix = match reference {
            Some(reference) => format!("/zipball/{reference}"),
            None => "/zipball".to_string(),
        };
        let url = self.repo_endpoint(repo, &suffix);
        let request = self.request(&url).timeout(self.archive_timeout());
        let mut response = self.send(repo, request).await?;

        let mut out = tokio::fs::File::from_std(tempfile::tempfile()?);
        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await? {
            out.write_all(&chunk).await?;
            written += chunk.len();
        }
        out.flush().await?;

        info!(
            repo = %repo,
            reference = reference.unwrap_or("default"),
            bytes = written,
            "Downloaded repository archive"
        );
        Ok(out.into_std().await)
    }
}
