use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::fetch_bounded;
use crate::contract::{ContentSource, Corpus, FormattedFile};
use crate::error::GitHubError;
use crate::filter::FileFilter;
use crate::github::{GitHubClient, TreeEntry};
use crate::repo_ref::RepoRef;

/// Fetches every eligible file of a listing as its own blob, at most
/// `concurrency` at a time.
#[derive(Debug, Clone)]
pub struct BlobContentFetcher {
    client: GitHubClient,
    filter: FileFilter,
    concurrency: usize,
}

enum FileOutcome {
    Text(FormattedFile),
    Skipped(String),
}

impl BlobContentFetcher {
    pub fn new(client: GitHubClient, filter: FileFilter, concurrency: usize) -> Self {
        Self {
            client,
            filter,
            concurrency: concurrency.max(1),
        }
    }

    async fn fetch_one(
        &self,
        repo: &RepoRef,
        entry: &TreeEntry,
    ) -> Result<FileOutcome, GitHubError> {
        let Some(location) = entry.location.as_deref() else {
            warn!(path = %entry.path, "Tree entry has no content location, skipping");
            return Ok(FileOutcome::Skipped(entry.path.clone()));
        };

        let payload = self.client.fetch_blob(repo, location).await?;
        match payload.decode_text() {
            Ok(text) => {
                debug!(path = %entry.path, bytes = text.len(), "Fetched file");
                Ok(FileOutcome::Text(FormattedFile::new(entry.path.clone(), text)))
            }
            Err(e) => {
                warn!(path = %entry.path, error = %e, "Failed to decode content for file");
                Ok(FileOutcome::Skipped(entry.path.clone()))
            }
        }
    }
}

#[async_trait]
impl ContentSource for BlobContentFetcher {
    async fn collect(&self, repo: &RepoRef, entries: &[TreeEntry]) -> Result<Corpus, GitHubError> {
        // Owned entries keep the fan-out closure free of higher-ranked borrows.
        let eligible: Vec<TreeEntry> = entries
            .iter()
            .filter(|entry| self.filter.accepts(entry))
            .cloned()
            .collect();
        info!(
            repo = %repo,
            listed = entries.len(),
            eligible = eligible.len(),
            concurrency = self.concurrency,
            "Fetching repository files"
        );

        let outcomes = fetch_bounded(eligible, self.concurrency, |entry| async move {
            self.fetch_one(repo, &entry).await
        })
        .await?;

        let mut corpus = Corpus::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Text(file) => corpus.files.push(file),
                FileOutcome::Skipped(path) => corpus.skipped.push(path),
            }
        }
        info!(
            repo = %repo,
            files = corpus.len(),
            skipped = corpus.skipped_count(),
            "Assembled corpus from blobs"
        );
        Ok(corpus)
    }
}
