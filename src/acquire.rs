//! Repository acquisition: URL → commit → tree → directory string and corpus.
//!
//! Every public operation runs under one overall deadline. When the deadline
//! fires, or the caller drops the returned future, every still-pending child
//! request is dropped with it.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{ContentSettings, Settings, StrategyKind};
use crate::contract::{ContentSource, Corpus};
use crate::corpus::{ArchiveContentFetcher, BlobContentFetcher};
use crate::directory_tree::directory_structure;
use crate::error::GitHubError;
use crate::filter::FileFilter;
use crate::github::{GitHubClient, RepoMetadata, ResolvedCommit, TreeEntry};
use crate::repo_ref::RepoRef;

/// Both products of one acquisition, taken from the same commit.
#[derive(Debug, Clone)]
pub struct RepoSnapshot {
    pub repo: RepoRef,
    pub commit: ResolvedCommit,
    pub directory_tree: String,
    pub corpus: Corpus,
}

/// Short machine-readable description of a snapshot, for logs and CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub repository: String,
    pub branch: String,
    pub commit: String,
    pub files: usize,
    pub skipped: usize,
}

impl RepoSnapshot {
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            repository: self.repo.to_string(),
            branch: self.commit.branch.clone(),
            commit: self.commit.commit_sha.clone(),
            files: self.corpus.len(),
            skipped: self.corpus.skipped_count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RepoAcquirer {
    client: GitHubClient,
    content: ContentSettings,
    deadline: Duration,
}

impl RepoAcquirer {
    pub fn new(client: GitHubClient, settings: &Settings) -> Self {
        Self {
            client,
            content: settings.content.clone(),
            deadline: settings.github.deadline(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GitHubError> {
        Ok(Self::new(GitHubClient::new(&settings.github)?, settings))
    }

    /// Overrides the overall deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    pub fn filter(&self) -> FileFilter {
        FileFilter::new(self.content.max_file_size)
    }

    pub fn blob_source(&self) -> BlobContentFetcher {
        BlobContentFetcher::new(
            self.client.clone(),
            self.filter(),
            self.content.concurrency,
        )
    }

    pub fn archive_source(&self) -> ArchiveContentFetcher {
        ArchiveContentFetcher::new(self.client.clone(), self.filter())
    }

    /// Resolves [`StrategyKind::Auto`] against a listing: the archive wins once
    /// the eligible-file count exceeds the configured threshold.
    pub fn choose_strategy(
        &self,
        requested: StrategyKind,
        entries: &[TreeEntry],
    ) -> StrategyKind {
        match requested {
            StrategyKind::Auto => {
                let filter = self.filter();
                let eligible = entries.iter().filter(|entry| filter.accepts(entry)).count();
                if eligible > self.content.archive_threshold {
                    StrategyKind::Archive
                } else {
                    StrategyKind::Blob
                }
            }
            explicit => explicit,
        }
    }

    /// Rendered directory tree of the default branch's latest commit.
    pub async fn directory_structure(&self, url: &str) -> Result<String, GitHubError> {
        let repo = RepoRef::parse(url)?;
        self.within_deadline(&repo, async {
            let (_, entries) = self.listing(&repo).await?;
            Ok(directory_structure(&entries))
        })
        .await
    }

    pub async fn corpus(&self, url: &str, strategy: StrategyKind) -> Result<Corpus, GitHubError> {
        let repo = RepoRef::parse(url)?;
        self.within_deadline(&repo, async {
            if strategy == StrategyKind::Archive {
                // The archive lists itself; no need to resolve the tree first.
                return self.archive_source().collect(&repo, &[]).await;
            }
            let (commit, entries) = self.listing(&repo).await?;
            self.collect(strategy, &repo, &commit, &entries).await
        })
        .await
    }

    /// Directory tree and corpus from a single commit resolution.
    pub async fn snapshot(
        &self,
        url: &str,
        strategy: StrategyKind,
    ) -> Result<RepoSnapshot, GitHubError> {
        let repo = RepoRef::parse(url)?;
        self.within_deadline(&repo, async {
            let (commit, entries) = self.listing(&repo).await?;
            let corpus = self.collect(strategy, &repo, &commit, &entries).await?;
            Ok(self.assemble(repo.clone(), commit, &entries, corpus))
        })
        .await
    }

    /// [`Self::snapshot`] with a caller-supplied content strategy.
    pub async fn snapshot_with<S>(
        &self,
        url: &str,
        source: &S,
    ) -> Result<RepoSnapshot, GitHubError>
    where
        S: ContentSource + ?Sized,
    {
        let repo = RepoRef::parse(url)?;
        self.within_deadline(&repo, async {
            let (commit, entries) = self.listing(&repo).await?;
            let corpus = source.collect(&repo, &entries).await?;
            Ok(self.assemble(repo.clone(), commit, &entries, corpus))
        })
        .await
    }

    pub async fn metadata(&self, url: &str) -> Result<RepoMetadata, GitHubError> {
        let repo = RepoRef::parse(url)?;
        self.within_deadline(&repo, self.client.repo_metadata(&repo)).await
    }

    async fn listing(
        &self,
        repo: &RepoRef,
    ) -> Result<(ResolvedCommit, Vec<TreeEntry>), GitHubError> {
        let commit = self.client.resolve_commit(repo).await?;
        let entries = self.client.fetch_tree(repo, &commit.tree_sha).await?;
        Ok((commit, entries))
    }

    async fn collect(
        &self,
        strategy: StrategyKind,
        repo: &RepoRef,
        commit: &ResolvedCommit,
        entries: &[TreeEntry],
    ) -> Result<Corpus, GitHubError> {
        let chosen = self.choose_strategy(strategy, entries);
        info!(repo = %repo, requested = ?strategy, chosen = ?chosen, "Collecting corpus");
        match chosen {
            StrategyKind::Archive => {
                self.archive_source()
                    .at_reference(commit.commit_sha.clone())
                    .collect(repo, entries)
                    .await
            }
            StrategyKind::Blob | StrategyKind::Auto => {
                self.blob_source().collect(repo, entries).await
            }
        }
    }

    fn assemble(
        &self,
        repo: RepoRef,
        commit: ResolvedCommit,
        entries: &[TreeEntry],
        corpus: Corpus,
    ) -> RepoSnapshot {
        let snapshot = RepoSnapshot {
            directory_tree: directory_structure(entries),
            repo,
            commit,
            corpus,
        };
        info!(summary = ?snapshot.summary(), "Repository snapshot complete");
        snapshot
    }

    async fn within_deadline<T>(
        &self,
        repo: &RepoRef,
        work: impl Future<Output = Result<T, GitHubError>>,
    ) -> Result<T, GitHubError> {
        match tokio::time::timeout(self.deadline, work).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    repo = %repo,
                    deadline = ?self.deadline,
                    "Acquisition deadline exceeded, abandoning pending requests"
                );
                Err(GitHubError::DeadlineExceeded {
                    owner: repo.owner.clone(),
                    repo: repo.repository.clone(),
                    after: self.deadline,
                })
            }
        }
    }
}
