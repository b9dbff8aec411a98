use std::io::{Read, Seek};

use async_trait::async_trait;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::contract::{ContentSource, Corpus, FormattedFile};
use crate::error::GitHubError;
use crate::filter::FileFilter;
use crate::github::{GitHubClient, TreeEntry};
use crate::repo_ref::RepoRef;

/// Downloads the repository as one zipball and extracts the corpus locally.
/// One large transfer instead of one request per file.
#[derive(Debug, Clone)]
pub struct ArchiveContentFetcher {
    client: GitHubClient,
    filter: FileFilter,
    reference: Option<String>,
}

impl ArchiveContentFetcher {
    pub fn new(client: GitHubClient, filter: FileFilter) -> Self {
        Self {
            client,
            filter,
            reference: None,
        }
    }

    /// Pins the archive to a branch, tag or commit instead of the default branch.
    pub fn at_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

#[async_trait]
impl ContentSource for ArchiveContentFetcher {
    /// The archive is enumerated directly; `entries` is not consulted.
    async fn collect(&self, repo: &RepoRef, _entries: &[TreeEntry]) -> Result<Corpus, GitHubError> {
        let archive = self
            .client
            .download_archive(repo, self.reference.as_deref())
            .await?;
        let filter = self.filter;
        let corpus = tokio::task::spawn_blocking(move || read_archive(archive, &filter)).await??;
        info!(
            repo = %repo,
            files = corpus.len(),
            skipped = corpus.skipped_count(),
            "Assembled corpus from archive"
        );
        Ok(corpus)
    }
}

/// Extracts eligible members of a zipball in archive order. Member names lose
/// their synthetic top-level directory before filtering and formatting.
///
/// The declared size is only trusted for the first check: the read itself stops
/// at the ceiling, and a member that reaches it is skipped.
pub fn read_archive<R: Read + Seek>(
    reader: R,
    filter: &FileFilter,
) -> Result<Corpus, GitHubError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut corpus = Corpus::default();

    for index in 0..archive.len() {
        let mut member = archive.by_index(index)?;
        if member.is_dir() {
            continue;
        }
        let name = member.name().to_string();
        let Some(path) = strip_archive_root(&name) else {
            continue;
        };
        if !filter.accepts_member(path, member.size()) {
            continue;
        }

        let mut bytes = Vec::with_capacity(member.size() as usize);
        (&mut member)
            .take(filter.max_file_size)
            .read_to_end(&mut bytes)?;
        if !filter.accepts_size(bytes.len() as u64) {
            warn!(
                path,
                declared = member.size(),
                limit = filter.max_file_size,
                "Archive member exceeds its declared size, skipping"
            );
            corpus.skipped.push(path.to_string());
            continue;
        }
        match String::from_utf8(bytes) {
            Ok(text) => {
                debug!(path, bytes = text.len(), "Extracted file");
                corpus.files.push(FormattedFile::new(path, text));
            }
            Err(e) => {
                warn!(path, error = %e, "Failed to decode content for file");
                corpus.skipped.push(path.to_string());
            }
        }
    }

    Ok(corpus)
}

/// `owner-repo-1a2b3c/src/lib.rs` → `src/lib.rs`. Members directly at the top
/// level have no logical path and yield `None`.
pub fn strip_archive_root(name: &str) -> Option<&str> {
    let (_, rest) = name.split_once('/')?;
    (!rest.is_empty()).then_some(rest)
}
