//! # contract: one capability, "produce a corpus", with interchangeable strategies
//!
//! [`ContentSource`] is implemented by the per-blob fetcher and by the archive
//! fetcher in [`crate::corpus`]. Callers pick one per repository, typically from
//! its size and the remaining API quota, and never need to know which ran.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so orchestration can be tested with
//!   a `MockContentSource` instead of a live repository.
//!
//! ## Failure contract
//! - Transport and status failures abort the whole collection.
//! - A file that cannot be decoded as text is dropped, logged, and listed in
//!   [`Corpus::skipped`]; it never fails the collection.

use async_trait::async_trait;

#[allow(unused_imports)]
use mockall::{automock, predicate::*};

use crate::error::GitHubError;
use crate::github::TreeEntry;
use crate::repo_ref::RepoRef;

/// Banner rule framing each file in the corpus.
pub const BANNER_RULE: &str =
    "=============================================================================";

/// A decoded file ready for inclusion in the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedFile {
    pub path: String,
    pub text: String,
}

impl FormattedFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// The file wrapped in its path banner.
    pub fn render(&self) -> String {
        format!(
            "\n{rule}\nFile: {path}\n{rule}\n{text}\n",
            rule = BANNER_RULE,
            path = self.path,
            text = self.text
        )
    }
}

/// Decoded files in listing order, plus the paths that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub files: Vec<FormattedFile>,
    pub skipped: Vec<String>,
}

impl Corpus {
    /// All banners joined by blank lines.
    pub fn text(&self) -> String {
        self.files
            .iter()
            .map(FormattedFile::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.path.as_str())
    }
}

/// Produces a corpus for a repository.
///
/// `entries` is the recursive tree listing already fetched for the repository;
/// strategies that enumerate content themselves may ignore it.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn collect(&self, repo: &RepoRef, entries: &[TreeEntry]) -> Result<Corpus, GitHubError>;
}
