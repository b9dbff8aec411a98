//! gitsummarize: repository content acquisition for LLM summarisation.
//!
//! Given a GitHub repository URL, the crate resolves the default branch's
//! latest commit, lists its full tree, renders that tree as an ASCII directory
//! view and assembles a corpus of eligible text files. File contents come
//! either from bounded concurrent blob fetches or from a single archive
//! download, behind the [`contract::ContentSource`] seam.

pub mod acquire;
pub mod cli;
pub mod config;
pub mod contract;
pub mod corpus;
pub mod directory_tree;
pub mod error;
pub mod filter;
pub mod github;
pub mod keys;
pub mod load_config;
pub mod repo_ref;

pub use acquire::{RepoAcquirer, RepoSnapshot};
pub use error::{DecodeError, GitHubError, KeyError};
pub use repo_ref::RepoRef;
