//! GitHub REST access: status classification, commit resolution, tree listings,
//! blobs, archives, metadata and search.

mod archive;
mod blob;
mod classify;
mod client;
mod commits;
mod metadata;
mod search;
mod tree;

pub use blob::BlobPayload;
pub use classify::classify_status;
pub use client::GitHubClient;
pub use commits::ResolvedCommit;
pub use metadata::RepoMetadata;
pub use search::PopularRepo;
pub use tree::{EntryKind, TreeEntry};
