//! Corpus strategies: one request per blob, or one archive for everything.

mod archive;
mod blob;

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};

pub use archive::{read_archive, strip_archive_root, ArchiveContentFetcher};
pub use blob::BlobContentFetcher;

/// Runs `fetch` over `items` with at most `limit` calls in flight, stopping at
/// the first error. Results come back in input order whatever order the calls
/// finish in. Calls still pending when an error arrives are dropped.
pub async fn fetch_bounded<T, R, E, F, Fut>(
    items: impl IntoIterator<Item = T>,
    limit: usize,
    fetch: F,
) -> Result<Vec<R>, E>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    stream::iter(items)
        .map(fetch)
        .buffered(limit.max(1))
        .try_collect()
        .await
}
