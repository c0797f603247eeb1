use async_trait::async_trait;
use bytes::Bytes;
use dsg_types::{ContentRoot, StorageHandle};

use crate::error::DispersalResult;

/// Client boundary to the distributed storage backend.
///
/// All implementations must satisfy these invariants:
/// - Content is addressed by its precomputed [`ContentRoot`]; the client
///   trusts the root computed upstream and never re-hashes.
/// - Submission is idempotent: submitting the same root twice durably stores
///   the content once and succeeds both times.
/// - Implementations are safe for concurrent use without external locking;
///   the gateway shares one client across requests.
/// - The backend is trusted to durably store what it acknowledges, but NOT
///   trusted for integrity — callers re-verify on fetch.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Disperse `bytes` under `root`.
    ///
    /// On success the backend has durably accepted content addressable by
    /// `root`. On failure no partial handle is returned.
    async fn submit(&self, root: &ContentRoot, bytes: Bytes) -> DispersalResult<StorageHandle>;

    /// Reconstruct the byte stream stored under `root`.
    ///
    /// Fails with [`DispersalError::NotFound`](crate::DispersalError::NotFound)
    /// if the backend has no content for the root.
    async fn fetch(&self, root: &ContentRoot) -> DispersalResult<Bytes>;

    /// Check whether the backend holds content for `root`.
    async fn exists(&self, root: &ContentRoot) -> DispersalResult<bool>;
}
