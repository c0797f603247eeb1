use bytes::Bytes;
use dsg_storage::DispersalError;
use dsg_types::ContentRoot;

use crate::error::{GatewayError, GatewayResult};
use crate::Gateway;

/// Verified bytes returned from a download.
///
/// Only constructed after the recomputed root matched the requested one, so
/// `verified` is always `true` on any value a caller can observe; bytes that
/// fail verification are discarded inside the gateway and never escape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadResult {
    bytes: Bytes,
    pub verified: bool,
}

impl DownloadResult {
    /// The verified content.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume the result, yielding the verified content.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Gateway {
    /// Fetch the content stored under `root` and verify it before release.
    ///
    /// Drives `Fetching → Verifying`. The backend is untrusted for
    /// integrity: the root is recomputed from the fetched bytes and compared
    /// digest-for-digest against the request.
    pub async fn download(&self, root: &ContentRoot) -> GatewayResult<DownloadResult> {
        let bytes = match self.backend.fetch(root).await {
            Ok(bytes) => bytes,
            Err(DispersalError::NotFound(missing)) => {
                return Err(GatewayError::NotFound(missing))
            }
            Err(e) => return Err(GatewayError::Fetching(e)),
        };
        tracing::debug!(root = %root.short_hex(), size = bytes.len(), "content fetched");

        let computed = self.hasher.compute_root_bytes(&bytes);
        if computed != *root {
            tracing::warn!(
                requested = %root.short_hex(),
                computed = %computed.short_hex(),
                "fetched content failed verification"
            );
            // `bytes` is dropped here; unverified data never reaches the caller.
            return Err(GatewayError::Integrity {
                requested: *root,
                computed,
            });
        }

        Ok(DownloadResult {
            bytes,
            verified: true,
        })
    }
}
