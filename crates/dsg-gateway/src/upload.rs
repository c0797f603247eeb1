use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use bytes::Bytes;
use dsg_types::{ContentRoot, LedgerReceipt};

use crate::error::{GatewayError, GatewayResult};
use crate::Gateway;

/// Caller-visible record of a completed upload.
///
/// Never constructed unless both the storage dispersal and the ledger
/// recording succeeded — there is no half-formed result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadResult {
    pub root: ContentRoot,
    pub receipt: LedgerReceipt,
}

/// RAII membership in the set of roots with an upload in flight.
///
/// Removal happens on drop, so the slot is released on success, error, and
/// cancellation alike.
pub(crate) struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<ContentRoot>>,
    root: ContentRoot,
}

impl<'a> InFlightGuard<'a> {
    pub(crate) fn acquire(
        set: &'a Mutex<HashSet<ContentRoot>>,
        root: ContentRoot,
    ) -> Option<Self> {
        let mut slots = set.lock().expect("lock poisoned");
        if slots.insert(root) {
            Some(Self { set, root })
        } else {
            None
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .expect("lock poisoned")
            .remove(&self.root);
    }
}

impl Gateway {
    /// Upload an in-memory byte sequence.
    ///
    /// Drives `Hashing → Dispersing → Recording`; `tags` are opaque bytes
    /// attached to the ledger record.
    pub async fn upload_bytes(&self, bytes: Bytes, tags: &[u8]) -> GatewayResult<UploadResult> {
        let root = self.hasher.compute_root_bytes(&bytes);
        self.finish_upload(root, bytes, tags).await
    }

    /// Upload a file from disk.
    ///
    /// The root is derived by streaming the file through the chunked hasher;
    /// the same source is then re-read for dispersal. The file must not
    /// change between the two reads.
    pub async fn upload_file(&self, path: &Path, tags: &[u8]) -> GatewayResult<UploadResult> {
        let file = std::fs::File::open(path).map_err(GatewayError::SourceRead)?;
        let root = self.hasher.compute_root(file)?;
        let bytes = Bytes::from(
            tokio::fs::read(path)
                .await
                .map_err(GatewayError::SourceRead)?,
        );
        self.finish_upload(root, bytes, tags).await
    }

    /// Dispersal and recording, common to both upload entry points.
    async fn finish_upload(
        &self,
        root: ContentRoot,
        bytes: Bytes,
        tags: &[u8],
    ) -> GatewayResult<UploadResult> {
        let _slot = InFlightGuard::acquire(&self.in_flight, root)
            .ok_or(GatewayError::DuplicateUpload(root))?;
        tracing::info!(root = %root.short_hex(), size = bytes.len(), "upload hashed");

        // Storage success is a precondition for ledger submission: a root
        // that was never stored must never be advertised on the ledger.
        let handle = self
            .backend
            .submit(&root, bytes)
            .await
            .map_err(GatewayError::Dispersing)?;
        tracing::info!(root = %root.short_hex(), handle = %handle.id, "content dispersed");

        let receipt = self
            .recorder
            .record(root, tags, &self.signing_key)
            .await?;
        tracing::info!(root = %root.short_hex(), tx = %receipt.tx_id.short_hex(), "upload recorded");

        Ok(UploadResult { root, receipt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_blocks_second_acquisition() {
        let set = Mutex::new(HashSet::new());
        let root = ContentRoot::from_hash([1; 32]);

        let first = InFlightGuard::acquire(&set, root);
        assert!(first.is_some());
        assert!(InFlightGuard::acquire(&set, root).is_none());

        drop(first);
        assert!(InFlightGuard::acquire(&set, root).is_some());
    }

    #[test]
    fn distinct_roots_acquire_independently() {
        let set = Mutex::new(HashSet::new());
        let a = InFlightGuard::acquire(&set, ContentRoot::from_hash([1; 32]));
        let b = InFlightGuard::acquire(&set, ContentRoot::from_hash([2; 32]));
        assert!(a.is_some() && b.is_some());
    }
}
