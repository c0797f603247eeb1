use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use dsg_types::{ContentRoot, StorageHandle};

use crate::error::{DispersalError, DispersalResult};
use crate::traits::StorageBackend;

/// In-memory, HashMap-based storage backend.
///
/// Intended for tests and embedding. Segments are held behind a `RwLock` for
/// safe concurrent access and deduplicated by root: re-submitting a root the
/// backend already holds is a no-op that still succeeds.
pub struct InMemoryBackend {
    segments: RwLock<HashMap<ContentRoot, Bytes>>,
}

impl InMemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            segments: RwLock::new(HashMap::new()),
        }
    }

    /// Number of distinct roots currently stored.
    pub fn len(&self) -> usize {
        self.segments.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.segments.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored segments.
    pub fn total_bytes(&self) -> u64 {
        self.segments
            .read()
            .expect("lock poisoned")
            .values()
            .map(|b| b.len() as u64)
            .sum()
    }

    /// Remove all stored segments.
    pub fn clear(&self) {
        self.segments.write().expect("lock poisoned").clear();
    }

    /// Overwrite the bytes stored under `root` without any association
    /// check. The backend is untrusted for integrity; this is the hook that
    /// models it returning bytes that do not hash to the requested root.
    pub fn insert_unchecked(&self, root: ContentRoot, bytes: Bytes) {
        self.segments
            .write()
            .expect("lock poisoned")
            .insert(root, bytes);
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn submit(&self, root: &ContentRoot, bytes: Bytes) -> DispersalResult<StorageHandle> {
        let length = bytes.len() as u64;
        let mut map = self.segments.write().expect("lock poisoned");
        // Idempotent: identical roots address identical content.
        map.entry(*root).or_insert(bytes);
        Ok(StorageHandle::new(format!("mem-{}", root.short_hex()), length))
    }

    async fn fetch(&self, root: &ContentRoot) -> DispersalResult<Bytes> {
        let map = self.segments.read().expect("lock poisoned");
        map.get(root)
            .cloned()
            .ok_or(DispersalError::NotFound(*root))
    }

    async fn exists(&self, root: &ContentRoot) -> DispersalResult<bool> {
        let map = self.segments.read().expect("lock poisoned");
        Ok(map.contains_key(root))
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("segment_count", &self.len())
            .finish()
    }
}
