use std::io::Read;

use dsg_types::ContentRoot;

use crate::chunker::{Chunker, DEFAULT_CHUNK_SIZE};
use crate::merkle::{hash_leaf, MerkleTree};

/// Errors from root computation.
#[derive(Debug, thiserror::Error)]
pub enum HasherError {
    /// The byte source could not be fully read. No partial root is produced.
    #[error("failed to read byte source: {0}")]
    Io(#[from] std::io::Error),

    /// Chunk size of zero cannot partition input.
    #[error("chunk size must be non-zero")]
    InvalidChunkSize,
}

/// Streaming chunked Merkle hasher.
///
/// Derives a single deterministic [`ContentRoot`] from a byte source read
/// sequentially in fixed-size chunks. Only the running set of 32-byte leaf
/// hashes is held in memory, never the file itself. A pure function of the
/// input bytes and the configured chunk size; no side effects.
#[derive(Clone, Copy, Debug)]
pub struct ChunkedHasher {
    chunk_size: usize,
}

impl ChunkedHasher {
    /// Create a hasher with the given chunk size.
    pub fn new(chunk_size: usize) -> Result<Self, HasherError> {
        if chunk_size == 0 {
            return Err(HasherError::InvalidChunkSize);
        }
        Ok(Self { chunk_size })
    }

    /// The configured chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Compute the content root of a byte source.
    ///
    /// Empty input yields the leaf hash of the zero-length chunk — a fixed,
    /// deterministic digest, not an error. Single-chunk input yields that
    /// chunk's leaf hash directly.
    pub fn compute_root<R: Read>(&self, reader: R) -> Result<ContentRoot, HasherError> {
        let mut leaves = Vec::new();
        for chunk in Chunker::new(reader, self.chunk_size) {
            leaves.push(hash_leaf(&chunk?));
        }
        Ok(MerkleTree::from_leaves(leaves).root())
    }

    /// Compute the content root of an in-memory byte slice.
    pub fn compute_root_bytes(&self, data: &[u8]) -> ContentRoot {
        let leaves = data.chunks(self.chunk_size).map(hash_leaf).collect();
        MerkleTree::from_leaves(leaves).root()
    }

    /// Re-derive the root from a byte source and compare against `expected`.
    pub fn verify_root<R: Read>(
        &self,
        reader: R,
        expected: &ContentRoot,
    ) -> Result<bool, HasherError> {
        Ok(self.compute_root(reader)? == *expected)
    }
}

impl Default for ChunkedHasher {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
