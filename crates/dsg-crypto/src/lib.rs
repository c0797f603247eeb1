//! Cryptographic primitives for the Dispersed Storage Gateway.
//!
//! This crate derives the content address of a byte stream and holds the
//! signing credential used for ledger submissions.
//!
//! # Content addressing
//!
//! A file is partitioned into fixed-size chunks (the last chunk may be
//! shorter), each chunk is leaf-hashed with domain-separated BLAKE3, and a
//! binary Merkle tree is folded bottom-up over the leaf hashes. The tree's
//! top hash is the [`ContentRoot`](dsg_types::ContentRoot).
//!
//! - [`Chunker`] — yields chunks from any `Read` source without holding the
//!   whole input in memory
//! - [`MerkleTree`] — the bottom-up fold; an odd node at a level is paired
//!   with itself (duplicate-last policy)
//! - [`ChunkedHasher`] — `compute_root` / `verify_root` over a byte source
//!
//! # Signing
//!
//! - [`SigningKey`] / [`VerifyingKey`] / [`Signature`] — Ed25519 credential
//!   held in memory for the duration of a ledger submission

pub mod chunker;
pub mod hasher;
pub mod merkle;
pub mod signer;

pub use chunker::{Chunker, DEFAULT_CHUNK_SIZE};
pub use hasher::{ChunkedHasher, HasherError};
pub use merkle::{hash_leaf, hash_node, MerkleTree};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
