//! Storage backend clients for the Dispersed Storage Gateway.
//!
//! The distributed storage backend is an external collaborator reached over
//! the network. This crate defines the client boundary the gateway drives:
//!
//! - [`StorageBackend`] — `submit` / `fetch` / `exists`, keyed by
//!   [`ContentRoot`](dsg_types::ContentRoot)
//! - [`InMemoryBackend`] — `HashMap`-based backend for tests and embedding
//! - [`HttpBackend`] — HTTP client for a real dispersal service
//! - [`RetryPolicy`] / [`with_retry`] — bounded exponential backoff applied
//!   to transient failures
//!
//! # Design Rules
//!
//! 1. Content is addressed by its precomputed root; the client never
//!    re-hashes what it submits.
//! 2. The backend is untrusted with respect to integrity — callers re-verify
//!    fetched bytes (see `dsg-gateway`).
//! 3. Submission is idempotent: the backend deduplicates by root.
//! 4. Transient transport failures are retried with bounded backoff;
//!    rejections propagate immediately.

pub mod error;
pub mod http;
pub mod memory;
pub mod retry;
pub mod traits;

pub use error::{DispersalError, DispersalResult};
pub use http::HttpBackend;
pub use memory::InMemoryBackend;
pub use retry::{with_retry, RetryPolicy};
pub use traits::StorageBackend;
