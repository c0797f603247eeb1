//! Upload and retrieval orchestrators for the Dispersed Storage Gateway.
//!
//! The [`Gateway`] composes the chunked hasher, the storage backend client,
//! and the ledger recorder into the two caller-facing operations:
//!
//! - **upload**: `Hashing → Dispersing → Recording → Complete`. Storage
//!   success is a precondition for ledger submission; a root is never
//!   recorded on the ledger unless it was actually stored. A failure at any
//!   stage surfaces that stage and performs no compensating rollback —
//!   dispersal is not reversible and hashing has no side effect to undo.
//! - **download**: `Fetching → Verifying → Complete`. Fetched bytes are
//!   released only if their recomputed root equals the requested one; on
//!   mismatch the bytes are discarded and an integrity error surfaces.
//!
//! Stages within one request run strictly sequentially; distinct requests
//! run fully in parallel against the shared clients, which are safe for
//! concurrent use. Dropping an in-flight `upload`/`download` future aborts
//! its network calls; the signing credential and the in-flight guard are
//! released on every exit path.

pub mod config;
pub mod download;
pub mod error;
pub mod upload;

pub use config::GatewayConfig;
pub use download::DownloadResult;
pub use error::{GatewayError, GatewayResult, Stage};
pub use upload::UploadResult;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use dsg_crypto::{ChunkedHasher, SigningKey};
use dsg_ledger::{LedgerClient, LedgerRecorder};
use dsg_storage::StorageBackend;
use dsg_types::ContentRoot;

/// The content gateway: one instance serves all concurrent requests.
///
/// Clients are injected at construction and shared read-only for the
/// process lifetime; the only mutable state is the set of roots with an
/// upload currently in flight.
pub struct Gateway {
    backend: Arc<dyn StorageBackend>,
    recorder: LedgerRecorder,
    hasher: ChunkedHasher,
    signing_key: SigningKey,
    in_flight: Mutex<HashSet<ContentRoot>>,
}

impl Gateway {
    /// Build a gateway from its collaborators and configuration.
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        ledger: Arc<dyn LedgerClient>,
        signing_key: SigningKey,
        config: &GatewayConfig,
    ) -> GatewayResult<Self> {
        let hasher = ChunkedHasher::new(config.chunk_size)?;
        let recorder = LedgerRecorder::new(
            ledger,
            config.confirmation_timeout(),
            config.poll_interval(),
        );
        Ok(Self {
            backend,
            recorder,
            hasher,
            signing_key,
            in_flight: Mutex::new(HashSet::new()),
        })
    }

    /// The hasher this gateway addresses content with.
    pub fn hasher(&self) -> &ChunkedHasher {
        &self.hasher
    }
}
