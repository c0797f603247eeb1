use std::time::Duration;

use dsg_crypto::DEFAULT_CHUNK_SIZE;
use dsg_storage::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Tunables for the upload/download pipeline.
///
/// Durations are carried as milliseconds so the struct deserializes cleanly
/// from a TOML config file; accessor methods expose them as [`Duration`]s.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Chunk size for Merkle hashing, in bytes.
    pub chunk_size: usize,
    /// Total attempts per backend call, including the first.
    pub max_attempts: u32,
    /// Backoff before the first retry.
    pub retry_base_delay_ms: u64,
    /// Upper bound on any single backoff delay.
    pub retry_max_delay_ms: u64,
    /// Per-request timeout for backend and ledger HTTP calls.
    pub request_timeout_ms: u64,
    /// How long to await ledger confirmation before giving up.
    pub confirmation_timeout_ms: u64,
    /// Interval between confirmation polls.
    pub poll_interval_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_attempts: 3,
            retry_base_delay_ms: 200,
            retry_max_delay_ms: 5_000,
            request_timeout_ms: 30_000,
            confirmation_timeout_ms: 60_000,
            poll_interval_ms: 1_000,
        }
    }
}

impl GatewayConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
            Duration::from_millis(self.retry_max_delay_ms),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
