use async_trait::async_trait;
use dsg_types::{ConfirmationStatus, TxId};

use crate::error::LedgerResult;
use crate::tx::SignedTransaction;

/// Point-in-time view of a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxStatus {
    pub status: ConfirmationStatus,
    /// Block the transaction was included in, once confirmed.
    pub block_ref: Option<u64>,
}

impl TxStatus {
    pub fn pending() -> Self {
        Self {
            status: ConfirmationStatus::Pending,
            block_ref: None,
        }
    }

    pub fn confirmed(block: u64) -> Self {
        Self {
            status: ConfirmationStatus::Confirmed,
            block_ref: Some(block),
        }
    }

    pub fn failed() -> Self {
        Self {
            status: ConfirmationStatus::Failed,
            block_ref: None,
        }
    }
}

/// Client boundary to the external ledger.
///
/// Implementations submit signed transactions and report their confirmation
/// state; they are safe for concurrent use without external locking. The
/// gateway never interprets ledger internals beyond this surface.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a signed transaction; returns its ledger-assigned id.
    async fn submit_transaction(&self, tx: &SignedTransaction) -> LedgerResult<TxId>;

    /// Report the current confirmation state of a submitted transaction.
    async fn transaction_status(&self, tx_id: &TxId) -> LedgerResult<TxStatus>;
}
