use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use dsg_types::TxId;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::{LedgerClient, TxStatus};
use crate::tx::SignedTransaction;

/// In-memory, in-process ledger.
///
/// Intended for tests and embedding. Verifies the submitted signature,
/// assigns monotonically increasing block numbers, and confirms each
/// transaction after a configurable number of status polls (zero by
/// default, i.e. confirmed on first poll).
pub struct InMemoryLedger {
    txs: RwLock<HashMap<TxId, TxEntry>>,
    next_block: AtomicU64,
    confirm_after_polls: u32,
    rejecting: AtomicBool,
}

struct TxEntry {
    polls: u32,
    block: Option<u64>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            txs: RwLock::new(HashMap::new()),
            next_block: AtomicU64::new(1),
            confirm_after_polls: 0,
            rejecting: AtomicBool::new(false),
        }
    }

    /// Require `polls` status polls before a transaction reports Confirmed.
    pub fn with_confirmation_after(polls: u32) -> Self {
        Self {
            confirm_after_polls: polls,
            ..Self::new()
        }
    }

    /// Make subsequent submissions fail with a submission error.
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Number of transactions the ledger has accepted.
    pub fn len(&self) -> usize {
        self.txs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no transaction was accepted yet.
    pub fn is_empty(&self) -> bool {
        self.txs.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn submit_transaction(&self, tx: &SignedTransaction) -> LedgerResult<TxId> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(LedgerError::Submission(
                "ledger is not accepting submissions".into(),
            ));
        }
        tx.verify()?;
        let tx_id = tx.tx_id()?;
        let mut txs = self.txs.write().expect("lock poisoned");
        txs.entry(tx_id).or_insert(TxEntry {
            polls: 0,
            block: None,
        });
        Ok(tx_id)
    }

    async fn transaction_status(&self, tx_id: &TxId) -> LedgerResult<TxStatus> {
        let mut txs = self.txs.write().expect("lock poisoned");
        let entry = txs.get_mut(tx_id).ok_or_else(|| {
            LedgerError::InvalidResponse(format!("unknown transaction {tx_id}"))
        })?;

        if entry.polls < self.confirm_after_polls {
            entry.polls += 1;
            return Ok(TxStatus::pending());
        }
        let block = *entry
            .block
            .get_or_insert_with(|| self.next_block.fetch_add(1, Ordering::SeqCst));
        Ok(TxStatus::confirmed(block))
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLedger")
            .field("tx_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::TransactionPayload;
    use dsg_crypto::SigningKey;
    use dsg_types::{ConfirmationStatus, ContentRoot};

    fn signed_tx(nonce: u64) -> SignedTransaction {
        let key = SigningKey::from_bytes([5; 32]);
        TransactionPayload::new(
            ContentRoot::from_hash([1; 32]),
            Vec::new(),
            key.verifying_key().as_bytes(),
            nonce,
        )
        .sign(&key)
        .unwrap()
    }

    #[tokio::test]
    async fn submit_and_confirm() {
        let ledger = InMemoryLedger::new();
        let tx_id = ledger.submit_transaction(&signed_tx(1)).await.unwrap();
        let status = ledger.transaction_status(&tx_id).await.unwrap();
        assert_eq!(status.status, ConfirmationStatus::Confirmed);
        assert!(status.block_ref.is_some());
    }

    #[tokio::test]
    async fn pending_until_enough_polls() {
        let ledger = InMemoryLedger::with_confirmation_after(2);
        let tx_id = ledger.submit_transaction(&signed_tx(1)).await.unwrap();

        for _ in 0..2 {
            let status = ledger.transaction_status(&tx_id).await.unwrap();
            assert_eq!(status.status, ConfirmationStatus::Pending);
        }
        let status = ledger.transaction_status(&tx_id).await.unwrap();
        assert_eq!(status.status, ConfirmationStatus::Confirmed);
    }

    #[tokio::test]
    async fn confirmed_block_is_stable() {
        let ledger = InMemoryLedger::new();
        let tx_id = ledger.submit_transaction(&signed_tx(1)).await.unwrap();
        let first = ledger.transaction_status(&tx_id).await.unwrap();
        let second = ledger.transaction_status(&tx_id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn rejects_invalid_signature() {
        let ledger = InMemoryLedger::new();
        let mut tx = signed_tx(1);
        tx.payload.nonce = 99; // invalidates the signature
        assert!(matches!(
            ledger.submit_transaction(&tx).await,
            Err(LedgerError::Submission(_))
        ));
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn rejecting_mode_fails_submissions() {
        let ledger = InMemoryLedger::new();
        ledger.set_rejecting(true);
        assert!(matches!(
            ledger.submit_transaction(&signed_tx(1)).await,
            Err(LedgerError::Submission(_))
        ));

        ledger.set_rejecting(false);
        assert!(ledger.submit_transaction(&signed_tx(1)).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_tx_status_is_an_error() {
        let ledger = InMemoryLedger::new();
        let unknown = TxId::from_hash([0xff; 32]);
        assert!(matches!(
            ledger.transaction_status(&unknown).await,
            Err(LedgerError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn distinct_submissions_get_distinct_ids_and_blocks() {
        let ledger = InMemoryLedger::new();
        let id1 = ledger.submit_transaction(&signed_tx(1)).await.unwrap();
        let id2 = ledger.submit_transaction(&signed_tx(2)).await.unwrap();
        assert_ne!(id1, id2);

        let b1 = ledger.transaction_status(&id1).await.unwrap().block_ref;
        let b2 = ledger.transaction_status(&id2).await.unwrap().block_ref;
        assert_ne!(b1, b2);
    }
}
