use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dsg_crypto::SigningKey;
use dsg_types::{ConfirmationStatus, ContentRoot, LedgerReceipt};
use tokio::time::Instant;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerClient;
use crate::tx::TransactionPayload;

/// Records content roots on the ledger and awaits confirmation.
///
/// `record` is the whole contract of the ledger stage: build the signed
/// transaction, submit it, then poll `transaction_status` until the ledger
/// reaches a final state or the confirmation timeout elapses. Transient
/// transport failures during polling are tolerated until the deadline.
pub struct LedgerRecorder {
    client: Arc<dyn LedgerClient>,
    confirmation_timeout: Duration,
    poll_interval: Duration,
}

impl LedgerRecorder {
    pub fn new(
        client: Arc<dyn LedgerClient>,
        confirmation_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            confirmation_timeout,
            poll_interval,
        }
    }

    /// Submit a transaction referencing `root` and await its confirmation.
    ///
    /// Irreversible once confirmed. On timeout the error carries the
    /// transaction id so the caller may poll later instead of treating the
    /// timeout as permanent.
    pub async fn record(
        &self,
        root: ContentRoot,
        tags: &[u8],
        key: &SigningKey,
    ) -> LedgerResult<LedgerReceipt> {
        let payload = TransactionPayload::new(
            root,
            tags.to_vec(),
            key.verifying_key().as_bytes(),
            rand::random(),
        );
        let tx = payload.sign(key)?;
        let tx_id = self.client.submit_transaction(&tx).await?;
        tracing::debug!(%tx_id, root = %root.short_hex(), "transaction submitted, awaiting confirmation");

        let deadline = Instant::now() + self.confirmation_timeout;
        loop {
            match self.client.transaction_status(&tx_id).await {
                Ok(status) => match status.status {
                    ConfirmationStatus::Confirmed => {
                        tracing::info!(%tx_id, block = ?status.block_ref, "transaction confirmed");
                        return Ok(LedgerReceipt {
                            tx_id,
                            status: ConfirmationStatus::Confirmed,
                            block_ref: status.block_ref,
                            recorded_at: Utc::now(),
                        });
                    }
                    ConfirmationStatus::Failed => {
                        return Err(LedgerError::Rejected { tx_id });
                    }
                    ConfirmationStatus::Pending => {}
                },
                // Keep polling through transient outages until the deadline.
                Err(e) if e.is_transient() => {
                    tracing::warn!(%tx_id, error = %e, "status poll failed, will retry");
                }
                Err(e) => return Err(e),
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(LedgerError::Timeout { tx_id });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedger;
    use crate::traits::TxStatus;
    use crate::tx::SignedTransaction;
    use async_trait::async_trait;
    use dsg_types::TxId;

    fn recorder(client: Arc<dyn LedgerClient>) -> LedgerRecorder {
        LedgerRecorder::new(
            client,
            Duration::from_millis(100),
            Duration::from_millis(1),
        )
    }

    fn root() -> ContentRoot {
        ContentRoot::from_hash([0x21; 32])
    }

    #[tokio::test]
    async fn records_and_confirms() {
        let ledger = Arc::new(InMemoryLedger::new());
        let key = SigningKey::from_bytes([3; 32]);
        let receipt = recorder(ledger).record(root(), b"tag", &key).await.unwrap();
        assert!(receipt.is_confirmed());
        assert!(receipt.block_ref.is_some());
    }

    #[tokio::test]
    async fn polls_through_pending_states() {
        let ledger = Arc::new(InMemoryLedger::with_confirmation_after(3));
        let key = SigningKey::from_bytes([3; 32]);
        let receipt = recorder(ledger).record(root(), &[], &key).await.unwrap();
        assert!(receipt.is_confirmed());
    }

    #[tokio::test]
    async fn submission_failure_propagates() {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.set_rejecting(true);
        let key = SigningKey::from_bytes([3; 32]);
        let err = recorder(ledger).record(root(), &[], &key).await.unwrap_err();
        assert!(matches!(err, LedgerError::Submission(_)));
    }

    #[tokio::test]
    async fn timeout_carries_tx_id() {
        // Never confirms within the 100ms bound.
        let ledger = Arc::new(InMemoryLedger::with_confirmation_after(u32::MAX));
        let key = SigningKey::from_bytes([3; 32]);
        let err = recorder(ledger).record(root(), &[], &key).await.unwrap_err();
        assert!(matches!(err, LedgerError::Timeout { .. }));
    }

    #[tokio::test]
    async fn identical_content_gets_distinct_receipts() {
        let ledger = Arc::new(InMemoryLedger::new());
        let key = SigningKey::from_bytes([3; 32]);
        let rec = recorder(ledger);
        let r1 = rec.record(root(), &[], &key).await.unwrap();
        let r2 = rec.record(root(), &[], &key).await.unwrap();
        assert_ne!(r1.tx_id, r2.tx_id);
    }

    #[tokio::test]
    async fn ledger_rejection_surfaces_as_rejected() {
        /// Client whose transactions always fail after submission.
        struct FailingLedger;

        #[async_trait]
        impl LedgerClient for FailingLedger {
            async fn submit_transaction(&self, tx: &SignedTransaction) -> LedgerResult<TxId> {
                tx.tx_id()
            }
            async fn transaction_status(&self, _tx_id: &TxId) -> LedgerResult<TxStatus> {
                Ok(TxStatus::failed())
            }
        }

        let key = SigningKey::from_bytes([3; 32]);
        let err = recorder(Arc::new(FailingLedger))
            .record(root(), &[], &key)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Rejected { .. }));
    }
}
