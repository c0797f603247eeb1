use dsg_types::TxId;

/// Errors from ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The transaction could not be constructed, signed, or accepted for
    /// submission.
    #[error("transaction submission failed: {0}")]
    Submission(String),

    /// The ledger reached a final state and rejected the transaction.
    #[error("transaction {tx_id} rejected by the ledger")]
    Rejected { tx_id: TxId },

    /// No confirmation arrived within the configured bound. The transaction
    /// may still confirm later; callers can poll with the carried id.
    #[error("no confirmation for transaction {tx_id} within the timeout")]
    Timeout { tx_id: TxId },

    /// The ledger endpoint could not be reached. Transient with respect to
    /// confirmation polling.
    #[error("ledger endpoint unreachable: {0}")]
    Unreachable(String),

    /// The ledger answered with something the client cannot interpret.
    #[error("unexpected ledger response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed.
    #[error("ledger client construction failed: {0}")]
    Client(String),
}

impl LedgerError {
    /// Returns `true` for failures that polling may recover from.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
