//! Ledger clients for the Dispersed Storage Gateway.
//!
//! The ledger is an external collaborator: the gateway only submits signed
//! transactions referencing a content root and polls for confirmation — it
//! implements no consensus or contract execution.
//!
//! - [`TransactionPayload`] / [`SignedTransaction`] — the record of a stored
//!   root, signed with the caller-held Ed25519 credential
//! - [`LedgerClient`] — `submit_transaction` / `transaction_status`
//! - [`LedgerRecorder`] — submit, then poll until Confirmed/Failed or the
//!   bounded confirmation timeout elapses
//! - [`InMemoryLedger`] — in-process ledger for tests and embedding
//! - [`HttpLedgerClient`] — JSON client for a real ledger RPC endpoint
//!
//! A confirmed transaction is irreversible; a timed-out one surfaces its
//! transaction id so the caller may poll again later rather than treating
//! the timeout as a permanent failure.

pub mod error;
pub mod http;
pub mod memory;
pub mod recorder;
pub mod traits;
pub mod tx;

pub use error::{LedgerError, LedgerResult};
pub use http::HttpLedgerClient;
pub use memory::InMemoryLedger;
pub use recorder::LedgerRecorder;
pub use traits::{LedgerClient, TxStatus};
pub use tx::{SignedTransaction, TransactionPayload};
