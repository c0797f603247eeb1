//! Foundation types for the Dispersed Storage Gateway (DSG).
//!
//! This crate provides the identifier and record types shared by every other
//! DSG crate. Every other DSG crate depends on `dsg-types`.
//!
//! # Key Types
//!
//! - [`ContentRoot`] — Merkle root over a file's chunks; the content address
//! - [`TxId`] — ledger transaction identifier
//! - [`LedgerReceipt`] — the ledger's acknowledgment of a recorded root
//! - [`ConfirmationStatus`] — Pending → Confirmed | Failed
//! - [`StorageHandle`] — opaque backend acknowledgment of a dispersal

pub mod error;
pub mod handle;
pub mod receipt;
pub mod root;

pub use error::TypeError;
pub use handle::StorageHandle;
pub use receipt::{ConfirmationStatus, LedgerReceipt, TxId};
pub use root::ContentRoot;
