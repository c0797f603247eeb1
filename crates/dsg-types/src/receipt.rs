use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a ledger transaction (32-byte transaction hash).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId([u8; 32]);

impl TxId {
    /// Create a `TxId` from a pre-computed 32-byte hash.
    pub const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters) for logs.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.short_hex())
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Lifecycle state of a ledger transaction.
///
/// Transitions: `Pending → Confirmed | Failed`. A `Confirmed` transaction is
/// irreversible — there is no undo primitive at this layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationStatus {
    /// Submitted, awaiting confirmation.
    Pending,
    /// Accepted by the ledger; a block reference is available.
    Confirmed,
    /// Rejected by the ledger.
    Failed,
}

impl ConfirmationStatus {
    /// Returns `true` once the transaction can no longer change state.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The ledger's acknowledgment of a recorded content root.
///
/// Immutable once the underlying transaction is confirmed. Re-recording the
/// same root produces a fresh receipt with an independent transaction id —
/// content identity and ledger-record identity are independent axes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// The transaction that references the content root.
    pub tx_id: TxId,
    /// Confirmation state at the time the receipt was issued.
    pub status: ConfirmationStatus,
    /// Block number in which the transaction was included, if confirmed.
    pub block_ref: Option<u64>,
    /// When the receipt was issued.
    pub recorded_at: DateTime<Utc>,
}

impl LedgerReceipt {
    /// Returns `true` if the ledger confirmed the transaction.
    pub fn is_confirmed(&self) -> bool {
        self.status == ConfirmationStatus::Confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_id_hex_roundtrip() {
        let tx = TxId::from_hash([0x5a; 32]);
        assert_eq!(TxId::from_hex(&tx.to_hex()).unwrap(), tx);
    }

    #[test]
    fn tx_id_rejects_short_hex() {
        assert!(matches!(
            TxId::from_hex("abab"),
            Err(TypeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn status_finality() {
        assert!(!ConfirmationStatus::Pending.is_final());
        assert!(ConfirmationStatus::Confirmed.is_final());
        assert!(ConfirmationStatus::Failed.is_final());
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", ConfirmationStatus::Pending), "pending");
        assert_eq!(format!("{}", ConfirmationStatus::Confirmed), "confirmed");
        assert_eq!(format!("{}", ConfirmationStatus::Failed), "failed");
    }

    #[test]
    fn status_serde_is_lowercase() {
        let json = serde_json::to_string(&ConfirmationStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
    }

    #[test]
    fn receipt_confirmation() {
        let receipt = LedgerReceipt {
            tx_id: TxId::from_hash([1; 32]),
            status: ConfirmationStatus::Confirmed,
            block_ref: Some(42),
            recorded_at: Utc::now(),
        };
        assert!(receipt.is_confirmed());
    }

    #[test]
    fn receipt_serde_roundtrip() {
        let receipt = LedgerReceipt {
            tx_id: TxId::from_hash([2; 32]),
            status: ConfirmationStatus::Pending,
            block_ref: None,
            recorded_at: Utc::now(),
        };
        let json = serde_json::to_string(&receipt).unwrap();
        let parsed: LedgerReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, parsed);
    }
}
