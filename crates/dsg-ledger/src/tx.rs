use dsg_crypto::{Signature, SigningKey, VerifyingKey};
use dsg_types::{ContentRoot, TxId};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

const TX_DOMAIN: &[u8] = b"dsg-tx-v1:";

/// The record submitted to the ledger for one stored content root.
///
/// Field order is the canonical signing order — `canonical_bytes` serializes
/// the struct as JSON in declaration order, and both signing and
/// verification hash exactly those bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// The content root being recorded.
    pub root: ContentRoot,
    /// Opaque caller-supplied tag bytes (hex on the wire).
    #[serde(with = "hex_bytes")]
    pub tags: Vec<u8>,
    /// Public key of the submitting credential.
    #[serde(with = "hex_array")]
    pub submitter: [u8; 32],
    /// Random nonce so re-recording the same root yields a distinct
    /// transaction.
    pub nonce: u64,
}

impl TransactionPayload {
    pub fn new(root: ContentRoot, tags: Vec<u8>, submitter: [u8; 32], nonce: u64) -> Self {
        Self {
            root,
            tags,
            submitter,
            nonce,
        }
    }

    /// The exact bytes that are signed and hashed.
    pub fn canonical_bytes(&self) -> LedgerResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| LedgerError::Submission(e.to_string()))
    }

    /// Sign the payload with the submitter's credential.
    pub fn sign(self, key: &SigningKey) -> LedgerResult<SignedTransaction> {
        let bytes = self.canonical_bytes()?;
        let signature = key.sign(&bytes);
        Ok(SignedTransaction {
            payload: self,
            signature: signature.to_bytes().to_vec(),
        })
    }
}

/// A payload plus the Ed25519 signature over its canonical bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub payload: TransactionPayload,
    /// 64-byte Ed25519 signature (hex on the wire).
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

impl SignedTransaction {
    /// Deterministic transaction id: domain-separated BLAKE3 over the
    /// canonical payload bytes and the signature.
    pub fn tx_id(&self) -> LedgerResult<TxId> {
        let bytes = self.payload.canonical_bytes()?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(TX_DOMAIN);
        hasher.update(&bytes);
        hasher.update(&self.signature);
        Ok(TxId::from_hash(*hasher.finalize().as_bytes()))
    }

    /// Verify the signature against the submitter key carried in the
    /// payload.
    pub fn verify(&self) -> LedgerResult<()> {
        let key = VerifyingKey::from_bytes(self.payload.submitter)
            .map_err(|e| LedgerError::Submission(e.to_string()))?;
        let sig_bytes: [u8; 64] = self
            .signature
            .as_slice()
            .try_into()
            .map_err(|_| LedgerError::Submission("malformed signature".into()))?;
        let signature = Signature::from_bytes(sig_bytes);
        let bytes = self.payload.canonical_bytes()?;
        key.verify(&bytes, &signature)
            .map_err(|e| LedgerError::Submission(e.to_string()))
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

mod hex_array {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32-byte hex string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(nonce: u64) -> TransactionPayload {
        TransactionPayload::new(
            ContentRoot::from_hash([0x11; 32]),
            b"archive".to_vec(),
            SigningKey::from_bytes([7; 32]).verifying_key().as_bytes(),
            nonce,
        )
    }

    #[test]
    fn sign_and_verify() {
        let key = SigningKey::from_bytes([7; 32]);
        let tx = payload(1).sign(&key).unwrap();
        assert!(tx.verify().is_ok());
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let key = SigningKey::from_bytes([7; 32]);
        let mut tx = payload(1).sign(&key).unwrap();
        tx.payload.nonce += 1;
        assert!(tx.verify().is_err());
    }

    #[test]
    fn wrong_key_fails_verification() {
        let other = SigningKey::from_bytes([8; 32]);
        let tx = payload(1).sign(&other).unwrap();
        // Payload claims submitter [7;32] but was signed by another key.
        assert!(tx.verify().is_err());
    }

    #[test]
    fn tx_id_is_deterministic() {
        let key = SigningKey::from_bytes([7; 32]);
        let tx = payload(1).sign(&key).unwrap();
        assert_eq!(tx.tx_id().unwrap(), tx.tx_id().unwrap());
    }

    #[test]
    fn distinct_nonces_produce_distinct_tx_ids() {
        let key = SigningKey::from_bytes([7; 32]);
        let tx1 = payload(1).sign(&key).unwrap();
        let tx2 = payload(2).sign(&key).unwrap();
        assert_ne!(tx1.tx_id().unwrap(), tx2.tx_id().unwrap());
    }

    #[test]
    fn wire_roundtrip() {
        let key = SigningKey::from_bytes([7; 32]);
        let tx = payload(3).sign(&key).unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        let parsed: SignedTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, parsed);
        assert!(parsed.verify().is_ok());
    }

    #[test]
    fn tags_are_hex_on_the_wire() {
        let key = SigningKey::from_bytes([7; 32]);
        let tx = payload(4).sign(&key).unwrap();
        let json = serde_json::to_string(&tx.payload).unwrap();
        assert!(json.contains(&hex::encode(b"archive")));
    }
}
