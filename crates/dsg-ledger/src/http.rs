use std::time::Duration;

use async_trait::async_trait;
use dsg_types::{ConfirmationStatus, TxId};
use serde::Deserialize;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::{LedgerClient, TxStatus};
use crate::tx::SignedTransaction;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    tx_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    status: ConfirmationStatus,
    block_number: Option<u64>,
}

/// JSON client for a ledger RPC endpoint.
///
/// Wire surface:
/// - `POST /v1/transactions` with the signed transaction as JSON →
///   `{"txId": hex}`
/// - `GET  /v1/transactions/{txId}` →
///   `{"status": "pending|confirmed|failed", "blockNumber": n?}`
///
/// Transport failures map to [`LedgerError::Unreachable`] so the recorder's
/// polling loop can ride out brief outages; submission rejections surface
/// immediately.
pub struct HttpLedgerClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpLedgerClient {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> LedgerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| LedgerError::Client(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn submit_transaction(&self, tx: &SignedTransaction) -> LedgerResult<TxId> {
        let response = self
            .client
            .post(format!("{}/v1/transactions", self.base_url))
            .json(tx)
            .send()
            .await
            .map_err(|e| LedgerError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(LedgerError::Unreachable(format!(
                "ledger returned {status}"
            )));
        }
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(LedgerError::Submission(format!("{status}: {reason}")));
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;
        TxId::from_hex(&body.tx_id).map_err(|e| LedgerError::InvalidResponse(e.to_string()))
    }

    async fn transaction_status(&self, tx_id: &TxId) -> LedgerResult<TxStatus> {
        let response = self
            .client
            .get(format!("{}/v1/transactions/{}", self.base_url, tx_id.to_hex()))
            .send()
            .await
            .map_err(|e| LedgerError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(LedgerError::Unreachable(format!(
                "ledger returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(LedgerError::InvalidResponse(format!(
                "unexpected status {status}"
            )));
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;
        Ok(TxStatus {
            status: body.status,
            block_ref: body.block_number,
        })
    }
}
