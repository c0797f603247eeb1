use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dsg_types::{ContentRoot, StorageHandle};
use serde::Deserialize;

use crate::error::{DispersalError, DispersalResult};
use crate::retry::{with_retry, RetryPolicy};
use crate::traits::StorageBackend;

/// Acknowledgment body returned by the dispersal service.
#[derive(Debug, Deserialize)]
struct SegmentAck {
    id: String,
    length: u64,
}

/// HTTP client for a dispersal service.
///
/// Wire surface:
/// - `POST /v1/segments/{root}` with the raw bytes as body → JSON ack
/// - `GET  /v1/segments/{root}` → raw bytes or 404
/// - `HEAD /v1/segments/{root}` → 200 or 404
///
/// Transport failures and 5xx responses are transient and retried per the
/// configured [`RetryPolicy`]; 4xx rejections propagate immediately. The
/// client holds a connection pool and is safe for concurrent use.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpBackend {
    /// Create a backend client for `base_url`.
    ///
    /// `request_timeout` bounds every individual request; an elapsed timeout
    /// counts as a transient failure.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        retry: RetryPolicy,
    ) -> DispersalResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| DispersalError::Client(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            retry,
        })
    }

    fn segment_url(&self, root: &ContentRoot) -> String {
        format!("{}/v1/segments/{}", self.base_url, root.to_hex())
    }

    async fn submit_once(
        &self,
        root: &ContentRoot,
        bytes: Bytes,
    ) -> DispersalResult<StorageHandle> {
        let response = self
            .client
            .post(self.segment_url(root))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            let ack: SegmentAck = response
                .json()
                .await
                .map_err(|e| DispersalError::InvalidResponse(e.to_string()))?;
            return Ok(StorageHandle::new(ack.id, ack.length));
        }
        if status.is_server_error() {
            return Err(DispersalError::Unreachable(format!(
                "backend returned {status}"
            )));
        }
        let reason = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        Err(DispersalError::Rejected {
            root: *root,
            reason: format!("{status}: {reason}"),
        })
    }

    async fn fetch_once(&self, root: &ContentRoot) -> DispersalResult<Bytes> {
        let response = self
            .client
            .get(self.segment_url(root))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DispersalError::NotFound(*root));
        }
        if status.is_server_error() {
            return Err(DispersalError::Unreachable(format!(
                "backend returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(DispersalError::InvalidResponse(format!(
                "unexpected status {status}"
            )));
        }
        response
            .bytes()
            .await
            .map_err(|e| DispersalError::Unreachable(e.to_string()))
    }
}

#[async_trait]
impl StorageBackend for HttpBackend {
    async fn submit(&self, root: &ContentRoot, bytes: Bytes) -> DispersalResult<StorageHandle> {
        // Bytes clones are reference-counted; each attempt reuses the buffer.
        with_retry(&self.retry, || self.submit_once(root, bytes.clone())).await
    }

    async fn fetch(&self, root: &ContentRoot) -> DispersalResult<Bytes> {
        with_retry(&self.retry, || self.fetch_once(root)).await
    }

    async fn exists(&self, root: &ContentRoot) -> DispersalResult<bool> {
        with_retry(&self.retry, || async {
            let response = self
                .client
                .head(self.segment_url(root))
                .send()
                .await
                .map_err(transport_error)?;
            let status = response.status();
            if status.is_success() {
                Ok(true)
            } else if status == reqwest::StatusCode::NOT_FOUND {
                Ok(false)
            } else if status.is_server_error() {
                Err(DispersalError::Unreachable(format!(
                    "backend returned {status}"
                )))
            } else {
                Err(DispersalError::InvalidResponse(format!(
                    "unexpected status {status}"
                )))
            }
        })
        .await
    }
}

fn transport_error(e: reqwest::Error) -> DispersalError {
    DispersalError::Unreachable(e.to_string())
}
