use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use dsg_types::ContentRoot;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub root_hash: String,
    pub transaction_hash: String,
}

/// `POST /upload` — accept a multipart file and run the upload pipeline.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<Json<UploadResponse>> {
    let request_id = Uuid::now_v7();

    let mut file_bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::Multipart(e.to_string()))?
    {
        if field.name() == Some("file") {
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::Multipart(e.to_string()))?,
            );
            break;
        }
    }
    let bytes = file_bytes.ok_or(ServerError::MissingFile)?;
    tracing::info!(%request_id, size = bytes.len(), "upload received");

    let result = state.gateway.upload_bytes(bytes, &[]).await?;
    tracing::info!(
        %request_id,
        root = %result.root.short_hex(),
        tx = %result.receipt.tx_id.short_hex(),
        "upload complete"
    );

    Ok(Json(UploadResponse {
        root_hash: result.root.to_hex(),
        transaction_hash: result.receipt.tx_id.to_hex(),
    }))
}

/// `GET /download/{rootHash}` — fetch, verify, and stream the content back.
pub async fn download_handler(
    State(state): State<AppState>,
    Path(root_hash): Path<String>,
) -> ServerResult<Response> {
    let request_id = Uuid::now_v7();
    let root =
        ContentRoot::from_hex(&root_hash).map_err(|_| ServerError::InvalidRoot(root_hash))?;

    let result = state.gateway.download(&root).await?;
    tracing::info!(%request_id, root = %root.short_hex(), size = result.len(), "download verified");

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        result.into_bytes(),
    )
        .into_response())
}

/// `GET /v1/health` — liveness probe.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /v1/info` — build metadata.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "dsg-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
