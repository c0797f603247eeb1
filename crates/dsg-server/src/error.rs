use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use dsg_gateway::GatewayError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("no file uploaded")]
    MissingFile,

    #[error("invalid root hash: {0}")]
    InvalidRoot(String),

    #[error("malformed multipart request: {0}")]
    Multipart(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::InvalidRoot(_) | Self::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Gateway(GatewayError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Gateway(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            if let Self::Gateway(e) = &self {
                tracing::error!(stage = %e.stage(), error = %e, "pipeline failure");
            }
        }
        // The Display chain carries the error kind and message only; no
        // internal error objects reach the client.
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
