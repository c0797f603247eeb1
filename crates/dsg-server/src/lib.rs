//! HTTP front door for the Dispersed Storage Gateway.
//!
//! A thin axum layer over [`dsg_gateway::Gateway`]:
//!
//! - `POST /upload` — multipart `file` field; responds with the content
//!   root and the ledger transaction hash
//! - `GET /download/{rootHash}` — streams the verified bytes back as an
//!   octet-stream
//! - `GET /v1/health`, `GET /v1/info` — liveness and build metadata
//!
//! Error responses carry a structured `{"error": ...}` body with the error
//! kind and message only — internal error objects and paths never leak to
//! clients.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::GatewayServer;
pub use state::AppState;
