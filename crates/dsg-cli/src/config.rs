use std::path::Path;

use anyhow::Context;
use dsg_crypto::SigningKey;
use dsg_gateway::GatewayConfig;
use dsg_server::ServerConfig;
use serde::{Deserialize, Serialize};

/// Environment variable consulted when the config file carries no key.
pub const SIGNING_KEY_ENV: &str = "DSG_SIGNING_KEY";

/// The full configuration surface of the gateway process.
///
/// Loaded from a TOML file; every field has a default so a partial file (or
/// none at all) still yields a runnable configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Dispersal service endpoint.
    pub storage_endpoint: String,
    /// Ledger RPC endpoint.
    pub ledger_endpoint: String,
    /// Hex-encoded Ed25519 secret. Falls back to `DSG_SIGNING_KEY`.
    pub signing_key: Option<String>,
    pub gateway: GatewayConfig,
    pub server: ServerConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            storage_endpoint: "http://127.0.0.1:5678".into(),
            ledger_endpoint: "http://127.0.0.1:8545".into(),
            signing_key: None,
            gateway: GatewayConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolve the signing credential: config value first, then the
    /// `DSG_SIGNING_KEY` environment variable.
    pub fn resolve_signing_key(&self) -> anyhow::Result<SigningKey> {
        let hex = match &self.signing_key {
            Some(hex) => hex.clone(),
            None => std::env::var(SIGNING_KEY_ENV).with_context(|| {
                format!("no signing key in config and {SIGNING_KEY_ENV} is unset")
            })?,
        };
        SigningKey::from_hex(&hex).map_err(|e| anyhow::anyhow!("invalid signing key: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.storage_endpoint, "http://127.0.0.1:5678");
        assert!(config.signing_key.is_none());
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage_endpoint = \"http://storage.internal:9000\"").unwrap();
        writeln!(file, "[gateway]").unwrap();
        writeln!(file, "chunk_size = 65536").unwrap();
        file.flush().unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.storage_endpoint, "http://storage.internal:9000");
        assert_eq!(config.gateway.chunk_size, 65536);
        // Untouched sections keep their defaults.
        assert_eq!(config.ledger_endpoint, "http://127.0.0.1:8545");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(CliConfig::load(Some(Path::new("/nonexistent/gw.toml"))).is_err());
    }

    #[test]
    fn signing_key_from_config_value() {
        let key = SigningKey::generate();
        let config = CliConfig {
            signing_key: Some(key.to_hex()),
            ..Default::default()
        };
        let resolved = config.resolve_signing_key().unwrap();
        assert_eq!(resolved.verifying_key(), key.verifying_key());
    }

    #[test]
    fn invalid_signing_key_is_rejected() {
        let config = CliConfig {
            signing_key: Some("not hex".into()),
            ..Default::default()
        };
        assert!(config.resolve_signing_key().is_err());
    }
}
