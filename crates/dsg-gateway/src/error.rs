use std::fmt;

use dsg_crypto::HasherError;
use dsg_ledger::LedgerError;
use dsg_storage::DispersalError;
use dsg_types::ContentRoot;

/// Pipeline stage at which an operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Hashing,
    Dispersing,
    Recording,
    Fetching,
    Verifying,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashing => write!(f, "hashing"),
            Self::Dispersing => write!(f, "dispersing"),
            Self::Recording => write!(f, "recording"),
            Self::Fetching => write!(f, "fetching"),
            Self::Verifying => write!(f, "verifying"),
        }
    }
}

/// Errors from gateway operations, each attributable to a pipeline stage.
///
/// Nothing is silently downgraded: a failed ledger record surfaces as a
/// `Recording` failure, never as a successful upload.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("hashing failed: {0}")]
    Hashing(#[from] HasherError),

    #[error("reading source failed: {0}")]
    SourceRead(#[source] std::io::Error),

    #[error("upload of root {0} already in flight")]
    DuplicateUpload(ContentRoot),

    #[error("dispersal failed: {0}")]
    Dispersing(#[source] DispersalError),

    #[error("ledger recording failed: {0}")]
    Recording(#[from] LedgerError),

    #[error("no content stored for root {0}")]
    NotFound(ContentRoot),

    #[error("fetch failed: {0}")]
    Fetching(#[source] DispersalError),

    /// The fetched bytes do not hash to the requested root. Always fatal to
    /// the download; no partial or unverified data is ever returned.
    #[error("integrity violation: content for root {requested} hashes to {computed}")]
    Integrity {
        requested: ContentRoot,
        computed: ContentRoot,
    },
}

impl GatewayError {
    /// The pipeline stage this error is attributed to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Hashing(_) | Self::SourceRead(_) | Self::DuplicateUpload(_) => Stage::Hashing,
            Self::Dispersing(_) => Stage::Dispersing,
            Self::Recording(_) => Stage::Recording,
            Self::NotFound(_) | Self::Fetching(_) => Stage::Fetching,
            Self::Integrity { .. } => Stage::Verifying,
        }
    }
}

/// Result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_attributed() {
        let root = ContentRoot::from_hash([1; 32]);
        assert_eq!(
            GatewayError::DuplicateUpload(root).stage(),
            Stage::Hashing
        );
        assert_eq!(
            GatewayError::Dispersing(DispersalError::Unreachable("x".into())).stage(),
            Stage::Dispersing
        );
        assert_eq!(
            GatewayError::Recording(LedgerError::Submission("x".into())).stage(),
            Stage::Recording
        );
        assert_eq!(GatewayError::NotFound(root).stage(), Stage::Fetching);
        assert_eq!(
            GatewayError::Integrity {
                requested: root,
                computed: ContentRoot::from_hash([2; 32]),
            }
            .stage(),
            Stage::Verifying
        );
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Hashing.to_string(), "hashing");
        assert_eq!(Stage::Verifying.to_string(), "verifying");
    }
}
