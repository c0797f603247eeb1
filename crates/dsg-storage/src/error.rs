use dsg_types::ContentRoot;

/// Errors from storage backend operations.
#[derive(Debug, thiserror::Error)]
pub enum DispersalError {
    /// The backend holds no content for the requested root.
    #[error("no content stored for root {0}")]
    NotFound(ContentRoot),

    /// The backend refused the content. Not retried: if the backend runs its
    /// own integrity check and disagrees with the submitted root, that
    /// disagreement surfaces here rather than being silently corrected.
    #[error("backend rejected content for root {root}: {reason}")]
    Rejected { root: ContentRoot, reason: String },

    /// The backend could not be reached or timed out. Transient; eligible
    /// for retry.
    #[error("storage backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with something the client cannot interpret.
    #[error("unexpected backend response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed.
    #[error("storage client construction failed: {0}")]
    Client(String),
}

impl DispersalError {
    /// Returns `true` for failures worth retrying with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

/// Result alias for storage backend operations.
pub type DispersalResult<T> = Result<T, DispersalError>;
