use serde::{Deserialize, Serialize};

/// Backend-assigned acknowledgment of a completed dispersal.
///
/// Opaque beyond existence checking: the gateway never looks up content by
/// handle (lookup is always by [`ContentRoot`](crate::ContentRoot)); the
/// handle only confirms that the backend durably accepted the content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageHandle {
    /// Backend-specific location identifier.
    pub id: String,
    /// Number of bytes the backend acknowledged.
    pub length: u64,
}

impl StorageHandle {
    pub fn new(id: impl Into<String>, length: u64) -> Self {
        Self {
            id: id.into(),
            length,
        }
    }
}
