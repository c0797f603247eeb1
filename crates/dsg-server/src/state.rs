use std::sync::Arc;

use dsg_gateway::Gateway;

/// Shared application state: the gateway, initialized once at startup and
/// shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}
