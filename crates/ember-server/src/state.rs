use std::sync::Arc;

use ember_store::DropVault;

/// Shared application state passed to all handlers via the axum State
/// extractor.
#[derive(Clone)]
pub struct AppState {
    pub vault: Arc<DropVault>,
    pub max_upload_bytes: u64,
}
