//! Application state for the web layer.

use std::sync::Arc;

use crate::arso::ArsoClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// ARSO upstream client, shared by every handler.
    pub arso: Arc<ArsoClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(arso: ArsoClient) -> Self {
        Self {
            arso: Arc::new(arso),
        }
    }
}
