//! Application state for the web layer.

use std::sync::Arc;

use crate::network::RailNetwork;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Path finding and seat inventory
    pub network: Arc<RailNetwork>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: RailNetwork) -> Self {
        Self {
            network: Arc::new(network),
        }
    }
}
