use std::sync::Arc;

use crate::domains::compression::CompressionService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub compression_service: Arc<dyn CompressionService>,
}

impl AppState {
    pub fn new(compression_service: Arc<dyn CompressionService>) -> Self {
        Self { compression_service }
    }
}
