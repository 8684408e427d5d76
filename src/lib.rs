use std::sync::Arc;

// Public modules
pub mod api;
pub mod config;
pub mod domains;
pub mod errors;

pub use config::AppConfig;
pub use errors::{DomainError, DomainResult};

use domains::compression::CompressionServiceImpl;
use domains::core::LocalFileStorageService;
use domains::registry::InMemoryFileRegistry;

/// Wire storage, registry and compression service together for `config`.
/// Creates the storage directories if they are missing.
pub fn build_state(config: &AppConfig) -> std::io::Result<api::AppState> {
    let file_storage_service = Arc::new(LocalFileStorageService::new(&config.storage_root)?);
    let registry = Arc::new(InMemoryFileRegistry::new());
    let compression_service = CompressionServiceImpl::new(
        registry,
        file_storage_service,
        config.public_base_url.clone(),
    );
    Ok(api::AppState::new(Arc::new(compression_service)))
}
