pub mod file_storage_service;

pub use file_storage_service::{
    sanitize_filename, FileStorageError, FileStorageResult, FileStorageService, LocalFileStorageService,
};
