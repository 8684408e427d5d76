//! Type definitions for the file registry.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domains::compression::compressors::file_extension;

/// Metadata for one uploaded file
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub id: Uuid,
    pub original_filename: String,
    /// Path relative to the storage root
    pub original_path: String,
    pub original_size: u64,
    /// Lowercased, without the dot; empty when the filename has none
    pub extension: String,
    pub compressed_path: Option<String>,
    pub compressed_size: Option<u64>,
    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn new(id: Uuid, original_filename: String, original_path: String, original_size: u64) -> Self {
        let extension = file_extension(&original_filename);
        Self {
            id,
            original_filename,
            original_path,
            original_size,
            extension,
            compressed_path: None,
            compressed_size: None,
            uploaded_at: Utc::now(),
        }
    }
}
