//! Type definitions for the compression domain.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quality used when a compression request does not name one
pub const DEFAULT_QUALITY: i32 = 70;

/// File formats the compressor dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Jpeg,
    Png,
    Pdf,
    Docx,
    /// Copied through without compression
    Unsupported,
}

impl FileFormat {
    /// Case-insensitive exact match on an extension without the leading dot
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => FileFormat::Jpeg,
            "png" => FileFormat::Png,
            "pdf" => FileFormat::Pdf,
            "docx" => FileFormat::Docx,
            _ => FileFormat::Unsupported,
        }
    }
}

/// Configuration for compression
#[derive(Debug, Clone)]
pub struct CompressionConfig {
    pub quality_level: i32, // 1-100, only images read it
}

impl CompressionConfig {
    pub fn with_quality(quality_level: Option<i32>) -> Self {
        Self {
            quality_level: quality_level.unwrap_or(DEFAULT_QUALITY).clamp(1, 100),
        }
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            quality_level: DEFAULT_QUALITY,
        }
    }
}

/// Returned to the caller after an upload is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub file_id: Uuid,
    pub filename: String,
    pub size: u64,
}

/// Result from a compression operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionResult {
    pub file_id: Uuid,
    pub original_size: u64,
    pub compressed_size: u64,
    pub reduction_percentage: f64,
    pub download_url: String,
}

/// A compressed file ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

/// `(original - compressed) / original * 100`, rounded to two decimals.
/// Negative when the output grew; zero for an empty original.
pub fn reduction_percentage(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    let reduction = (original_size as f64 - compressed_size as f64) / original_size as f64 * 100.0;
    (reduction * 100.0).round() / 100.0
}
