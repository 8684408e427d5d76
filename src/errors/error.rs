use thiserror::Error;
use uuid::Uuid;
use crate::domains::core::file_storage_service::FileStorageError;

/// Underlying causes of a failed compression run
#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("Image dimensions {width}x{height} exceed the JPEG limit of 65535")]
    JpegDimensions { width: u32, height: u32 },

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("ZIP archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Task join error: {0}")]
    Join(String),
}

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate file ID: {0}")]
    DuplicateId(Uuid),

    #[error("Compression failed: {0}")]
    CompressionFailed(#[source] CompressionError),

    #[error("Storage error: {0}")]
    Storage(#[from] FileStorageError),
}

impl From<CompressionError> for DomainError {
    fn from(error: CompressionError) -> Self {
        DomainError::CompressionFailed(error)
    }
}

impl DomainError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "NotFound",
            DomainError::InvalidInput(_) => "InvalidInput",
            DomainError::DuplicateId(_) => "DuplicateId",
            DomainError::CompressionFailed(_) => "CompressionFailed",
            DomainError::Storage(_) => "Storage",
        }
    }
}
