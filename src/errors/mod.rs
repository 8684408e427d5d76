mod error;

pub use error::{CompressionError, DomainError};

/// Result type for compressor operations
pub type CompressorResult<T> = Result<T, CompressionError>;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
