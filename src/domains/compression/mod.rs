// Declare submodules for the compression domain
pub mod types;
pub mod service;
pub mod compressors;

pub use types::{
    CompressionConfig, CompressionResult, DownloadedFile, FileFormat, UploadResult, DEFAULT_QUALITY,
};
pub use compressors::{compress_file, Compressor};
pub use service::{CompressionService, CompressionServiceImpl};
