//! Different compressors for various file types

pub mod image_compressor;
pub mod pdf_compressor;
pub mod office_compressor;
pub mod generic_compressor;

#[cfg(test)]
pub(crate) mod fixtures;

use std::path::Path;
use crate::errors::CompressorResult;
use super::types::FileFormat;
use image_compressor::ImageCompressor;
use pdf_compressor::PdfCompressor;
use office_compressor::OfficeCompressor;
use generic_compressor::GenericCompressor;

/// Common trait for all compressors.
///
/// Implementations block until the output file is fully written.
pub trait Compressor: Send + Sync {
    /// Compress `source` into a new file at `destination`
    fn compress(&self, source: &Path, destination: &Path, quality: u8) -> CompressorResult<()>;

    /// Get the compressor type name for logging
    fn compressor_name(&self) -> &'static str;
}

static IMAGE_COMPRESSOR: ImageCompressor = ImageCompressor;
static PDF_COMPRESSOR: PdfCompressor = PdfCompressor;
static OFFICE_COMPRESSOR: OfficeCompressor = OfficeCompressor;
static GENERIC_COMPRESSOR: GenericCompressor = GenericCompressor;

impl FileFormat {
    /// The compressor that handles this format
    pub fn compressor(self) -> &'static dyn Compressor {
        match self {
            FileFormat::Jpeg | FileFormat::Png => &IMAGE_COMPRESSOR,
            FileFormat::Pdf => &PDF_COMPRESSOR,
            FileFormat::Docx => &OFFICE_COMPRESSOR,
            FileFormat::Unsupported => &GENERIC_COMPRESSOR,
        }
    }
}

/// Compress `source` into `destination`, choosing the algorithm from `extension`.
///
/// `quality` is clamped to 1-100; only the image path reads it.
pub fn compress_file(
    source: &Path,
    destination: &Path,
    quality: i32,
    extension: &str,
) -> CompressorResult<()> {
    let quality = quality.clamp(1, 100) as u8;
    let format = FileFormat::from_extension(extension);
    let compressor = format.compressor();

    log::debug!(
        "Compressing {} -> {} with {} (format {:?}, quality {})",
        source.display(),
        destination.display(),
        compressor.compressor_name(),
        format,
        quality
    );

    compressor.compress(source, destination, quality)
}

/// Lowercased text after the last dot of a filename, or empty when there is none
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Utility function to guess MIME type from extension
pub fn guess_mime_type(filename: &str) -> &'static str {
    match file_extension(filename).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
