//! Fallback for file types without a dedicated compressor

use std::path::Path;

use crate::errors::CompressorResult;
use super::Compressor;

/// Copies the source verbatim; callers validate extensions before this point
pub struct GenericCompressor;

impl Compressor for GenericCompressor {
    fn compress(&self, source: &Path, destination: &Path, _quality: u8) -> CompressorResult<()> {
        let copied = std::fs::copy(source, destination)?;
        log::debug!("No compressor for {}, copied {} bytes", source.display(), copied);
        Ok(())
    }

    fn compressor_name(&self) -> &'static str {
        "GenericCompressor"
    }
}
