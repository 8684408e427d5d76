//! PDF compression implementation

use lopdf::{Document, Object};
use std::path::Path;

use crate::errors::CompressorResult;
use super::Compressor;

/// PDF compressor that Flate-compresses page content streams with `lopdf`.
///
/// Quality is not used; stream compression is lossless.
pub struct PdfCompressor;

impl Compressor for PdfCompressor {
    fn compress(&self, source: &Path, destination: &Path, _quality: u8) -> CompressorResult<()> {
        let mut document = Document::load(source)?;
        let pages = document.get_pages();

        let mut compressed_streams = 0usize;
        for (page_number, page_id) in &pages {
            for content_id in document.get_page_contents(*page_id) {
                match document.get_object_mut(content_id).and_then(Object::as_stream_mut) {
                    Ok(stream) => {
                        stream.compress()?;
                        compressed_streams += 1;
                    }
                    Err(e) => {
                        log::warn!("Page {} content {:?} is not a stream: {}", page_number, content_id, e);
                    }
                }
            }
        }

        // Keep only what the page tree and trailer still reference
        document.prune_objects();
        document.renumber_objects();
        document.save(destination)?;

        log::debug!(
            "Wrote {} pages ({} content streams) to {}",
            pages.len(),
            compressed_streams,
            destination.display()
        );

        Ok(())
    }

    fn compressor_name(&self) -> &'static str {
        "PdfCompressor"
    }
}
