//! Office document compression implementation

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use zip::{ZipArchive, ZipWriter, write::FileOptions};

use crate::errors::CompressorResult;
use super::Compressor;

const MAX_DEFLATE_LEVEL: i32 = 9;

/// Re-packs ZIP-based office documents (DOCX) with maximum DEFLATE.
///
/// Entries keep their order, name, modification time and unix mode.
/// Per-entry comments, extra fields and DOS external attributes are not
/// carried over.
pub struct OfficeCompressor;

impl Compressor for OfficeCompressor {
    fn compress(&self, source: &Path, destination: &Path, _quality: u8) -> CompressorResult<()> {
        let mut archive = ZipArchive::new(BufReader::new(File::open(source)?))?;
        let mut zip_writer = ZipWriter::new(BufWriter::new(File::create(destination)?));

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let name = entry.name().to_owned();

            let mut options = FileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated)
                .compression_level(Some(MAX_DEFLATE_LEVEL))
                .last_modified_time(entry.last_modified())
                .large_file(entry.size() > u64::from(u32::MAX));
            if let Some(mode) = entry.unix_mode() {
                options = options.unix_permissions(mode);
            }

            if entry.is_dir() {
                zip_writer.add_directory(name, options)?;
                continue;
            }

            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;

            zip_writer.start_file(name, options)?;
            zip_writer.write_all(&data)?;
        }

        let mut inner = zip_writer.finish()?;
        inner.flush()?;

        log::debug!("Re-packed {} entries into {}", archive.len(), destination.display());

        Ok(())
    }

    fn compressor_name(&self) -> &'static str {
        "OfficeCompressor"
    }
}
