//! Image compression implementation

use color_quant::NeuQuant;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageEncoder, ImageFormat, RgbaImage};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{CompressionError, CompressorResult};
use super::Compressor;

/// Below this quality a PNG is reduced to an adaptive palette
const PNG_PALETTE_QUALITY_THRESHOLD: u8 = 50;

/// Largest palette an indexed PNG can carry
const MAX_PALETTE_COLORS: usize = 256;

/// NeuQuant sampling factor: 1 is slowest/best, 30 fastest
const NEUQUANT_SAMPLE_FACTOR: i32 = 10;

/// Image compressor using the `image` crate
#[derive(Clone)]
pub struct ImageCompressor;

/// How a decoded image gets written back out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageTarget {
    Jpeg,
    Png,
    Other(ImageFormat),
}

impl ImageTarget {
    /// JPEG wins over PNG, then the decoded format
    fn select(decoded: Option<ImageFormat>, extension: Option<&str>) -> Self {
        if decoded == Some(ImageFormat::Jpeg) || matches!(extension, Some("jpg") | Some("jpeg")) {
            ImageTarget::Jpeg
        } else if decoded == Some(ImageFormat::Png) || extension == Some("png") {
            ImageTarget::Png
        } else {
            decoded.map(ImageTarget::Other).unwrap_or(ImageTarget::Png)
        }
    }
}

impl Compressor for ImageCompressor {
    fn compress(&self, source: &Path, destination: &Path, quality: u8) -> CompressorResult<()> {
        let reader = image::io::Reader::open(source)?.with_guessed_format()?;
        let decoded_format = reader.format();

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());
        let target = ImageTarget::select(decoded_format, extension.as_deref());

        // Palette PNGs stay palette PNGs at every quality
        if target == ImageTarget::Png && decoded_format == Some(ImageFormat::Png) {
            if let Some(indexed) = IndexedPng::read(source)? {
                log::debug!(
                    "Keeping {}x{} palette PNG ({} colors, {:?})",
                    indexed.width,
                    indexed.height,
                    indexed.palette.len() / 3,
                    indexed.bit_depth
                );
                return indexed.write_no_larger(source, destination);
            }
        }

        let img = reader.decode()?;

        log::debug!(
            "Decoded {}x{} {:?} image as {:?}, writing {:?}",
            img.width(),
            img.height(),
            img.color(),
            decoded_format,
            target
        );

        let mut writer = BufWriter::new(File::create(destination)?);
        match target {
            ImageTarget::Jpeg => write_jpeg(&img, &mut writer, quality)?,
            ImageTarget::Png if quality < PNG_PALETTE_QUALITY_THRESHOLD => {
                write_quantized_png(&img.to_rgba8(), &mut writer)?
            }
            ImageTarget::Png => write_png(&img, &mut writer)?,
            ImageTarget::Other(format) => img.write_to(&mut writer, format)?,
        }
        writer.flush()?;

        Ok(())
    }

    fn compressor_name(&self) -> &'static str {
        "ImageCompressor"
    }
}

/// Encode with optimized Huffman tables. JPEG carries no alpha; anything but
/// 8-bit gray/RGB is flattened to RGB.
fn write_jpeg<W: Write>(img: &DynamicImage, writer: W, quality: u8) -> CompressorResult<()> {
    let (width, height) = match (u16::try_from(img.width()), u16::try_from(img.height())) {
        (Ok(width), Ok(height)) => (width, height),
        _ => {
            return Err(CompressionError::JpegDimensions {
                width: img.width(),
                height: img.height(),
            })
        }
    };

    let mut encoder = jpeg_encoder::Encoder::new(writer, quality);
    encoder.set_optimized_huffman_tables(true);

    match img {
        DynamicImage::ImageLuma8(gray) => {
            encoder.encode(gray.as_raw(), width, height, jpeg_encoder::ColorType::Luma)?
        }
        DynamicImage::ImageRgb8(rgb) => {
            encoder.encode(rgb.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)?
        }
        other => {
            let rgb = other.to_rgb8();
            encoder.encode(rgb.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)?
        }
    }
    Ok(())
}

fn write_png<W: Write>(img: &DynamicImage, writer: W) -> CompressorResult<()> {
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
    encoder.write_image(img.as_bytes(), img.width(), img.height(), img.color())?;
    Ok(())
}

/// Quantize to at most 256 colors and write an indexed PNG
fn write_quantized_png<W: Write>(rgba: &RgbaImage, writer: W) -> CompressorResult<()> {
    let quantizer = NeuQuant::new(NEUQUANT_SAMPLE_FACTOR, MAX_PALETTE_COLORS, rgba.as_raw());

    let color_map = quantizer.color_map_rgba();
    let mut palette = Vec::with_capacity(color_map.len() / 4 * 3);
    let mut alphas = Vec::with_capacity(color_map.len() / 4);
    for entry in color_map.chunks_exact(4) {
        palette.extend_from_slice(&entry[..3]);
        alphas.push(entry[3]);
    }
    let trns = alphas.iter().any(|&alpha| alpha != u8::MAX).then_some(alphas);

    let indices: Vec<u8> = rgba
        .pixels()
        .map(|pixel| quantizer.index_of(&pixel.0) as u8)
        .collect();

    let quantized = IndexedPng {
        width: rgba.width(),
        height: rgba.height(),
        bit_depth: png::BitDepth::Eight,
        palette,
        trns,
        data: indices,
    };
    quantized.encode(writer)
}

/// Raw palette image: packed indices plus the PLTE and tRNS chunks
struct IndexedPng {
    width: u32,
    height: u32,
    bit_depth: png::BitDepth,
    palette: Vec<u8>,
    trns: Option<Vec<u8>>,
    data: Vec<u8>,
}

impl IndexedPng {
    /// Read `path` without expanding the palette; `None` unless it is an indexed PNG
    fn read(path: &Path) -> CompressorResult<Option<Self>> {
        let mut decoder = png::Decoder::new(BufReader::new(File::open(path)?));
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info()?;

        let (width, height, bit_depth, palette, trns) = {
            let info = reader.info();
            let palette = match (&info.color_type, &info.palette) {
                (png::ColorType::Indexed, Some(palette)) => palette.to_vec(),
                _ => return Ok(None),
            };
            let trns = info.trns.as_ref().map(|trns| trns.to_vec());
            (info.width, info.height, info.bit_depth, palette, trns)
        };

        let mut data = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut data)?;
        data.truncate(frame.buffer_size());

        Ok(Some(Self {
            width,
            height,
            bit_depth,
            palette,
            trns,
            data,
        }))
    }

    fn encode<W: Write>(self, writer: W) -> CompressorResult<()> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(self.bit_depth);
        encoder.set_palette(self.palette);
        if let Some(trns) = self.trns {
            encoder.set_trns(trns);
        }
        encoder.set_compression(png::Compression::Best);
        encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);

        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.data)?;
        png_writer.finish()?;
        Ok(())
    }

    /// Re-encode into `destination`, falling back to a copy of `source` when
    /// the re-encoded file would be larger
    fn write_no_larger(self, source: &Path, destination: &Path) -> CompressorResult<()> {
        let mut encoded = Vec::new();
        self.encode(&mut encoded)?;

        let source_size = std::fs::metadata(source)?.len();
        if encoded.len() as u64 > source_size {
            log::debug!(
                "Re-encoded palette PNG is larger ({} > {} bytes), keeping the original",
                encoded.len(),
                source_size
            );
            std::fs::copy(source, destination)?;
        } else {
            std::fs::write(destination, &encoded)?;
        }
        Ok(())
    }
}
