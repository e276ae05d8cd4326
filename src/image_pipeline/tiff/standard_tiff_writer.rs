use std::io::Write;

use ::tiff::encoder::colortype::{RGB8, RGBA8};
use ::tiff::encoder::compression::DeflateLevel;
use ::tiff::encoder::{Compression, TiffEncoder};
use ::tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::config::ProcessingConfig;
use crate::image_pipeline::matrix::{PixelFormat, PixelMatrix};
use crate::image_pipeline::tiff::types::TiffCompression;
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Writes BGR matrices as RGB8 and BGRA matrices as RGBA8 TIFF.
pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, image: &PixelMatrix, output: &mut dyn Write, config: &ProcessingConfig) -> Result<()> {
        if image.is_empty() {
            return Err(ImageError::EmptyImage);
        }
        debug!("Encoding TIFF image: {}x{}", image.cols(), image.rows());

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ImageError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        let width = image.cols() as u32;
        let height = image.rows() as u32;

        // TIFF stores red first, the matrix stores blue first
        let mut samples = image.as_bytes().to_vec();
        for px in samples.chunks_exact_mut(image.elem_size()) {
            px.swap(0, 2);
        }

        match image.format() {
            PixelFormat::Bgr8 => encoder.write_image::<RGB8>(width, height, &samples),
            PixelFormat::Bgra8 => encoder.write_image::<RGBA8>(width, height, &samples),
        }
        .map_err(|e| ImageError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
