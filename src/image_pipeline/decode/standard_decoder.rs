//! Decoder for common image formats (PNG, JPEG, BMP, TIFF) backed by the
//! `image` crate.

use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::decode::decoder::ImageDecoder;
use crate::image_pipeline::matrix::{PixelFormat, PixelMatrix};

pub struct StandardDecoder;

impl ImageDecoder for StandardDecoder {
    /// Decodes to 8-bit colour, dropping alpha and swapping to BGR order.
    fn decode(&self, data: &[u8]) -> Result<PixelMatrix> {
        debug!("Decoding image, {} bytes", data.len());

        let rgb = image::load_from_memory(data)
            .map_err(|e| ImageError::DecodeError(e.to_string()))?
            .into_rgb8();

        let width = rgb.width() as usize;
        let height = rgb.height() as usize;
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions(width, height));
        }

        let mut bgr = rgb.into_raw();
        for px in bgr.chunks_exact_mut(3) {
            px.swap(0, 2);
        }

        debug!("Decoded image: {}x{}", width, height);
        PixelMatrix::new(height, width, PixelFormat::Bgr8, bgr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_decodes_png_as_bgr() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(1, 0, Rgb([200, 100, 50]));
        let matrix = StandardDecoder.decode(&encode_png(&img)).unwrap();

        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 3);
        assert_eq!(matrix.channels(), 3);
        assert_eq!(matrix.pixel(1, 0), Some(&[50, 100, 200][..]));
        assert_eq!(matrix.pixel(0, 1), Some(&[0, 0, 0][..]));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let result = StandardDecoder.decode(b"definitely not an image");
        assert!(matches!(result, Err(ImageError::DecodeError(_))));
    }
}
