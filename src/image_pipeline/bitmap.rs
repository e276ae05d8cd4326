//! Software bitmap
//!
//! Unlike the tensor path, a bitmap owns a copy of its pixels.

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::views::BufferView;

/// Pixel formats a [`Bitmap`] can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapPixelFormat {
    Bgra8,
}

impl BitmapPixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            BitmapPixelFormat::Bgra8 => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    format: BitmapPixelFormat,
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap by copying the contents of `buffer`.
    pub fn copy_from_buffer(
        buffer: &BufferView<'_>,
        format: BitmapPixelFormat,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions(width, height));
        }
        let expected = width * height * format.bytes_per_pixel();
        if buffer.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self {
            format,
            width,
            height,
            data: buffer.as_bytes().to_vec(),
        })
    }

    pub fn format(&self) -> BitmapPixelFormat {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Four samples of the pixel at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        let px = &self.data[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_is_independent_of_source() {
        let mut source = vec![10u8, 20, 30, 255, 40, 50, 60, 255];
        let bitmap = {
            let view = BufferView::new(&source);
            Bitmap::copy_from_buffer(&view, BitmapPixelFormat::Bgra8, 2, 1).unwrap()
        };
        source.clear();
        assert_eq!(bitmap.pixel(1, 0), Some([40, 50, 60, 255]));
        assert_eq!(bitmap.pixel(2, 0), None);
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        let source = vec![0u8; 7];
        let view = BufferView::new(&source);
        let result = Bitmap::copy_from_buffer(&view, BitmapPixelFormat::Bgra8, 2, 1);
        assert!(matches!(result, Err(ImageError::BufferSizeMismatch { expected: 8, actual: 7 })));
    }

    #[test]
    fn test_bgra_layout() {
        let source = vec![7u8; 3 * 2 * 4];
        let view = BufferView::new(&source);
        let bitmap = Bitmap::copy_from_buffer(&view, BitmapPixelFormat::Bgra8, 3, 2).unwrap();
        assert_eq!(BitmapPixelFormat::Bgra8.bytes_per_pixel(), 4);
        assert_eq!(bitmap.format(), BitmapPixelFormat::Bgra8);
        assert_eq!(bitmap.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(bitmap.pixel(2, 1), Some([7, 7, 7, 7]));
        assert_eq!(bitmap.pixel(0, 2), None);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let view = BufferView::new(&[]);
        let result = Bitmap::copy_from_buffer(&view, BitmapPixelFormat::Bgra8, 0, 3);
        assert!(matches!(result, Err(ImageError::InvalidDimensions(0, 3))));
    }
}
