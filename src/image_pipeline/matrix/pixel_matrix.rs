use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::matrix::types::PixelFormat;

/// Owned 8-bit pixel matrix.
///
/// `data` holds `rows * cols * channels` bytes. Dropping the matrix or calling
/// [`PixelMatrix::deallocate`] releases the storage; anything that borrowed it
/// must be gone by then, which the borrow checker enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    rows: usize,
    cols: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelMatrix {
    /// Wraps existing interleaved samples, validating their length.
    pub fn new(rows: usize, cols: usize, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(rows, cols, format)?;
        if data.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            format,
            data,
        })
    }

    /// All-zero matrix of the given size.
    pub fn zeros(rows: usize, cols: usize, format: PixelFormat) -> Result<Self> {
        let len = byte_len(rows, cols, format)?;
        Ok(Self {
            rows,
            cols,
            format,
            data: vec![0u8; len],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel
    pub fn elem_size(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Number of pixels
    pub fn total(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Samples of row `y`, `None` past the last row
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.rows {
            return None;
        }
        let stride = self.cols * self.elem_size();
        self.data.get(y * stride..(y + 1) * stride)
    }

    /// Samples of the pixel at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        let range = self.pixel_range(x, y)?;
        self.data.get(range)
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [u8]> {
        let range = self.pixel_range(x, y)?;
        self.data.get_mut(range)
    }

    fn pixel_range(&self, x: usize, y: usize) -> Option<std::ops::Range<usize>> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        let bpp = self.elem_size();
        let offset = (y * self.cols + x) * bpp;
        Some(offset..offset + bpp)
    }

    /// Releases the pixel storage. The format is kept, dimensions drop to zero.
    pub fn deallocate(&mut self) {
        debug!("Releasing {}x{} pixel matrix", self.cols, self.rows);
        self.rows = 0;
        self.cols = 0;
        self.data = Vec::new();
    }

    /// Appends an opaque alpha channel to a BGR matrix.
    ///
    /// Channel order is preserved, so BGR input yields BGRA output.
    pub fn to_bgra(&self) -> Result<PixelMatrix> {
        match self.format {
            PixelFormat::Bgra8 => Ok(self.clone()),
            PixelFormat::Bgr8 => {
                let data: Vec<u8> = self
                    .data
                    .chunks_exact(3)
                    .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                    .collect();
                PixelMatrix::new(self.rows, self.cols, PixelFormat::Bgra8, data)
            }
        }
    }
}

/// `rows * cols * bytes_per_pixel`, rejecting sizes that overflow `usize`.
fn byte_len(rows: usize, cols: usize, format: PixelFormat) -> Result<usize> {
    rows.checked_mul(cols)
        .and_then(|pixels| pixels.checked_mul(format.bytes_per_pixel()))
        .ok_or(ImageError::InvalidDimensions(cols, rows))
}
