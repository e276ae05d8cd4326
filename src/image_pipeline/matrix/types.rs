//! Pixel layout types

/// Channel layout of an 8-bit interleaved pixel matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Blue, green, red. The layout colour images are loaded in.
    Bgr8,
    /// Blue, green, red, alpha. Used when building bitmaps.
    Bgra8,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Bgr8 => 3,
            PixelFormat::Bgra8 => 4,
        }
    }

    /// Bytes occupied by a single pixel (one byte per channel)
    pub fn bytes_per_pixel(self) -> usize {
        self.channels()
    }
}
