use ndarray::ArrayView4;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::views::buffer::BufferView;

/// Channel count of image tensors (BGR)
pub const TENSOR_CHANNELS: usize = 3;

/// Unsigned 8-bit tensor in NHWC layout, borrowed from a [`BufferView`].
#[derive(Debug, Clone)]
pub struct TensorView<'a> {
    shape: [i64; 4],
    array: ArrayView4<'a, u8>,
}

impl<'a> TensorView<'a> {
    /// Describes `buffer` as a `[1, height, width, 3]` tensor without copying.
    pub fn from_buffer(height: usize, width: usize, buffer: BufferView<'a>) -> Result<Self> {
        let expected = height * width * TENSOR_CHANNELS;
        if buffer.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }

        let array = ArrayView4::from_shape((1, height, width, TENSOR_CHANNELS), buffer.as_bytes())
            .map_err(|_| ImageError::InvalidDimensions(width, height))?;

        Ok(Self {
            shape: [1, height as i64, width as i64, TENSOR_CHANNELS as i64],
            array,
        })
    }

    /// Shape as `[batch, height, width, channels]`
    pub fn shape(&self) -> [i64; 4] {
        self.shape
    }

    pub fn array(&self) -> &ArrayView4<'a, u8> {
        &self.array
    }

    /// Sample at `[0, y, x, c]`
    pub fn get(&self, y: usize, x: usize, c: usize) -> Option<u8> {
        self.array.get((0, y, x, c)).copied()
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }
}
