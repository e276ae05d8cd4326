//! In-memory pixel storage
//!
//! A `PixelMatrix` owns interleaved 8-bit samples laid out row-major with no
//! row padding. Views and tensors borrow from it, bitmaps copy out of it.

mod pixel_matrix;
pub mod types;

pub use pixel_matrix::PixelMatrix;
pub use types::PixelFormat;
