//! Image decoding module
//!
//! Decoders turn encoded file bytes into a BGR [`PixelMatrix`]. Common
//! formats go through the `image` crate, camera RAW files through rawloader
//! followed by a demosaic step.
//!
//! [`PixelMatrix`]: crate::image_pipeline::matrix::PixelMatrix

mod auto_decoder;
mod decoder;
mod raw_decoder;
mod standard_decoder;

pub use auto_decoder::{AutoDecoder, RAW_EXTENSIONS};
pub use decoder::ImageDecoder;
pub use raw_decoder::RawDecoder;
pub use standard_decoder::StandardDecoder;
