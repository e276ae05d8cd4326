//! Image adapter module
//!
//! Loads images into owned pixel matrices, exposes them as zero-copy buffer
//! and tensor views or copied bitmaps, and provides salt-and-pepper noise and
//! median-blur denoising.

pub mod bitmap;
pub mod common;
pub mod config;
pub mod conversions;
pub mod decode;
pub mod filters;
pub mod handle;
pub mod matrix;
pub mod model;
pub mod tiff;
pub mod views;

pub use common::{
    ImageError,
    Result,
};

pub use matrix::{
    PixelFormat,
    PixelMatrix,
};

pub use views::{
    BufferView,
    TensorView,
};

pub use bitmap::{
    Bitmap,
    BitmapPixelFormat,
};

pub use decode::{
    AutoDecoder,
    ImageDecoder,
    RawDecoder,
    StandardDecoder,
};

pub use filters::{
    median_blur,
    SaltAndPepper,
};

pub use handle::ImageHandle;

pub use model::ModelBytes;

pub use config::{
    ProcessingConfig,
    ProcessingConfigBuilder,
};

pub use tiff::{
    StandardTiffWriter,
    TiffCompression,
    TiffWriter,
};

pub use conversions::{
    DenoisePipeline,
    PipelineReport,
};
