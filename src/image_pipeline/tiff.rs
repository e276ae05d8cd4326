//! TIFF writing module
//!
//! Writes pixel matrices to TIFF with optional compression.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::TiffCompression;
pub use writer::TiffWriter;
