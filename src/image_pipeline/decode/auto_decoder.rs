use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::decode::decoder::ImageDecoder;
use crate::image_pipeline::decode::raw_decoder::RawDecoder;
use crate::image_pipeline::decode::standard_decoder::StandardDecoder;
use crate::image_pipeline::matrix::PixelMatrix;

/// File extensions routed to [`RawDecoder`]
pub const RAW_EXTENSIONS: &[&str] = &[
    "arw", "cr2", "cr3", "nef", "raf", "dng", "orf", "rw2", "pef", "srw",
];

/// Chooses between [`StandardDecoder`] and [`RawDecoder`].
///
/// Files are routed by extension. In-memory data is tried as a common image
/// format first and as camera RAW second.
pub struct AutoDecoder;

impl AutoDecoder {
    pub fn is_raw_path(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| RAW_EXTENSIONS.iter().any(|raw| raw.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl ImageDecoder for AutoDecoder {
    fn decode(&self, data: &[u8]) -> Result<PixelMatrix> {
        match StandardDecoder.decode(data) {
            Ok(matrix) => Ok(matrix),
            Err(ImageError::DecodeError(standard_err)) => {
                debug!("Standard decode failed ({}), trying RAW", standard_err);
                RawDecoder.decode(data).map_err(|raw_err| {
                    ImageError::DecodeError(format!("{}; as RAW: {}", standard_err, raw_err))
                })
            }
            Err(e) => Err(e),
        }
    }

    fn decode_file(&self, path: &Path) -> Result<PixelMatrix> {
        let data = std::fs::read(path)
            .map_err(|e| ImageError::InputReadError(format!("{}: {}", path.display(), e)))?;

        if Self::is_raw_path(path) {
            debug!(path = %path.display(), "Using RAW decoder");
            RawDecoder.decode(&data)
        } else {
            debug!(path = %path.display(), "Using standard decoder");
            StandardDecoder.decode(&data)
        }
    }
}
