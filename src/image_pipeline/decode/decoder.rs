use std::path::Path;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::matrix::PixelMatrix;

pub trait ImageDecoder {
    fn decode(&self, data: &[u8]) -> Result<PixelMatrix>;

    /// Reads `path` and decodes it. Decoders that care about the file name
    /// override this.
    fn decode_file(&self, path: &Path) -> Result<PixelMatrix> {
        let data = std::fs::read(path)
            .map_err(|e| ImageError::InputReadError(format!("{}: {}", path.display(), e)))?;
        self.decode(&data)
    }
}
