use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::config::ProcessingConfig;
use crate::image_pipeline::matrix::PixelMatrix;

pub trait TiffWriter {
    fn write_tiff(&self, image: &PixelMatrix, output: &mut dyn Write, config: &ProcessingConfig) -> Result<()>;
}
