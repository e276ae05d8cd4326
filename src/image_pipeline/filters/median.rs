use imageproc::filter::median_filter;
use imageproc::image::{ImageBuffer, Pixel, Rgb, Rgba};
use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::matrix::{PixelFormat, PixelMatrix};

/// Kernel used when denoising without an explicit size
pub const DEFAULT_MEDIAN_KERNEL: usize = 5;

/// Median filter over a `ksize` x `ksize` window, applied per channel.
///
/// Filtering is done by imageproc, which replicates the nearest edge pixel
/// for out-of-bounds neighbours. `ksize` must be odd and at least 3.
#[instrument(skip(source), fields(rows = source.rows(), cols = source.cols()))]
pub fn median_blur(source: &PixelMatrix, ksize: usize) -> Result<PixelMatrix> {
    if ksize < 3 || ksize % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(ksize));
    }
    if source.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    let radius = u32::try_from(ksize / 2).map_err(|_| ImageError::InvalidKernelSize(ksize))?;

    // imageproc only sees interleaved u8 samples, so BGR order passes through untouched
    let data = match source.format() {
        PixelFormat::Bgr8 => filter_samples::<Rgb<u8>>(source, radius)?,
        PixelFormat::Bgra8 => filter_samples::<Rgba<u8>>(source, radius)?,
    };

    debug!(ksize, "Median blur complete");
    PixelMatrix::new(source.rows(), source.cols(), source.format(), data)
}

fn filter_samples<P>(source: &PixelMatrix, radius: u32) -> Result<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let width = u32::try_from(source.cols())
        .map_err(|_| ImageError::InvalidDimensions(source.cols(), source.rows()))?;
    let height = u32::try_from(source.rows())
        .map_err(|_| ImageError::InvalidDimensions(source.cols(), source.rows()))?;

    let image: ImageBuffer<P, Vec<u8>> = ImageBuffer::from_raw(width, height, source.as_bytes().to_vec())
        .ok_or(ImageError::BufferSizeMismatch {
            expected: source.total() * source.elem_size(),
            actual: source.as_bytes().len(),
        })?;

    Ok(median_filter(&image, radius, radius).into_raw())
}
