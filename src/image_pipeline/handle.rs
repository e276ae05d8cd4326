//! The image adapter
//!
//! `ImageHandle` owns a BGR [`PixelMatrix`] and hands out views over it.
//! Buffer and tensor views borrow the handle, so the storage cannot be
//! released while one is alive:
//!
//! ```compile_fail
//! use winml_imaging::image_pipeline::{ImageHandle, PixelFormat, PixelMatrix};
//!
//! let mut handle = ImageHandle::from_matrix(PixelMatrix::zeros(2, 2, PixelFormat::Bgr8).unwrap());
//! let buffer = handle.as_weak_buffer();
//! handle.close();
//! println!("{}", buffer.len());
//! ```
//!
//! Bitmaps copy their pixels and stay valid after the handle is closed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::image_pipeline::bitmap::{Bitmap, BitmapPixelFormat};
use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::config::ProcessingConfig;
use crate::image_pipeline::decode::{AutoDecoder, ImageDecoder};
use crate::image_pipeline::filters::{median_blur, SaltAndPepper, DEFAULT_MEDIAN_KERNEL};
use crate::image_pipeline::matrix::{PixelFormat, PixelMatrix};
use crate::image_pipeline::tiff::{StandardTiffWriter, TiffWriter};
use crate::image_pipeline::views::{BufferView, TensorView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    image: PixelMatrix,
}

impl ImageHandle {
    /// Loads a colour image, picking the decoder from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with(path, &AutoDecoder)
    }

    /// Same as [`ImageHandle::from_path`].
    pub fn create_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path(path)
    }

    #[instrument(skip(path, decoder), fields(path = %path.as_ref().display()))]
    pub fn from_path_with<P: AsRef<Path>, D: ImageDecoder + ?Sized>(path: P, decoder: &D) -> Result<Self> {
        let image = decoder.decode_file(path.as_ref())?;
        info!(rows = image.rows(), cols = image.cols(), "Loaded image");
        Ok(Self { image })
    }

    pub fn from_matrix(image: PixelMatrix) -> Self {
        Self { image }
    }

    pub fn rows(&self) -> usize {
        self.image.rows()
    }

    pub fn cols(&self) -> usize {
        self.image.cols()
    }

    pub fn channels(&self) -> usize {
        self.image.channels()
    }

    pub fn is_closed(&self) -> bool {
        self.image.is_empty()
    }

    pub fn matrix(&self) -> &PixelMatrix {
        &self.image
    }

    pub fn into_matrix(self) -> PixelMatrix {
        self.image
    }

    /// Zero-copy view of `rows * cols * elem_size` bytes of pixel storage.
    ///
    /// Empty once the handle is closed.
    pub fn as_weak_buffer(&self) -> BufferView<'_> {
        BufferView::new(self.image.as_bytes())
    }

    /// Zero-copy `[1, rows, cols, 3]` u8 tensor over the pixel storage.
    pub fn as_tensor(&self) -> Result<TensorView<'_>> {
        if self.is_closed() {
            return Err(ImageError::EmptyImage);
        }
        if self.image.format() != PixelFormat::Bgr8 {
            return Err(ImageError::UnsupportedFormat(format!(
                "tensor input must be 3-channel, got {:?}",
                self.image.format()
            )));
        }
        TensorView::from_buffer(self.rows(), self.cols(), self.as_weak_buffer())
    }

    /// Converts to BGRA and copies the result into a new bitmap.
    pub fn as_bitmap(&self) -> Result<Bitmap> {
        if self.is_closed() {
            return Err(ImageError::EmptyImage);
        }
        let bgra = ImageHandle::from_matrix(self.image.to_bgra()?);
        let buffer = bgra.as_weak_buffer();
        Bitmap::copy_from_buffer(&buffer, BitmapPixelFormat::Bgra8, bgra.cols(), bgra.rows())
    }

    /// Releases the pixel storage. Calling it again does nothing.
    pub fn close(&mut self) {
        if !self.is_closed() {
            self.image.deallocate();
        }
    }

    /// New image with default salt-and-pepper noise drawn from the thread RNG.
    pub fn add_salt_and_pepper_noise(image: &ImageHandle) -> Result<ImageHandle> {
        image.add_salt_and_pepper_noise_with(&SaltAndPepper::default(), &mut rand::thread_rng())
    }

    pub fn add_salt_and_pepper_noise_with<R: Rng + ?Sized>(
        &self,
        noise: &SaltAndPepper,
        rng: &mut R,
    ) -> Result<ImageHandle> {
        let noisy = noise.apply(&self.image, rng)?;
        Ok(ImageHandle::from_matrix(noisy))
    }

    /// New image smoothed with a 5x5 median filter.
    pub fn denoise_median_blur(image: &ImageHandle) -> Result<ImageHandle> {
        image.denoise_median_blur_with(DEFAULT_MEDIAN_KERNEL)
    }

    pub fn denoise_median_blur_with(&self, ksize: usize) -> Result<ImageHandle> {
        let denoised = median_blur(&self.image, ksize)?;
        Ok(ImageHandle::from_matrix(denoised))
    }

    #[instrument(skip(self, path, config), fields(path = %path.as_ref().display()))]
    pub fn save_tiff<P: AsRef<Path>>(&self, path: P, config: &ProcessingConfig) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| ImageError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);
        StandardTiffWriter.write_tiff(&self.image, &mut writer, config)?;
        writer.flush()?;
        debug!("Saved TIFF");
        Ok(())
    }
}

impl From<PixelMatrix> for ImageHandle {
    fn from(image: PixelMatrix) -> Self {
        Self::from_matrix(image)
    }
}
