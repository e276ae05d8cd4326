use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::{ImageError, Result},
    config::ProcessingConfig,
    decode::{AutoDecoder, ImageDecoder},
    handle::ImageHandle,
    matrix::PixelMatrix,
    tiff::{StandardTiffWriter, TiffWriter},
};

/// Outcome of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub width: usize,
    pub height: usize,
    /// Pixels that differ between the source and the noisy image
    pub noisy_pixels: usize,
    /// Pixels that still differ from the source after denoising
    pub residual_pixels: usize,
}

pub struct DenoisePipeline<D: ImageDecoder, W: TiffWriter> {
    decoder: D,
    writer: W,
    config: ProcessingConfig,
}

impl DenoisePipeline<AutoDecoder, StandardTiffWriter> {
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            decoder: AutoDecoder,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<D: ImageDecoder, W: TiffWriter> DenoisePipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: ProcessingConfig) -> Self {
        Self {
            decoder,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    #[instrument(skip(self, input_data, noisy_out, denoised_out), fields(input_size = input_data.len()))]
    pub fn run(
        &self,
        input_data: &[u8],
        noisy_out: &mut dyn Write,
        denoised_out: &mut dyn Write,
    ) -> Result<PipelineReport> {
        info!("Starting denoise pipeline");

        let source = {
            let _span = tracing::info_span!("decode").entered();
            ImageHandle::from_matrix(self.decoder.decode(input_data)?)
        };
        self.process(&source, noisy_out, denoised_out)
    }

    /// Runs the noise/denoise stages on an already loaded image.
    pub fn process(
        &self,
        source: &ImageHandle,
        noisy_out: &mut dyn Write,
        denoised_out: &mut dyn Write,
    ) -> Result<PipelineReport> {
        {
            let _span = tracing::info_span!("validate_dimensions",
                width = source.cols(),
                height = source.rows()
            ).entered();
            self.validate_dimensions(source.cols(), source.rows())?;
        }

        let noisy = {
            let _span = tracing::info_span!("add_noise").entered();
            let mut rng = self.rng();
            self.add_noise(source, &mut rng)?
        };

        let denoised = {
            let _span = tracing::info_span!("median_blur", ksize = self.config.median_kernel).entered();
            noisy.denoise_median_blur_with(self.config.median_kernel)?
        };

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_tiff(noisy.matrix(), noisy_out, &self.config)?;
            self.writer.write_tiff(denoised.matrix(), denoised_out, &self.config)?;
        }

        let report = PipelineReport {
            width: source.cols(),
            height: source.rows(),
            noisy_pixels: count_changed_pixels(source.matrix(), noisy.matrix()),
            residual_pixels: count_changed_pixels(source.matrix(), denoised.matrix()),
        };

        info!(
            width = report.width,
            height = report.height,
            noisy_pixels = report.noisy_pixels,
            residual_pixels = report.residual_pixels,
            "Pipeline complete"
        );
        Ok(report)
    }

    fn add_noise<R: Rng>(&self, source: &ImageHandle, rng: &mut R) -> Result<ImageHandle> {
        source.add_salt_and_pepper_noise_with(&self.config.noise, rng)
    }

    #[instrument(skip(self, input_path, noisy_path, denoised_path))]
    pub fn run_file<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<Path>>(
        &self,
        input_path: P,
        noisy_path: Q,
        denoised_path: S,
    ) -> Result<PipelineReport> {
        let input_path = input_path.as_ref();
        let noisy_path = noisy_path.as_ref();
        let denoised_path = denoised_path.as_ref();

        info!(
            input = %input_path.display(),
            noisy = %noisy_path.display(),
            denoised = %denoised_path.display(),
            "Processing file"
        );

        let source = {
            let _span = tracing::info_span!("read_input_file").entered();
            ImageHandle::from_path_with(input_path, &self.decoder)?
        };

        self.process_to_files(&source, noisy_path, denoised_path)
    }

    /// Like [`DenoisePipeline::process`], writing the results to files.
    pub fn process_to_files<Q: AsRef<Path>, S: AsRef<Path>>(
        &self,
        source: &ImageHandle,
        noisy_path: Q,
        denoised_path: S,
    ) -> Result<PipelineReport> {
        let mut noisy_file = create_output(noisy_path.as_ref())?;
        let mut denoised_file = create_output(denoised_path.as_ref())?;

        let report = self.process(source, &mut noisy_file, &mut denoised_file)?;
        noisy_file.flush()?;
        denoised_file.flush()?;
        Ok(report)
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ProcessingConfig) {
        self.config = config;
    }
}

fn create_output(path: &Path) -> Result<std::io::BufWriter<std::fs::File>> {
    let _span = tracing::info_span!("create_output_file").entered();
    std::fs::File::create(path)
        .map(std::io::BufWriter::new)
        .map_err(|e| ImageError::OutputWriteError(format!("{}: {}", path.display(), e)))
}

fn count_changed_pixels(a: &PixelMatrix, b: &PixelMatrix) -> usize {
    let bpp = a.elem_size();
    a.as_bytes()
        .chunks_exact(bpp)
        .zip(b.as_bytes().chunks_exact(bpp))
        .filter(|(pa, pb)| pa != pb)
        .count()
}
