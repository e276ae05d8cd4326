//! Processing configuration

use crate::image_pipeline::filters::{SaltAndPepper, DEFAULT_MEDIAN_KERNEL};
use crate::image_pipeline::tiff::TiffCompression;

/// Configuration for loading, filtering and writing images
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Compression method for TIFF output
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Reject zero-sized images before filtering
    pub validate_dimensions: bool,
    /// Salt-and-pepper thresholds
    pub noise: SaltAndPepper,
    /// Median blur kernel size (odd, >= 3)
    pub median_kernel: usize,
    /// Seed for the noise generator; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            noise: SaltAndPepper::default(),
            median_kernel: DEFAULT_MEDIAN_KERNEL,
            seed: None,
        }
    }
}

impl ProcessingConfig {
    pub fn builder() -> ProcessingConfigBuilder {
        ProcessingConfigBuilder::default()
    }
}

/// Builder for ProcessingConfig
#[derive(Default)]
pub struct ProcessingConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    noise: Option<SaltAndPepper>,
    median_kernel: Option<usize>,
    seed: Option<Option<u64>>,
}

impl ProcessingConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn noise(mut self, noise: SaltAndPepper) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn median_kernel(mut self, ksize: usize) -> Self {
        self.median_kernel = Some(ksize);
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> ProcessingConfig {
        let default = ProcessingConfig::default();
        ProcessingConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            noise: self.noise.unwrap_or(default.noise),
            median_kernel: self.median_kernel.unwrap_or(default.median_kernel),
            seed: self.seed.unwrap_or(default.seed),
        }
    }
}
