use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use winml_imaging::image_pipeline::{
    DenoisePipeline, ImageHandle, ModelBytes, ProcessingConfig, SaltAndPepper, TiffCompression,
};
use winml_imaging::logger;

use tracing::{info, warn};

/// Adds salt-and-pepper noise to an image, denoises it with a median blur
/// and writes both results as TIFF.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input image (PNG, JPEG, BMP, TIFF or camera RAW)
    input: PathBuf,

    /// Where to write the noisy image
    #[arg(long, default_value = "noisy.tiff")]
    noisy: PathBuf,

    /// Where to write the denoised image
    #[arg(long, default_value = "denoised.tiff")]
    denoised: PathBuf,

    /// Seed for reproducible noise
    #[arg(long)]
    seed: Option<u64>,

    /// Median blur kernel size (odd, >= 3)
    #[arg(long, default_value_t = 5)]
    kernel: usize,

    /// Draws below this value turn a pixel black
    #[arg(long, default_value_t = 30)]
    black_threshold: u8,

    /// Draws above this value turn a pixel white
    #[arg(long, default_value_t = 225)]
    white_threshold: u8,

    /// TIFF compression: none, lzw, deflate-fast, deflate, deflate-best
    #[arg(long, default_value = "none")]
    compression: TiffCompression,

    /// Optional serialized model to read alongside the image
    #[arg(long)]
    model: Option<PathBuf>,
}

fn main() -> Result<()> {
    logger::init();
    let args = Args::parse();

    info!("Starting winml_imaging...");

    let config = ProcessingConfig::builder()
        .compression(args.compression)
        .median_kernel(args.kernel)
        .noise(SaltAndPepper::new(args.black_threshold, args.white_threshold))
        .seed(args.seed)
        .build();

    if let Some(model_path) = &args.model {
        let model = ModelBytes::from_path(model_path)
            .with_context(|| format!("reading model {}", model_path.display()))?;
        info!(bytes = model.len(), "Model bytes ready: {}", model.path().display());
    }

    let source = ImageHandle::from_path(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let tensor = source.as_tensor()?;
    info!("Input tensor shape: {:?}", tensor.shape());

    let pipeline = DenoisePipeline::new(config);
    let report = pipeline
        .process_to_files(&source, &args.noisy, &args.denoised)
        .context("denoise pipeline failed")?;

    info!(
        "Noisy pixels: {} of {}",
        report.noisy_pixels,
        report.width * report.height
    );
    if report.residual_pixels > 0 {
        warn!("{} pixels differ from the source after denoising", report.residual_pixels);
    }
    info!(
        noisy = %args.noisy.display(),
        denoised = %args.denoised.display(),
        "Done"
    );

    Ok(())
}
