//! Pipeline conversions module
//!
//! Orchestrates the gallery flow: decode, inject noise, denoise, write.

mod denoise;

pub use denoise::{DenoisePipeline, PipelineReport};
