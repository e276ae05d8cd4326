//! Camera RAW decoder built on rawloader.
//!
//! Single-component sensor data is demosaiced with the `bayer` crate; files
//! that already carry three components per pixel skip that step. Samples are
//! then black-level corrected and scaled to 8 bits against the white level.

use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use rawloader::RawImageData as RawloaderImageData;
use tracing::{debug, info};

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::decode::decoder::ImageDecoder;
use crate::image_pipeline::matrix::{PixelFormat, PixelMatrix};

pub struct RawDecoder;

impl ImageDecoder for RawDecoder {
    fn decode(&self, data: &[u8]) -> Result<PixelMatrix> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ImageError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions(width, height));
        }

        // Float data is normalised to 0.0-1.0 and has no meaningful sensor levels
        let (samples, black, white) = match decoded.data {
            RawloaderImageData::Integer(values) => {
                let black = decoded.blacklevels.iter().min().copied().unwrap_or(0);
                let white = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
                (values, black, white)
            }
            RawloaderImageData::Float(values) => {
                let scaled = values
                    .iter()
                    .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32) as u16)
                    .collect();
                (scaled, 0, u16::MAX)
            }
        };

        debug!(
            width,
            height,
            cpp = decoded.cpp,
            cfa = %decoded.cfa.name,
            black,
            white,
            "Decoded RAW sensor data"
        );

        let rgb = match decoded.cpp {
            1 => demosaic(&samples, width, height, cfa_from_name(&decoded.cfa.name))?,
            3 => samples,
            cpp => {
                return Err(ImageError::UnsupportedFormat(format!(
                    "{} components per pixel",
                    cpp
                )));
            }
        };

        let expected = width * height * 3;
        if rgb.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: rgb.len(),
            });
        }

        PixelMatrix::new(height, width, PixelFormat::Bgr8, rgb16_to_bgr8(&rgb, black, white))
    }
}

/// Maps rawloader's CFA name onto a bayer pattern, defaulting to RGGB.
fn cfa_from_name(name: &str) -> CFA {
    match name {
        "BGGR" => CFA::BGGR,
        "GBRG" => CFA::GBRG,
        "GRBG" => CFA::GRBG,
        _ => CFA::RGGB,
    }
}

fn demosaic(samples: &[u16], width: usize, height: usize, cfa: CFA) -> Result<Vec<u16>> {
    info!("Starting CPU demosaic for image {}x{}", width, height);

    let bayer_bytes: Vec<u8> = samples.iter().flat_map(|&v| v.to_le_bytes()).collect();
    let mut output_buf = vec![0u8; width * height * 3 * 2];

    {
        let mut output_raster = RasterMut::new(width, height, RasterDepth::Depth16, &mut output_buf);
        bayer::run_demosaic(
            &mut Cursor::new(&bayer_bytes[..]),
            BayerDepth::Depth16LE,
            cfa,
            Demosaic::Linear,
            &mut output_raster,
        )
        .map_err(|e| ImageError::DecodeError(format!("Demosaic failed: {:?}", e)))?;
    }

    Ok(output_buf
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect())
}

/// Interleaved RGB16 to interleaved BGR8 with black/white level normalisation.
fn rgb16_to_bgr8(rgb: &[u16], black: u16, white: u16) -> Vec<u8> {
    let range = u32::from(white.saturating_sub(black)).max(1);
    let scale = |v: u16| -> u8 {
        let v = u32::from(v.saturating_sub(black));
        (v * 255 / range).min(255) as u8
    };

    rgb.chunks_exact(3)
        .flat_map(|px| [scale(px[2]), scale(px[1]), scale(px[0])])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb16_to_bgr8_normalises_levels() {
        let rgb = [512u16, 4095, 100, 2303, 0, 4095];
        let bgr = rgb16_to_bgr8(&rgb, 512, 4095);
        assert_eq!(bgr, vec![0, 255, 0, 255, 0, 127]);
    }

    #[test]
    fn test_rgb16_to_bgr8_degenerate_range() {
        let bgr = rgb16_to_bgr8(&[10, 10, 10], 10, 10);
        assert_eq!(bgr, vec![0, 0, 0]);
    }

    #[test]
    fn test_cfa_from_name() {
        assert!(matches!(cfa_from_name("BGGR"), CFA::BGGR));
        assert!(matches!(cfa_from_name("GRBG"), CFA::GRBG));
        assert!(matches!(cfa_from_name(""), CFA::RGGB));
    }

    #[test]
    fn test_demosaic_rggb_red_sites() {
        let (width, height) = (8, 8);
        // RGGB: red sits on even rows and even columns
        let mosaic: Vec<u16> = (0..height)
            .flat_map(|y| (0..width).map(move |x| if y % 2 == 0 && x % 2 == 0 { 4095 } else { 0 }))
            .collect();

        let rgb = demosaic(&mosaic, width, height, cfa_from_name("RGGB")).unwrap();
        assert_eq!(rgb.len(), width * height * 3);

        let bgr = rgb16_to_bgr8(&rgb, 0, 4095);
        assert_eq!(&bgr[..3], &[0, 0, 255]);
        for px in bgr.chunks_exact(3) {
            assert_eq!(px[0], 0, "blue should stay dark");
            assert_eq!(px[1], 0, "green should stay dark");
        }
        let red_total: u32 = bgr.chunks_exact(3).map(|px| u32::from(px[2])).sum();
        assert!(red_total > 0);
    }

    #[test]
    fn test_non_raw_bytes_are_a_decode_error() {
        let result = RawDecoder.decode(b"not a raw file at all");
        assert!(matches!(result, Err(ImageError::DecodeError(_))));
    }
}
