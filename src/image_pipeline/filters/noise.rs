use rand::Rng;
use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::matrix::PixelMatrix;

/// Upper bound (exclusive) of the per-pixel uniform draw
pub const NOISE_DRAW_RANGE: u8 = 255;

/// Impulse noise: each pixel independently turns black or white.
///
/// One value is drawn from `[0, 255)` per pixel. Draws below
/// `black_threshold` zero every channel, draws above `white_threshold`
/// saturate every channel. White is applied first, so black wins when the
/// ranges overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaltAndPepper {
    pub black_threshold: u8,
    pub white_threshold: u8,
}

impl Default for SaltAndPepper {
    fn default() -> Self {
        Self {
            black_threshold: 30,
            white_threshold: 225,
        }
    }
}

impl SaltAndPepper {
    pub fn new(black_threshold: u8, white_threshold: u8) -> Self {
        Self {
            black_threshold,
            white_threshold,
        }
    }

    /// Expected fraction of pixels set to black
    pub fn black_probability(&self) -> f64 {
        f64::from(self.black_threshold.min(NOISE_DRAW_RANGE)) / f64::from(NOISE_DRAW_RANGE)
    }

    /// Expected fraction of pixels set to white
    pub fn white_probability(&self) -> f64 {
        let above = NOISE_DRAW_RANGE.saturating_sub(self.white_threshold).saturating_sub(1);
        f64::from(above) / f64::from(NOISE_DRAW_RANGE)
    }

    pub fn apply<R: Rng + ?Sized>(&self, source: &PixelMatrix, rng: &mut R) -> Result<PixelMatrix> {
        if source.is_empty() {
            return Err(ImageError::EmptyImage);
        }

        let mut noisy = source.clone();
        let bpp = noisy.elem_size();
        let mut black = 0usize;
        let mut white = 0usize;

        for px in noisy.as_bytes_mut().chunks_exact_mut(bpp) {
            let draw: u8 = rng.gen_range(0..NOISE_DRAW_RANGE);
            if draw > self.white_threshold {
                px.fill(u8::MAX);
                white += 1;
            }
            if draw < self.black_threshold {
                px.fill(0);
                black += 1;
            }
        }

        debug!(
            black,
            white,
            total = noisy.total(),
            "Applied salt and pepper noise"
        );
        Ok(noisy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::matrix::PixelFormat;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray(rows: usize, cols: usize) -> PixelMatrix {
        PixelMatrix::new(rows, cols, PixelFormat::Bgr8, vec![128u8; rows * cols * 3]).unwrap()
    }

    #[test]
    fn test_pixels_are_black_white_or_untouched() {
        let source = gray(64, 64);
        let mut rng = StdRng::seed_from_u64(7);
        let noisy = SaltAndPepper::default().apply(&source, &mut rng).unwrap();

        for px in noisy.as_bytes().chunks_exact(3) {
            assert!(px == [0, 0, 0] || px == [255, 255, 255] || px == [128, 128, 128]);
        }
    }

    #[test]
    fn test_noise_fraction_is_close_to_expected() {
        let source = gray(200, 200);
        let mut rng = StdRng::seed_from_u64(42);
        let noise = SaltAndPepper::default();
        let noisy = noise.apply(&source, &mut rng).unwrap();

        let total = noisy.total() as f64;
        let black = noisy.as_bytes().chunks_exact(3).filter(|px| px[0] == 0).count() as f64;
        let white = noisy.as_bytes().chunks_exact(3).filter(|px| px[0] == 255).count() as f64;

        assert!((black / total - noise.black_probability()).abs() < 0.01);
        assert!((white / total - noise.white_probability()).abs() < 0.01);
    }

    #[test]
    fn test_same_seed_same_noise() {
        let source = gray(16, 16);
        let noise = SaltAndPepper::default();
        let a = noise.apply(&source, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = noise.apply(&source, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_source_is_untouched() {
        let source = gray(8, 8);
        let _ = SaltAndPepper::default()
            .apply(&source, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert!(source.as_bytes().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_zero_thresholds_never_blacken() {
        let source = gray(32, 32);
        let noise = SaltAndPepper::new(0, u8::MAX);
        let noisy = noise.apply(&source, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(noisy, source);
    }

    #[test]
    fn test_black_wins_when_thresholds_overlap() {
        let source = gray(50, 50);
        let noise = SaltAndPepper::new(200, 50);
        let noisy = noise.apply(&source, &mut StdRng::seed_from_u64(1)).unwrap();

        // Replay the same per-pixel draws
        let mut draws = StdRng::seed_from_u64(1);
        let mut white = 0usize;
        for px in noisy.as_bytes().chunks_exact(3) {
            let draw: u8 = draws.gen_range(0..NOISE_DRAW_RANGE);
            if draw > 199 {
                assert_eq!(px, [255, 255, 255], "draw {} should stay white", draw);
                white += 1;
            } else {
                assert_eq!(px, [0, 0, 0], "draw {} should end black", draw);
            }
        }

        let share = white as f64 / noisy.total() as f64;
        assert!((share - 55.0 / 255.0).abs() < 0.03);
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let mut source = gray(2, 2);
        source.deallocate();
        let result = SaltAndPepper::default().apply(&source, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(ImageError::EmptyImage)));
    }

    #[test]
    fn test_default_probabilities() {
        let noise = SaltAndPepper::default();
        assert!((noise.black_probability() - 30.0 / 255.0).abs() < 1e-9);
        assert!((noise.white_probability() - 29.0 / 255.0).abs() < 1e-9);
    }
}
