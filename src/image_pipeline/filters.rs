//! Pixel filters
//!
//! Each filter reads a source matrix and returns a new one; the source is
//! never modified.

mod median;
mod noise;

pub use median::{median_blur, DEFAULT_MEDIAN_KERNEL};
pub use noise::{SaltAndPepper, NOISE_DRAW_RANGE};
