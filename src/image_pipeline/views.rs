//! Zero-copy views over pixel storage
//!
//! Both views borrow the bytes they describe, so they cannot outlive the
//! image (or model file) they were taken from.

mod buffer;
mod tensor;

pub use buffer::BufferView;
pub use tensor::{TensorView, TENSOR_CHANNELS};
