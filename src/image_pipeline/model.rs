//! Serialized model files
//!
//! Reads a model file from a caller-supplied path and exposes the bytes as a
//! [`BufferView`] or as a seekable stream, which is what model runtimes load
//! from. Nothing here executes a model.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::views::BufferView;

#[derive(Debug, Clone)]
pub struct ModelBytes {
    path: PathBuf,
    data: Vec<u8>,
}

impl ModelBytes {
    #[instrument]
    pub fn from_path<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| ImageError::InputReadError(format!("{}: {}", path.display(), e)))?;
        if data.is_empty() {
            return Err(ImageError::EmptyModel(path.display().to_string()));
        }
        debug!(bytes = data.len(), "Read model file");
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_weak_buffer(&self) -> BufferView<'_> {
        BufferView::new(&self.data)
    }

    /// Random-access stream over the model bytes
    pub fn stream(&self) -> Cursor<&[u8]> {
        Cursor::new(self.data.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_model_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"onnx-model-bytes").unwrap();

        let model = ModelBytes::from_path(file.path()).unwrap();
        assert_eq!(model.len(), 16);
        assert_eq!(model.as_weak_buffer().as_bytes(), b"onnx-model-bytes");
        assert_eq!(model.path(), file.path());
    }

    #[test]
    fn test_stream_is_seekable() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();
        let model = ModelBytes::from_path(file.path()).unwrap();

        let mut stream = model.stream();
        stream.seek(SeekFrom::Start(6)).unwrap();
        let mut tail = String::new();
        stream.read_to_string(&mut tail).unwrap();
        assert_eq!(tail, "6789");
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        let result = ModelBytes::from_path(file.path());
        assert!(matches!(result, Err(ImageError::EmptyModel(_))));
    }

    #[test]
    fn test_missing_model_is_an_input_error() {
        let result = ModelBytes::from_path("/nonexistent/SqueezeNet.onnx");
        assert!(matches!(result, Err(ImageError::InputReadError(_))));
    }
}
