//! Error Handling Module
//!
//! Defines the error types for the imagefold library.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for imagefold operations
#[derive(Error, Debug)]
pub enum Error {
    /// Batch index outside the valid range
    #[error("Batch index {index} out of range ({count} batches)")]
    OutOfRange { index: usize, count: usize },

    /// Error opening or decoding an image file
    #[error("Failed to decode image at '{path}': {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Label string absent from the vocabulary
    #[error("Label '{0}' not present in vocabulary")]
    LabelNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Root path missing or not a directory
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience Result type for imagefold operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = Error::OutOfRange { index: 4, count: 4 };
        assert_eq!(format!("{}", err), "Batch index 4 out of range (4 batches)");
    }

    #[test]
    fn test_label_not_found_display() {
        let err = Error::LabelNotFound("tulip".to_string());
        assert_eq!(format!("{}", err), "Label 'tulip' not present in vocabulary");
    }

    #[test]
    fn test_path_not_found_display() {
        let err = Error::PathNotFound(PathBuf::from("/data/flowers"));
        assert!(format!("{}", err).contains("/data/flowers"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
