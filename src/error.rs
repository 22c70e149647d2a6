//! Error types for the corrigo library.
//!
//! This module provides error handling for all corrigo operations.
//! All errors are represented by the [`CorrigoError`] enum, which keeps the
//! three failure classes of the correction pipeline distinguishable: broken
//! dataset contents, unresolvable dataset references, and model loading
//! failures.
//!
//! # Examples
//!
//! ```
//! use corrigo::error::{CorrigoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     // Return an error
//!     Err(CorrigoError::dataset_reference("no such dataset: foo"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for corrigo operations.
///
/// This enum represents all possible errors that can occur in the corrigo
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum CorrigoError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A dataset exists but its contents are structurally invalid
    /// (mismatched pair lengths, missing columns, missing values,
    /// unparseable files).
    #[error("Dataset format error: {0}")]
    DatasetFormat(String),

    /// A dataset reference is neither a known benchmark name nor a
    /// directory on disk.
    #[error("Dataset reference error: {0}")]
    DatasetReference(String),

    /// A pretrained model could not be bound from its identifier or path.
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Text generation failed after the model was loaded.
    #[error("Generation error: {0}")]
    Generation(String),

    /// HuggingFace Hub access failed (dataset downloads).
    #[error("Hub error: {0}")]
    Hub(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with CorrigoError.
pub type Result<T> = std::result::Result<T, CorrigoError>;

impl CorrigoError {
    /// Create a new dataset format error.
    pub fn dataset_format<S: Into<String>>(msg: S) -> Self {
        CorrigoError::DatasetFormat(msg.into())
    }

    /// Create a new dataset reference error.
    pub fn dataset_reference<S: Into<String>>(msg: S) -> Self {
        CorrigoError::DatasetReference(msg.into())
    }

    /// Create a new model load error.
    pub fn model_load<S: Into<String>>(msg: S) -> Self {
        CorrigoError::ModelLoad(msg.into())
    }

    /// Create a new generation error.
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        CorrigoError::Generation(msg.into())
    }

    /// Create a new hub error.
    pub fn hub<S: Into<String>>(msg: S) -> Self {
        CorrigoError::Hub(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CorrigoError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CorrigoError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = CorrigoError::dataset_format("lengths differ");
        assert_eq!(error.to_string(), "Dataset format error: lengths differ");

        let error = CorrigoError::dataset_reference("bogus reference");
        assert_eq!(
            error.to_string(),
            "Dataset reference error: bogus reference"
        );

        let error = CorrigoError::model_load("no such repo");
        assert_eq!(error.to_string(), "Model load error: no such repo");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let corrigo_error = CorrigoError::from(io_error);

        match corrigo_error {
            CorrigoError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_invalid_argument_prefix() {
        let error = CorrigoError::invalid_argument("batch size must be positive");
        assert_eq!(
            error.to_string(),
            "Error: Invalid argument: batch size must be positive"
        );
    }
}
