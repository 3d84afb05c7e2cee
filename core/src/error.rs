//! Error types for loading spec documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a [`SpecDocument`](crate::SpecDocument).
#[derive(Debug, Error)]
pub enum SpecFileError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File extension is not one of `yaml`, `yml` or `json`.
    #[error("unsupported spec file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A declared default cannot be represented as the switch's type.
    #[error("default for --{name} is not a valid {expected}")]
    InvalidDefault {
        name: String,
        expected: crate::SwitchType,
    },
}

/// Convenience alias for results with [`SpecFileError`].
pub type Result<T> = std::result::Result<T, SpecFileError>;
