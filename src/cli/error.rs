//! CLI error type

use crate::config::ConfigError;
use crate::convert::ConversionError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read {}: {}", .0.display(), .1)]
    FileReadError(PathBuf, String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to serialize output: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::SerializationError(e.to_string())
    }
}
