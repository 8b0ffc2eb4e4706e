//! Configuration loading errors.

use thiserror::Error;

/// Config load error
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Parsed but unusable values
    #[error("Invalid config: {0}")]
    Invalid(String),
}
