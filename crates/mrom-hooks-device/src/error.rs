//! Error types for the device module

use std::io;
use std::path::PathBuf;

/// Result type alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures creating the coldboot marker
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("failed to mkdir {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to set owner/mode of {}: {source}", path.display())]
    Permissions { path: PathBuf, source: io::Error },
}

/// Failures loading or validating a device profile
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read device profile {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse device profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid device profile: {0}")]
    Invalid(String),
}
