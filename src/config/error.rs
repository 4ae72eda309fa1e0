//! Errors raised while reading or writing `config.yml`.

use std::path::PathBuf;

/// Failure to locate, read, parse or persist the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called before `load` chose a file
    #[error("Configuration file path not set")]
    FilePathNotSet,

    /// No home directory to place the default config directory in
    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML encoding of the settings failed
    #[error("Failed to serialize configuration: {0}")]
    SerializationFailed(String),

    /// `config.yml` is not valid YAML for the expected settings
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationFailed(String),
}
