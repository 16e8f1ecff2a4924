//! Error types for Kagami

use thiserror::Error;

/// Main error type for Kagami
#[derive(Error, Debug)]
pub enum KagamiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Tracking-related errors (solve-result receiver boundary)
///
/// The retargeting core itself never returns errors to its caller; a frame
/// that cannot be interpreted is dropped. These cover the UDP receiver and
/// packet decoding only.
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Receiver error: {0}")]
    Receiver(String),

    #[error("Solve packet parse error: {0}")]
    Parse(String),
}

/// Result type alias for Kagami operations
pub type Result<T> = std::result::Result<T, KagamiError>;
