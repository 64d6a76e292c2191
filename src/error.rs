//! Error types for Mannequin

use thiserror::Error;

/// Main error type for Mannequin
#[derive(Error, Debug)]
pub enum MannequinError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

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

/// Asset-related errors (images and avatar models)
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Failed to load model: {0}")]
    ModelLoad(String),
}

/// Result type alias for Mannequin operations
pub type Result<T> = std::result::Result<T, MannequinError>;
