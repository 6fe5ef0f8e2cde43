//! Error types for wireview

use thiserror::Error;

/// Main error type for wireview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Model '{name}' not found under {path}")]
    ModelNotFound { name: String, path: String },

    #[error("Reconstruction error: {0}")]
    Reconstruction(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for wireview operations
pub type Result<T> = std::result::Result<T, Error>;
