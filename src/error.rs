//! Error types shared by the gesture pipeline

use thiserror::Error;

/// Errors that can occur while turning hand observations into pointer actions
#[derive(Error, Debug)]
pub enum GestureError {
    #[error("Malformed landmarks: expected {expected} points, got {actual}")]
    MalformedLandmarks { expected: usize, actual: usize },

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for gesture pipeline operations
pub type GestureResult<T> = Result<T, GestureError>;
