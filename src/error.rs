//! Error types for training runs

use thiserror::Error;

/// Errors raised while driving a training session
///
/// Every failure is fatal to the run. There is no retry policy; the caller
/// restarts from the last successful checkpoint if desired.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for training operations
pub type Result<T> = std::result::Result<T, TrainError>;
