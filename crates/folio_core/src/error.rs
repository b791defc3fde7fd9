//! Application error types shared across the workspace.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A backend row did not match the expected record shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
