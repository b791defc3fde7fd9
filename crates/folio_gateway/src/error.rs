//! Gateway error types.

use thiserror::Error;

/// Errors from talking to the hosted backend.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport-level failure: connection refused, timeout, bad TLS.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `message` carries
    /// the backend's own description and is shown to users verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },
}
