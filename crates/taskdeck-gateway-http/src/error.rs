//! Error types for gateway operations.

use thiserror::Error;

/// Errors surfaced by the remote task gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Backend answered with a non-2xx status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the HTTP reason phrase.
        message: String,
    },

    /// Request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Other unclassified error.
    #[error("gateway error: {0}")]
    Other(String),
}

impl GatewayError {
    /// HTTP status code, when the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Other(_) => None,
        }
    }
}
