//! Error types for provider clients.

use thiserror::Error;

/// A result type using `ProviderError`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while talking to a cloud vendor API.
///
/// Soft mismatches (the vendor confirmed the call but the state pair was
/// not the expected shape) are *not* errors; they surface as
/// `success: false` on a [`crate::Transition`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request to the vendor failed at the transport level.
    #[error("vendor API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The vendor answered with a non-success status code.
    #[error("vendor API returned status {status}: {body}")]
    Api {
        /// The HTTP status code the vendor returned.
        status: u16,
        /// The response body, for the operator-facing error message.
        body: String,
    },

    /// The vendor answered 2xx but the payload could not be read.
    #[error("vendor API returned an unreadable payload: {0}")]
    Malformed(String),
}
