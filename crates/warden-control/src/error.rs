//! Error types for the control service.

use thiserror::Error;

use crate::host::HostError;
use warden_provider::ProviderError;

/// A result type using `ControlError`.
pub type Result<T> = std::result::Result<T, ControlError>;

/// Errors that can occur in control-service operations.
#[derive(Debug, Error)]
pub enum ControlError {
    /// An operation required the main instance to be running.
    #[error("main server isn't running")]
    InstanceNotRunning,

    /// A callback came from an address other than the instance's.
    #[error("callback source address does not match the instance")]
    CallbackAddressMismatch,

    /// The downstream host API failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The vendor API failed hard.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ControlError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InstanceNotRunning => 400,
            Self::CallbackAddressMismatch => 403,
            Self::Host(_) | Self::Provider(_) => 500,
        }
    }
}
