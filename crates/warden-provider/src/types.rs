//! Shared types returned by provider calls.

use warden_core::ServerStatus;

/// Outcome of a start or stop call at the vendor.
///
/// `success` is a soft signal: the vendor accepted the call but the
/// previous/current state pair did not match the expected transition
/// shape. Hard failures are returned as errors instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Whether the vendor confirmed the expected transition shape.
    pub success: bool,
    /// The raw vendor state before the call, when the vendor reports one.
    pub previous_state: Option<String>,
    /// The raw vendor state after the call, when the vendor reports one.
    pub current_state: Option<String>,
}

/// A point-in-time observation of the managed instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    /// Normalized status, or `None` when the vendor reports no instance.
    pub status: Option<ServerStatus>,
    /// Public address, present only in a running-equivalent state.
    pub address: Option<String>,
}

impl Observation {
    /// An observation with no status and no address.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            status: None,
            address: None,
        }
    }
}
