//! The polymorphic provider capability.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Observation, Transition};

/// Uniform contract over the interchangeable cloud-instance backends.
///
/// Implementations are selected at process startup by configuration and
/// isolate vendor-specific JSON shapes behind this trait. Transport-level
/// failures propagate as errors; unexpected-but-confirmed state pairs are
/// reported as `success: false` on the returned [`Transition`].
#[async_trait]
pub trait InstanceProvider: Send + Sync {
    /// Request the vendor transition the instance out of a stopped state.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor call fails at the transport level or
    /// with a non-success status code.
    async fn start(&self) -> Result<Transition>;

    /// Request the vendor transition the instance out of a running state.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor call fails at the transport level or
    /// with a non-success status code.
    async fn stop(&self) -> Result<Transition>;

    /// Query the vendor for the instance's current state and address.
    ///
    /// A missing instance is not an error: it yields an observation with
    /// an absent status and an absent address.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor call fails at the transport level.
    async fn probe(&self) -> Result<Observation>;
}
