//! Control service implementation.
//!
//! This module provides the `ServerControl` trait and `ControlService`
//! implementation that coordinates the instance provider and the
//! downstream host API.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;

use warden_core::ServerStatus;
use warden_provider::{InstanceProvider, Transition};

use crate::error::{ControlError, Result};
use crate::host::HostClient;
use crate::types::{ControlConfig, StatusReport};

/// Trait defining the control operations exposed to the gateway.
#[async_trait]
pub trait ServerControl: Send + Sync {
    /// Request the vendor start the main instance.
    async fn start_instance(&self) -> Result<Transition>;

    /// Stop the main instance on behalf of a callback from the instance
    /// itself.
    ///
    /// The caller's network origin must exactly match the instance's
    /// observed address, and the instance must currently be running.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::CallbackAddressMismatch` when the origin
    /// does not match, `ControlError::InstanceNotRunning` when the
    /// instance is not running.
    async fn stop_from_instance(&self, peer: IpAddr) -> Result<Transition>;

    /// Forward a game-server start command to the host API.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InstanceNotRunning` when the main instance
    /// is not running; host-API rejection and unreachability surface as
    /// distinct errors.
    async fn start_game_server(&self) -> Result<()>;

    /// Assemble the combined main-instance and game-server report.
    async fn status_report(&self) -> Result<StatusReport>;
}

/// The control service wired to a provider and a host-API client.
pub struct ControlService<P: ?Sized, H: ?Sized> {
    provider: Arc<P>,
    host: Arc<H>,
    config: ControlConfig,
}

impl<P, H> ControlService<P, H>
where
    P: InstanceProvider + ?Sized,
    H: HostClient + ?Sized,
{
    /// Create a new control service.
    #[must_use]
    pub fn new(provider: Arc<P>, host: Arc<H>, config: ControlConfig) -> Self {
        Self {
            provider,
            host,
            config,
        }
    }

    /// Create with default configuration.
    #[must_use]
    pub fn with_defaults(provider: Arc<P>, host: Arc<H>) -> Self {
        Self::new(provider, host, ControlConfig::default())
    }

    /// Best-effort persistence of the observed address for external
    /// tooling; a write failure degrades the side effect, not the query.
    async fn persist_address(&self, address: &str) {
        if let Err(err) = tokio::fs::write(&self.config.address_file, address).await {
            tracing::warn!(
                error = %err,
                path = %self.config.address_file.display(),
                "Failed to persist instance address"
            );
        }
    }
}

#[async_trait]
impl<P, H> ServerControl for ControlService<P, H>
where
    P: InstanceProvider + ?Sized + 'static,
    H: HostClient + ?Sized + 'static,
{
    async fn start_instance(&self) -> Result<Transition> {
        let transition = self.provider.start().await?;

        tracing::info!(
            success = transition.success,
            previous = ?transition.previous_state,
            current = ?transition.current_state,
            "Instance start requested"
        );

        Ok(transition)
    }

    async fn stop_from_instance(&self, peer: IpAddr) -> Result<Transition> {
        let observation = self.provider.probe().await?;

        // The address check comes first: an unknown or different origin
        // is rejected before any state detail is considered.
        let matches_instance = observation
            .address
            .as_deref()
            .and_then(|addr| addr.parse::<IpAddr>().ok())
            .is_some_and(|addr| addr == peer);

        if !matches_instance {
            tracing::warn!(peer = %peer, "Callback stop from unexpected origin");
            return Err(ControlError::CallbackAddressMismatch);
        }

        if observation.status != Some(ServerStatus::Running) {
            return Err(ControlError::InstanceNotRunning);
        }

        let transition = self.provider.stop().await?;

        tracing::info!(
            success = transition.success,
            peer = %peer,
            "Instance stop requested by callback"
        );

        Ok(transition)
    }

    async fn start_game_server(&self) -> Result<()> {
        let observation = self.provider.probe().await?;

        let address = match (observation.status, observation.address) {
            (Some(ServerStatus::Running), Some(address)) => address,
            _ => return Err(ControlError::InstanceNotRunning),
        };

        self.host.start_game_server(&address).await?;

        tracing::info!(address = %address, "Game-server start forwarded to host");

        Ok(())
    }

    async fn status_report(&self) -> Result<StatusReport> {
        let observation = self.provider.probe().await?;

        let mut mc = None;
        let mut players = None;
        let mut ssh = false;

        if observation.status == Some(ServerStatus::Running) {
            if let Some(address) = &observation.address {
                match self.host.status(address).await {
                    Ok(report) => {
                        mc = report.status;
                        players = report.players;
                        ssh = report.ssh;
                    }
                    Err(err) => {
                        // Deliberate degradation: the main status is
                        // still reported with process fields nulled out.
                        tracing::warn!(error = %err, "Host status query failed");
                    }
                }
            }
        }

        if let Some(address) = &observation.address {
            self.persist_address(address).await;
        }

        Ok(StatusReport {
            main: observation.status,
            mc,
            ip: observation.address,
            players,
            ssh,
        })
    }
}
