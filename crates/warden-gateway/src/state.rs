//! Gateway application state.
//!
//! This module defines the shared state that is available to all
//! request handlers.

use std::sync::Arc;

use warden_control::ServerControl;

use crate::auth::Sessions;
use crate::config::GatewayConfig;
use crate::cooldown::CooldownGuard;

/// Shared application state for the gateway.
pub struct GatewayState<C>
where
    C: ServerControl,
{
    /// The control service for instance and game-server operations.
    pub control: Arc<C>,
    /// Session issuing and verification.
    pub sessions: Sessions,
    /// The named-operation cooldown guard.
    pub cooldown: CooldownGuard,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<C> GatewayState<C>
where
    C: ServerControl,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(
        control: Arc<C>,
        sessions: Sessions,
        cooldown: CooldownGuard,
        config: GatewayConfig,
    ) -> Self {
        Self {
            control,
            sessions,
            cooldown,
            config,
        }
    }
}
