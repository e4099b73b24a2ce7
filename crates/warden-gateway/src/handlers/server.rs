//! Instance and game-server control endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use warden_control::{ServerControl, StatusReport, Transition};

use crate::auth::SessionAuth;
use crate::error::ApiError;
use crate::state::GatewayState;

/// Cooldown key for the instance-start operation.
const OP_START_SERVER: &str = "startserver";
/// Cooldown key for the game-server-start operation.
const OP_START_GAME_SERVER: &str = "startmcserver";

/// Wire shape of a start/stop outcome.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    /// Whether the vendor confirmed the expected transition shape.
    pub success: bool,
    /// Raw vendor state before the call.
    #[serde(rename = "previousState")]
    pub previous_state: Option<String>,
    /// Raw vendor state after the call.
    #[serde(rename = "currentState")]
    pub current_state: Option<String>,
}

impl From<Transition> for TransitionResponse {
    fn from(transition: Transition) -> Self {
        Self {
            success: transition.success,
            previous_state: transition.previous_state,
            current_state: transition.current_state,
        }
    }
}

/// Start the main instance.
///
/// Requires authentication and respects the named-operation cooldown.
///
/// # Errors
///
/// Returns an error if the call lands inside the cooldown window or the
/// vendor call fails hard.
pub async fn start_instance<C>(
    State(state): State<Arc<GatewayState<C>>>,
    _auth: SessionAuth,
) -> Result<Json<TransitionResponse>, ApiError>
where
    C: ServerControl + 'static,
{
    if !state.cooldown.try_acquire(OP_START_SERVER) {
        return Err(ApiError::CooldownActive);
    }

    let transition = state.control.start_instance().await?;

    Ok(Json(transition.into()))
}

/// Start the game server via the host API on the instance.
///
/// Requires authentication, respects the cooldown, and requires the
/// main instance to be running.
///
/// # Errors
///
/// Returns an error if the call lands inside the cooldown window, the
/// instance is not running, or the host API rejects the command or is
/// unreachable.
pub async fn start_game_server<C>(
    State(state): State<Arc<GatewayState<C>>>,
    _auth: SessionAuth,
) -> Result<impl IntoResponse, ApiError>
where
    C: ServerControl + 'static,
{
    if !state.cooldown.try_acquire(OP_START_GAME_SERVER) {
        return Err(ApiError::CooldownActive);
    }

    state.control.start_game_server().await?;

    Ok(StatusCode::CREATED)
}

/// Stop the main instance on a callback from the instance itself.
///
/// Unauthenticated; the caller's network origin must match the
/// instance's observed address instead.
///
/// # Errors
///
/// Returns an error if the origin does not match or the instance is not
/// running.
pub async fn stop_from_callback<C>(
    State(state): State<Arc<GatewayState<C>>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Result<Json<TransitionResponse>, ApiError>
where
    C: ServerControl + 'static,
{
    let transition = state.control.stop_from_instance(peer.ip()).await?;

    Ok(Json(transition.into()))
}

/// Query the combined instance and game-server status.
///
/// # Errors
///
/// Returns an error if the vendor query fails hard; a downstream host
/// failure degrades the report instead of failing it.
pub async fn server_status<C>(
    State(state): State<Arc<GatewayState<C>>>,
    _auth: SessionAuth,
) -> Result<Json<StatusReport>, ApiError>
where
    C: ServerControl + 'static,
{
    let report = state.control.status_report().await?;

    Ok(Json(report))
}
