//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use warden_control::ServerControl;

use crate::handlers::{health, login, server};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `POST /login` - Operator login (form: password)
/// - `POST /callback/stopmainserver` - Instance-originated stop,
///   guarded by source-address match instead of a session
///
/// ## Authenticated
/// - `POST /startserver` - Start the main instance (cooldown-guarded)
/// - `POST /startmcserver` - Start the game server (cooldown-guarded)
/// - `GET /serverstatus` - Combined status report
pub fn create_router<C>(state: GatewayState<C>) -> Router
where
    C: ServerControl + 'static,
{
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health))
        .route("/login", post(login::login::<C>))
        .route("/startserver", post(server::start_instance::<C>))
        .route("/startmcserver", post(server::start_game_server::<C>))
        .route(
            "/callback/stopmainserver",
            post(server::stop_from_callback::<C>),
        )
        .route("/serverstatus", get(server::server_status::<C>))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
