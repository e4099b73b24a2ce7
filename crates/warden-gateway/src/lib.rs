//! HTTP control surface for the warden instance manager.
//!
//! This crate provides the operator-facing API: session-cookie
//! authentication, the named-operation cooldown guard, and the handlers
//! that relay requests into the control service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            Operator / Instance              │
//! │                (HTTP)                       │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │              warden-gateway                 │
//! │  ┌──────────┐ ┌──────────┐ ┌────────────┐   │
//! │  │ Session  │ │ Cooldown │ │  Router    │   │
//! │  │   Auth   │ │  Guard   │ │ + Handlers │   │
//! │  └──────────┘ └──────────┘ └────────────┘   │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//!               ┌─────────────┐
//!               │   Control   │
//!               │   Service   │
//!               └─────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::{SessionAuth, Sessions};
pub use config::GatewayConfig;
pub use cooldown::CooldownGuard;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;
