//! Control service for the warden control surface.
//!
//! This crate provides the business logic between the HTTP gateway and
//! the cloud vendor: it relays start/stop requests through the
//! configured [`warden_provider::InstanceProvider`], enforces the
//! callback-stop policy, brokers game-server commands to the host API
//! on the instance, and assembles the combined status report.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                Gateway (HTTP)                │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │                ControlService                │
//! │   start / callback-stop / game-server /      │
//! │   status-report orchestration                │
//! └──────────────────────────────────────────────┘
//!            │                       │
//!            ▼                       ▼
//!   ┌─────────────────┐     ┌─────────────────┐
//!   │ InstanceProvider│     │   HostClient    │
//!   │ (cloud vendor)  │     │ (instance agent)│
//!   └─────────────────┘     └─────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod host;
pub mod service;
pub mod types;

pub use error::{ControlError, Result};
pub use host::{HostClient, HostError, HostReport, HttpHostClient, MockHostClient};
pub use service::{ControlService, ServerControl};
pub use types::{ControlConfig, StatusReport};

// Re-export commonly used types from dependencies for convenience
pub use warden_core::ServerStatus;
pub use warden_provider::{Observation, Transition};
