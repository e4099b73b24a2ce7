//! Core types for warden.
//!
//! This crate provides the foundational types used throughout the warden
//! control surface:
//!
//! - **Status**: the normalized server status reported to operators,
//!   independent of which cloud vendor hosts the instance
//! - **Lifecycle**: pure derivation of that status from a vendor's raw
//!   power state and any in-flight start/stop actions
//!
//! # Example
//!
//! ```
//! use warden_core::{derive_status, PowerClass, ServerStatus};
//!
//! // Vendor says the instance is powered on and no stop is in flight.
//! let status = derive_status(PowerClass::On, false, false);
//! assert_eq!(status, ServerStatus::Running);
//!
//! // A stop action is still in progress: the instance is winding down.
//! let status = derive_status(PowerClass::On, false, true);
//! assert_eq!(status, ServerStatus::Stopping);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lifecycle;
pub mod status;

pub use lifecycle::{derive_status, from_native, PowerClass};
pub use status::ServerStatus;
