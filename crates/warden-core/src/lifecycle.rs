//! Server lifecycle status derivation.
//!
//! This module reconciles the asymmetry between vendors that expose
//! fine-grained transitional states natively (pending, stopping) and
//! vendors that only expose binary on/off plus a separate action-tracking
//! mechanism. It holds no state of its own; every call recomputes from
//! scratch.
//!
//! # Derivation
//!
//! ```text
//!  raw power state          in-flight action        normalized status
//!  ───────────────          ────────────────        ─────────────────
//!  on-equivalent       +    stop in progress   →    stopping
//!  on-equivalent       +    (none)             →    running
//!  off-equivalent      +    start in progress  →    starting
//!  off-equivalent      +    (none)             →    stopped
//!  anything else       +    (ignored)          →    unknown
//! ```

use crate::status::ServerStatus;

/// Coarse classification of a vendor's raw power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerClass {
    /// The vendor reports an on-equivalent state.
    On,
    /// The vendor reports an off-equivalent state.
    Off,
    /// The vendor reports a state warden does not classify.
    Other,
}

/// Derive the normalized status from a power classification and the
/// in-flight answers from the action tracker.
///
/// An on-state refines to [`ServerStatus::Stopping`] while the last stop
/// action is still in progress; an off-state refines to
/// [`ServerStatus::Starting`] while the last start action is still in
/// progress. Unclassified states map to [`ServerStatus::Unknown`], a
/// terminal sentinel for that query rather than an error.
#[must_use]
pub const fn derive_status(
    power: PowerClass,
    start_in_flight: bool,
    stop_in_flight: bool,
) -> ServerStatus {
    match power {
        PowerClass::On => {
            if stop_in_flight {
                ServerStatus::Stopping
            } else {
                ServerStatus::Running
            }
        }
        PowerClass::Off => {
            if start_in_flight {
                ServerStatus::Starting
            } else {
                ServerStatus::Stopped
            }
        }
        PowerClass::Other => ServerStatus::Unknown,
    }
}

/// Map a raw state name from a vendor that exposes transitional states
/// natively onto the normalized enumeration.
#[must_use]
pub fn from_native(raw: &str) -> ServerStatus {
    match raw {
        "pending" => ServerStatus::Starting,
        "running" => ServerStatus::Running,
        "stopping" | "shutting-down" => ServerStatus::Stopping,
        "stopped" => ServerStatus::Stopped,
        _ => ServerStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_state_with_stop_in_flight_is_stopping() {
        assert_eq!(
            derive_status(PowerClass::On, false, true),
            ServerStatus::Stopping
        );
        // A stale start flag never overrides the stop refinement.
        assert_eq!(
            derive_status(PowerClass::On, true, true),
            ServerStatus::Stopping
        );
    }

    #[test]
    fn on_state_without_stop_is_running() {
        assert_eq!(
            derive_status(PowerClass::On, false, false),
            ServerStatus::Running
        );
        assert_eq!(
            derive_status(PowerClass::On, true, false),
            ServerStatus::Running
        );
    }

    #[test]
    fn off_state_with_start_in_flight_is_starting() {
        assert_eq!(
            derive_status(PowerClass::Off, true, false),
            ServerStatus::Starting
        );
        assert_eq!(
            derive_status(PowerClass::Off, true, true),
            ServerStatus::Starting
        );
    }

    #[test]
    fn off_state_without_start_is_stopped() {
        assert_eq!(
            derive_status(PowerClass::Off, false, false),
            ServerStatus::Stopped
        );
        assert_eq!(
            derive_status(PowerClass::Off, false, true),
            ServerStatus::Stopped
        );
    }

    #[test]
    fn unclassified_state_is_unknown() {
        assert_eq!(
            derive_status(PowerClass::Other, false, false),
            ServerStatus::Unknown
        );
        assert_eq!(
            derive_status(PowerClass::Other, true, true),
            ServerStatus::Unknown
        );
    }

    #[test]
    fn native_states_map_onto_normalized() {
        assert_eq!(from_native("pending"), ServerStatus::Starting);
        assert_eq!(from_native("running"), ServerStatus::Running);
        assert_eq!(from_native("stopping"), ServerStatus::Stopping);
        assert_eq!(from_native("shutting-down"), ServerStatus::Stopping);
        assert_eq!(from_native("stopped"), ServerStatus::Stopped);
    }

    #[test]
    fn unrecognized_native_state_is_unknown() {
        assert_eq!(from_native("terminated"), ServerStatus::Unknown);
        assert_eq!(from_native(""), ServerStatus::Unknown);
    }
}
