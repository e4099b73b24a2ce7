//! The normalized server status enumeration.
//!
//! Every vendor reports instance state in its own vocabulary. This module
//! defines the closed, five-way enumeration warden exposes to operators
//! regardless of the backing vendor. Absence of a value (the vendor query
//! failed, or no instance exists) is expressed as `Option<ServerStatus>`
//! at use sites, never as an extra variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized lifecycle status of the managed instance.
///
/// Derived, never stored authoritatively: every value is recomputed from
/// the vendor's current raw state plus any in-flight action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// The instance is powered off with no start in flight.
    Stopped,
    /// The instance is powered off but a start action is in progress.
    Starting,
    /// The instance is powered on and reachable.
    Running,
    /// The instance is powered on but a stop action is in progress.
    Stopping,
    /// The vendor reported a state warden does not recognize.
    Unknown,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ServerStatus::Starting).unwrap();
        assert_eq!(json, "\"starting\"");
    }

    #[test]
    fn display_matches_wire_spelling() {
        for status in [
            ServerStatus::Stopped,
            ServerStatus::Starting,
            ServerStatus::Running,
            ServerStatus::Stopping,
            ServerStatus::Unknown,
        ] {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{status}\""));
        }
    }

    #[test]
    fn deserializes_from_wire() {
        let status: ServerStatus = serde_json::from_str("\"stopping\"").unwrap();
        assert_eq!(status, ServerStatus::Stopping);
    }
}
