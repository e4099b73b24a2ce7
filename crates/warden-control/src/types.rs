//! Shared types for the control service.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use warden_core::ServerStatus;

/// Configuration for the control service.
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// File the last observed instance address is written to.
    ///
    /// The sole on-disk state this service maintains; overwritten on
    /// every successful status query and never read back.
    pub address_file: PathBuf,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            address_file: PathBuf::from("serverip"),
        }
    }
}

/// The combined status report relayed to operators.
///
/// All fields are always present on the wire; absent values serialize
/// as `null` so the operator UI can distinguish "not running" from
/// "unreported".
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Normalized main-instance status.
    pub main: Option<ServerStatus>,
    /// Game-server state label from the host API.
    pub mc: Option<String>,
    /// Public address of the instance.
    pub ip: Option<String>,
    /// Per-player report, keyed by name in sorted order.
    pub players: Option<BTreeMap<String, serde_json::Value>>,
    /// Whether the secondary channel to the instance is connected.
    pub ssh: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_serialize_as_null() {
        let report = StatusReport {
            main: Some(ServerStatus::Stopped),
            mc: None,
            ip: None,
            players: None,
            ssh: false,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["main"], "stopped");
        assert!(json["mc"].is_null());
        assert!(json["players"].is_null());
        assert_eq!(json["ssh"], false);
    }

    #[test]
    fn player_keys_serialize_in_sorted_order() {
        let mut players = BTreeMap::new();
        players.insert("zed".to_string(), serde_json::json!({}));
        players.insert("amy".to_string(), serde_json::json!({}));

        let report = StatusReport {
            main: Some(ServerStatus::Running),
            mc: Some("running".into()),
            ip: Some("203.0.113.1".into()),
            players: Some(players),
            ssh: true,
        };

        let json = serde_json::to_string(&report).unwrap();
        let amy = json.find("\"amy\"").unwrap();
        let zed = json.find("\"zed\"").unwrap();
        assert!(amy < zed);
    }
}
