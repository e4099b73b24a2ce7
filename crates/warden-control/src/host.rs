//! HTTP client for the host API running on the managed instance.
//!
//! The instance runs a small agent that reports game-server status and
//! accepts start commands. It is reached by the instance's public
//! address, with a short timeout so a wedged instance cannot stall an
//! operator request.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use thiserror::Error;

/// Timeout applied to every host-API call.
const HOST_TIMEOUT: Duration = Duration::from_secs(3);

/// A result type using `HostError`.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Errors from the downstream host API.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// The host API could not be reached within the timeout.
    #[error("host API did not respond")]
    Unreachable(String),

    /// The host API answered with an unexpected status code.
    #[error("host API returned {status}: {body}")]
    UnexpectedStatus {
        /// The HTTP status the host returned.
        status: u16,
        /// The response body, relayed to the operator.
        body: String,
    },

    /// The host API answered but the payload could not be read.
    #[error("host API returned an unreadable payload: {0}")]
    Malformed(String),
}

/// Process-level report from the host API.
///
/// `players` is keyed by player name in sorted order, so the emitted
/// report is stable across queries.
#[derive(Debug, Clone, Default)]
pub struct HostReport {
    /// Game-server state label, or `None` when the host reported none.
    pub status: Option<String>,
    /// Per-player report, keyed by name.
    pub players: Option<BTreeMap<String, serde_json::Value>>,
    /// Whether the secondary channel to the instance is connected.
    pub ssh: bool,
}

/// Trait for host-API communication, allowing mock implementations in
/// tests.
#[async_trait]
pub trait HostClient: Send + Sync {
    /// Ask the host agent to start the game server.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is unreachable or answers with
    /// anything but 201.
    async fn start_game_server(&self, address: &str) -> HostResult<()>;

    /// Query the host agent for the game server's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is unreachable or the payload is
    /// unreadable.
    async fn status(&self, address: &str) -> HostResult<HostReport>;
}

/// The game-server states the host agent reports as numeric codes.
fn game_state_label(code: i64) -> &'static str {
    match code {
        0 => "stopped",
        1 => "starting-blank",
        2 => "starting-launching",
        3 => "starting-preparing",
        4 => "running",
        5 => "stopped-ssh",
        6 => "stopping",
        _ => "unknown",
    }
}

fn normalize_game_status(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().map(|code| game_state_label(code).to_string()),
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct RawHostStatus {
    #[serde(default)]
    status: serde_json::Value,
    #[serde(default)]
    players: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    ssh: bool,
}

/// HTTP implementation of [`HostClient`].
#[derive(Debug, Clone)]
pub struct HttpHostClient {
    client: reqwest::Client,
}

impl HttpHostClient {
    /// Create a host-API client with the standard short timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(HOST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpHostClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostClient for HttpHostClient {
    async fn start_game_server(&self, address: &str) -> HostResult<()> {
        let url = format!("http://{address}/api/serverstart");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| HostError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 201 {
            tracing::info!(address, "Host accepted game-server start");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(HostError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn status(&self, address: &str) -> HostResult<HostReport> {
        let url = format!("http://{address}/api/serverstatus");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HostError::Unreachable(e.to_string()))?;

        let raw: RawHostStatus = response
            .json()
            .await
            .map_err(|e| HostError::Malformed(e.to_string()))?;

        Ok(HostReport {
            status: normalize_game_status(raw.status),
            players: raw.players,
            ssh: raw.ssh,
        })
    }
}

/// A scriptable [`HostClient`] for tests.
#[derive(Debug, Default)]
pub struct MockHostClient {
    report: Mutex<HostReport>,
    error: Mutex<Option<HostError>>,
    started: Mutex<Vec<String>>,
}

impl MockHostClient {
    /// Create a mock answering an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the report returned by `status`.
    pub fn set_report(&self, report: HostReport) {
        *self.report.lock() = report;
    }

    /// Make every subsequent call fail with the given error.
    pub fn fail_with(&self, error: HostError) {
        *self.error.lock() = Some(error);
    }

    /// Addresses `start_game_server` was called with.
    pub fn started(&self) -> Vec<String> {
        self.started.lock().clone()
    }
}

#[async_trait]
impl HostClient for MockHostClient {
    async fn start_game_server(&self, address: &str) -> HostResult<()> {
        if let Some(error) = self.error.lock().clone() {
            return Err(error);
        }
        self.started.lock().push(address.to_string());
        Ok(())
    }

    async fn status(&self, _address: &str) -> HostResult<HostReport> {
        if let Some(error) = self.error.lock().clone() {
            return Err(error);
        }
        Ok(self.report.lock().clone())
    }
}
