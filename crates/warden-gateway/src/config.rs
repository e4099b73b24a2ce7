//! Gateway configuration types.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8080").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Allowed CORS origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Cooldown window for guarded operations, in seconds.
    #[serde(default = "GatewayConfig::default_cooldown")]
    pub cooldown_seconds: u64,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Name of the session cookie.
    #[serde(default = "GatewayConfig::default_cookie_name")]
    pub session_cookie_name: String,

    /// Session lifetime in seconds. Operator sessions are long-lived.
    #[serde(default = "GatewayConfig::default_session_ttl")]
    pub session_ttl_seconds: i64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    const fn default_cooldown() -> u64 {
        2
    }

    const fn default_max_body() -> usize {
        64 * 1024 // 64 KB; no endpoint takes more than a login form
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    fn default_cookie_name() -> String {
        "warden_session".to_string()
    }

    const fn default_session_ttl() -> i64 {
        31 * 24 * 3600 // 31 days
    }

    /// Get the cooldown window as a `Duration`.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            cors_origins: vec![],
            cooldown_seconds: Self::default_cooldown(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
            session_cookie_name: Self::default_cookie_name(),
            session_ttl_seconds: Self::default_session_ttl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.cooldown_seconds, 2);
        assert_eq!(config.session_cookie_name, "warden_session");
    }

    #[test]
    fn duration_accessors() {
        let config = GatewayConfig::default();
        assert_eq!(config.cooldown(), Duration::from_secs(2));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
