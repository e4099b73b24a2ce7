//! Droplet-style backend.
//!
//! This vendor only exposes a binary on/off power state, so transitional
//! statuses are reconstructed from the in-flight answers of the vendor's
//! action API: the latest start/stop action reference is kept in an
//! [`ActionTracker`] and queried during each probe.

use serde::{Deserialize, Serialize};

use async_trait::async_trait;
use warden_core::{derive_status, PowerClass};

use crate::error::{ProviderError, Result};
use crate::provider::InstanceProvider;
use crate::tracker::ActionTracker;
use crate::types::{Observation, Transition};

/// Configuration for the droplet-style backend.
#[derive(Debug, Clone)]
pub struct DropletConfig {
    /// Vendor API token.
    pub api_token: String,
    /// Identifier of the managed droplet.
    pub droplet_id: u64,
    /// Base URL override; defaults to the public vendor API.
    pub base_url: Option<String>,
}

impl DropletConfig {
    fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| "https://api.digitalocean.com".to_string())
    }
}

#[derive(Debug, Serialize)]
struct ActionRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Deserialize)]
struct ActionEnvelope {
    action: ActionBody,
}

#[derive(Debug, Deserialize)]
struct ActionBody {
    id: u64,
    status: String,
}

#[derive(Debug, Deserialize)]
struct DropletEnvelope {
    droplet: DropletBody,
}

#[derive(Debug, Deserialize)]
struct DropletBody {
    status: String,
    #[serde(default)]
    networks: Option<Networks>,
}

#[derive(Debug, Deserialize)]
struct Networks {
    #[serde(default)]
    v4: Vec<NetworkV4>,
}

#[derive(Debug, Deserialize)]
struct NetworkV4 {
    #[serde(rename = "type")]
    kind: String,
    ip_address: String,
}

/// Provider client for the droplet-style vendor.
pub struct DropletProvider {
    config: DropletConfig,
    client: reqwest::Client,
    tracker: ActionTracker,
}

impl DropletProvider {
    /// Create a provider client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn new(config: DropletConfig) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            tracker: ActionTracker::new(),
        }
    }

    /// The tracker holding the latest start/stop action references.
    #[must_use]
    pub const fn tracker(&self) -> &ActionTracker {
        &self.tracker
    }

    async fn send_action(&self, kind: &str) -> Result<(u16, Option<ActionBody>)> {
        let url = format!(
            "{}/v2/droplets/{}/actions",
            self.config.base_url(),
            self.config.droplet_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .json(&ActionRequest { kind })
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 201 {
            return Ok((status, None));
        }

        let envelope: ActionEnvelope = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        Ok((status, Some(envelope.action)))
    }

    /// Ask the vendor whether the given action is still in progress.
    ///
    /// No recorded action means nothing is in flight; a non-success
    /// answer from the vendor is treated the same way.
    async fn action_in_progress(&self, action_id: Option<u64>) -> Result<bool> {
        let Some(id) = action_id else {
            return Ok(false);
        };

        let url = format!("{}/v2/actions/{id}", self.config.base_url());
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let envelope: ActionEnvelope = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        Ok(envelope.action.status == "in-progress")
    }

    async fn power_action(&self, kind: &str) -> Result<Transition> {
        let (status, action) = self.send_action(kind).await?;

        let Some(action) = action else {
            // Non-201 from the action API short-circuits as failure.
            tracing::warn!(status, kind, "Vendor rejected power action");
            return Ok(Transition::default());
        };

        if action.status != "in-progress" {
            return Ok(Transition {
                success: false,
                previous_state: None,
                current_state: Some(action.status),
            });
        }

        tracing::info!(kind, action_id = action.id, "Power action accepted");
        match kind {
            "power_on" => self.tracker.record_start(action.id),
            _ => self.tracker.record_stop(action.id),
        }

        Ok(Transition {
            success: true,
            previous_state: None,
            current_state: Some(action.status),
        })
    }
}

fn classify(raw: &str) -> PowerClass {
    match raw {
        "active" => PowerClass::On,
        "new" | "off" | "archive" => PowerClass::Off,
        _ => PowerClass::Other,
    }
}

#[async_trait]
impl InstanceProvider for DropletProvider {
    async fn start(&self) -> Result<Transition> {
        self.power_action("power_on").await
    }

    async fn stop(&self) -> Result<Transition> {
        self.power_action("shutdown").await
    }

    async fn probe(&self) -> Result<Observation> {
        let url = format!(
            "{}/v2/droplets/{}",
            self.config.base_url(),
            self.config.droplet_id
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(Observation::absent());
        }

        let envelope: DropletEnvelope = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let droplet = envelope.droplet;

        let power = classify(&droplet.status);

        // Only the action relevant to the observed power state is
        // consulted; the other slot cannot refine anything.
        let (start_in_flight, stop_in_flight) = match power {
            PowerClass::On => (
                false,
                self.action_in_progress(self.tracker.last_stop()).await?,
            ),
            PowerClass::Off => (
                self.action_in_progress(self.tracker.last_start()).await?,
                false,
            ),
            PowerClass::Other => (false, false),
        };

        let address = if matches!(power, PowerClass::On) {
            droplet
                .networks
                .map(|n| n.v4)
                .unwrap_or_default()
                .into_iter()
                .find(|n| n.kind == "public")
                .map(|n| n.ip_address)
        } else {
            None
        };

        Ok(Observation {
            status: Some(derive_status(power, start_in_flight, stop_in_flight)),
            address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_core::ServerStatus;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> DropletConfig {
        DropletConfig {
            api_token: "token".into(),
            droplet_id: 42,
            base_url: Some(base_url),
        }
    }

    #[tokio::test]
    async fn start_records_action_reference() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/droplets/42/actions"))
            .and(body_json(json!({ "type": "power_on" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": { "id": 901, "status": "in-progress" }
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        let transition = provider.start().await.unwrap();

        assert!(transition.success);
        assert_eq!(transition.current_state.as_deref(), Some("in-progress"));
        assert_eq!(provider.tracker().last_start(), Some(901));
    }

    #[tokio::test]
    async fn rejected_action_is_soft_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/droplets/42/actions"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "id": "unprocessable_entity",
                "message": "Droplet is already powered on."
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        let transition = provider.start().await.unwrap();

        assert!(!transition.success);
        assert_eq!(provider.tracker().last_start(), None);
    }

    #[tokio::test]
    async fn completed_action_status_is_soft_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/droplets/42/actions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": { "id": 902, "status": "errored" }
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        let transition = provider.stop().await.unwrap();

        assert!(!transition.success);
        assert_eq!(transition.current_state.as_deref(), Some("errored"));
        assert_eq!(provider.tracker().last_stop(), None);
    }

    #[tokio::test]
    async fn probe_active_droplet_is_running() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplet": {
                    "status": "active",
                    "networks": { "v4": [
                        { "type": "private", "ip_address": "10.0.0.5" },
                        { "type": "public", "ip_address": "203.0.113.9" }
                    ]}
                }
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        let observation = provider.probe().await.unwrap();

        assert_eq!(observation.status, Some(ServerStatus::Running));
        assert_eq!(observation.address.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn probe_refines_to_stopping_while_stop_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplet": { "status": "active" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/actions/77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "action": { "id": 77, "status": "in-progress" }
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        provider.tracker().record_stop(77);
        let observation = provider.probe().await.unwrap();

        assert_eq!(observation.status, Some(ServerStatus::Stopping));
    }

    #[tokio::test]
    async fn probe_refines_to_starting_while_start_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplet": { "status": "off" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/actions/78"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "action": { "id": 78, "status": "in-progress" }
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        provider.tracker().record_start(78);
        let observation = provider.probe().await.unwrap();

        assert_eq!(observation.status, Some(ServerStatus::Starting));
    }

    #[tokio::test]
    async fn probe_off_with_completed_action_is_stopped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplet": { "status": "off" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/actions/79"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "action": { "id": 79, "status": "completed" }
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        provider.tracker().record_start(79);
        let observation = provider.probe().await.unwrap();

        assert_eq!(observation.status, Some(ServerStatus::Stopped));
    }

    #[tokio::test]
    async fn probe_unrecognized_status_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplet": { "status": "migrating" }
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        let observation = provider.probe().await.unwrap();

        assert_eq!(observation.status, Some(ServerStatus::Unknown));
        assert_eq!(observation.address, None);
    }

    #[tokio::test]
    async fn probe_vendor_error_degrades_to_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        let observation = provider.probe().await.unwrap();

        assert_eq!(observation, Observation::absent());
    }

    #[tokio::test]
    async fn probe_tolerates_missing_networks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplet": { "status": "active" }
            })))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        let observation = provider.probe().await.unwrap();

        assert_eq!(observation.status, Some(ServerStatus::Running));
        assert_eq!(observation.address, None);
    }

    #[tokio::test]
    async fn action_status_query_failure_reads_as_not_in_progress() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplet": { "status": "active" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/actions/80"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = DropletProvider::new(config(server.uri()));
        provider.tracker().record_stop(80);
        let observation = provider.probe().await.unwrap();

        assert_eq!(observation.status, Some(ServerStatus::Running));
    }
}
