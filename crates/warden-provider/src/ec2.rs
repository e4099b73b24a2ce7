//! EC2-style backend.
//!
//! This vendor exposes fine-grained transitional states natively
//! (`pending`, `stopping`), so no separate action tracking is needed:
//! the raw state name maps directly onto the normalized enumeration.
//!
//! Request signing internals are out of scope; credentials are attached
//! as opaque values and the endpoint can be overridden for tests or
//! API-compatible deployments.

use serde::Deserialize;

use async_trait::async_trait;
use warden_core::lifecycle;

use crate::error::{ProviderError, Result};
use crate::handle::{SessionHandle, DEFAULT_TTL};
use crate::provider::InstanceProvider;
use crate::types::{Observation, Transition};

const API_VERSION: &str = "2016-11-15";

/// Configuration for the EC2-style backend.
///
/// Read-only after startup; values are opaque to warden.
#[derive(Debug, Clone)]
pub struct Ec2Config {
    /// Vendor access key identifier.
    pub access_key_id: String,
    /// Vendor secret access key.
    pub secret_access_key: String,
    /// Region hosting the instance.
    pub region: String,
    /// Identifier of the managed instance.
    pub instance_id: String,
    /// Endpoint override; defaults to the regional vendor endpoint.
    pub endpoint: Option<String>,
}

impl Ec2Config {
    fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://ec2.{}.amazonaws.com", self.region))
    }
}

#[derive(Debug, Deserialize)]
struct InstanceState {
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct StateChange {
    #[serde(rename = "PreviousState")]
    previous_state: InstanceState,
    #[serde(rename = "CurrentState")]
    current_state: InstanceState,
}

#[derive(Debug, Deserialize)]
struct StartInstancesResponse {
    #[serde(rename = "StartingInstances")]
    instances: Vec<StateChange>,
}

#[derive(Debug, Deserialize)]
struct StopInstancesResponse {
    #[serde(rename = "StoppingInstances")]
    instances: Vec<StateChange>,
}

#[derive(Debug, Deserialize)]
struct DescribeInstancesResponse {
    #[serde(rename = "Reservations")]
    reservations: Vec<Reservation>,
}

#[derive(Debug, Deserialize)]
struct Reservation {
    #[serde(rename = "Instances")]
    instances: Vec<InstanceDescription>,
}

#[derive(Debug, Deserialize)]
struct InstanceDescription {
    #[serde(rename = "State")]
    state: InstanceState,
    #[serde(rename = "PublicIpAddress")]
    public_ip_address: Option<String>,
}

/// Provider client for the EC2-style vendor.
///
/// The underlying HTTP client is a lazily-created session handle with a
/// one-hour TTL; an expired handle is replaced before the next call.
pub struct Ec2Provider {
    config: Ec2Config,
    handle: SessionHandle,
}

impl Ec2Provider {
    /// Create a provider with the default session TTL.
    #[must_use]
    pub const fn new(config: Ec2Config) -> Self {
        Self {
            config,
            handle: SessionHandle::new(DEFAULT_TTL),
        }
    }

    /// Create a provider with a custom session TTL.
    #[must_use]
    pub const fn with_ttl(config: Ec2Config, ttl: std::time::Duration) -> Self {
        Self {
            config,
            handle: SessionHandle::new(ttl),
        }
    }

    fn client(&self) -> reqwest::Client {
        self.handle.get(|| {
            reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client")
        })
    }

    async fn action(&self, action: &str) -> Result<reqwest::Response> {
        let response = self
            .client()
            .post(self.config.endpoint())
            .basic_auth(&self.config.access_key_id, Some(&self.config.secret_access_key))
            .form(&[
                ("Action", action),
                ("InstanceId.1", self.config.instance_id.as_str()),
                ("Version", API_VERSION),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn first_state_change(changes: Vec<StateChange>) -> Result<StateChange> {
    changes
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("no instance state change in response".into()))
}

#[async_trait]
impl InstanceProvider for Ec2Provider {
    async fn start(&self) -> Result<Transition> {
        let response = self.action("StartInstances").await?;
        let parsed: StartInstancesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let change = first_state_change(parsed.instances)?;

        // The expected shape is stopped -> pending; anything else is a
        // soft failure, not an error.
        let success =
            change.previous_state.name == "stopped" && change.current_state.name == "pending";

        tracing::info!(
            success,
            previous = %change.previous_state.name,
            current = %change.current_state.name,
            "Requested instance start"
        );

        Ok(Transition {
            success,
            previous_state: Some(change.previous_state.name),
            current_state: Some(change.current_state.name),
        })
    }

    async fn stop(&self) -> Result<Transition> {
        let response = self.action("StopInstances").await?;
        let parsed: StopInstancesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let change = first_state_change(parsed.instances)?;

        let success =
            change.previous_state.name == "running" && change.current_state.name == "stopping";

        tracing::info!(
            success,
            previous = %change.previous_state.name,
            current = %change.current_state.name,
            "Requested instance stop"
        );

        Ok(Transition {
            success,
            previous_state: Some(change.previous_state.name),
            current_state: Some(change.current_state.name),
        })
    }

    async fn probe(&self) -> Result<Observation> {
        let response = self.action("DescribeInstances").await?;
        let parsed: DescribeInstancesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let Some(instance) = parsed
            .reservations
            .into_iter()
            .next()
            .and_then(|r| r.instances.into_iter().next())
        else {
            return Ok(Observation::absent());
        };

        let raw = instance.state.name;
        let address = if raw == "running" {
            instance.public_ip_address
        } else {
            None
        };

        Ok(Observation {
            status: Some(lifecycle::from_native(&raw)),
            address,
        })
    }
}
