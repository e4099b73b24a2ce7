//! Warden gateway - HTTP control surface for a cloud-hosted game server.
//!
//! Reads configuration from the environment, selects one of the two
//! vendor backends, and serves the operator API.
//!
//! # Environment
//!
//! - `WARDEN_LISTEN_ADDR` - listen address (default `0.0.0.0:8080`)
//! - `WARDEN_PROVIDER` - `ec2` or `droplet` (default `ec2`)
//! - `WARDEN_PASSWORD_HASH` - bcrypt hash of the operator password
//! - `WARDEN_SESSION_SECRET` - secret signing session tokens
//! - `WARDEN_ADDRESS_FILE` - path for the persisted instance address
//! - `EC2_ACCESS_KEY_ID`, `EC2_SECRET_ACCESS_KEY`, `EC2_REGION`,
//!   `EC2_INSTANCE_ID`, `EC2_ENDPOINT` (optional override)
//! - `DO_API_TOKEN`, `DO_DROPLET_ID`, `DO_BASE_URL` (optional override)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warden_control::{ControlConfig, ControlService, HttpHostClient};
use warden_gateway::{create_router, CooldownGuard, GatewayConfig, GatewayState, Sessions};
use warden_provider::{
    DropletConfig, DropletProvider, Ec2Config, Ec2Provider, InstanceProvider,
};

fn required_env(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("{name} must be set"))
}

fn build_provider(kind: &str) -> Result<Arc<dyn InstanceProvider>, Box<dyn std::error::Error>> {
    match kind {
        "ec2" => Ok(Arc::new(Ec2Provider::new(Ec2Config {
            access_key_id: required_env("EC2_ACCESS_KEY_ID")?,
            secret_access_key: required_env("EC2_SECRET_ACCESS_KEY")?,
            region: required_env("EC2_REGION")?,
            instance_id: required_env("EC2_INSTANCE_ID")?,
            endpoint: std::env::var("EC2_ENDPOINT").ok(),
        }))),
        "droplet" => Ok(Arc::new(DropletProvider::new(DropletConfig {
            api_token: required_env("DO_API_TOKEN")?,
            droplet_id: required_env("DO_DROPLET_ID")?.parse()?,
            base_url: std::env::var("DO_BASE_URL").ok(),
        }))),
        other => Err(format!("unsupported provider: {other}").into()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,warden=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Warden gateway");

    // Load configuration from environment
    let gateway_config = GatewayConfig::default();
    let listen_addr = std::env::var("WARDEN_LISTEN_ADDR")
        .unwrap_or_else(|_| gateway_config.listen_addr.clone());
    let provider_kind = std::env::var("WARDEN_PROVIDER").unwrap_or_else(|_| "ec2".into());
    let password_hash = required_env("WARDEN_PASSWORD_HASH")?;
    let session_secret = required_env("WARDEN_SESSION_SECRET")?;
    let address_file = std::env::var("WARDEN_ADDRESS_FILE").unwrap_or_else(|_| "serverip".into());

    tracing::info!(
        listen_addr = %listen_addr,
        provider = %provider_kind,
        address_file = %address_file,
        "Gateway configuration loaded"
    );

    // Select and construct the vendor backend
    let provider = build_provider(&provider_kind)?;

    // Build the control service over the provider and host API
    let host = Arc::new(HttpHostClient::new());
    let control = Arc::new(ControlService::new(
        provider,
        host,
        ControlConfig {
            address_file: address_file.into(),
        },
    ));

    let sessions = Sessions::new(
        &session_secret,
        password_hash,
        gateway_config.session_cookie_name.clone(),
        gateway_config.session_ttl_seconds,
    );
    let cooldown = CooldownGuard::new(gateway_config.cooldown());

    let state = GatewayState::new(control, sessions, cooldown, gateway_config);
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server; connect info feeds the callback-stop guard
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
