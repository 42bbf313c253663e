use cvbox_core::SigningConfig;
use cvbox_infra::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = SigningConfig::from_env()?;

    let telemetry = TelemetryConfig::new("cvbox-api", "cvbox=info,tower_http=info").with_env_format();
    init_telemetry(&telemetry).map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    let (_state, router) = cvbox_api::setup::initialize_app(config.clone())?;

    cvbox_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
