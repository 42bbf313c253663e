use super::{LogFormat, LogTarget, TelemetryConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing for one process.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter.as_str()));

    let layer = match (config.format, config.target) {
        (LogFormat::Pretty, LogTarget::Stdout) => fmt::layer().boxed(),
        (LogFormat::Pretty, LogTarget::Stderr) => fmt::layer().with_writer(std::io::stderr).boxed(),
        (LogFormat::Json, LogTarget::Stdout) => fmt::layer().json().boxed(),
        (LogFormat::Json, LogTarget::Stderr) => {
            fmt::layer().json().with_writer(std::io::stderr).boxed()
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    tracing::debug!(
        service = %config.service_name,
        format = ?config.format,
        "Tracing initialized"
    );
    Ok(())
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
