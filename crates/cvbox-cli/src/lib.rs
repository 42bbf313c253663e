//! cvbox client: the controller behind the `cvbox` command.

pub mod controller;
pub mod format;
pub mod shell;

pub use controller::{Controller, EMPTY_MESSAGE, SAMPLE_CVS};
pub use format::{format_bytes, format_row};

use cvbox_infra::{init_telemetry, LogTarget, TelemetryConfig};

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays clean.
pub fn init_tracing() {
    let config = TelemetryConfig::new("cvbox", "cvbox=warn")
        .with_env_format()
        .with_target(LogTarget::Stderr);
    if let Err(e) = init_telemetry(&config) {
        eprintln!("Failed to initialize tracing: {}", e);
    }
}
