//! Telemetry initialization
//!
//! Installs a `tracing` subscriber with an `EnvFilter` (from `RUST_LOG`, or a
//! per-binary default) and a human-readable or JSON formatter. The signing
//! backend logs to stdout; the CLI logs to stderr so command output stays
//! machine-readable.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry};

use std::env;
use std::str::FromStr;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Invalid LOG_FORMAT: {}", other)),
        }
    }
}

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
    pub format: LogFormat,
    pub target: LogTarget,
}

impl TelemetryConfig {
    pub fn new(service_name: impl Into<String>, default_filter: impl Into<String>) -> Self {
        TelemetryConfig {
            service_name: service_name.into(),
            default_filter: default_filter.into(),
            format: LogFormat::default(),
            target: LogTarget::default(),
        }
    }

    /// Apply `LOG_FORMAT` from the environment. Unknown values keep the
    /// pretty format.
    pub fn with_env_format(mut self) -> Self {
        if let Ok(raw) = env::var("LOG_FORMAT") {
            self.format = raw.parse().unwrap_or_default();
        }
        self
    }

    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }
}
