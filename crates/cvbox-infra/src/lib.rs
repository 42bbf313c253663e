//! cvbox Infrastructure Library
//!
//! Shared infrastructure used by the `cvbox` client and the signing backend:
//! - Telemetry initialization (tracing subscriber setup)

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry, LogFormat, LogTarget, TelemetryConfig};
