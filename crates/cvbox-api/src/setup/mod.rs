//! Application setup and initialization
//!
//! - `storage`: bucket client and signer from configuration
//! - `routes`: router, CORS and body limit
//! - `server`: serving with graceful shutdown

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use cvbox_core::SigningConfig;
use std::sync::Arc;

/// Build state and router from configuration.
pub fn initialize_app(config: SigningConfig) -> Result<(Arc<AppState>, Router)> {
    config.warn_if_incomplete();

    let bucket = storage::setup_bucket(&config)?;
    let state = Arc::new(AppState::new(config, bucket));
    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
