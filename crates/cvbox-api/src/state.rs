//! Application state shared by the signing handlers.

use cvbox_core::SigningConfig;
use object_store::signer::Signer;
use object_store::ObjectStore;
use std::sync::Arc;

/// The configured bucket.
///
/// `store` performs list and delete; `signer` issues presigned URLs. In
/// production both are the same `AmazonS3` client.
#[derive(Clone)]
pub struct BucketState {
    pub name: String,
    pub prefix: String,
    pub store: Arc<dyn ObjectStore>,
    pub signer: Arc<dyn Signer>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: SigningConfig,
    /// `None` when bucket or region is missing; bucket endpoints then fail
    pub bucket: Option<BucketState>,
}

impl AppState {
    pub fn new(config: SigningConfig, bucket: Option<BucketState>) -> Self {
        AppState { config, bucket }
    }
}
