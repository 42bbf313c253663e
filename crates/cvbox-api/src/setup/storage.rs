//! Storage setup and initialization

use crate::state::BucketState;
use anyhow::{Context, Result};
use cvbox_core::SigningConfig;
use object_store::aws::AmazonS3Builder;
use std::sync::Arc;

/// Build the bucket client, or `None` when bucket or region is missing.
///
/// Credentials come from the standard AWS environment variables.
pub fn setup_bucket(config: &SigningConfig) -> Result<Option<BucketState>> {
    let (Some(bucket), Some(region)) = (config.bucket.clone(), config.region.clone()) else {
        return Ok(None);
    };

    let mut builder = AmazonS3Builder::from_env()
        .with_region(region.clone())
        .with_bucket_name(bucket.clone());

    if let Some(ref endpoint) = config.endpoint {
        let allow_http = endpoint.starts_with("http://");
        builder = builder
            .with_endpoint(endpoint.clone())
            .with_allow_http(allow_http);
    }

    let s3 = Arc::new(builder.build().context("Failed to build S3 client")?);

    tracing::info!(
        bucket = %bucket,
        region = %region,
        prefix = %config.prefix,
        endpoint = ?config.endpoint,
        "S3 signing client initialized"
    );

    Ok(Some(BucketState {
        name: bucket,
        prefix: config.prefix.clone(),
        store: s3.clone(),
        signer: s3,
    }))
}
