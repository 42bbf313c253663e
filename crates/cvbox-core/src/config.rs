//! Configuration module
//!
//! Configuration for the storage client (the `cvbox` controller) and for the
//! signing backend. Both are read once from the environment at startup; a
//! `.env` file in the working directory is honoured.

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_SIGNING_PREFIX;
use crate::storage_types::{ListingPolicy, StorageBackend};

const LOCAL_DB_PATH: &str = "cvbox.db";
const S3_BUCKET: &str = "cv-upload-bucket1";
const S3_REGION: &str = "eu-north-1";
const API_URL: &str = "http://localhost:8787";
const SIGNING_PORT: u16 = 8787;

/// Location of a bucket reached over plain HTTP(S).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteBucketConfig {
    pub bucket: String,
    pub region: String,
    /// Key prefix that listings are restricted to; empty for the whole bucket
    pub prefix: String,
    /// Custom endpoint for S3-compatible providers, addressed path-style
    pub endpoint: Option<String>,
}

impl RemoteBucketConfig {
    /// Base address of the bucket: virtual-hosted on AWS, path-style on a
    /// custom endpoint.
    pub fn base_url(&self) -> String {
        match self.endpoint {
            Some(ref endpoint) => {
                format!("{}/{}", endpoint.trim_end_matches('/'), self.bucket)
            }
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }
}

/// Client-side configuration: which adapter to use and how to reach it.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub storage_backend: StorageBackend,
    pub local_db_path: PathBuf,
    pub remote: RemoteBucketConfig,
    pub listing_policy: ListingPolicy,
    pub dedupe_listing: bool,
    /// Whether the bucket grants anonymous DELETE
    pub allow_delete: bool,
    /// Base URL of the signing backend
    pub api_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = StorageBackend::from_config(var("CV_STORAGE").as_deref());

        let listing_policy = match var("CV_S3_LISTING") {
            Some(raw) => raw.parse()?,
            None => ListingPolicy::default(),
        };

        let remote = RemoteBucketConfig {
            bucket: var("CV_S3_BUCKET").unwrap_or_else(|| S3_BUCKET.to_string()),
            region: var("CV_S3_REGION").unwrap_or_else(|| S3_REGION.to_string()),
            prefix: var("CV_S3_PREFIX").unwrap_or_default(),
            endpoint: var("CV_S3_ENDPOINT").filter(|s| !s.trim().is_empty()),
        };

        Ok(ClientConfig {
            storage_backend,
            local_db_path: var("CV_LOCAL_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(LOCAL_DB_PATH)),
            remote,
            listing_policy,
            dedupe_listing: var("CV_S3_DEDUPE")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            allow_delete: var("CV_S3_ALLOW_DELETE")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            api_url: var("CV_API_URL")
                .unwrap_or_else(|| API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

/// Signing backend configuration.
#[derive(Clone, Debug)]
pub struct SigningConfig {
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub prefix: String,
    pub endpoint: Option<String>,
    /// Allowed cross-origin caller; `*` allows any origin
    pub allow_origin: String,
    pub port: u16,
}

impl SigningConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(SigningConfig {
            region: var("AWS_REGION").or_else(|| var("S3_REGION")),
            bucket: var("S3_BUCKET"),
            prefix: var("S3_PREFIX").unwrap_or_else(|| DEFAULT_SIGNING_PREFIX.to_string()),
            endpoint: var("S3_ENDPOINT").filter(|s| !s.trim().is_empty()),
            allow_origin: var("ALLOW_ORIGIN").unwrap_or_else(|| "*".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| SIGNING_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
        })
    }

    /// Whether both bucket and region are present.
    pub fn is_bucket_configured(&self) -> bool {
        self.bucket.is_some() && self.region.is_some()
    }

    /// Log a warning for missing bucket settings. Never fails startup.
    pub fn warn_if_incomplete(&self) {
        if !self.is_bucket_configured() {
            tracing::warn!(
                bucket = ?self.bucket,
                region = ?self.region,
                "Missing S3 config; set AWS_REGION and S3_BUCKET"
            );
        }
    }
}
