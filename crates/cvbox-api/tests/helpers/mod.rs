//! Test helpers: build AppState and router for integration tests.
//!
//! The bucket is an in-memory object store; presigning uses an offline
//! `AmazonS3` client with static test credentials, so no network is needed.

use axum_test::TestServer;
use cvbox_api::setup::routes;
use cvbox_api::{AppState, BucketState};
use cvbox_core::SigningConfig;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStoreExt, PutPayload};
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_PREFIX: &str = "cv-uploads/";
pub const TEST_BUCKET: &str = "cv-test-bucket";
pub const TEST_REGION: &str = "eu-north-1";

/// Test application: server plus the bucket double behind it.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemory>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Put an object directly into the bucket.
    pub async fn put_object(&self, key: &str, body: &'static [u8]) {
        self.store
            .put(&object_path(key), PutPayload::from_static(body))
            .await
            .expect("Failed to seed object");
    }

    pub async fn object_exists(&self, key: &str) -> bool {
        self.store.head(&object_path(key)).await.is_ok()
    }
}

/// Object path the way the server stores it: raw UTF-8, not re-encoded.
fn object_path(key: &str) -> Path {
    Path::parse(key).expect("Invalid test key")
}

fn signing_config(pairs: &[(&str, &str)]) -> SigningConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SigningConfig::from_vars(|key| map.get(key).cloned()).expect("Invalid test config")
}

fn server_for(state: AppState) -> TestServer {
    let app = routes::setup_routes(Arc::new(state)).expect("Failed to build routes");
    TestServer::new(app).expect("Failed to create test server")
}

/// Setup test app with a configured bucket.
pub fn setup_test_app() -> TestApp {
    let config = signing_config(&[
        ("AWS_REGION", TEST_REGION),
        ("S3_BUCKET", TEST_BUCKET),
        ("S3_PREFIX", TEST_PREFIX),
    ]);

    let signer = AmazonS3Builder::new()
        .with_region(TEST_REGION)
        .with_bucket_name(TEST_BUCKET)
        .with_access_key_id("AKIDEXAMPLE")
        .with_secret_access_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
        .build()
        .expect("Failed to build test signer");

    let store = Arc::new(InMemory::new());
    let bucket = BucketState {
        name: TEST_BUCKET.to_string(),
        prefix: TEST_PREFIX.to_string(),
        store: store.clone(),
        signer: Arc::new(signer),
    };

    TestApp {
        server: server_for(AppState::new(config, Some(bucket))),
        store,
    }
}

/// Setup test app without bucket settings.
pub fn setup_unconfigured_app() -> TestServer {
    server_for(AppState::new(signing_config(&[]), None))
}
