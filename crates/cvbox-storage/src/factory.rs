#[cfg(feature = "storage-local")]
use crate::LocalStore;
#[cfg(feature = "storage-signed")]
use crate::SignedUrlStore;
#[cfg(feature = "storage-s3")]
use crate::{DirectS3Options, DirectS3Store};
use crate::{CvResult, CvStore, StorageBackend};
use cvbox_core::ClientConfig;
use std::sync::Arc;

/// Create the storage adapter selected by configuration
///
/// Called once at startup; the adapter is never switched afterwards.
pub async fn create_store(config: &ClientConfig) -> CvResult<Arc<dyn CvStore>> {
    tracing::info!(backend = %config.storage_backend, "Initializing storage backend");

    match config.storage_backend {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let store = LocalStore::open(&config.local_db_path).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(crate::CvError::Config(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let options = DirectS3Options {
                listing_policy: config.listing_policy,
                dedupe_listing: config.dedupe_listing,
                allow_delete: config.allow_delete,
            };
            let store = DirectS3Store::new(config.remote.clone(), options)?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(crate::CvError::Config(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-signed")]
        StorageBackend::Signed => {
            let store = SignedUrlStore::new(config.api_url.clone())?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-signed"))]
        StorageBackend::Signed => Err(crate::CvError::Config(
            "Signed URL storage backend not available (storage-signed feature not enabled)"
                .to_string(),
        )),
    }
}

#[cfg(all(test, feature = "full"))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ClientConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_vars(|key| map.get(key).cloned()).unwrap()
    }

    #[tokio::test]
    async fn test_selects_configured_backend() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cvbox.db");
        let db = db.to_str().unwrap();

        let local = create_store(&config(&[("CV_LOCAL_DB_PATH", db)])).await.unwrap();
        assert_eq!(local.backend_type(), StorageBackend::Local);

        let s3 = create_store(&config(&[("CV_STORAGE", "s3")])).await.unwrap();
        assert_eq!(s3.backend_type(), StorageBackend::S3);

        let signed = create_store(&config(&[("CV_STORAGE", "signed")])).await.unwrap();
        assert_eq!(signed.backend_type(), StorageBackend::Signed);
    }

    #[tokio::test]
    async fn test_unknown_backend_falls_back_to_local() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cvbox.db");

        let store = create_store(&config(&[
            ("CV_STORAGE", "ftp"),
            ("CV_LOCAL_DB_PATH", db.to_str().unwrap()),
        ]))
        .await
        .unwrap();
        assert_eq!(store.backend_type(), StorageBackend::Local);
    }
}
