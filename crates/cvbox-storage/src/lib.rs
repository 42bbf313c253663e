//! cvbox Storage Library
//!
//! This crate provides the `CvStore` abstraction and its three adapters:
//!
//! - [`LocalStore`]: SQLite database in the local data directory
//! - [`DirectS3Store`]: unsigned requests straight against a public bucket
//! - [`SignedUrlStore`]: short-lived URLs obtained from the signing backend
//!
//! Exactly one adapter is selected at startup by [`create_store`]; callers
//! hold it as `Arc<dyn CvStore>` and never switch at runtime.
//!
//! # Key format
//!
//! Remote keys embed a timestamp ahead of the file name so that concurrent
//! uploads of the same name do not collide. Key and URL construction lives in
//! the `keys` module so every adapter derives them the same way.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-s3")]
pub mod listing;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
#[cfg(feature = "storage-signed")]
pub mod signed;
pub mod traits;

// Re-export commonly used types
pub use cvbox_core::StorageBackend;
pub use factory::create_store;
#[cfg(feature = "storage-local")]
pub use local::LocalStore;
#[cfg(feature = "storage-s3")]
pub use s3::{DirectS3Options, DirectS3Store};
#[cfg(feature = "storage-signed")]
pub use signed::SignedUrlStore;
pub use traits::{CvError, CvResult, CvStore, DeleteError};

#[cfg(any(feature = "storage-s3", feature = "storage-signed"))]
pub(crate) fn http_client() -> CvResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .map_err(|e| CvError::Config(format!("Failed to build HTTP client: {}", e)))
}
