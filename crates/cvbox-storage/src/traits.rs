//! Storage abstraction trait
//!
//! This module defines the `CvStore` trait that every adapter implements and
//! the error taxonomy surfaced by its operations.

use crate::StorageBackend;
use async_trait::async_trait;
use cvbox_core::{CvId, CvRecord, NewCv};
use thiserror::Error;

/// Why a delete did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    /// The deployment does not grant anonymous delete on the bucket
    #[error("deleting is disabled for this bucket")]
    Disabled,

    /// The request never reached the server (network or cross-origin rejection)
    #[error("request did not reach the server: {0}")]
    Unreachable(String),

    /// The server answered with a non-success status
    #[error("server refused the delete ({status}): {message}")]
    Refused { status: u16, message: String },
}

/// Storage operation errors
#[derive(Debug, Error)]
pub enum CvError {
    #[error("Presign failed: {0}")]
    Presign(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Delete failed: {0}")]
    Delete(#[from] DeleteError),

    #[error("List failed: {0}")]
    List(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CvError {
    /// Human-readable message for the user, with a remedy where one is known.
    pub fn user_message(&self) -> String {
        match self {
            CvError::Delete(DeleteError::Disabled) => {
                "Delete is disabled: the bucket does not allow anonymous deletes.".to_string()
            }
            CvError::Delete(DeleteError::Unreachable(_)) => {
                "Delete request was blocked before reaching storage. Check the network \
                 connection and the bucket's CORS configuration for DELETE."
                    .to_string()
            }
            CvError::Delete(DeleteError::Refused { status, .. }) => format!(
                "Storage refused the delete ({}). The bucket policy must grant delete permission.",
                status
            ),
            CvError::Presign(msg) => format!("Could not obtain a signed URL: {}", msg),
            CvError::Upload(msg) => format!("Upload failed: {}", msg),
            CvError::Download(msg) => format!("Download failed: {}", msg),
            CvError::List(msg) => format!("Failed to load CVs: {}", msg),
            CvError::Storage(msg) => format!("Local storage error: {}", msg),
            CvError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }
}

#[cfg(feature = "storage-local")]
impl From<sqlx::Error> for CvError {
    fn from(err: sqlx::Error) -> Self {
        CvError::Storage(err.to_string())
    }
}

/// Result type for storage operations
pub type CvResult<T> = Result<T, CvError>;

/// Storage abstraction trait
///
/// The four operations every adapter supports. Callers receive one
/// implementation from [`crate::create_store`] and must treat "not found"
/// (`Ok(None)` from `get_cv`) separately from failure.
#[async_trait]
pub trait CvStore: Send + Sync {
    /// Store a new file and return its assigned id.
    ///
    /// Creation is all-or-nothing: on error no record exists.
    async fn add_cv(&self, file: NewCv) -> CvResult<CvId>;

    /// List stored records.
    ///
    /// Local records come newest first; remote records come in the object
    /// store's native order.
    async fn list_cvs(&self) -> CvResult<Vec<CvRecord>>;

    /// Fetch one record including its content.
    async fn get_cv(&self, id: &CvId) -> CvResult<Option<CvRecord>>;

    /// Hard-delete a record.
    async fn delete_cv(&self, id: &CvId) -> CvResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
