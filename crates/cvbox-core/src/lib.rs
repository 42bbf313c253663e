//! cvbox Core Library
//!
//! Domain models, configuration, and content-type helpers shared by the
//! storage adapters, the signing backend, and the command-line controller.

pub mod config;
pub mod constants;
pub mod content_type;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{ClientConfig, RemoteBucketConfig, SigningConfig};
pub use models::{CvId, CvRecord, NewCv};
pub use storage_types::{ListingPolicy, StorageBackend};
