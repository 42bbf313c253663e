//! Data models
//!
//! `cv` holds the storage-facing record types; `signing` holds the JSON
//! bodies exchanged with the signing backend.

mod cv;
pub mod signing;

pub use cv::{CvId, CvRecord, NewCv};
