//! cvbox signing API
//!
//! A thin HTTP service that holds the bucket credentials and hands out
//! presigned URLs, so browsers and the `cvbox` client never see AWS keys.

mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;

pub use error::HttpError;
pub use state::{AppState, BucketState};
