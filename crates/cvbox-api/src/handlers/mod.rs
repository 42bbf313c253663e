pub mod delete;
pub mod download_url;
pub mod health;
pub mod list;
pub mod upload_url;

use crate::error::HttpError;
use crate::state::{AppState, BucketState};
use object_store::path::Path;
use serde::de::DeserializeOwned;

/// The bucket, or the "not configured" error.
pub(crate) fn bucket(state: &AppState) -> Result<&BucketState, HttpError> {
    state.bucket.as_ref().ok_or_else(HttpError::not_configured)
}

/// Decode an optional JSON body. An empty body yields the defaults.
pub(crate) fn json_or_default<T>(body: &[u8]) -> Result<T, HttpError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| HttpError::internal(format!("Invalid JSON body: {}", e)))
}

/// Object path for a key.
///
/// Valid keys are kept verbatim, non-ASCII included; anything else is
/// encoded segment by segment.
pub(crate) fn object_path(key: &str) -> Path {
    Path::parse(key).unwrap_or_else(|_| Path::from(key))
}
