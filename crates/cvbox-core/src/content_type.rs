//! Content-type inference from file names.
//!
//! Remote listings never see the uploaded `Content-Type`, so their type is an
//! approximation derived from the extension. Nothing here sniffs content.

use crate::constants::{DEFAULT_UPLOAD_CONTENT_TYPE, GENERIC_CONTENT_TYPE};

/// Content type for a file about to be uploaded.
pub fn for_upload(name: &str) -> String {
    mime_guess::from_path(name)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_UPLOAD_CONTENT_TYPE.to_string())
}

/// Approximate content type for a listed object, or the generic marker.
pub fn for_listing(name: &str) -> String {
    mime_guess::from_path(name)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| GENERIC_CONTENT_TYPE.to_string())
}
