//! Shared constants

/// Generic content-type marker for objects whose type cannot be inferred.
pub const GENERIC_CONTENT_TYPE: &str = "file";

/// Content type used when an upload does not declare one.
pub const DEFAULT_UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Extensions kept by the `documents` listing profile (lowercase, with dot).
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".txt", ".rtf", ".png", ".jpg", ".jpeg",
];

/// Upper bound on keys returned by one direct bucket listing call.
pub const MAX_LIST_KEYS: u32 = 1000;

/// Validity window for every signed URL, in seconds.
pub const SIGNED_URL_TTL_SECS: u64 = 5 * 60;

/// Key prefix for direct uploads when no listing prefix is configured.
pub const DIRECT_UPLOAD_PREFIX: &str = "uploads/";

/// Default key prefix used by the signing backend.
pub const DEFAULT_SIGNING_PREFIX: &str = "cv-uploads/";

/// Current schema version of the local database.
pub const LOCAL_SCHEMA_VERSION: i64 = 1;
