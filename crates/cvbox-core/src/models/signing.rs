//! Request and response bodies of the signing backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request for a signed upload address
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UploadUrlRequest {
    /// Original file name; `file` when omitted
    #[serde(default)]
    pub name: Option<String>,
    /// MIME type; `application/octet-stream` when omitted
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
}

/// Signed PUT address and the key it writes to
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadUrlResponse {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadUrlQuery {
    /// Object key to sign a GET for
    pub key: Option<String>,
}

/// Signed GET address
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DownloadUrlResponse {
    pub url: String,
}

/// One object under the configured prefix
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub key: String,
    /// Key with the configured prefix removed
    pub name: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListResponse {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DeleteRequest {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub ok: bool,
}
