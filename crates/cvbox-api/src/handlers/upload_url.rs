use crate::error::HttpError;
use crate::handlers::{bucket, json_or_default, object_path};
use crate::state::AppState;
use axum::{extract::State, Json};
use bytes::Bytes;
use chrono::Utc;
use cvbox_core::constants::{DEFAULT_UPLOAD_CONTENT_TYPE, SIGNED_URL_TTL_SECS};
use cvbox_core::models::signing::{UploadUrlRequest, UploadUrlResponse};
use cvbox_storage::keys;
use http::Method;
use object_store::signer::Signer;
use std::sync::Arc;
use std::time::Duration;

/// Issue a signed PUT URL for a new object
#[utoipa::path(
    post,
    path = "/api/upload-url",
    tag = "signing",
    request_body = UploadUrlRequest,
    responses(
        (status = 200, description = "Signed upload URL", body = UploadUrlResponse),
        (status = 500, description = "Bucket not configured or signing failed", body = String)
    )
)]
pub async fn upload_url(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UploadUrlResponse>, HttpError> {
    let bucket = bucket(&state)?;
    let request: UploadUrlRequest = json_or_default(&body)?;

    let name = request.name.unwrap_or_else(|| "file".to_string());
    let content_type = request
        .content_type
        .unwrap_or_else(|| DEFAULT_UPLOAD_CONTENT_TYPE.to_string());
    let key = keys::signing_key(&bucket.prefix, &name, Utc::now());
    let location = object_path(&key);

    let url = bucket
        .signer
        .signed_url(
            Method::PUT,
            &location,
            Duration::from_secs(SIGNED_URL_TTL_SECS),
        )
        .await?;

    tracing::info!(
        bucket = %bucket.name,
        key = %location,
        content_type = %content_type,
        "Issued signed upload URL"
    );

    Ok(Json(UploadUrlResponse {
        url: url.to_string(),
        key: location.to_string(),
    }))
}
