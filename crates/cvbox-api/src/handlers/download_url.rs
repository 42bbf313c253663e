use crate::error::HttpError;
use crate::handlers::{bucket, object_path};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use cvbox_core::constants::SIGNED_URL_TTL_SECS;
use cvbox_core::models::signing::{DownloadUrlQuery, DownloadUrlResponse};
use http::Method;
use object_store::signer::Signer;
use std::sync::Arc;
use std::time::Duration;

/// Issue a signed GET URL for an existing object
#[utoipa::path(
    get,
    path = "/api/download-url",
    tag = "signing",
    params(DownloadUrlQuery),
    responses(
        (status = 200, description = "Signed download URL", body = DownloadUrlResponse),
        (status = 500, description = "Missing key, bucket not configured or signing failed", body = String)
    )
)]
pub async fn download_url(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadUrlQuery>,
) -> Result<Json<DownloadUrlResponse>, HttpError> {
    let bucket = bucket(&state)?;
    let key = query
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| HttpError::internal("key is required"))?;
    let location = object_path(&key);

    let url = bucket
        .signer
        .signed_url(
            Method::GET,
            &location,
            Duration::from_secs(SIGNED_URL_TTL_SECS),
        )
        .await?;

    tracing::info!(bucket = %bucket.name, key = %location, "Issued signed download URL");

    Ok(Json(DownloadUrlResponse {
        url: url.to_string(),
    }))
}
