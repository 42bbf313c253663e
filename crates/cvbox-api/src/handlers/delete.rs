use crate::error::HttpError;
use crate::handlers::{bucket, json_or_default, object_path};
use crate::state::AppState;
use axum::{extract::State, Json};
use bytes::Bytes;
use cvbox_core::models::signing::{DeleteRequest, DeleteResponse};
use object_store::ObjectStoreExt;
use std::sync::Arc;

/// Delete an object; deleting a missing key succeeds
#[utoipa::path(
    post,
    path = "/api/delete",
    tag = "signing",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Object deleted", body = DeleteResponse),
        (status = 500, description = "Missing key, bucket not configured or delete failed", body = String)
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DeleteResponse>, HttpError> {
    let bucket = bucket(&state)?;
    let request: DeleteRequest = json_or_default(&body)?;
    let key = request
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| HttpError::internal("key is required"))?;
    let location = object_path(&key);

    match bucket.store.delete(&location).await {
        Ok(()) | Err(object_store::Error::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    tracing::info!(bucket = %bucket.name, key = %location, "Deleted object");

    Ok(Json(DeleteResponse { ok: true }))
}
