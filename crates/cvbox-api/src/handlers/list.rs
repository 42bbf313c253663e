use crate::error::HttpError;
use crate::handlers::bucket;
use crate::state::AppState;
use axum::{extract::State, Json};
use cvbox_core::constants::MAX_LIST_KEYS;
use cvbox_core::models::signing::{ListItem, ListResponse};
use futures::TryStreamExt;
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;

/// List objects under the configured prefix
#[utoipa::path(
    get,
    path = "/api/list",
    tag = "signing",
    responses(
        (status = 200, description = "Objects under the prefix", body = ListResponse),
        (status = 500, description = "Bucket not configured or listing failed", body = String)
    )
)]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<ListResponse>, HttpError> {
    let bucket = bucket(&state)?;
    let start = std::time::Instant::now();

    let prefix = bucket.prefix.trim_end_matches('/');
    let prefix_path = (!prefix.is_empty()).then(|| Path::from(prefix));

    let objects: Vec<_> = bucket
        .store
        .list(prefix_path.as_ref())
        .try_collect()
        .await?;

    let items: Vec<ListItem> = objects
        .into_iter()
        .map(|meta| (meta.location.to_string(), meta))
        .filter(|(key, _)| !key.is_empty() && !key.ends_with('/'))
        .take(MAX_LIST_KEYS as usize)
        .map(|(key, meta)| ListItem {
            name: key
                .strip_prefix(bucket.prefix.as_str())
                .unwrap_or(&key)
                .to_string(),
            key,
            size: meta.size,
            last_modified: meta.last_modified,
        })
        .collect();

    tracing::info!(
        bucket = %bucket.name,
        prefix = %bucket.prefix,
        count = items.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Listed objects"
    );

    Ok(Json(ListResponse { items }))
}
