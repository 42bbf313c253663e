//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use cvbox_core::models::signing;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "cvbox signing API",
        version = "0.1.0",
        description = "Issues short-lived signed URLs for uploading, downloading, listing and deleting CVs in one S3 bucket. Signed URLs are valid for 300 seconds and scoped to a single object and method."
    ),
    paths(
        handlers::upload_url::upload_url,
        handlers::download_url::download_url,
        handlers::list::list,
        handlers::delete::delete,
        handlers::health::health,
    ),
    components(schemas(
        signing::UploadUrlRequest,
        signing::UploadUrlResponse,
        signing::DownloadUrlResponse,
        signing::ListItem,
        signing::ListResponse,
        signing::DeleteRequest,
        signing::DeleteResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "signing", description = "Signed URL issuance and bucket operations"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_documents_every_route() {
        let spec = get_openapi_spec();
        for path in [
            "/api/upload-url",
            "/api/download-url",
            "/api/list",
            "/api/delete",
            "/health",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
