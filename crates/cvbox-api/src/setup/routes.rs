//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on JSON request bodies
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(&state.config.allow_origin)?;

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/upload-url", post(handlers::upload_url::upload_url))
        .route("/api/download-url", get(handlers::download_url::download_url))
        .route("/api/list", get(handlers::list::list))
        .route("/api/delete", post(handlers::delete::delete))
        .with_state(state)
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// CORS for the single allowed origin, or any origin for `*`
fn setup_cors(allow_origin: &str) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if allow_origin.trim() == "*" {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origin: HeaderValue = allow_origin
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("ALLOW_ORIGIN is not a valid origin: {}", allow_origin))?;
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_rejects_unparsable_origin() {
        assert!(setup_cors("*").is_ok());
        assert!(setup_cors("https://cv.example.com").is_ok());
        assert!(setup_cors("bad\norigin").is_err());
    }
}
