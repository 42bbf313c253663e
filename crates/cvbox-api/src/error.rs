//! HTTP error response conversion
//!
//! Every handler failure is answered with `500` and the message as a plain
//! text body, which is what the signed-URL client shows to the user.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const NOT_CONFIGURED: &str = "S3 storage is not configured";

#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

impl HttpError {
    pub fn internal(message: impl Into<String>) -> Self {
        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn not_configured() -> Self {
        Self::internal(NOT_CONFIGURED)
    }
}

impl From<object_store::Error> for HttpError {
    fn from(err: object_store::Error) -> Self {
        HttpError::internal(err.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        tracing::error!(status = self.status.as_u16(), error = %self.message, "Request failed");
        (self.status, self.message).into_response()
    }
}
