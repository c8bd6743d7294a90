//! Server error type and its HTTP mapping.
//!
//! The taxonomy is flat and boundary-local: validation and CAPTCHA
//! rejection are 400s, signature/password failures 401, unknown pages 404,
//! everything downstream or misconfigured a generic 500. Nothing is retried
//! and no error state outlives the request.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of every error response.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// Request handling error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Missing or empty required fields.
    #[error("{0}")]
    Validation(String),

    /// Anti-automation check rejected the token.
    #[error("Verification failed. Please try again.")]
    CaptchaRejected,

    /// Signature or password mismatch.
    #[error("{0}")]
    Unauthorized(String),

    /// Unknown page path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// A required configuration value is missing. The detail string is for
    /// logs; clients get a generic message.
    #[error("Server configuration error")]
    Misconfigured(&'static str),

    /// Downstream sink or service failure, already logged at the call site.
    #[error("{0}")]
    Downstream(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::CaptchaRejected => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::PageNotFound(_) => StatusCode::NOT_FOUND,
            Self::Misconfigured(_) | Self::Downstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let Self::Misconfigured(detail) = &self {
            tracing::error!(missing = %detail, "request hit missing configuration");
        }
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
