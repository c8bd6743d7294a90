//! Error types for form intake.

/// Error from intake operations (CAPTCHA verification, sink delivery).
///
/// The taxonomy stays flat: every variant is local to a single request and
/// nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// Upstream service returned an error status.
    #[error("upstream error: {status} - {body}")]
    UpstreamStatus {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Upstream accepted the request but reported failure in its body.
    #[error("upstream rejected submission: {0}")]
    Acknowledgment(String),

    /// CAPTCHA verification required but no secret configured.
    #[error("CAPTCHA secret is not configured")]
    MissingCaptchaSecret,

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}
