//! HTTP request handlers.

pub(crate) mod contact;
pub(crate) mod member_auth;
pub(crate) mod navigation;
pub(crate) mod pages;
pub(crate) mod revalidate;
pub(crate) mod signup;

use std::sync::Arc;

use chorus_intake::{CaptchaOutcome, IntakeError};
use serde::Serialize;
use tokio::task;

use crate::error::ServerError;
use crate::state::AppState;

/// JSON body of form endpoint acknowledgments.
#[derive(Serialize)]
pub(crate) struct MessageResponse {
    /// Human-readable acknowledgment.
    pub(crate) message: &'static str,
}

/// Run the anti-automation check for a form submission.
///
/// Bypassed outside production; a rejection maps to a 400, a missing secret
/// in production to a 500.
pub(crate) async fn check_captcha(state: &AppState, token: String) -> Result<(), ServerError> {
    let verifier = Arc::clone(&state.captcha);
    let outcome = task::spawn_blocking(move || verifier.verify(&token))
        .await
        .map_err(|_| ServerError::Downstream("Verification failed".to_owned()))?
        .map_err(|err| match err {
            IntakeError::MissingCaptchaSecret => ServerError::Misconfigured("captcha.secret"),
            other => {
                tracing::error!(error = %other, "CAPTCHA verification call failed");
                ServerError::Downstream("Verification service unavailable".to_owned())
            }
        })?;

    match outcome {
        CaptchaOutcome::Passed | CaptchaOutcome::Skipped => Ok(()),
        CaptchaOutcome::Rejected { .. } => Err(ServerError::CaptchaRejected),
    }
}
