//! Contact form endpoint.
//!
//! Validates the submission, checks the anti-automation token, and hands
//! the message to the mail relay sink. Validation failures never reach the
//! sink.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;
use tokio::task;

use crate::error::ServerError;
use crate::handlers::{MessageResponse, check_captcha};
use crate::state::AppState;

/// Contact form payload.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContactPayload {
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) captcha: Option<String>,
}

impl ContactPayload {
    /// All fields are required and must be non-empty.
    pub(crate) fn validated(&self) -> Result<(&str, &str, &str, &str), ServerError> {
        match (
            non_empty(self.name.as_deref()),
            non_empty(self.email.as_deref()),
            non_empty(self.message.as_deref()),
            non_empty(self.captcha.as_deref()),
        ) {
            (Some(name), Some(email), Some(message), Some(captcha)) => {
                Ok((name, email, message, captcha))
            }
            _ => Err(ServerError::Validation(
                "Missing required fields".to_owned(),
            )),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Handle POST /api/contact.
pub(crate) async fn submit(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactPayload>,
) -> Result<Json<MessageResponse>, ServerError> {
    let (name, email, message, captcha) = payload.validated()?;
    check_captcha(&state, captcha.to_owned()).await?;

    let Some(sink) = state.contact_sink.as_ref().map(Arc::clone) else {
        return Err(ServerError::Misconfigured("contact.relay_url"));
    };

    let fields = json!({
        "name": name,
        "email": email,
        "message": message,
    });
    task::spawn_blocking(move || sink.deliver(&fields))
        .await
        .map_err(|_| downstream())?
        .map_err(|err| {
            tracing::error!(error = %err, "contact delivery failed");
            downstream()
        })?;

    Ok(Json(MessageResponse {
        message: "Nachricht erfolgreich versendet",
    }))
}

fn downstream() -> ServerError {
    ServerError::Downstream("Nachricht konnte nicht versendet werden".to_owned())
}
