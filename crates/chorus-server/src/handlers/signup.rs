//! Event signup endpoint.
//!
//! The payload carries a required `token` plus arbitrary business fields.
//! After the anti-automation check the token is stripped and the remaining
//! fields are forwarded verbatim to the external intake webhook.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::Value;
use tokio::task;

use crate::error::ServerError;
use crate::handlers::{MessageResponse, check_captcha};
use crate::state::AppState;

/// Handle POST /api/signup.
pub(crate) async fn submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<MessageResponse>, ServerError> {
    let Value::Object(mut fields) = body else {
        return Err(ServerError::Validation("Invalid payload".to_owned()));
    };
    let token = match fields.remove("token") {
        Some(Value::String(token)) if !token.is_empty() => token,
        _ => {
            return Err(ServerError::Validation(
                "reCAPTCHA token is missing".to_owned(),
            ));
        }
    };

    check_captcha(&state, token).await?;

    let Some(sink) = state.signup_sink.as_ref().map(Arc::clone) else {
        return Err(ServerError::Misconfigured("signup.webhook_url"));
    };

    let fields = Value::Object(fields);
    task::spawn_blocking(move || sink.deliver(&fields))
        .await
        .map_err(|_| downstream())?
        .map_err(|err| {
            tracing::error!(error = %err, "signup delivery failed");
            downstream()
        })?;

    Ok(Json(MessageResponse {
        message: "Signup received successfully",
    }))
}

fn downstream() -> ServerError {
    ServerError::Downstream("Internal server error while processing signup.".to_owned())
}
