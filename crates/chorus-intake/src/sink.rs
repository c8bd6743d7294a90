//! Delivery sinks.
//!
//! Each intake endpoint hands its validated payload to exactly one sink.
//! Sinks are fire-once: any failure surfaces as an error to the handler,
//! which answers with a generic server error. No retry, no queuing.

use serde_json::{Value, json};
use tracing::info;
use ureq::Agent;

use crate::IntakeError;
use crate::http_agent;

/// The delivery seam both intake handlers share.
///
/// `fields` is the submitted payload with the anti-automation token already
/// stripped.
pub trait IntakeSink: Send + Sync {
    /// Deliver one submission.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError`] when the sink is unreachable or reports
    /// failure.
    fn deliver(&self, fields: &Value) -> Result<(), IntakeError>;
}

/// Contact-message sink: posts a mail message to an HTTP mail relay.
pub struct MailRelaySink {
    agent: Agent,
    relay_url: String,
    token: Option<String>,
    recipient: String,
}

impl MailRelaySink {
    /// Create a mail relay sink.
    ///
    /// # Arguments
    ///
    /// * `relay_url` - Relay endpoint accepting a JSON mail message
    /// * `token` - Optional bearer token for the relay
    /// * `recipient` - Destination mailbox
    #[must_use]
    pub fn new(relay_url: &str, token: Option<String>, recipient: &str) -> Self {
        Self {
            agent: http_agent(),
            relay_url: relay_url.to_owned(),
            token,
            recipient: recipient.to_owned(),
        }
    }
}

impl IntakeSink for MailRelaySink {
    fn deliver(&self, fields: &Value) -> Result<(), IntakeError> {
        let message = mail_message(&self.recipient, fields);

        let mut request = self.agent.post(&self.relay_url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let response = request.send_json(&message)?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(IntakeError::UpstreamStatus { status, body });
        }

        info!("contact message delivered to mail relay");
        Ok(())
    }
}

/// Build the relay message from the contact fields.
fn mail_message(recipient: &str, fields: &Value) -> Value {
    let name = fields.get("name").and_then(Value::as_str).unwrap_or("Unbekannt");
    let email = fields.get("email").and_then(Value::as_str).unwrap_or("");
    let message = fields.get("message").and_then(Value::as_str).unwrap_or("");

    json!({
        "to": recipient,
        "replyTo": email,
        "subject": format!("Neue Mitteilung von {name} über das Webformular"),
        "text": format!("Name: {name}\nEmail: {email}\n\nNachricht:\n{message}"),
    })
}

/// Signup sink: forwards the business fields verbatim to the external
/// form-intake webhook.
pub struct WebhookSink {
    agent: Agent,
    url: String,
}

impl WebhookSink {
    /// Create a webhook sink.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            agent: http_agent(),
            url: url.to_owned(),
        }
    }
}

impl IntakeSink for WebhookSink {
    fn deliver(&self, fields: &Value) -> Result<(), IntakeError> {
        let body = serde_json::to_string(fields)?;

        // The intake endpoint only accepts JSON shipped as text/plain.
        let response = self
            .agent
            .post(&self.url)
            .header("Content-Type", "text/plain;charset=utf-8")
            .send(body.as_bytes())?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(IntakeError::UpstreamStatus {
                status,
                body: error_body,
            });
        }

        let ack: Value = body_reader.read_json()?;
        check_ack(&ack)?;

        info!("signup delivered to intake webhook");
        Ok(())
    }
}

/// The webhook acknowledges with `{ "status": "success" }`; anything else is
/// a delivery failure even on a 2xx response.
fn check_ack(ack: &Value) -> Result<(), IntakeError> {
    if ack.get("status").and_then(Value::as_str) == Some("success") {
        return Ok(());
    }
    let message = ack
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error from intake webhook");
    Err(IntakeError::Acknowledgment(message.to_owned()))
}
