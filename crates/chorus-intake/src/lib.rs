//! Form intake boundary for Chorus.
//!
//! The two lead-generation endpoints (contact message, event signup) share
//! one shape: validate, check the anti-automation token, hand the payload to
//! exactly one external sink. This crate covers the two outbound legs:
//!
//! - [`CaptchaVerifier`]: token verification against the external scoring
//!   service, enforced only in production deployments
//! - [`IntakeSink`]: the delivery seam, with [`MailRelaySink`] (contact
//!   messages via an HTTP mail relay) and [`WebhookSink`] (signups forwarded
//!   to an external form-intake webhook)
//!
//! No retry anywhere: a failed sink call surfaces as an error and the
//! request is done.

mod captcha;
mod error;
mod sink;

pub use captcha::{CaptchaConfig, CaptchaOutcome, CaptchaVerifier, DEFAULT_VERIFY_URL};
pub use error::IntakeError;
pub use sink::{IntakeSink, MailRelaySink, WebhookSink};

use std::time::Duration;

use ureq::Agent;

/// Default HTTP timeout in seconds for all intake calls.
const DEFAULT_TIMEOUT: u64 = 30;

/// Agent shared by verifier and sinks.
pub(crate) fn http_agent() -> Agent {
    Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
        .http_status_as_error(false)
        .build()
        .into()
}
