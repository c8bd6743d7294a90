//! Anti-automation token verification.
//!
//! Tokens are verified against an external scoring service. Verification is
//! enforced only in production deployments; elsewhere it is bypassed so
//! forms work without keys. In production a missing secret is a
//! misconfiguration, not a silent skip.

use serde::Deserialize;
use tracing::warn;
use ureq::Agent;

use crate::IntakeError;
use crate::http_agent;

/// Default verification endpoint.
pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Verifier settings.
#[derive(Clone, Debug)]
pub struct CaptchaConfig {
    /// Shared secret for the scoring service.
    pub secret: Option<String>,
    /// Verification endpoint URL.
    pub verify_url: String,
    /// Minimum acceptable trust score.
    pub min_score: f64,
    /// Whether verification is enforced (production deployments).
    pub enforce: bool,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            secret: None,
            verify_url: DEFAULT_VERIFY_URL.to_owned(),
            min_score: 0.5,
            enforce: false,
        }
    }
}

/// Outcome of a token check.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptchaOutcome {
    /// Token verified with an acceptable score.
    Passed,
    /// Verification bypassed (non-production deployment).
    Skipped,
    /// Token failed verification or scored too low.
    Rejected {
        /// Score reported by the service, if any.
        score: Option<f64>,
    },
}

/// Response of the scoring service.
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    score: Option<f64>,
}

/// Token verifier against the external scoring service.
pub struct CaptchaVerifier {
    agent: Agent,
    config: CaptchaConfig,
}

impl CaptchaVerifier {
    /// Create a verifier.
    #[must_use]
    pub fn new(config: CaptchaConfig) -> Self {
        Self {
            agent: http_agent(),
            config,
        }
    }

    /// Check a token.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingCaptchaSecret`] when enforcement is on
    /// but no secret is configured, and transport/status errors from the
    /// verification call. A rejection is an [`CaptchaOutcome::Rejected`]
    /// value, not an error.
    pub fn verify(&self, token: &str) -> Result<CaptchaOutcome, IntakeError> {
        if !self.config.enforce {
            return Ok(CaptchaOutcome::Skipped);
        }
        let Some(secret) = self.config.secret.as_deref() else {
            return Err(IntakeError::MissingCaptchaSecret);
        };

        let response = self
            .agent
            .post(&self.config.verify_url)
            .send_form([("secret", secret), ("response", token)])?;

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

        let verdict: VerifyResponse = body_reader.read_json()?;
        if is_rejected(verdict.success, verdict.score, self.config.min_score) {
            warn!(success = verdict.success, score = ?verdict.score, "CAPTCHA rejected");
            return Ok(CaptchaOutcome::Rejected {
                score: verdict.score,
            });
        }
        Ok(CaptchaOutcome::Passed)
    }
}

/// A token is rejected on failed verification or a score below the minimum.
/// Services without scoring omit the score; `success` alone decides then.
fn is_rejected(success: bool, score: Option<f64>, min_score: f64) -> bool {
    !success || score.is_some_and(|score| score < min_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bypass_outside_production() {
        let verifier = CaptchaVerifier::new(CaptchaConfig::default());
        let outcome = verifier.verify("any-token").unwrap();
        assert_eq!(outcome, CaptchaOutcome::Skipped);
    }

    #[test]
    fn test_missing_secret_in_production_is_misconfiguration() {
        let verifier = CaptchaVerifier::new(CaptchaConfig {
            enforce: true,
            ..CaptchaConfig::default()
        });

        let err = verifier.verify("any-token").unwrap_err();

        assert!(matches!(err, IntakeError::MissingCaptchaSecret));
    }

    #[test]
    fn test_rejection_on_failed_verification() {
        assert!(is_rejected(false, Some(0.9), 0.5));
        assert!(is_rejected(false, None, 0.5));
    }

    #[test]
    fn test_rejection_on_low_score() {
        assert!(is_rejected(true, Some(0.3), 0.5));
        assert!(!is_rejected(true, Some(0.9), 0.5));
    }

    #[test]
    fn test_missing_score_passes_on_success() {
        assert!(!is_rejected(true, None, 0.5));
    }

    #[test]
    fn test_verify_response_parsing() {
        let verdict: VerifyResponse =
            serde_json::from_str(r#"{"success": true, "score": 0.9}"#).unwrap();
        assert!(verdict.success);
        assert_eq!(verdict.score, Some(0.9));

        let verdict: VerifyResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(verdict.score, None);
    }
}
