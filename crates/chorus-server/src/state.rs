//! Application state.
//!
//! Shared state for all request handlers. Everything here is immutable
//! per-request; the only interior mutability lives inside the CMS cache.

use std::sync::Arc;

use chorus_cms::CachedCms;
use chorus_intake::{CaptchaVerifier, IntakeSink};
use chorus_routes::{RouteBindings, RouteNode};

/// Member gate secrets.
pub(crate) struct MemberSecrets {
    /// Password guarding the member area.
    pub(crate) password: String,
    /// Secret signing the session cookie.
    pub(crate) session_secret: String,
}

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Route candidates from the manifest, without the synthetic `Home`.
    pub(crate) routes: Vec<RouteNode>,
    /// Path→governing-key table from the manifest.
    pub(crate) bindings: RouteBindings,
    /// CMS access through the TTL cache.
    pub(crate) cms: Arc<CachedCms>,
    /// Anti-automation token verifier.
    pub(crate) captcha: Arc<CaptchaVerifier>,
    /// Contact message sink (mail relay), if configured.
    pub(crate) contact_sink: Option<Arc<dyn IntakeSink>>,
    /// Signup sink (intake webhook), if configured.
    pub(crate) signup_sink: Option<Arc<dyn IntakeSink>>,
    /// Member gate secrets, if configured.
    pub(crate) member: Option<MemberSecrets>,
    /// Secret verifying revalidation webhook signatures, if configured.
    pub(crate) revalidate_secret: Option<String>,
    /// Production deployment flag (cookie `Secure`, CAPTCHA enforcement).
    pub(crate) production: bool,
}
