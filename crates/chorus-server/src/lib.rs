//! HTTP server for the Chorus site.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - Navigation and page-content API endpoints for the presentation layer
//! - Form intake endpoints (contact, event signup)
//! - The member area gate and the CMS revalidation webhook
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use chorus_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8787,
//!         manifest_path: PathBuf::from("routes.toml"),
//!         cms_base_url: "https://cms.example.com".to_string(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► Rust axum server (chorus-server)
//!                        │
//!                        ├─► Navigation/pages (manifest + CachedCms)
//!                        │       │
//!                        │       └─► TTL cache ──► CMS query endpoint
//!                        │
//!                        └─► Form intake (CAPTCHA ──► sink)
//!                                │
//!                                ├─► mail relay (contact)
//!                                └─► intake webhook (signup)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod signing;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chorus_cache::{Cache, MemoryCache, NullCache};
use chorus_cms::{CachedCms, CmsClient};
use chorus_intake::{CaptchaConfig, CaptchaVerifier, IntakeSink, MailRelaySink, WebhookSink};
use chorus_routes::RouteManifest;

use state::{AppState, MemberSecrets};

/// Contact relay settings.
#[derive(Clone, Debug)]
pub struct ContactRelayConfig {
    /// Mail relay endpoint.
    pub relay_url: String,
    /// Optional bearer token for the relay.
    pub token: Option<String>,
    /// Destination mailbox.
    pub recipient: String,
}

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Route manifest file.
    pub manifest_path: PathBuf,
    /// CMS query endpoint base URL.
    pub cms_base_url: String,
    /// Optional CMS bearer token.
    pub cms_token: Option<String>,
    /// Content type of the navigation settings document.
    pub settings_type: String,
    /// CMS cache TTL (zero disables caching).
    pub cache_ttl: Duration,
    /// CAPTCHA shared secret.
    pub captcha_secret: Option<String>,
    /// CAPTCHA verification endpoint.
    pub captcha_verify_url: String,
    /// Minimum acceptable CAPTCHA score.
    pub captcha_min_score: f64,
    /// Contact relay settings (`None` disables the contact endpoint sink).
    pub contact: Option<ContactRelayConfig>,
    /// Signup webhook URL (`None` disables the signup endpoint sink).
    pub signup_webhook_url: Option<String>,
    /// Member area password.
    pub member_password: Option<String>,
    /// Secret signing the member session cookie.
    pub member_session_secret: Option<String>,
    /// Secret verifying revalidation webhook signatures.
    pub revalidate_secret: Option<String>,
    /// Production deployment flag.
    pub production: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            manifest_path: PathBuf::from("routes.toml"),
            cms_base_url: String::new(),
            cms_token: None,
            settings_type: "siteSettings".to_string(),
            cache_ttl: Duration::from_secs(60),
            captcha_secret: None,
            captcha_verify_url: chorus_intake::DEFAULT_VERIFY_URL.to_string(),
            captcha_min_score: 0.5,
            contact: None,
            signup_webhook_url: None,
            member_password: None,
            member_session_secret: None,
            revalidate_secret: None,
            production: false,
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the route manifest cannot be loaded or the server
/// fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Load the declarative route manifest; the server never walks the
    // filesystem at request time.
    let manifest = RouteManifest::load(&config.manifest_path)?;
    let routes = manifest.routes();
    let bindings = manifest.bindings();
    tracing::info!(routes = routes.len(), "route manifest loaded");

    // The revalidation window is an explicit cache collaborator.
    let cache: Arc<dyn Cache> = if config.cache_ttl.is_zero() {
        Arc::new(NullCache)
    } else {
        Arc::new(MemoryCache::new(config.cache_ttl))
    };
    let client = CmsClient::new(&config.cms_base_url, config.cms_token.clone());
    let cms = Arc::new(CachedCms::new(client, cache, config.settings_type.clone()));

    let captcha = Arc::new(CaptchaVerifier::new(CaptchaConfig {
        secret: config.captcha_secret.clone(),
        verify_url: config.captcha_verify_url.clone(),
        min_score: config.captcha_min_score,
        enforce: config.production,
    }));

    let contact_sink: Option<Arc<dyn IntakeSink>> = config.contact.as_ref().map(|contact| {
        Arc::new(MailRelaySink::new(
            &contact.relay_url,
            contact.token.clone(),
            &contact.recipient,
        )) as Arc<dyn IntakeSink>
    });
    let signup_sink: Option<Arc<dyn IntakeSink>> = config
        .signup_webhook_url
        .as_deref()
        .map(|url| Arc::new(WebhookSink::new(url)) as Arc<dyn IntakeSink>);

    let member = match (&config.member_password, &config.member_session_secret) {
        (Some(password), Some(session_secret)) => Some(MemberSecrets {
            password: password.clone(),
            session_secret: session_secret.clone(),
        }),
        _ => None,
    };

    let state = Arc::new(AppState {
        routes,
        bindings,
        cms,
        captcha,
        contact_sink,
        signup_sink,
        member,
        revalidate_secret: config.revalidate_secret.clone(),
        production: config.production,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Chorus config.
///
/// # Arguments
///
/// * `config` - Chorus configuration
///
/// # Errors
///
/// Returns a validation error when the `[cms]` section is missing or
/// invalid; serving without a CMS makes no sense.
pub fn server_config_from_config(
    config: &chorus_config::Config,
) -> Result<ServerConfig, chorus_config::ConfigError> {
    let cms = config.require_cms()?;

    Ok(ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        manifest_path: config.routes_resolved.manifest.clone(),
        cms_base_url: cms.base_url.clone(),
        cms_token: cms.token.clone(),
        settings_type: cms.settings_type.clone(),
        cache_ttl: Duration::from_secs(cms.cache_ttl_secs),
        captcha_secret: config.captcha.secret.clone(),
        captcha_verify_url: config.captcha.verify_url.clone(),
        captcha_min_score: config.captcha.min_score,
        contact: config.contact.as_ref().map(|contact| ContactRelayConfig {
            relay_url: contact.relay_url.clone(),
            token: contact.token.clone(),
            recipient: contact.recipient.clone(),
        }),
        signup_webhook_url: config.signup.as_ref().map(|signup| signup.webhook_url.clone()),
        member_password: config.member.as_ref().map(|member| member.password.clone()),
        member_session_secret: config
            .member
            .as_ref()
            .map(|member| member.session_secret.clone()),
        revalidate_secret: config
            .revalidate
            .as_ref()
            .map(|revalidate| revalidate.secret.clone()),
        production: config.environment.is_production(),
    })
}
