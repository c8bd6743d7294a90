//! Configuration management for Chorus.
//!
//! Parses `chorus.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `cms.base_url`
//! - `cms.token`
//! - `captcha.secret`
//! - `contact.token`
//! - `member.password`
//! - `member.session_secret`
//! - `revalidate.secret`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use chorus_routes::OrphanPolicy;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override route manifest path.
    pub manifest: Option<PathBuf>,
    /// Override deployment environment.
    pub environment: Option<Environment>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "chorus.toml";

/// Deployment environment.
///
/// Production enforces CAPTCHA verification and marks the member session
/// cookie `Secure`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: CAPTCHA bypassed.
    #[default]
    Development,
    /// Production deployment.
    Production,
}

impl Environment {
    /// True for production deployments.
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "unknown environment '{other}' (expected development or production)"
            )),
        }
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deployment environment.
    pub environment: Environment,
    /// Server configuration.
    pub server: ServerConfig,
    /// Route configuration (paths are relative strings from TOML).
    routes: RoutesConfigRaw,
    /// CMS configuration. Required to serve.
    pub cms: Option<CmsConfig>,
    /// CAPTCHA verification configuration.
    pub captcha: CaptchaConfig,
    /// Contact form configuration.
    pub contact: Option<ContactConfig>,
    /// Signup form configuration.
    pub signup: Option<SignupConfig>,
    /// Member area configuration.
    pub member: Option<MemberConfig>,
    /// Revalidation webhook configuration.
    pub revalidate: Option<RevalidateConfig>,

    /// Resolved route configuration (set after loading).
    #[serde(skip)]
    pub routes_resolved: RoutesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8787,
        }
    }
}

/// Raw route configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RoutesConfigRaw {
    manifest: Option<String>,
    pages_dir: Option<String>,
    page_filename: Option<String>,
    orphan_policy: Option<OrphanPolicy>,
}

/// Resolved route configuration with absolute paths.
#[derive(Debug, Default)]
pub struct RoutesConfig {
    /// Route manifest file.
    pub manifest: PathBuf,
    /// Content directory for the discovery walk (CLI `routes` command).
    pub pages_dir: PathBuf,
    /// File whose presence makes a directory a routable page.
    pub page_filename: String,
    /// Handling of page-less container directories during discovery.
    pub orphan_policy: OrphanPolicy,
}

/// CMS configuration.
#[derive(Debug, Deserialize)]
pub struct CmsConfig {
    /// Query endpoint base URL.
    pub base_url: String,
    /// Optional bearer token for private datasets.
    #[serde(default)]
    pub token: Option<String>,
    /// Content type of the navigation settings document.
    #[serde(default = "default_settings_type")]
    pub settings_type: String,
    /// Cache TTL in seconds; 0 disables caching.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_settings_type() -> String {
    "siteSettings".to_owned()
}

fn default_cache_ttl_secs() -> u64 {
    60
}

/// CAPTCHA verification configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CaptchaConfig {
    /// Shared secret for the scoring service.
    pub secret: Option<String>,
    /// Verification endpoint URL.
    pub verify_url: String,
    /// Minimum acceptable trust score.
    pub min_score: f64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            secret: None,
            verify_url: "https://www.google.com/recaptcha/api/siteverify".to_owned(),
            min_score: 0.5,
        }
    }
}

/// Contact form configuration.
#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Mail relay endpoint.
    pub relay_url: String,
    /// Optional bearer token for the relay.
    #[serde(default)]
    pub token: Option<String>,
    /// Destination mailbox.
    pub recipient: String,
}

/// Signup form configuration.
#[derive(Debug, Deserialize)]
pub struct SignupConfig {
    /// External form-intake webhook URL.
    pub webhook_url: String,
}

/// Member area configuration.
#[derive(Debug, Deserialize)]
pub struct MemberConfig {
    /// Member area password.
    pub password: String,
    /// Secret signing the session cookie.
    pub session_secret: String,
}

/// Revalidation webhook configuration.
#[derive(Debug, Deserialize)]
pub struct RevalidateConfig {
    /// Secret verifying webhook signatures.
    pub secret: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`cms.token`").
        field: String,
        /// Error message (e.g., "${`CMS_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `chorus.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(manifest) = &settings.manifest {
            self.routes_resolved.manifest.clone_from(manifest);
        }
        if let Some(environment) = settings.environment {
            self.environment = environment;
        }
    }

    /// Get validated CMS configuration.
    ///
    /// Returns the CMS config if the `[cms]` section is present and valid.
    /// Use this instead of accessing the `cms` field directly when the
    /// command requires the CMS.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_cms(&self) -> Result<&CmsConfig, ConfigError> {
        let cms = self
            .cms
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[cms] section required in config".into()))?;
        cms.validate()?;
        Ok(cms)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            routes: RoutesConfigRaw::default(),
            cms: None,
            captcha: CaptchaConfig::default(),
            contact: None,
            signup: None,
            member: None,
            revalidate: None,
            routes_resolved: RoutesConfig {
                manifest: base.join("routes.toml"),
                pages_dir: base.join("content"),
                page_filename: "page.md".to_owned(),
                orphan_policy: OrphanPolicy::default(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_captcha()?;
        if let Some(contact) = &self.contact {
            contact.validate()?;
        }
        if let Some(signup) = &self.signup {
            signup.validate()?;
        }
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate CAPTCHA configuration.
    fn validate_captcha(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.captcha.verify_url, "captcha.verify_url")?;
        require_http_url(&self.captcha.verify_url, "captcha.verify_url")?;

        let min_score = self.captcha.min_score;
        if !(0.0..=1.0).contains(&min_score) {
            return Err(ConfigError::Validation(
                "captcha.min_score must be between 0 and 1".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref mut cms) = self.cms {
            cms.base_url = expand::expand_env(&cms.base_url, "cms.base_url")?;
            expand::expand_env_opt(&mut cms.token, "cms.token")?;
        }

        expand::expand_env_opt(&mut self.captcha.secret, "captcha.secret")?;

        if let Some(ref mut contact) = self.contact {
            expand::expand_env_opt(&mut contact.token, "contact.token")?;
        }

        if let Some(ref mut member) = self.member {
            member.password = expand::expand_env(&member.password, "member.password")?;
            member.session_secret =
                expand::expand_env(&member.session_secret, "member.session_secret")?;
        }

        if let Some(ref mut revalidate) = self.revalidate {
            revalidate.secret = expand::expand_env(&revalidate.secret, "revalidate.secret")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.routes_resolved = RoutesConfig {
            manifest: resolve(self.routes.manifest.as_deref(), "routes.toml"),
            pages_dir: resolve(self.routes.pages_dir.as_deref(), "content"),
            page_filename: self
                .routes
                .page_filename
                .clone()
                .unwrap_or_else(|| "page.md".to_owned()),
            orphan_policy: self.routes.orphan_policy.unwrap_or_default(),
        };
    }
}

impl CmsConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid
    /// format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "cms.base_url")?;
        require_http_url(&self.base_url, "cms.base_url")?;
        require_non_empty(&self.settings_type, "cms.settings_type")?;
        Ok(())
    }
}

impl ContactConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.relay_url, "contact.relay_url")?;
        require_http_url(&self.relay_url, "contact.relay_url")?;
        require_non_empty(&self.recipient, "contact.recipient")?;
        Ok(())
    }
}

impl SignupConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.webhook_url, "signup.webhook_url")?;
        require_http_url(&self.webhook_url, "signup.webhook_url")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(
            config.routes_resolved.manifest,
            PathBuf::from("/test/routes.toml")
        );
        assert_eq!(
            config.routes_resolved.pages_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(config.routes_resolved.page_filename, "page.md");
        assert_eq!(config.routes_resolved.orphan_policy, OrphanPolicy::Drop);
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8787);
        assert!(config.cms.is_none());
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
environment = "production"

[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(config.environment.is_production());
    }

    #[test]
    fn test_parse_cms_config_with_defaults() {
        let toml = r#"
[cms]
base_url = "https://cms.example.com"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let cms = config.cms.unwrap();
        assert_eq!(cms.base_url, "https://cms.example.com");
        assert_eq!(cms.settings_type, "siteSettings");
        assert_eq!(cms.cache_ttl_secs, 60);
        assert!(cms.token.is_none());
    }

    #[test]
    fn test_parse_form_sections() {
        let toml = r#"
[contact]
relay_url = "https://mail.example.com/send"
recipient = "webformular@example.com"

[signup]
webhook_url = "https://intake.example.com/exec"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.contact.unwrap().recipient, "webformular@example.com");
        assert_eq!(
            config.signup.unwrap().webhook_url,
            "https://intake.example.com/exec"
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[routes]
manifest = "nav/routes.toml"
pages_dir = "pages"
orphan_policy = "promote"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.routes_resolved.manifest,
            PathBuf::from("/project/nav/routes.toml")
        );
        assert_eq!(
            config.routes_resolved.pages_dir,
            PathBuf::from("/project/pages")
        );
        assert_eq!(config.routes_resolved.orphan_policy, OrphanPolicy::Promote);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            manifest: Some(PathBuf::from("/custom/routes.toml")),
            environment: Some(Environment::Production),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.routes_resolved.manifest,
            PathBuf::from("/custom/routes.toml")
        );
        assert!(config.environment.is_production());
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, config_before.server.host);
        assert_eq!(config.server.port, config_before.server.port);
        assert_eq!(config.environment, config_before.environment);
    }

    #[test]
    fn test_expand_env_vars_cms_token() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CHORUS_TEST_CMS_TOKEN", "tok-123");
        }

        let toml = r#"
[cms]
base_url = "https://cms.example.com"
token = "${CHORUS_TEST_CMS_TOKEN}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.cms.unwrap().token.as_deref(), Some("tok-123"));

        unsafe {
            std::env::remove_var("CHORUS_TEST_CMS_TOKEN");
        }
    }

    #[test]
    fn test_expand_env_vars_member_secrets() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CHORUS_TEST_MEMBER_PW", "open-sesame");
        }

        let toml = r#"
[member]
password = "${CHORUS_TEST_MEMBER_PW}"
session_secret = "${CHORUS_TEST_SESSION:-dev-secret}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        let member = config.member.unwrap();
        assert_eq!(member.password, "open-sesame");
        assert_eq!(member.session_secret, "dev-secret");

        unsafe {
            std::env::remove_var("CHORUS_TEST_MEMBER_PW");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CHORUS_MISSING_VAR_TEST");
        }

        let toml = r#"
[revalidate]
secret = "${CHORUS_MISSING_VAR_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let result = config.expand_env_vars();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CHORUS_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("revalidate.secret"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error
    /// message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_captcha_min_score_out_of_range() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.captcha.min_score = 1.5;
        assert_validation_error(&config, &["min_score"]);
    }

    #[test]
    fn test_validate_captcha_verify_url_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.captcha.verify_url = "ftp://verify.example.com".to_owned();
        assert_validation_error(&config, &["verify_url", "http"]);
    }

    #[test]
    fn test_validate_contact_relay_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.contact = Some(ContactConfig {
            relay_url: "not-a-url".to_owned(),
            token: None,
            recipient: "mail@example.com".to_owned(),
        });
        assert_validation_error(&config, &["relay_url", "http"]);
    }

    #[test]
    fn test_require_cms_missing_section() {
        let config = Config::default_with_base(Path::new("/test"));
        let err = config.require_cms().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[cms]"));
    }

    #[test]
    fn test_require_cms_returns_validated() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.cms = Some(CmsConfig {
            base_url: "https://cms.example.com".to_owned(),
            token: None,
            settings_type: default_settings_type(),
            cache_ttl_secs: 60,
        });
        assert!(config.require_cms().is_ok());
    }

    #[test]
    fn test_require_cms_invalid_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.cms = Some(CmsConfig {
            base_url: "cms.example.com".to_owned(),
            token: None,
            settings_type: default_settings_type(),
            cache_ttl_secs: 60,
        });
        let err = config.require_cms().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "development".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert!("staging".parse::<Environment>().is_err());
    }
}
