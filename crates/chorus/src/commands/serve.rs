//! `chorus serve` command implementation.

use std::path::PathBuf;

use chorus_config::{CliSettings, Config, Environment};
use chorus_server::{run_server, server_config_from_config};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover chorus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route manifest file (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Deployment environment (overrides config).
    #[arg(long)]
    environment: Option<Environment>,

    /// Enable verbose output (request and cache logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            manifest: self.manifest,
            environment: self.environment,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "configuration loaded");
        }

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Route manifest: {}",
            config.routes_resolved.manifest.display()
        ));
        if let Some(cms) = &config.cms {
            output.info(&format!("CMS endpoint: {}", cms.base_url));
            if cms.cache_ttl_secs == 0 {
                output.info("Content cache: disabled");
            } else {
                output.info(&format!("Content cache TTL: {}s", cms.cache_ttl_secs));
            }
        }
        if config.environment.is_production() {
            output.info("Environment: production (CAPTCHA enforced)");
        } else {
            output.warning("Environment: development (CAPTCHA bypassed)");
        }

        // Build server config and run
        let server_config = server_config_from_config(&config)?;
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
