//! `chorus routes` command implementation.
//!
//! Runs the discovery walk over the content tree and prints the candidate
//! routes as JSON. With `--check`, cross-checks the discovered paths against
//! the route manifest the server actually consumes, so a page added on disk
//! without a manifest entry is caught at build time instead of silently
//! missing from navigation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chorus_config::Config;
use chorus_routes::{DiscoverConfig, RouteManifest, RouteNode, discover_routes};
use clap::Args;
use console::Term;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to configuration file (default: auto-discover chorus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory to walk (overrides config).
    #[arg(long)]
    pages_dir: Option<PathBuf>,

    /// Cross-check discovered routes against the route manifest.
    #[arg(long)]
    check: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be walked, or with
    /// `--check` when manifest and content tree disagree.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let pages_dir = self
            .pages_dir
            .clone()
            .unwrap_or_else(|| config.routes_resolved.pages_dir.clone());
        let discover_config = DiscoverConfig {
            page_filename: config.routes_resolved.page_filename.clone(),
            orphan_policy: config.routes_resolved.orphan_policy,
        };

        let discovered = discover_routes(&pages_dir, &discover_config)?;
        Term::stdout().write_line(&serde_json::to_string_pretty(&discovered)?)?;

        if self.check {
            check_manifest(&config, &discovered, &output)?;
        }

        Ok(())
    }
}

/// Compare discovered paths with the manifest's.
fn check_manifest(
    config: &Config,
    discovered: &[RouteNode],
    output: &Output,
) -> Result<(), CliError> {
    let manifest = RouteManifest::load(&config.routes_resolved.manifest)?;

    let mut discovered_paths = BTreeSet::new();
    collect_paths(discovered, &mut discovered_paths);
    let mut manifest_paths = BTreeSet::new();
    collect_paths(&manifest.routes(), &mut manifest_paths);

    let unlisted: Vec<_> = discovered_paths.difference(&manifest_paths).collect();
    let stale: Vec<_> = manifest_paths.difference(&discovered_paths).collect();

    for path in &unlisted {
        output.warning(&format!("on disk but not in manifest: {path}"));
    }
    for path in &stale {
        output.warning(&format!("in manifest but not on disk: {path}"));
    }

    if unlisted.is_empty() && stale.is_empty() {
        output.success("Route manifest matches the content tree");
        Ok(())
    } else {
        Err(CliError::Validation(
            "route manifest out of sync with content tree".to_owned(),
        ))
    }
}

/// Collect every path in a route tree.
fn collect_paths(nodes: &[RouteNode], paths: &mut BTreeSet<String>) {
    for node in nodes {
        paths.insert(node.path.clone());
        if let Some(children) = &node.children {
            collect_paths(children, paths);
        }
    }
}
