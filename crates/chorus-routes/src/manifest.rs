//! Declarative route manifest.
//!
//! The manifest replaces the runtime directory walk in the server: a TOML
//! file lists every navigable route (path, optional title override, optional
//! governing CMS key, nested children), edited at build time. It also yields
//! the [`RouteBindings`] table that ties route paths to the CMS documents
//! governing their visibility and ordering.
//!
//! ```toml
//! [[routes]]
//! path = "/agenda"
//! key = "agendaPage"
//!
//! [[routes]]
//! path = "/gospelproject"
//! key = "projectPage"
//!
//! [[routes.children]]
//! path = "/gospelproject/team"
//! key = "teamPage"
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::node::{RouteNode, title_from_segment};

/// Sentinel governing key for the gallery route, whose visibility lives on a
/// different CMS document shape than the singleton pages.
pub const GALLERY_KEY: &str = "@gallery";

/// Route manifest error.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// File not found.
    #[error("Route manifest not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Route manifest error: {0}")]
    Validation(String),
}

/// One manifest entry as parsed from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestRoute {
    /// Absolute URL path.
    path: String,
    /// Display title; derived from the trailing path segment when absent.
    title: Option<String>,
    /// Governing CMS document key; absent means always visible, unranked.
    key: Option<String>,
    /// Child routes.
    #[serde(default)]
    children: Vec<ManifestRoute>,
}

/// Declarative listing of every navigable route.
#[derive(Debug, Default, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    routes: Vec<ManifestRoute>,
}

impl RouteManifest {
    /// Parse and validate a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Parse` on malformed TOML and
    /// `ManifestError::Validation` on relative or duplicate paths.
    pub fn from_toml(text: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(text)?;
        validate_level(&manifest.routes)?;
        Ok(manifest)
    }

    /// Load and validate a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if the file does not exist, plus
    /// the errors of [`RouteManifest::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Route candidates in manifest order, titles derived where not given.
    #[must_use]
    pub fn routes(&self) -> Vec<RouteNode> {
        build_nodes(&self.routes)
    }

    /// The path→governing-key table across all levels.
    #[must_use]
    pub fn bindings(&self) -> RouteBindings {
        let mut bindings = RouteBindings::default();
        collect_bindings(&self.routes, &mut bindings);
        bindings
    }
}

fn build_nodes(entries: &[ManifestRoute]) -> Vec<RouteNode> {
    entries
        .iter()
        .map(|entry| {
            let title = match entry.title.as_deref() {
                Some(title) if !title.is_empty() => title.to_owned(),
                _ => title_from_segment(entry.path.rsplit('/').next().unwrap_or_default()),
            };
            RouteNode::new(entry.path.clone(), title).with_children(build_nodes(&entry.children))
        })
        .collect()
}

fn collect_bindings(entries: &[ManifestRoute], bindings: &mut RouteBindings) {
    for entry in entries {
        if let Some(key) = &entry.key {
            bindings.bind(&entry.path, key);
        }
        collect_bindings(&entry.children, bindings);
    }
}

/// Paths must be absolute and unique within their tree level.
fn validate_level(entries: &[ManifestRoute]) -> Result<(), ManifestError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !entry.path.starts_with('/') {
            return Err(ManifestError::Validation(format!(
                "route path must be absolute: {}",
                entry.path
            )));
        }
        if !seen.insert(entry.path.as_str()) {
            return Err(ManifestError::Validation(format!(
                "duplicate route path: {}",
                entry.path
            )));
        }
        validate_level(&entry.children)?;
    }
    Ok(())
}

/// Static mapping from route path to the CMS key governing it.
///
/// Paths absent from the table are always visible and always unranked.
#[derive(Clone, Debug, Default)]
pub struct RouteBindings {
    keys: HashMap<String, String>,
}

impl RouteBindings {
    /// Bind a route path to a governing key.
    pub fn bind(&mut self, path: impl Into<String>, key: impl Into<String>) {
        self.keys.insert(path.into(), key.into());
    }

    /// Governing key for a route path, if any.
    #[must_use]
    pub fn key_for(&self, path: &str) -> Option<&str> {
        self.keys.get(path).map(String::as_str)
    }

    /// Number of bound paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no path is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<P: Into<String>, K: Into<String>> FromIterator<(P, K)> for RouteBindings {
    fn from_iter<T: IntoIterator<Item = (P, K)>>(iter: T) -> Self {
        let mut bindings = Self::default();
        for (path, key) in iter {
            bindings.bind(path, key);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[[routes]]
path = "/agenda"
key = "agendaPage"

[[routes]]
path = "/impressionen"
key = "@gallery"

[[routes]]
path = "/gospelproject"
title = "Gospel Project"
key = "projectPage"

[[routes.children]]
path = "/gospelproject/team"
key = "teamPage"

[[routes]]
path = "/impressum"
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = RouteManifest::from_toml(MANIFEST).unwrap();
        let routes = manifest.routes();

        assert_eq!(routes.len(), 4);
        assert_eq!(routes[0].path, "/agenda");
        assert_eq!(routes[2].title, "Gospel Project");
        let children = routes[2].children.as_ref().unwrap();
        assert_eq!(children[0].path, "/gospelproject/team");
    }

    #[test]
    fn test_titles_derived_from_trailing_segment() {
        let manifest = RouteManifest::from_toml(MANIFEST).unwrap();
        let routes = manifest.routes();

        assert_eq!(routes[0].title, "Agenda");
        assert_eq!(routes[3].title, "Impressum");
        assert_eq!(routes[2].children.as_ref().unwrap()[0].title, "Team");
    }

    #[test]
    fn test_bindings_cover_all_levels() {
        let manifest = RouteManifest::from_toml(MANIFEST).unwrap();
        let bindings = manifest.bindings();

        assert_eq!(bindings.key_for("/agenda"), Some("agendaPage"));
        assert_eq!(bindings.key_for("/impressionen"), Some(GALLERY_KEY));
        assert_eq!(bindings.key_for("/gospelproject/team"), Some("teamPage"));
        assert_eq!(bindings.key_for("/impressum"), None);
        assert_eq!(bindings.len(), 4);
    }

    #[test]
    fn test_empty_manifest_is_valid() {
        let manifest = RouteManifest::from_toml("").unwrap();
        assert!(manifest.routes().is_empty());
        assert!(manifest.bindings().is_empty());
    }

    #[test]
    fn test_relative_path_rejected() {
        let toml = "[[routes]]\npath = \"agenda\"\n";
        let err = RouteManifest::from_toml(toml).unwrap_err();
        assert!(matches!(err, ManifestError::Validation(_)));
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let toml = "[[routes]]\npath = \"/agenda\"\n[[routes]]\npath = \"/agenda\"\n";
        let err = RouteManifest::from_toml(toml).unwrap_err();
        assert!(matches!(err, ManifestError::Validation(_)));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = "[[routes]]\npath = \"/agenda\"\nvisible = true\n";
        assert!(matches!(
            RouteManifest::from_toml(toml),
            Err(ManifestError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = RouteManifest::load(&temp.path().join("routes.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound(_)));
    }
}
