//! Route discovery and navigation resolution for Chorus.
//!
//! This crate builds the navigation tree served to the presentation layer:
//!
//! - [`RouteNode`]: a navigable page (path, display title, optional children)
//! - [`discover_routes`]: derive route candidates from a page-file hierarchy
//! - [`RouteManifest`]: the declarative route listing the server consumes,
//!   including the path→governing-key table ([`RouteBindings`])
//! - [`resolve_navigation`]: merge CMS visibility and ordering overrides
//!   into the final tree
//!
//! # Architecture
//!
//! Discovery and resolution are independent: discovery produces candidates
//! purely from naming conventions, the resolver consumes candidates plus
//! override data and never touches the filesystem. The server loads its
//! candidates from a [`RouteManifest`] at startup; the directory walk is a
//! CLI-side tool for bootstrapping and cross-checking that manifest.

mod discover;
mod manifest;
mod node;
mod resolve;

pub use discover::{DiscoverConfig, OrphanPolicy, ROUTE_EXEMPT_MARKERS, discover_routes};
pub use manifest::{GALLERY_KEY, ManifestError, RouteBindings, RouteManifest};
pub use node::{RouteNode, title_from_segment};
pub use resolve::{NavOverrides, OrderEntry, resolve_navigation};
