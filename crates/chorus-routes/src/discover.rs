//! Route discovery from a page-file hierarchy.
//!
//! Walks a content directory and produces route candidates purely from
//! naming conventions: each directory that directly contains the
//! page-defining file becomes a [`RouteNode`], with its title derived from
//! the directory name. Entries carrying a route-exempt naming marker are
//! skipped.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::node::{RouteNode, title_from_segment};

/// Name prefixes that mark a directory as non-routable.
pub const ROUTE_EXEMPT_MARKERS: [char; 4] = ['_', '.', '(', '['];

/// What to do with descendants of a directory that has no page of its own.
///
/// The reference behavior discovers such descendants and then discards them
/// at the parent level. That gap is surfaced here as an explicit choice
/// rather than silently reproduced or silently fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Discard routable descendants of page-less directories.
    #[default]
    Drop,
    /// Splice routable descendants into the parent level.
    Promote,
}

/// Discovery settings.
#[derive(Clone, Debug)]
pub struct DiscoverConfig {
    /// File whose presence makes a directory a routable page.
    pub page_filename: String,
    /// Handling of page-less container directories.
    pub orphan_policy: OrphanPolicy,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            page_filename: "page.md".to_owned(),
            orphan_policy: OrphanPolicy::default(),
        }
    }
}

/// Discover route candidates beneath `root`.
///
/// Entries are visited in name order so discovery order is deterministic.
/// The synthetic `Home` node is prepended by callers, never produced here.
///
/// # Errors
///
/// Returns an I/O error if `root` (or a subdirectory mid-walk) cannot be
/// read. A missing content root is a configuration fault, not a runtime
/// case this walk degrades around.
pub fn discover_routes(root: &Path, config: &DiscoverConfig) -> io::Result<Vec<RouteNode>> {
    walk(root, "", config)
}

fn walk(dir: &Path, base: &str, config: &DiscoverConfig) -> io::Result<Vec<RouteNode>> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut routes = Vec::new();
    for entry in entries {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with(ROUTE_EXEMPT_MARKERS) {
            continue;
        }
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let path = format!("{base}/{name}");
        let entry_dir = entry.path();
        if entry_dir.join(&config.page_filename).is_file() {
            let children = walk(&entry_dir, &path, config)?;
            routes.push(RouteNode::new(path, title_from_segment(name)).with_children(children));
        } else {
            let descendants = walk(&entry_dir, &path, config)?;
            match config.orphan_policy {
                OrphanPolicy::Drop => {}
                OrphanPolicy::Promote => routes.extend(descendants),
            }
        }
    }

    Ok(routes)
}
