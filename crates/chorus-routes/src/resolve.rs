//! Visibility and ordering resolution.
//!
//! Takes discovered route candidates plus CMS-sourced override data and
//! produces the final navigation tree:
//!
//! 1. Visibility filter — an explicit `false` for a node's governing key
//!    excludes the node and its entire subtree; keyless nodes are always
//!    visible.
//! 2. Title override — an order entry matching the node's governing key and
//!    carrying a non-empty title replaces the node's title.
//! 3. Ordering — stable sort by the governing key's position in the order
//!    sequence; unranked and keyless nodes sort after all ranked nodes in
//!    discovery order.
//!
//! The resolver is pure: no I/O, no error path. Fetch failures are the
//! caller's concern.

use std::collections::HashMap;

use crate::manifest::RouteBindings;
use crate::node::RouteNode;

/// One entry of the CMS-curated ordering sequence.
///
/// Position defines rank; a non-empty `title` overrides the display title;
/// `children` entries rank a node's child sequence.
#[derive(Clone, Debug, Default)]
pub struct OrderEntry {
    /// Governing key this entry refers to.
    pub key: String,
    /// Optional display-title override.
    pub title: Option<String>,
    /// Ordering for the referenced node's children.
    pub children: Vec<OrderEntry>,
}

impl OrderEntry {
    /// Entry with no title override and no children.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }
}

/// Override data fetched from the CMS, keyed by governing key.
///
/// `visibility` holds only explicit `true`/`false` facts; a key absent from
/// the map inherits the default (visible). Callers folding CMS documents in
/// drop `null` values rather than inserting them.
#[derive(Clone, Debug, Default)]
pub struct NavOverrides {
    /// Explicit per-key visibility flags.
    pub visibility: HashMap<String, bool>,
    /// Curated ordering and title overrides.
    pub order: Vec<OrderEntry>,
}

/// Resolve the final navigation tree for display.
///
/// `routes` is the candidate list in discovery order (with any synthetic
/// nodes such as `Home` already prepended — they take part in ordering like
/// every other route).
#[must_use]
pub fn resolve_navigation(
    routes: Vec<RouteNode>,
    bindings: &RouteBindings,
    overrides: &NavOverrides,
) -> Vec<RouteNode> {
    let mut visible = filter_visible(routes, bindings, overrides);
    apply_titles(&mut visible, bindings, &overrides.order);
    order_level(&mut visible, bindings, &overrides.order, &overrides.order);
    visible
}

/// Drop nodes whose governing key is overridden to `false`, subtree and all.
fn filter_visible(
    routes: Vec<RouteNode>,
    bindings: &RouteBindings,
    overrides: &NavOverrides,
) -> Vec<RouteNode> {
    routes
        .into_iter()
        .filter_map(|mut node| {
            if let Some(key) = bindings.key_for(&node.path)
                && overrides.visibility.get(key) == Some(&false)
            {
                return None;
            }
            if let Some(children) = node.children.take() {
                let kept = filter_visible(children, bindings, overrides);
                if !kept.is_empty() {
                    node.children = Some(kept);
                }
            }
            Some(node)
        })
        .collect()
}

/// Find the entry for `key` anywhere in the order tree.
fn find_entry<'a>(entries: &'a [OrderEntry], key: &str) -> Option<&'a OrderEntry> {
    for entry in entries {
        if entry.key == key {
            return Some(entry);
        }
        if let Some(found) = find_entry(&entry.children, key) {
            return Some(found);
        }
    }
    None
}

/// Replace titles where the matching order entry carries a non-empty one.
fn apply_titles(nodes: &mut [RouteNode], bindings: &RouteBindings, order: &[OrderEntry]) {
    for node in nodes.iter_mut() {
        if let Some(key) = bindings.key_for(&node.path)
            && let Some(entry) = find_entry(order, key)
            && let Some(title) = entry.title.as_deref()
            && !title.is_empty()
        {
            node.title = title.to_owned();
        }
        if let Some(children) = node.children.as_mut() {
            apply_titles(children, bindings, order);
        }
    }
}

/// Rank of a governing key within a level's order entries; unranked keys
/// (and keyless nodes) sort after every ranked one.
fn rank(entries: &[OrderEntry], key: Option<&str>) -> usize {
    key.and_then(|k| entries.iter().position(|entry| entry.key == k))
        .unwrap_or(usize::MAX)
}

/// Stable rank sort of one level, recursing into children.
///
/// Children are ranked against the matching parent entry's nested children;
/// without one they keep discovery order.
fn order_level(
    nodes: &mut [RouteNode],
    bindings: &RouteBindings,
    root: &[OrderEntry],
    level: &[OrderEntry],
) {
    nodes.sort_by_key(|node| rank(level, bindings.key_for(&node.path)));
    for node in nodes.iter_mut() {
        let Some(children) = node.children.as_mut() else {
            continue;
        };
        let nested = bindings
            .key_for(&node.path)
            .and_then(|key| find_entry(root, key))
            .map_or(&[][..], |entry| entry.children.as_slice());
        order_level(children, bindings, root, nested);
    }
}
