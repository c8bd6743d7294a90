//! Navigation tree node.

use serde::{Deserialize, Serialize};

/// One navigable page in the site's navigation tree.
///
/// `children` is `None` for leaves — an empty child list is never produced,
/// so serialized trees omit the field entirely for leaf nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Display title.
    pub title: String,
    /// Absolute URL path; the root is `"/"`.
    pub path: String,
    /// Child routes, absent for leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RouteNode>>,
}

impl RouteNode {
    /// Create a leaf node.
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            children: None,
        }
    }

    /// Attach children. An empty vector leaves the node a leaf.
    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        if !children.is_empty() {
            self.children = Some(children);
        }
        self
    }

    /// The synthetic root node callers prepend to discovered routes.
    #[must_use]
    pub fn home() -> Self {
        Self::new("/", "Home")
    }

    /// Trailing path segment (empty for the root).
    #[must_use]
    pub fn segment(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }
}

/// Derive a display title from a path segment.
///
/// Splits on hyphens and capitalizes each word's first letter:
/// `"my-cool-page"` becomes `"My Cool Page"`.
#[must_use]
pub fn title_from_segment(segment: &str) -> String {
    segment
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a word.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_segment_single_word() {
        assert_eq!(title_from_segment("agenda"), "Agenda");
    }

    #[test]
    fn test_title_from_segment_hyphenated() {
        assert_eq!(title_from_segment("my-cool-page"), "My Cool Page");
    }

    #[test]
    fn test_title_from_segment_collapses_empty_words() {
        assert_eq!(title_from_segment("a--b"), "A B");
    }

    #[test]
    fn test_with_children_empty_stays_leaf() {
        let node = RouteNode::new("/agenda", "Agenda").with_children(Vec::new());
        assert!(node.children.is_none());
    }

    #[test]
    fn test_segment() {
        assert_eq!(RouteNode::new("/gospelproject/team", "Team").segment(), "team");
        assert_eq!(RouteNode::home().segment(), "");
    }

    #[test]
    fn test_leaf_serialization_omits_children() {
        let node = RouteNode::new("/agenda", "Agenda");
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("children").is_none());
    }
}
