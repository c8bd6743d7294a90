//! Navigation override document.
//!
//! Shapes of the CMS documents governing navigation visibility and ordering,
//! and their folding into the resolver's [`NavOverrides`] input. Visibility
//! is tri-state at the document level: explicit `true`/`false` are carried
//! over, `null`/absent means inherit the default (visible) and is dropped
//! during folding.

use serde::{Deserialize, Serialize};

use chorus_routes::{GALLERY_KEY, NavOverrides, OrderEntry};

/// Visibility flag of one singleton page document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingletonVisibility {
    /// Governing key (the document type).
    pub key: String,
    /// Explicit visibility, absent meaning inherit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// Visibility of the gallery, which lives on a different document shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryVisibility {
    /// Explicit visibility, absent meaning inherit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// One entry of the curated navigation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavOrderEntry {
    /// Governing key the entry refers to.
    pub id: String,
    /// Optional display-title override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Ordering entries for the referenced node's children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavOrderEntry>>,
}

/// The navigation override document returned by the CMS read query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavOverridesDoc {
    /// Per-singleton visibility flags.
    #[serde(default)]
    pub singletons: Option<Vec<SingletonVisibility>>,
    /// Gallery visibility.
    #[serde(default)]
    pub gallery: Option<GalleryVisibility>,
    /// Curated ordering sequence.
    #[serde(default)]
    pub navigation_order: Option<Vec<NavOrderEntry>>,
}

impl NavOverridesDoc {
    /// Fold the document into resolver input.
    ///
    /// Explicit visibility facts land in the map (the gallery's under the
    /// sentinel key); `null` values are dropped so tri-state inherit works.
    #[must_use]
    pub fn into_overrides(self) -> NavOverrides {
        let mut overrides = NavOverrides::default();

        for singleton in self.singletons.unwrap_or_default() {
            if let Some(visible) = singleton.visible {
                overrides.visibility.insert(singleton.key, visible);
            }
        }
        if let Some(visible) = self.gallery.and_then(|gallery| gallery.visible) {
            overrides.visibility.insert(GALLERY_KEY.to_owned(), visible);
        }
        overrides.order = fold_entries(self.navigation_order.unwrap_or_default());

        overrides
    }
}

fn fold_entries(entries: Vec<NavOrderEntry>) -> Vec<OrderEntry> {
    entries
        .into_iter()
        .map(|entry| OrderEntry {
            key: entry.id,
            title: entry.title,
            children: fold_entries(entry.children.unwrap_or_default()),
        })
        .collect()
}
