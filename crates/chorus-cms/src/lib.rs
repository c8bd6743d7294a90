//! Headless CMS read client for Chorus.
//!
//! The site never writes to the CMS; this crate issues read queries and
//! shapes the results for the rest of the system:
//!
//! - [`CmsClient`]: sync HTTP client for the CMS query endpoint
//! - [`NavOverridesDoc`]: the navigation override document (singleton
//!   visibility flags, gallery visibility, curated ordering) and its folding
//!   into [`chorus_routes::NavOverrides`]
//! - [`CachedCms`]: client wrapped in the TTL cache, one bucket per content
//!   type, with tag invalidation for the revalidation webhook

mod cached;
mod client;
mod error;
mod overrides;

pub use cached::CachedCms;
pub use client::CmsClient;
pub use error::CmsError;
pub use overrides::{GalleryVisibility, NavOrderEntry, NavOverridesDoc, SingletonVisibility};
