//! Cached CMS access.
//!
//! Wraps [`CmsClient`] in the TTL cache: one bucket per content type, so the
//! revalidation webhook can clear a single content type without touching the
//! rest. Within the TTL window repeated navigation and page renders reuse
//! the fetched documents.

use std::sync::Arc;

use chorus_cache::Cache;
use chorus_routes::NavOverrides;
use tracing::debug;

use crate::client::CmsClient;
use crate::error::CmsError;
use crate::overrides::NavOverridesDoc;

/// Bucket key for the overrides document (one per bucket).
const OVERRIDES_KEY: &str = "overrides";

/// Bucket key for a content type's page document.
const DOCUMENT_KEY: &str = "document";

/// CMS client with a TTL cache in front of every fetch.
pub struct CachedCms {
    client: CmsClient,
    cache: Arc<dyn Cache>,
    settings_type: String,
}

impl CachedCms {
    /// Wrap a client with a cache.
    ///
    /// # Arguments
    ///
    /// * `client` - The underlying CMS client
    /// * `cache` - Cache implementation (use `NullCache` to disable caching)
    /// * `settings_type` - Content type of the overrides document, used as
    ///   its cache tag
    #[must_use]
    pub fn new(client: CmsClient, cache: Arc<dyn Cache>, settings_type: impl Into<String>) -> Self {
        Self {
            client,
            cache,
            settings_type: settings_type.into(),
        }
    }

    /// Fetch navigation overrides, serving from cache within the TTL window.
    ///
    /// # Errors
    ///
    /// Propagates [`CmsError`] from the underlying fetch on cache miss.
    pub fn nav_overrides(&self) -> Result<NavOverrides, CmsError> {
        let bucket = self.cache.bucket(&self.settings_type);

        if let Some(bytes) = bucket.get(OVERRIDES_KEY)
            && let Ok(doc) = serde_json::from_slice::<NavOverridesDoc>(&bytes)
        {
            debug!("navigation overrides served from cache");
            return Ok(doc.into_overrides());
        }

        let doc = self.client.nav_overrides()?;
        bucket.set(OVERRIDES_KEY, &serde_json::to_vec(&doc)?);
        Ok(doc.into_overrides())
    }

    /// Fetch a page-content document, serving from cache within the TTL
    /// window. `None` (content not configured) is cached too.
    ///
    /// # Errors
    ///
    /// Propagates [`CmsError`] from the underlying fetch on cache miss.
    pub fn document(&self, doc_type: &str) -> Result<Option<serde_json::Value>, CmsError> {
        let bucket = self.cache.bucket(doc_type);

        if let Some(bytes) = bucket.get(DOCUMENT_KEY)
            && let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes)
        {
            debug!(doc_type = %doc_type, "document served from cache");
            return Ok(unwrap_missing(value));
        }

        let value = self.client.document(doc_type)?;
        let cached = value.clone().unwrap_or(serde_json::Value::Null);
        bucket.set(DOCUMENT_KEY, &serde_json::to_vec(&cached)?);
        Ok(value)
    }

    /// Drop cached data for one content type.
    pub fn invalidate(&self, content_type: &str) {
        debug!(content_type = %content_type, "invalidating cache tag");
        self.cache.invalidate(content_type);
    }
}

/// Cached `null` means "document does not exist".
fn unwrap_missing(value: serde_json::Value) -> Option<serde_json::Value> {
    if value.is_null() { None } else { Some(value) }
}
