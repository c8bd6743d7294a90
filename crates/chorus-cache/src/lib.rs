//! Cache abstraction layer for Chorus.
//!
//! This crate provides the cache-with-TTL collaborator that sits in front
//! of the CMS fetch boundary. Two traits form the core API:
//!
//! - [`Cache`]: factory for named cache buckets, with tag-level invalidation
//! - [`CacheBucket`]: key-value store whose entries expire after a TTL
//!
//! Bucket names double as invalidation tags: the revalidation webhook clears
//! one content type's bucket without touching the rest.
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: no-op implementations (always miss)
//! - [`MemoryCache`]: in-process implementation with TTL expiry
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use chorus_cache::{Cache, MemoryCache};
//!
//! let cache = MemoryCache::new(Duration::from_secs(60));
//! let bucket = cache.bucket("siteSettings");
//! bucket.set("overrides", b"{}");
//! assert_eq!(bucket.get("overrides"), Some(b"{}".to_vec()));
//! cache.invalidate("siteSettings");
//! assert_eq!(bucket.get("overrides"), None);
//! ```

mod memory;
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Each bucket stores key-value pairs that expire once they outlive the
/// cache's TTL. Expiry is checked on read; a stale entry is a miss.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `Some(value)` if the key exists and its entry is still within
    /// the TTL window. Returns `None` on miss or expiry.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value, resetting its TTL window.
    ///
    /// Overwrites any existing entry for the same key.
    fn set(&self, key: &str, value: &[u8]);

    /// Drop every entry in this bucket.
    fn clear(&self);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// Buckets are logically isolated from each other; calling `bucket` multiple
/// times with the same name may return independent handles sharing the same
/// underlying storage. Bucket names are also the invalidation tags consumed
/// by [`Cache::invalidate`].
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;

    /// Drop every entry stored under the named bucket.
    fn invalidate(&self, name: &str);
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8]) {}

    fn clear(&self) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled. All operations are no-ops and all lookups
/// return `None`.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }

    fn invalidate(&self, _name: &str) {}
}
