//! In-process TTL cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::{Cache, CacheBucket};

/// One stored value with its insertion time.
struct Entry {
    value: Vec<u8>,
    stored_at: Instant,
}

/// Shared storage behind every handle of one bucket.
#[derive(Default)]
struct BucketStore {
    entries: RwLock<HashMap<String, Entry>>,
}

/// In-process [`Cache`] with a fixed TTL per entry.
///
/// Entries older than the TTL miss on read; the revalidation window is an
/// explicit configuration value rather than ambient framework behavior.
/// A zero TTL makes every read a miss.
///
/// # Thread Safety
///
/// Bucket handles share their store through `Arc`; all interior access goes
/// through `RwLock`s, so the cache can be used from concurrent request
/// handlers without external locking.
pub struct MemoryCache {
    ttl: Duration,
    buckets: RwLock<HashMap<String, Arc<BucketStore>>>,
}

impl MemoryCache {
    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            buckets: RwLock::new(HashMap::new()),
        }
    }

    /// The configured entry lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn store(&self, name: &str) -> Arc<BucketStore> {
        if let Some(store) = self.buckets.read().unwrap().get(name) {
            return Arc::clone(store);
        }
        let mut buckets = self.buckets.write().unwrap();
        Arc::clone(buckets.entry(name.to_owned()).or_default())
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryBucket {
            store: self.store(name),
            ttl: self.ttl,
        })
    }

    fn invalidate(&self, name: &str) {
        if let Some(store) = self.buckets.read().unwrap().get(name) {
            store.entries.write().unwrap().clear();
        }
    }
}

/// Handle to one named bucket of a [`MemoryCache`].
pub struct MemoryBucket {
    store: Arc<BucketStore>,
    ttl: Duration,
}

impl CacheBucket for MemoryBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.store.entries.read().unwrap();
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: &str, value: &[u8]) {
        self.store.entries.write().unwrap().insert(
            key.to_owned(),
            Entry {
                value: value.to_vec(),
                stored_at: Instant::now(),
            },
        );
    }

    fn clear(&self) {
        self.store.entries.write().unwrap().clear();
    }
}
