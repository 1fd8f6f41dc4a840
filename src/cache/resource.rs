//! In-memory resource cache keyed by locator

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

/// What the cache remembers about a resource whose archive was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedLocation {
    /// Asset directory the archive was materialized into
    pub asset_dir: PathBuf,
    /// Base name derived from the locator
    pub base_name: String,
    /// When the archive was downloaded
    pub fetched_at: DateTime<Utc>,
}

impl CachedLocation {
    /// Create an entry stamped with the current time
    pub fn new(asset_dir: PathBuf, base_name: impl Into<String>) -> Self {
        Self {
            asset_dir,
            base_name: base_name.into(),
            fetched_at: Utc::now(),
        }
    }
}

/// Process-lifetime map from resource key to [`CachedLocation`].
///
/// Keys are compared verbatim: two locators that differ textually are
/// separate entries even when they point at the same content. Entries never
/// expire and the map is unbounded.
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: RwLock<HashMap<String, CachedLocation>>,
}

impl ResourceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously stored location
    pub fn lookup(&self, key: &str) -> Option<CachedLocation> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    /// Insert or overwrite the location for `key` (last write wins)
    pub fn store(&self, key: impl Into<String>, location: CachedLocation) {
        let key = key.into();
        debug!("Caching {} -> {}", key, location.asset_dir.display());
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, location);
    }

    /// Number of cached resources
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every entry
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}
