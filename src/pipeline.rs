//! Fetch → cache → materialize → locate
//!
//! One call to [`ModelPipeline::resolve`] walks these states:
//!
//! ```text
//! CACHE_CHECK --hit--> ENSURE_DIR --> LOCATING
//! CACHE_CHECK --miss--> FETCHING --> CACHE_STORE --> ENSURE_DIR --> EXTRACTING --> LOCATING
//! ```
//!
//! Any failing step ends the call with its error. Nothing is retried.

use crate::cache::{CachedLocation, ResourceCache};
use crate::config::Config;
use crate::error::{ModelFetchError, ModelFetchResult};
use crate::fetch::{parse_locator, ArchiveFetcher, Fetcher};
use crate::locate;
use crate::materialize::{base_name, Materializer};
use futures_util::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Outcome of a successful resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedModel {
    /// Locator as given by the caller
    pub locator: String,
    /// The entry-point file to hand to a model loader
    pub model_path: PathBuf,
    /// Directory holding the extracted archive
    pub asset_dir: PathBuf,
    pub base_name: String,
    /// Whether the download was skipped
    pub cache_hit: bool,
    /// Files unpacked by this call; `None` on a cache hit
    pub extracted_files: Option<usize>,
}

type KeyLock = Arc<tokio::sync::Mutex<()>>;

/// Composes the resource cache, fetcher, materializer and locator
pub struct ModelPipeline {
    cache: Arc<ResourceCache>,
    fetcher: Arc<dyn Fetcher>,
    materializer: Materializer,
    in_flight: Mutex<HashMap<String, KeyLock>>,
}

impl ModelPipeline {
    /// Assemble a pipeline from explicit parts
    pub fn new(
        cache: Arc<ResourceCache>,
        fetcher: Arc<dyn Fetcher>,
        materializer: Materializer,
    ) -> Self {
        Self {
            cache,
            fetcher,
            materializer,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Pipeline with a fresh cache and the default fetcher
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ResourceCache::new()),
            Arc::new(ArchiveFetcher::from_config(&config.fetch)),
            Materializer::new(config.cache.models_root()),
        )
    }

    /// The resource cache shared by every call
    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    pub fn materializer(&self) -> &Materializer {
        &self.materializer
    }

    /// Resolve `locator` to the local file with `extension`.
    ///
    /// Concurrent calls for the same locator are serialized, so only the
    /// first one downloads; the rest see its cache entry.
    pub async fn resolve(&self, locator: &str, extension: &str) -> ModelFetchResult<ResolvedModel> {
        locate::check_extension(extension)?;
        let url = parse_locator(locator)?;
        let base = base_name(&url)?;

        let lock = self.key_lock(locator);
        let guard = lock.lock().await;
        let result = self.resolve_locked(locator, &url, &base, extension).await;
        drop(guard);
        self.release_key(locator, &lock);

        result
    }

    /// Resolve several locators concurrently; results follow input order
    pub async fn resolve_many<S: AsRef<str>>(
        &self,
        locators: &[S],
        extension: &str,
    ) -> Vec<ModelFetchResult<ResolvedModel>> {
        join_all(
            locators
                .iter()
                .map(|locator| self.resolve(locator.as_ref(), extension)),
        )
        .await
    }

    async fn resolve_locked(
        &self,
        locator: &str,
        url: &url::Url,
        base: &str,
        extension: &str,
    ) -> ModelFetchResult<ResolvedModel> {
        let fresh = match self.cache.lookup(locator) {
            Some(hit) => {
                debug!(
                    "Cache hit for {} (fetched {})",
                    locator,
                    hit.fetched_at.to_rfc3339()
                );
                None
            }
            None => {
                debug!("Cache miss for {}", locator);
                let archive = self.fetcher.fetch(url).await?;
                self.cache.store(
                    locator,
                    CachedLocation::new(self.materializer.asset_dir(base), base),
                );
                Some(archive)
            }
        };
        let cache_hit = fresh.is_none();

        let dir = self.materializer.ensure_extraction_directory(base).await?;

        let extracted_files = match fresh {
            Some(archive) => {
                let stats = self.materializer.extract(archive.path(), &dir.path).await?;
                Some(stats.files)
            }
            None => {
                if dir.created {
                    warn!(
                        "Asset directory {} was missing for cached locator {}",
                        dir.path.display(),
                        locator
                    );
                }
                debug!("Skipping extraction, trusting {}", dir.path.display());
                None
            }
        };

        let model_path = find_entry_point(dir.path.clone(), extension).await?;

        info!("Resolved {} -> {}", locator, model_path.display());
        Ok(ResolvedModel {
            locator: locator.to_string(),
            model_path,
            asset_dir: dir.path,
            base_name: base.to_string(),
            cache_hit,
            extracted_files,
        })
    }

    fn key_lock(&self, key: &str) -> KeyLock {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(in_flight.entry(key.to_string()).or_default())
    }

    fn release_key(&self, key: &str, lock: &KeyLock) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map and the caller still hold it
        if Arc::strong_count(lock) == 2 {
            in_flight.remove(key);
        }
    }
}

async fn find_entry_point(directory: PathBuf, extension: &str) -> ModelFetchResult<PathBuf> {
    let wanted = extension.to_string();
    let dir = directory.clone();

    let found = tokio::task::spawn_blocking(move || locate::find_first_by_extension(&dir, &wanted))
        .await
        .map_err(|e| ModelFetchError::io("joining directory scan", std::io::Error::other(e)))?;

    found.ok_or_else(|| ModelFetchError::ContentNotFound {
        extension: extension.trim_start_matches('.').to_string(),
        directory,
    })
}
