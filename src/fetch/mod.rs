//! Archive retrieval
//!
//! Provides a trait for fetching a remote archive into a local temporary file
//! so the pipeline can be driven by the real network client or by a fake.

mod archive;

pub use archive::ArchiveFetcher;

use crate::error::{ModelFetchError, ModelFetchResult};
use async_trait::async_trait;
use std::path::Path;
use tempfile::NamedTempFile;
use url::Url;

/// Schemes the pipeline knows how to retrieve
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "file"];

/// Parse a resource locator, rejecting anything that is not an absolute
/// URL with a supported scheme. No I/O happens here.
pub fn parse_locator(locator: &str) -> ModelFetchResult<Url> {
    let url = Url::parse(locator.trim()).map_err(|e| ModelFetchError::locator(locator, e))?;

    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(ModelFetchError::locator(
            locator,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// A fully written archive in a temporary file.
///
/// The file is removed when this value is dropped.
#[derive(Debug)]
pub struct FetchedArchive {
    file: NamedTempFile,
    size: u64,
}

impl FetchedArchive {
    /// Wrap a temp file that has been completely written and flushed
    pub fn new(file: NamedTempFile, size: u64) -> Self {
        Self { file, size }
    }

    /// Where the archive bytes live
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of bytes retrieved
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Retrieves the raw archive behind a locator
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download `locator` into a temporary file
    async fn fetch(&self, locator: &Url) -> ModelFetchResult<FetchedArchive>;
}
