//! Asset directory provisioning and archive extraction
//!
//! Every resource gets a directory named after its base name under the
//! models root:
//!
//! ```text
//! <cache-root>/Models/<base-name>/...extracted files...
//! ```
//!
//! The directory is the only on-disk signal that an asset was materialized.
//! Its contents are trusted once present; nothing verifies them against the
//! archive they came from.

use crate::error::{ExtractionError, ModelFetchError, ModelFetchResult};
use std::fs::{self as stdfs, File};
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use url::Url;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Derive the base name of a locator: the final path segment up to its
/// first `.`.
///
/// `https://example.test/assets/widget-42.zip` becomes `widget-42`.
pub fn base_name(locator: &Url) -> ModelFetchResult<String> {
    let segment = locator
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();

    match segment.split('.').next() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ModelFetchError::NameExtraction(locator.to_string())),
    }
}

/// An asset directory that is known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedDir {
    pub path: PathBuf,
    /// False when the directory was already there
    pub created: bool,
}

/// Summary of an extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub files: usize,
    pub bytes: u64,
}

/// Owns the models root and everything materialized below it
#[derive(Debug, Clone)]
pub struct Materializer {
    models_root: PathBuf,
}

impl Materializer {
    /// Create a materializer rooted at `models_root` (e.g. `<cache-root>/Models`)
    pub fn new(models_root: impl Into<PathBuf>) -> Self {
        Self {
            models_root: models_root.into(),
        }
    }

    /// Directory holding every asset directory
    pub fn models_root(&self) -> &Path {
        &self.models_root
    }

    /// Asset directory for a base name. Two resources with the same base
    /// name share a directory.
    pub fn asset_dir(&self, base_name: &str) -> PathBuf {
        self.models_root.join(base_name)
    }

    /// Create the asset directory (and parents) unless it already exists.
    ///
    /// Existing contents are left untouched.
    pub async fn ensure_extraction_directory(
        &self,
        base_name: &str,
    ) -> ModelFetchResult<ProvisionedDir> {
        let path = self.asset_dir(base_name);

        if fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
            debug!("Asset directory {} already exists", path.display());
            return Ok(ProvisionedDir {
                path,
                created: false,
            });
        }

        fs::create_dir_all(&path)
            .await
            .map_err(|e| ModelFetchError::DirectoryProvision {
                path: path.clone(),
                source: e,
            })?;

        debug!("Created asset directory {}", path.display());
        Ok(ProvisionedDir {
            path,
            created: true,
        })
    }

    /// Unpack every entry of the zip at `archive` into `into`.
    ///
    /// Entries land in a staging directory inside `into` and are moved into
    /// place only after the whole archive was read, so a failed extraction
    /// adds nothing to `into`. Files already present with the same name are
    /// overwritten.
    pub async fn extract(&self, archive: &Path, into: &Path) -> ModelFetchResult<ExtractStats> {
        let archive_path = archive.to_path_buf();
        let target = into.to_path_buf();

        let stats = tokio::task::spawn_blocking(move || extract_zip(&archive_path, &target))
            .await
            .map_err(|e| {
                ModelFetchError::io("joining extraction task", std::io::Error::other(e))
            })??;

        info!(
            "Extracted {} files ({} bytes) into {}",
            stats.files,
            stats.bytes,
            into.display()
        );
        Ok(stats)
    }
}

fn extract_zip(archive: &Path, target: &Path) -> Result<ExtractStats, ExtractionError> {
    let corrupt = |reason: String| ExtractionError::Corrupt {
        archive: archive.to_path_buf(),
        reason,
    };
    let unwritable = |path: &Path, source: std::io::Error| ExtractionError::Unwritable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(archive).map_err(|e| corrupt(e.to_string()))?;
    let mut zip =
        zip::ZipArchive::new(BufReader::new(file)).map_err(|e| corrupt(e.to_string()))?;

    // Removed on drop, taking any partial output with it
    let staging = tempfile::Builder::new()
        .prefix(".extract-")
        .tempdir_in(target)
        .map_err(|e| unwritable(target, e))?;

    let mut stats = ExtractStats::default();
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|e| corrupt(e.to_string()))?;
        let relative = entry.enclosed_name().ok_or_else(|| {
            corrupt(format!(
                "entry '{}' points outside the target directory",
                entry.name()
            ))
        })?;
        let out_path = staging.path().join(relative);

        if entry.is_dir() {
            stdfs::create_dir_all(&out_path).map_err(|e| unwritable(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            stdfs::create_dir_all(parent).map_err(|e| unwritable(parent, e))?;
        }
        let mut out = File::create(&out_path).map_err(|e| unwritable(&out_path, e))?;

        // Read and write separately so a bad entry is told apart from a full disk
        loop {
            let n = match entry.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(corrupt(format!("{}: {}", entry.name(), e))),
            };
            out.write_all(&buf[..n])
                .map_err(|e| unwritable(&out_path, e))?;
            stats.bytes += n as u64;
        }
        out.flush().map_err(|e| unwritable(&out_path, e))?;
        stats.files += 1;
    }

    move_staged(staging.path(), target).map_err(|e| unwritable(target, e))?;
    Ok(stats)
}

/// Move everything below `src` into `dest`, merging into directories that
/// already exist there
fn move_staged(src: &Path, dest: &Path) -> std::io::Result<()> {
    for entry in stdfs::read_dir(src)? {
        let entry = entry?;
        let destination = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() && destination.is_dir() {
            move_staged(&entry.path(), &destination)?;
        } else {
            stdfs::rename(entry.path(), destination)?;
        }
    }
    Ok(())
}
