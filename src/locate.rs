//! Entry-point lookup inside an asset directory

use crate::error::{ModelFetchError, ModelFetchResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Normalize a requested extension: trimmed, no leading dot, lowercase
fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Reject an extension that is empty once normalized
pub fn check_extension(extension: &str) -> ModelFetchResult<()> {
    if normalize_extension(extension).is_empty() {
        return Err(ModelFetchError::User(format!(
            "Extension must not be empty (got '{}')",
            extension
        )));
    }
    Ok(())
}

fn matches_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.to_lowercase() == wanted)
}

/// All non-directory entries of `directory` whose extension matches,
/// sorted by file name.
///
/// The scan is not recursive. A directory that cannot be listed yields an
/// empty list.
pub fn list_by_extension(directory: &Path, extension: &str) -> Vec<PathBuf> {
    let wanted = normalize_extension(extension);

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", directory.display(), e);
            return Vec::new();
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| !t.is_dir()))
        .map(|entry| entry.path())
        .filter(|path| matches_extension(path, &wanted))
        .collect();

    // Listing order is filesystem dependent
    matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    matches
}

/// First file in `directory` with the given extension, compared
/// case-insensitively. `None` covers both "no match" and "cannot list".
pub fn find_first_by_extension(directory: &Path, extension: &str) -> Option<PathBuf> {
    let found = list_by_extension(directory, extension).into_iter().next();

    if found.is_none() {
        debug!(
            "No .{} file in {}",
            normalize_extension(extension),
            directory.display()
        );
    }
    found
}
