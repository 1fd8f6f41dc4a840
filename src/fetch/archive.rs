//! Default fetcher backed by `ureq` for http(s) and the filesystem for file://

use super::{FetchedArchive, Fetcher};
use crate::config::FetchConfig;
use crate::error::{FetchError, ModelFetchResult};
use async_trait::async_trait;
use std::fs::File;
use std::io::{self, Read, Write};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use url::Url;

/// Fetches archives over HTTP(S) or from local `file://` paths.
///
/// Blocking transport work runs on tokio's blocking pool so callers on the
/// async runtime are never stalled. No retries are attempted.
#[derive(Clone)]
pub struct ArchiveFetcher {
    agent: ureq::Agent,
    user_agent: Option<String>,
}

impl ArchiveFetcher {
    /// Create a fetcher with the transport defaults
    pub fn new() -> Self {
        Self::from_config(&FetchConfig::default())
    }

    /// Create a fetcher from the `[fetch]` config section
    pub fn from_config(config: &FetchConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(config.timeout_secs.map(Duration::from_secs))
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            user_agent: config.user_agent.clone(),
        }
    }

    fn download_blocking(&self, url: &Url) -> Result<FetchedArchive, FetchError> {
        let mut file = tempfile::Builder::new()
            .prefix("modelfetch-")
            .suffix(".download")
            .tempfile()
            .map_err(|e| FetchError::Transport(format!("creating temporary file: {}", e)))?;

        let size = match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| FetchError::Transport(format!("{} is not a local path", url)))?;
                let mut source = File::open(&path)
                    .map_err(|e| FetchError::Transport(format!("{}: {}", path.display(), e)))?;
                copy_into(&mut source, &mut file)?
            }
            _ => {
                let mut request = self.agent.get(url.as_str());
                if let Some(ref ua) = self.user_agent {
                    request = request.header("User-Agent", ua.as_str());
                }

                let response = request
                    .call()
                    .map_err(|e| FetchError::Transport(e.to_string()))?;
                debug!("{} responded with {}", url, response.status());

                let mut body = response.into_body().into_reader();
                copy_into(&mut body, &mut file)?
            }
        };

        Ok(FetchedArchive::new(file, size))
    }
}

/// Stream `source` into the temp file and make sure it reached the disk
fn copy_into(source: &mut impl Read, file: &mut NamedTempFile) -> Result<u64, FetchError> {
    let written = io::copy(source, file).map_err(|e| FetchError::Transport(e.to_string()))?;
    file.flush()
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| FetchError::Transport(format!("writing temporary file: {}", e)))?;
    Ok(written)
}

/// A download task that ended without a result carries no transport cause
fn join_failure(locator: &Url, err: tokio::task::JoinError) -> FetchError {
    warn!("Download task for {} did not complete: {}", locator, err);
    FetchError::Unknown
}

impl Default for ArchiveFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for ArchiveFetcher {
    async fn fetch(&self, locator: &Url) -> ModelFetchResult<FetchedArchive> {
        info!("Downloading {}", locator);

        let fetcher = self.clone();
        let url = locator.clone();
        let archive = tokio::task::spawn_blocking(move || fetcher.download_blocking(&url))
            .await
            .map_err(|e| join_failure(locator, e))??;

        debug!(
            "Downloaded {} bytes to {}",
            archive.size(),
            archive.path().display()
        );
        Ok(archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelFetchError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn fetches_file_locator() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("widget-42.zip");
        std::fs::write(&source, b"PK\x03\x04 not really a zip").unwrap();
        let url = Url::from_file_path(&source).unwrap();

        let archive = ArchiveFetcher::new().fetch(&url).await.unwrap();

        assert_eq!(archive.size(), 21);
        assert_eq!(
            std::fs::read(archive.path()).unwrap(),
            b"PK\x03\x04 not really a zip"
        );
    }

    #[tokio::test]
    async fn temp_file_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.zip");
        std::fs::write(&source, b"bytes").unwrap();
        let url = Url::from_file_path(&source).unwrap();

        let archive = ArchiveFetcher::new().fetch(&url).await.unwrap();
        let path = archive.path().to_path_buf();
        assert!(path.exists());

        drop(archive);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn missing_local_file_is_transport_error() {
        let dir = TempDir::new().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.zip")).unwrap();

        let err = ArchiveFetcher::new().fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            ModelFetchError::Fetch(FetchError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn dead_download_task_is_unknown_error() {
        let join_err = tokio::task::spawn_blocking(|| panic!("download thread died"))
            .await
            .unwrap_err();
        let url = Url::parse("https://example.test/widget-42.zip").unwrap();

        let err = ModelFetchError::from(join_failure(&url, join_err));

        assert!(matches!(err, ModelFetchError::Fetch(FetchError::Unknown)));
        assert_eq!(err.to_string(), "Download failed: Unknown error!");
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        // Port 9 on localhost (discard) is expected to refuse connections
        let url = Url::parse("http://127.0.0.1:9/widget.zip").unwrap();
        let fetcher = ArchiveFetcher::from_config(&FetchConfig {
            timeout_secs: Some(5),
            user_agent: Some("modelfetch-test".to_string()),
        });

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            ModelFetchError::Fetch(FetchError::Transport(_))
        ));
    }
}
