//! Error types for modelfetch
//!
//! All modules use `ModelFetchResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for modelfetch operations
pub type ModelFetchResult<T> = Result<T, ModelFetchError>;

/// All errors that can occur while resolving a model
#[derive(Error, Debug)]
pub enum ModelFetchError {
    // Pipeline errors
    #[error("Invalid locator '{locator}': {reason}")]
    LocatorParse { locator: String, reason: String },

    #[error("Download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Couldn't derive an asset name from locator '{0}'")]
    NameExtraction(String),

    #[error("Failed to create asset directory {path}: {source}")]
    DirectoryProvision {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("No .{extension} file found in {directory}")]
    ContentNotFound {
        extension: String,
        directory: PathBuf,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

/// Network retrieval failures
#[derive(Error, Debug)]
pub enum FetchError {
    /// The transport reported a descriptive cause
    #[error("{0}")]
    Transport(String),

    /// The transport failed without saying why
    #[error("Unknown error!")]
    Unknown,
}

/// Archive decompression failures
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("archive {archive} is unreadable: {reason}")]
    Corrupt { archive: PathBuf, reason: String },

    #[error("cannot write {path}: {source}")]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModelFetchError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a locator parse error
    pub fn locator(locator: impl Into<String>, reason: impl ToString) -> Self {
        Self::LocatorParse {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure came from the network layer
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::LocatorParse { .. } => {
                Some("Locators must be absolute http://, https:// or file:// URLs")
            }
            Self::Extraction(ExtractionError::Corrupt { .. }) => {
                Some("The downloaded file is not a valid zip archive")
            }
            Self::ContentNotFound { .. } => Some("Pass --extension to look for another file type"),
            _ if self.is_network() => {
                Some("Check the network connection and that the locator is reachable")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelFetchError::ContentNotFound {
            extension: "gltf".to_string(),
            directory: PathBuf::from("/cache/Models/chair"),
        };
        assert_eq!(err.to_string(), "No .gltf file found in /cache/Models/chair");
    }

    #[test]
    fn unknown_fetch_error_message() {
        let err = ModelFetchError::from(FetchError::Unknown);
        assert_eq!(err.to_string(), "Download failed: Unknown error!");
        assert!(err.is_network());
    }

    #[test]
    fn error_hint() {
        let err = ModelFetchError::locator("nope", "relative URL without a base");
        assert!(err.hint().unwrap().contains("https://"));
        assert!(ModelFetchError::NameExtraction("x".into()).hint().is_none());
    }

    #[test]
    fn network_errors_get_a_hint() {
        let err = ModelFetchError::from(FetchError::Transport("connection refused".into()));
        assert!(err.is_network());
        assert!(err.hint().unwrap().contains("network"));

        let err = ModelFetchError::User("nope".into());
        assert!(!err.is_network());
        assert!(err.hint().is_none());
    }
}
