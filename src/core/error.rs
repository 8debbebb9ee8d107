//! Error types for badref.
//!
//! Uses thiserror for structured errors with context. Only the outer layers
//! produce errors: anything the validator discovers about the ownership graph
//! is a [`Finding`](crate::validation::Finding), never an `Err`.
//!
//! - [`EnumerationError`] is fatal and aborts the run before a catalog exists
//! - [`ListError`] is scoped to a single resource kind and is recoverable
//! - [`ConfigError`] covers loading the optional configuration file

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Unique identifier of an object in the store.
///
/// Opaque to badref: it is compared for equality and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(pub String);

impl Uid {
    /// Create a uid from anything string-like.
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty identifier (record without `metadata.uid`).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Uid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Uid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level error type for badref.
#[derive(Error, Debug)]
pub enum BadrefError {
    /// Discovery or listing could not run.
    #[error("Enumeration error: {0}")]
    Enumeration(#[from] EnumerationError),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Fatal setup and connectivity failures.
///
/// Any of these stops the run before a catalog is built.
#[derive(Error, Debug)]
pub enum EnumerationError {
    /// The snapshot root is not a directory.
    #[error("Snapshot directory {} does not exist", .path.display())]
    SnapshotMissing {
        /// Configured snapshot root.
        path: PathBuf,
    },

    /// The discovery document could not be read.
    #[error("Failed to read discovery document {}: {error}", .path.display())]
    DiscoveryRead {
        /// Path of `discovery.json`.
        path: PathBuf,
        /// Underlying I/O failure.
        error: std::io::Error,
    },

    /// The discovery document is not valid JSON of the expected shape.
    #[error("Malformed discovery document {}: {error}", .path.display())]
    DiscoveryParse {
        /// Path of `discovery.json`.
        path: PathBuf,
        /// Decoder failure.
        error: serde_json::Error,
    },

    /// Discovery returned an empty or malformed group-version.
    #[error("Invalid group version '{0}'")]
    InvalidGroupVersion(String),

    /// The run was cancelled through its [`CancelHandle`](crate::enumeration::CancelHandle).
    #[error("Enumeration cancelled after listing {listed} kind(s)")]
    Cancelled {
        /// Kinds listed before cancellation was noticed.
        listed: usize,
    },

    /// The enumeration deadline elapsed.
    #[error("Enumeration timed out after {duration_secs} seconds")]
    Timeout {
        /// Configured deadline.
        duration_secs: u64,
    },

    /// Backend-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Failure while listing the instances of a single resource kind.
#[derive(Error, Debug)]
pub enum ListError {
    /// No list document was captured for the kind.
    #[error("list document {} not found", .path.display())]
    NotFound {
        /// Expected list document path.
        path: PathBuf,
    },

    /// The list document exists but could not be read.
    #[error("failed to read {}: {error}", .path.display())]
    Read {
        /// List document path.
        path: PathBuf,
        /// Underlying I/O failure.
        error: std::io::Error,
    },

    /// The list document is not a valid list.
    #[error("failed to decode {}: {error}", .path.display())]
    Decode {
        /// List document path.
        path: PathBuf,
        /// Decoder failure.
        error: serde_json::Error,
    },

    /// The kind lacks the `list` verb.
    #[error("kind does not support listing")]
    NotListable,

    /// Backend-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Errors from loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {error}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        error: std::io::Error,
    },

    /// The config file is not valid TOML for [`AuditConfig`](crate::core::AuditConfig).
    #[error("Invalid config file {}: {error}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Decoder failure.
        error: toml::de::Error,
    },

    /// An output format name other than `text` or `json`.
    #[error("Unknown output format '{0}' (expected 'text' or 'json')")]
    UnknownFormat(String),
}

// ============================================================================
// Error Utilities
// ============================================================================

impl EnumerationError {
    /// Suggestion shown to the operator next to the error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            EnumerationError::SnapshotMissing { path } => Some(format!(
                "Capture a snapshot into '{}' or pass --snapshot",
                path.display()
            )),
            EnumerationError::DiscoveryRead { .. } | EnumerationError::DiscoveryParse { .. } => {
                Some("Re-run discovery and write its output to discovery.json".to_string())
            }
            EnumerationError::Timeout { .. } => {
                Some("Raise --timeout or list_timeout_secs".to_string())
            }
            _ => None,
        }
    }
}

impl BadrefError {
    /// Suggestion shown to the operator next to the error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            BadrefError::Enumeration(e) => e.suggested_fix(),
            BadrefError::Config(ConfigError::UnknownFormat(_)) => {
                Some("Use --format text or --format json".to_string())
            }
            BadrefError::Config(_) => None,
        }
    }
}

/// Result type alias for badref operations.
pub type BadrefResult<T> = Result<T, BadrefError>;

/// Result type alias for enumeration.
pub type EnumerationResult<T> = Result<T, EnumerationError>;

/// Result type alias for listing a single kind.
pub type ListResult<T> = Result<T, ListError>;
