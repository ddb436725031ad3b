//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with Gemfile/Gemfile.lock resolution
//! - RegistryError: Issues with RubyGems source communication
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Registry source related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to Gemfile and Gemfile.lock resolution
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Gemfile or lockfile not found
    #[error("couldn't find {path}")]
    NotFound { path: PathBuf },

    /// Failed to read a manifest file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lockfile content did not parse
    #[error("failed to parse lockfile {path}: {message}")]
    LockfileParseError { path: PathBuf, message: String },

    /// A requirement string in the DEPENDENCIES section did not parse
    #[error("invalid requirement '{requirement}' for gem '{gem}' in {path}")]
    InvalidRequirement {
        path: PathBuf,
        gem: String,
        requirement: String,
    },
}

/// Errors related to RubyGems source communication
///
/// Only `SourceUnavailable` blacklists an endpoint for the run; `NoUsableData`
/// means the endpoint answered but carried nothing useful for the gem, and the
/// next endpoint should be tried without penalizing this one.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Transport-level failure: connect error, timeout, error status, or a
    /// malformed response body
    #[error("source {endpoint} unavailable: {message}")]
    SourceUnavailable { endpoint: String, message: String },

    /// The endpoint answered but has no usable version data for the gem
    #[error("no usable version data for '{gem}' at {endpoint}")]
    NoUsableData { gem: String, endpoint: String },

    /// Every endpoint for the gem was unavailable or lacked usable data
    #[error("no source yielded version data for '{gem}'")]
    AllSourcesFailed { gem: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new LockfileParseError
    pub fn lockfile_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::LockfileParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidRequirement error
    pub fn invalid_requirement(
        path: impl Into<PathBuf>,
        gem: impl Into<String>,
        requirement: impl Into<String>,
    ) -> Self {
        ManifestError::InvalidRequirement {
            path: path.into(),
            gem: gem.into(),
            requirement: requirement.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new SourceUnavailable error
    pub fn source_unavailable(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::SourceUnavailable {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a new NoUsableData error
    pub fn no_usable_data(gem: impl Into<String>, endpoint: impl Into<String>) -> Self {
        RegistryError::NoUsableData {
            gem: gem.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a new AllSourcesFailed error
    pub fn all_sources_failed(gem: impl Into<String>) -> Self {
        RegistryError::AllSourcesFailed { gem: gem.into() }
    }

    /// Returns true if this error should blacklist the endpoint it came from
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, RegistryError::SourceUnavailable { .. })
    }
}
