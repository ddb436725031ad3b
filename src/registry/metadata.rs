//! Wire documents returned by the RubyGems API
//!
//! Two documents per gem:
//! - `GET /api/v1/gems/{name}.json` carries the latest stable version
//! - `GET /api/v1/versions/{name}.json` carries the full version history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The gem summary document; only the latest-version field matters here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemDocument {
    /// Latest stable version as reported by the registry; registries can
    /// mirror incomplete data, so this is nullable
    #[serde(default)]
    pub version: Option<String>,
}

/// One entry of the version history document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Version string, e.g. "7.0.4" or "2.2.0.rc1"
    pub number: String,
    /// Build timestamp; not every mirror carries it
    #[serde(default)]
    pub built_at: Option<DateTime<Utc>>,
    /// Registry prerelease marker
    #[serde(default)]
    pub prerelease: bool,
}

impl VersionRecord {
    /// Creates a new VersionRecord
    pub fn new(number: impl Into<String>, built_at: Option<DateTime<Utc>>, prerelease: bool) -> Self {
        Self {
            number: number.into(),
            built_at,
            prerelease,
        }
    }
}

/// Usable metadata for one gem, assembled from both documents
///
/// `latest` is guaranteed present: the router treats a null latest-version
/// field as no usable data and keeps looking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryMetadata {
    /// Latest stable version reported by the registry
    pub latest: String,
    /// Version history in the order the registry returned it
    pub history: Vec<VersionRecord>,
}
