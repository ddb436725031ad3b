//! Freshness classification types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Freshness of a locked gem version relative to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The locked version is the best version available
    Current,
    /// The requirement allows a newer available version
    Updatable,
    /// A newer version exists outside the declared requirement
    Obsolete,
}

impl Classification {
    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Current => "current",
            Classification::Updatable => "updatable",
            Classification::Obsolete => "obsolete",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How long ago the locked version was built
///
/// Boundaries are exclusive at the low end of each bucket: a build exactly
/// 31 days old falls in `Month6`, one exactly 182 days old in `Year1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    /// Built less than 31 days ago
    Month1,
    /// Built less than 182 days ago
    Month6,
    /// Built less than 366 days ago
    Year1,
    /// Built 366 days ago or more
    More,
    /// No build date known for the locked version
    None,
}

impl AgeBucket {
    /// Human phrase for report output; empty when the date is unknown
    pub fn describe(&self) -> &'static str {
        match self {
            AgeBucket::Month1 => "built within the last month",
            AgeBucket::Month6 => "built within the last six months",
            AgeBucket::Year1 => "built within the last year",
            AgeBucket::More => "built more than a year ago",
            AgeBucket::None => "",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
