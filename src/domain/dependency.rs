//! Dependency information structures

use super::Requirement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level gem from the Gemfile, resolved against the lockfile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Gem name
    pub name: String,
    /// Declared version requirement
    pub requirement: Requirement,
    /// Exact version pinned in the lockfile
    pub locked: String,
    /// Registry endpoints to query, in declared order
    pub sources: Vec<String>,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        name: impl Into<String>,
        requirement: Requirement,
        locked: impl Into<String>,
        sources: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            requirement,
            locked: locked.into(),
            sources,
        }
    }

    /// Creates a dependency with the catch-all requirement
    pub fn unconstrained(
        name: impl Into<String>,
        locked: impl Into<String>,
        sources: Vec<String>,
    ) -> Self {
        Self::new(name, Requirement::any(), locked, sources)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.locked)
    }
}
