//! Gemfile and lockfile resolution
//!
//! The lockfile is the source of truth: locked versions come from its GEM
//! specs, declared requirements from its DEPENDENCIES echo, and registry
//! endpoints from its remote lines. The Gemfile itself is only checked for
//! existence, matching the original tool's behavior.

mod lockfile;

use crate::domain::Dependency;
use crate::error::ManifestError;
use std::path::Path;

/// Resolve the dependency list for a run from a Gemfile/lockfile pair
pub fn load_dependencies(gemfile: &Path, lockfile_path: &Path) -> Result<Vec<Dependency>, ManifestError> {
    if !gemfile.exists() {
        return Err(ManifestError::not_found(gemfile));
    }
    if !lockfile_path.exists() {
        return Err(ManifestError::not_found(lockfile_path));
    }
    let content = std::fs::read_to_string(lockfile_path)
        .map_err(|e| ManifestError::read_error(lockfile_path, e))?;
    lockfile::parse(&content, lockfile_path)
}
