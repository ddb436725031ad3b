//! Gemfile.lock parser
//!
//! Handles:
//! - `GEM` sections: `remote:` endpoints and the `specs:` map of locked
//!   versions (top-level entries only, transitive deps are ignored)
//! - `DEPENDENCIES` section: the top-level gems with their declared
//!   requirements, which Bundler echoes from the Gemfile
//! - `PATH`/`GIT`/`PLATFORMS`/`BUNDLED WITH` sections are skipped; only
//!   gems resolvable against a RubyGems remote are reported

use crate::domain::{Dependency, Requirement};
use crate::error::ManifestError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// remote: https://rubygems.org/
static REMOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^  remote: (\S+)$").unwrap());

// Top-level spec entry: four spaces, name, locked version in parens
static SPEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^    ([^\s(]+) \(([^)\s]+)\)$").unwrap());

// DEPENDENCIES entry: two spaces, name, optional requirement in parens,
// optional trailing '!' for gems sourced outside the GEM sections
static DEPENDENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^  ([^\s(!]+)(?: \(([^)]+)\))?(!)?$").unwrap());

/// Which top-level section of the lockfile a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Gem,
    Dependencies,
    Other,
}

/// Parse lockfile content into the dependency list for a run
///
/// Every dependency carries the full ordered remote list, mirroring how
/// Bundler resolves any RubyGems-sourced gem against all declared remotes.
/// Dependencies marked with `!` (non-RubyGems sources) or without a locked
/// spec entry are omitted.
pub fn parse(content: &str, path: &Path) -> Result<Vec<Dependency>, ManifestError> {
    let mut section = Section::Other;
    let mut remotes: Vec<String> = Vec::new();
    let mut locked: Vec<(String, String)> = Vec::new();
    let mut declared: Vec<(String, Option<String>)> = Vec::new();

    for line in content.lines() {
        let trimmed_end = line.trim_end();
        if trimmed_end.is_empty() {
            continue;
        }

        // Section headers sit flush left
        if !trimmed_end.starts_with(' ') {
            section = match trimmed_end {
                "GEM" => Section::Gem,
                "DEPENDENCIES" => Section::Dependencies,
                _ => Section::Other,
            };
            continue;
        }

        match section {
            Section::Gem => {
                if let Some(caps) = REMOTE_RE.captures(trimmed_end) {
                    let remote = caps[1].trim_end_matches('/').to_string();
                    if !remotes.contains(&remote) {
                        remotes.push(remote);
                    }
                } else if let Some(caps) = SPEC_RE.captures(trimmed_end) {
                    locked.push((caps[1].to_string(), caps[2].to_string()));
                }
                // Deeper-indented lines are transitive requirements
            }
            Section::Dependencies => {
                let Some(caps) = DEPENDENCY_RE.captures(trimmed_end) else {
                    return Err(ManifestError::lockfile_parse_error(
                        path,
                        format!("unrecognized dependency line: '{}'", trimmed_end.trim()),
                    ));
                };
                if caps.get(3).is_some() {
                    // Pinned to a git/path source; not checkable against RubyGems
                    continue;
                }
                declared.push((caps[1].to_string(), caps.get(2).map(|m| m.as_str().to_string())));
            }
            Section::Other => {}
        }
    }

    let mut dependencies = Vec::new();
    for (name, raw_requirement) in declared {
        let Some((_, version)) = locked.iter().find(|(n, _)| *n == name) else {
            continue;
        };
        let requirement = match &raw_requirement {
            Some(raw) => Requirement::parse(raw).ok_or_else(|| {
                ManifestError::invalid_requirement(path, &name, raw.clone())
            })?,
            None => Requirement::any(),
        };
        dependencies.push(Dependency::new(name, requirement, version, remotes.clone()));
    }
    Ok(dependencies)
}
