//! Reconciliation of locked gems against registry data
//!
//! This module provides:
//! - Per-gem freshness state (classification, age, suggestion)
//! - The run orchestration that fetches, classifies, and accumulates
//!   results into buckets and summary counters

mod version_state;

pub use version_state::VersionState;

use crate::domain::{Classification, Dependency};
use crate::progress::Progress;
use crate::registry::SourceRouter;

/// Everything a run produced, handed as-is to the reporting layer
///
/// Every classified gem sits in exactly one bucket; gems that could not be
/// checked against any source appear in none and are only counted.
pub struct RunReport<'a> {
    /// Gems whose locked version is the best available
    pub current: Vec<VersionState<'a>>,
    /// Gems the declared requirement would already allow to move
    pub updatable: Vec<VersionState<'a>>,
    /// Gems whose newer versions fall outside the requirement
    pub obsolete: Vec<VersionState<'a>>,
    /// Gems with no usable data from any source
    pub unavailable: usize,
    /// Locked prerelease versions seen
    pub prereleases: usize,
}

impl<'a> RunReport<'a> {
    fn new() -> Self {
        Self {
            current: Vec::new(),
            updatable: Vec::new(),
            obsolete: Vec::new(),
            unavailable: 0,
            prereleases: 0,
        }
    }

    /// File a classified state into its bucket and bump counters
    fn add(&mut self, state: VersionState<'a>) {
        if state.is_prerelease() {
            self.prereleases += 1;
        }
        match state.classify() {
            Classification::Current => self.current.push(state),
            Classification::Updatable => self.updatable.push(state),
            Classification::Obsolete => self.obsolete.push(state),
        }
    }

    /// Number of gems that were classified
    pub fn total_classified(&self) -> usize {
        self.current.len() + self.updatable.len() + self.obsolete.len()
    }

    /// Number of gems processed, including unavailable ones
    pub fn total_checked(&self) -> usize {
        self.total_classified() + self.unavailable
    }

    /// Returns true if any locked prerelease was seen
    pub fn has_prereleases(&self) -> bool {
        self.prereleases > 0
    }
}

/// Orchestrates one reconciliation pass over all dependencies
pub struct ReconciliationRun {
    router: SourceRouter,
    show_progress: bool,
}

impl ReconciliationRun {
    /// Create a run over the given router
    pub fn new(router: SourceRouter) -> Self {
        Self {
            router,
            show_progress: true,
        }
    }

    /// Enable or disable progress display
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check every dependency, strictly one at a time
    ///
    /// A dependency whose sources are all exhausted is counted and skipped;
    /// the run itself always completes.
    pub async fn execute<'a>(&mut self, dependencies: &'a [Dependency]) -> RunReport<'a> {
        let mut progress = Progress::new(self.show_progress);
        progress.start(dependencies.len() as u64, "Checking gems");

        let mut report = RunReport::new();
        for dependency in dependencies {
            progress.set_message(&format!("Checking {}", dependency.name));
            match self.router.resolve(dependency).await {
                Ok(metadata) => report.add(VersionState::new(dependency, metadata)),
                Err(_) => report.unavailable += 1,
            }
            progress.inc();
        }
        progress.finish_and_clear();
        report
    }
}
