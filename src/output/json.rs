//! JSON report formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the run report
//! - Per-gem classification, available version, age, and suggestion

use crate::domain::{AgeBucket, Classification};
use crate::output::OutputFormatter;
use crate::reconcile::{RunReport, VersionState};
use serde::Serialize;
use std::io::{self, Write};

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonReport {
    /// Gems whose locked version is the best available
    current: Vec<JsonGem>,
    /// Gems the declared requirement would already allow to move
    updatable: Vec<JsonGem>,
    /// Gems whose newer versions fall outside the requirement
    obsolete: Vec<JsonGem>,
    /// Gems with no usable data from any source
    unavailable: usize,
    /// Locked prerelease versions seen
    prereleases: usize,
    /// Gems processed, including unavailable ones
    total_checked: usize,
}

/// JSON representation of one checked gem
#[derive(Serialize)]
struct JsonGem {
    name: String,
    locked: String,
    requirement: String,
    status: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<String>,
    prerelease: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    build_age: Option<AgeBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl JsonGem {
    fn from_state(state: &VersionState<'_>) -> Self {
        let build_age = match state.build_age() {
            AgeBucket::None => None,
            bucket => Some(bucket),
        };
        Self {
            name: state.dependency().name.clone(),
            locked: state.locked().to_string(),
            requirement: state.dependency().requirement.to_string(),
            status: state.classify(),
            available: state.version_available().map(str::to_string),
            prerelease: state.is_prerelease(),
            build_age,
            suggestion: state.suggest().map(str::to_string),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport<'_>, out: &mut dyn Write) -> io::Result<()> {
        let json = JsonReport {
            current: report.current.iter().map(JsonGem::from_state).collect(),
            updatable: report.updatable.iter().map(JsonGem::from_state).collect(),
            obsolete: report.obsolete.iter().map(JsonGem::from_state).collect(),
            unavailable: report.unavailable,
            prereleases: report.prereleases,
            total_checked: report.total_checked(),
        };
        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out)
    }
}
