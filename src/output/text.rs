//! Human-readable report formatter
//!
//! This module provides:
//! - The classic freshness report with its three sections
//! - Prerelease markers and the prerelease warning
//! - Age phrases and same-branch suggestions per gem
//! - The tally of gems that could not be checked

use crate::domain::AgeBucket;
use crate::output::OutputFormatter;
use crate::reconcile::{RunReport, VersionState};
use colored::Colorize;
use std::io::{self, Write};

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Age phrase for a gem, bracketed, or empty when no date is known
    fn age_display(&self, state: &VersionState<'_>) -> String {
        let bucket = state.build_age();
        if bucket == AgeBucket::None {
            return String::new();
        }
        if self.color {
            format!(" [{}]", bucket.describe()).dimmed().to_string()
        } else {
            format!(" [{}]", bucket.describe())
        }
    }

    /// Suggestion clause for a gem, or empty when there is nothing better
    /// within the locked branch
    fn suggestion_display(&self, state: &VersionState<'_>) -> String {
        match state.suggest() {
            Some(version) => format!("; consider {}", version),
            None => String::new(),
        }
    }

    fn section_header(&self, out: &mut dyn Write, text: &str, paint: fn(&str) -> String) -> io::Result<()> {
        if self.color {
            writeln!(out, "\n{}", paint(text))
        } else {
            writeln!(out, "\n{}", text)
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport<'_>, out: &mut dyn Write) -> io::Result<()> {
        if report.has_prereleases() {
            let warning = format!(
                "You have {} prerelease gem{}. Prereleases will be marked with a '*'.",
                report.prereleases,
                if report.prereleases == 1 { "" } else { "s" },
            );
            if self.color {
                writeln!(out, "\n{}", warning.yellow())?;
            } else {
                writeln!(out, "\n{}", warning)?;
            }
        }

        if report.current.is_empty() {
            writeln!(out, "\nYou don't have any current gems.")?;
        } else {
            self.section_header(out, "The following gems are current: ", |t| {
                t.green().to_string()
            })?;
            let gems: Vec<String> = report.current.iter().map(|s| s.to_string()).collect();
            writeln!(out, "{}", gems.join(", "))?;
        }

        if report.updatable.is_empty() {
            writeln!(out, "\nYou don't have any updatable gems.")?;
        } else {
            self.section_header(
                out,
                "The following gems are locked to older versions, but the spec allows for a later version: ",
                |t| t.yellow().to_string(),
            )?;
            for state in &report.updatable {
                // available is always present here: a gem without a usable
                // available version cannot classify as updatable
                let available = state.version_available().unwrap_or("?");
                writeln!(
                    out,
                    "    {}, with {} could allow {}{}{}",
                    state,
                    state.dependency().requirement,
                    available,
                    self.suggestion_display(state),
                    self.age_display(state),
                )?;
            }
        }

        if report.obsolete.is_empty() {
            writeln!(out, "\nYou don't have any obsolete gems.")?;
        } else {
            self.section_header(out, "The following gems are obsolete: ", |t| {
                t.red().to_string()
            })?;
            for state in &report.obsolete {
                match state.version_available() {
                    Some(available) => writeln!(
                        out,
                        "    {} is outdated - now at {}{}{}",
                        state,
                        available,
                        self.suggestion_display(state),
                        self.age_display(state),
                    )?,
                    None => writeln!(
                        out,
                        "    {} is outdated{}{}",
                        state,
                        self.suggestion_display(state),
                        self.age_display(state),
                    )?,
                }
            }
        }

        if report.unavailable > 0 {
            let notice = format!(
                "{} gem{} couldn't be checked against any source.",
                report.unavailable,
                if report.unavailable == 1 { "" } else { "s" },
            );
            if self.color {
                writeln!(out, "\n{}", notice.red())?;
            } else {
                writeln!(out, "\n{}", notice)?;
            }
        }

        Ok(())
    }
}
