//! Report formatting
//!
//! This module provides:
//! - A formatter trait over the run report
//! - Human-readable text output with colors
//! - Machine-readable JSON output

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::reconcile::RunReport;
use std::io::{self, Write};

/// Formats a run report to a writer
pub trait OutputFormatter {
    /// Write the formatted report
    fn format(&self, report: &RunReport<'_>, out: &mut dyn Write) -> io::Result<()>;
}

/// Create the formatter selected by CLI options
pub fn create_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter::new())
    } else {
        Box::new(TextFormatter::new())
    }
}
