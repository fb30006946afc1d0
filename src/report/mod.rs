//! Report formatters.
//!
//! This module renders a [`PrecheckReport`] in different formats
//! (human-readable, JSON).

pub mod human;
pub mod json;

use crate::checks::PrecheckReport;
use std::io::Write;

/// Output format for check reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for formatting a check report.
pub trait ReportFormatter {
    /// Format the report to the given writer.
    fn format<W: Write>(&self, report: &PrecheckReport, writer: &mut W) -> std::io::Result<()>;
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
