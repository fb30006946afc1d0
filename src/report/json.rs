//! JSON report formatter.
//!
//! Formats a check report as machine-readable JSON for tooling integration.

use super::ReportFormatter;
use crate::checks::{CheckOutcome, PrecheckReport, ReportSummary};
use serde::Serialize;
use std::io::Write;

/// Formats reports as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a PrecheckReport,
    upgrade_allowed: bool,
    blocking: Vec<&'a str>,
    summary: ReportSummary,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &PrecheckReport, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            report,
            upgrade_allowed: report.is_upgrade_allowed(),
            blocking: report
                .blocking_failures()
                .map(|o: &CheckOutcome| o.result.check().as_str())
                .collect(),
            summary: report.summary(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}
