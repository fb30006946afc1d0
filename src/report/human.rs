//! Human-readable report formatter.
//!
//! Formats a check report for terminal display with optional color support.

use super::ReportFormatter;
use crate::checks::{CheckOutcome, CheckStatus, PrecheckReport};
use console::Style;
use std::io::Write;

/// Formats reports for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status_style(&self, status: CheckStatus) -> Style {
        let style = match status {
            CheckStatus::Pass => Style::new().green(),
            CheckStatus::Warning => Style::new().yellow(),
            CheckStatus::Bypass => Style::new().magenta(),
            CheckStatus::Fail => Style::new().red().bold(),
            CheckStatus::Skipped => Style::new().dim(),
        };
        style.force_styling(self.use_color)
    }

    fn status_label(status: CheckStatus) -> &'static str {
        match status {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warning => "WARN",
            CheckStatus::Bypass => "BYPASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "SKIP",
        }
    }

    fn write_outcome<W: Write>(&self, outcome: &CheckOutcome, writer: &mut W) -> std::io::Result<()> {
        let result = &outcome.result;
        let label = format!("{:<6}", Self::status_label(result.status()));
        let required = if outcome.required { "" } else { " (optional)" };

        write!(
            writer,
            "  {} {}{}",
            self.status_style(result.status()).apply_to(label),
            result.check(),
            required
        )?;
        match result.reason() {
            Some(reason) => writeln!(writer, ": {}", reason)?,
            None => writeln!(writer)?,
        }

        if result.status() != CheckStatus::Skipped && !result.failed_on().is_empty() {
            writeln!(writer, "         failed on: {}", result.failed_on_display())?;
        }

        Ok(())
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &PrecheckReport, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "Pre-upgrade checks for cluster {} -> {} ({} repository, {} upgrade)",
            report.cluster, report.repository, report.repository_type, report.upgrade_type
        )?;
        writeln!(writer)?;

        for outcome in &report.outcomes {
            self.write_outcome(outcome, writer)?;
        }
        writeln!(writer)?;

        let summary = report.summary();
        writeln!(
            writer,
            "{} check(s): {} passed, {} warning(s), {} bypassed, {} failed, {} skipped",
            summary.total,
            summary.passed,
            summary.warnings,
            summary.bypassed,
            summary.failed,
            summary.skipped
        )?;

        let blocking = report.blocking_failures().count();
        if blocking == 0 {
            let ok = Style::new().green().force_styling(self.use_color);
            writeln!(writer, "{}", ok.apply_to("Upgrade can proceed"))?;
        } else {
            let blocked = Style::new().red().bold().force_styling(self.use_color);
            writeln!(
                writer,
                "{}",
                blocked.apply_to(format!("Upgrade blocked by {} required check(s)", blocking))
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckGroup, CheckId, CheckResult, CheckScope};
    use crate::upgrade::{RepositoryType, UpgradeType};
    use chrono::{TimeZone, Utc};

    fn outcome(result: CheckResult, required: bool) -> CheckOutcome {
        CheckOutcome {
            result,
            required,
            scope: CheckScope::Cluster,
            group: CheckGroup::Liveliness,
            description: String::new(),
        }
    }

    fn sample_report(outcomes: Vec<CheckOutcome>) -> PrecheckReport {
        PrecheckReport {
            cluster: "c1".into(),
            repository: "HDP-3.1.5.1".into(),
            repository_type: RepositoryType::Patch,
            upgrade_type: UpgradeType::Rolling,
            generated_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            outcomes,
        }
    }

    fn render(report: &PrecheckReport) -> String {
        let mut output = Vec::new();
        HumanFormatter::new(false).format(report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn formats_failures_with_entities() {
        let report = sample_report(vec![outcome(
            CheckResult::fail(CheckId::new("hosts-heartbeat"), "Hosts have lost heartbeat: host1 and host2")
                .with_failed_on(["host1", "host2"]),
            true,
        )]);

        let output = render(&report);

        assert!(output.contains("FAIL   hosts-heartbeat: Hosts have lost heartbeat"));
        assert!(output.contains("failed on: host1 and host2"));
        assert!(output.contains("Upgrade blocked by 1 required check(s)"));
    }

    #[test]
    fn formats_header_and_summary() {
        let report = sample_report(vec![
            outcome(CheckResult::pass(CheckId::new("services-up")), true),
            outcome(
                CheckResult::skipped(CheckId::new("service-redundancy-hive"), "not applicable"),
                false,
            ),
        ]);

        let output = render(&report);

        assert!(output.starts_with(
            "Pre-upgrade checks for cluster c1 -> HDP-3.1.5.1 (patch repository, rolling upgrade)"
        ));
        assert!(output.contains("SKIP   service-redundancy-hive (optional): not applicable"));
        assert!(output.contains("2 check(s): 1 passed, 0 warning(s), 0 bypassed, 0 failed, 1 skipped"));
        assert!(output.contains("Upgrade can proceed"));
    }

    #[test]
    fn no_ansi_codes_without_color() {
        let report = sample_report(vec![outcome(CheckResult::pass(CheckId::new("services-up")), true)]);
        assert!(!render(&report).contains('\x1b'));
    }

    #[test]
    fn ansi_codes_with_color() {
        let report = sample_report(vec![outcome(CheckResult::pass(CheckId::new("services-up")), true)]);
        let mut output = Vec::new();
        HumanFormatter::new(true).format(&report, &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains('\x1b'));
    }
}
