//! Running every registered check against one upgrade request.
//!
//! The runner resolves the cluster and version summary once, then walks the
//! registry in execution order. For each check it decides whether to run it,
//! runs it, and adjusts the outcome:
//!
//! - disabled or inapplicable checks are reported as skipped
//! - with `required_only`, checks not required for the upgrade type are skipped
//! - failures of checks not required for the upgrade type become warnings
//! - with `bypass_failures`, remaining failures become bypasses
//!
//! Lookup and execution errors abort the run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::check::UpgradeCheck;
use super::descriptor::{CheckGroup, CheckScope};
use super::registry::CheckRegistry;
use super::result::{CheckResult, CheckStatus};
use crate::error::Result;
use crate::upgrade::{PrereqCheckRequest, RepositoryType, UpgradeType};

/// Knobs controlling a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Report failures as bypassed instead of blocking.
    pub bypass_failures: bool,
    /// Skip checks that are not required for the upgrade type.
    pub required_only: bool,
    /// Ids of checks that are never run.
    pub disabled_checks: BTreeSet<String>,
}

/// Runs the checks of a registry.
pub struct PrecheckRunner<'a> {
    registry: &'a CheckRegistry,
    options: RunnerOptions,
}

impl<'a> PrecheckRunner<'a> {
    pub fn new(registry: &'a CheckRegistry, options: RunnerOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Run every check against `request`.
    ///
    /// # Errors
    ///
    /// Propagates data-access errors from resolving the cluster or version
    /// summary and any error returned by a check's `perform`.
    pub fn run(&self, request: &PrereqCheckRequest) -> Result<PrecheckReport> {
        let upgrade_type = request.upgrade_type();
        info!(
            cluster = request.cluster_name(),
            repository = request.plan().repository(),
            %upgrade_type,
            "Running pre-upgrade checks"
        );

        let snapshot = self.registry.sources().snapshot(request)?;
        debug!(
            services = ?snapshot.services_in_scope(),
            "Services in scope for this upgrade"
        );

        let mut outcomes = Vec::new();
        for check in self.registry.ordered() {
            let required = check.is_required(upgrade_type);
            let result = match self.skip_reason(check, required, &snapshot) {
                Some(reason) => {
                    debug!(check = %check.id(), reason, "Skipping check");
                    CheckResult::skipped(check.id().clone(), reason)
                }
                None => {
                    let result = check.perform_in(request, &snapshot)?;
                    self.adjust(result, required)
                }
            };
            outcomes.push(CheckOutcome::new(check, required, result));
        }

        Ok(PrecheckReport {
            cluster: request.cluster_name().to_string(),
            repository: snapshot.summary().repository().to_string(),
            repository_type: snapshot.summary().repository_type(),
            upgrade_type,
            generated_at: Utc::now(),
            outcomes,
        })
    }

    fn skip_reason(
        &self,
        check: &UpgradeCheck,
        required: bool,
        snapshot: &super::applicability::UpgradeSnapshot,
    ) -> Option<&'static str> {
        if self.options.disabled_checks.contains(check.id().as_str()) {
            Some("disabled")
        } else if !check.is_applicable_in(snapshot) {
            Some("not applicable")
        } else if self.options.required_only && !required {
            Some("not required")
        } else {
            None
        }
    }

    fn adjust(&self, result: CheckResult, required: bool) -> CheckResult {
        let result = if required { result } else { result.downgraded() };

        if self.options.bypass_failures && result.status().is_failure() {
            warn!(check = %result.check(), "Bypassing failed check");
            result.bypassed()
        } else {
            result
        }
    }
}

/// A check's result together with how it was classified.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    #[serde(flatten)]
    pub result: CheckResult,
    pub required: bool,
    pub scope: CheckScope,
    pub group: CheckGroup,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl CheckOutcome {
    fn new(check: &UpgradeCheck, required: bool, result: CheckResult) -> Self {
        Self {
            result,
            required,
            scope: check.scope(),
            group: check.group(),
            description: check.descriptor().description().to_string(),
        }
    }
}

/// Counts of outcomes by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub warnings: usize,
    pub bypassed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct PrecheckReport {
    pub cluster: String,
    pub repository: String,
    pub repository_type: RepositoryType,
    pub upgrade_type: UpgradeType,
    pub generated_at: DateTime<Utc>,
    pub outcomes: Vec<CheckOutcome>,
}

impl PrecheckReport {
    /// Outcomes that block the upgrade.
    pub fn blocking_failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.result.status().is_failure())
    }

    /// Whether no check blocks the upgrade.
    pub fn is_upgrade_allowed(&self) -> bool {
        self.blocking_failures().next().is_none()
    }

    /// Look up the outcome of a check by id.
    pub fn outcome(&self, check: &str) -> Option<&CheckOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.result.check().as_str() == check)
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            total: self.outcomes.len(),
            ..Default::default()
        };
        for outcome in &self.outcomes {
            match outcome.result.status() {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Warning => summary.warnings += 1,
                CheckStatus::Bypass => summary.bypassed += 1,
                CheckStatus::Fail => summary.failed += 1,
                CheckStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }
}
