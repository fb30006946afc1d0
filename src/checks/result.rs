//! Check outcomes.
//!
//! Each `perform` call produces a fresh [`CheckResult`]. Results are never
//! mutated in place; the runner's adjustments (downgrading or bypassing a
//! failure) return new values.

use serde::Serialize;

use super::descriptor::CheckId;
use super::format::format_entity_list;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The check was not run.
    Skipped,
    Pass,
    /// Something is worth a look but does not block the upgrade.
    Warning,
    /// A failure that was configured to not block the upgrade.
    Bypass,
    Fail,
}

impl CheckStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Skipped => write!(f, "skipped"),
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Warning => write!(f, "warning"),
            CheckStatus::Bypass => write!(f, "bypass"),
            CheckStatus::Fail => write!(f, "fail"),
        }
    }
}

/// Result of one check invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    check: CheckId,
    status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed_on: Vec<String>,
}

impl CheckResult {
    fn new(check: CheckId, status: CheckStatus, reason: Option<String>) -> Self {
        Self {
            check,
            status,
            reason,
            failed_on: Vec::new(),
        }
    }

    pub fn pass(check: CheckId) -> Self {
        Self::new(check, CheckStatus::Pass, None)
    }

    pub fn warning(check: CheckId, reason: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Warning, Some(reason.into()))
    }

    pub fn fail(check: CheckId, reason: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Fail, Some(reason.into()))
    }

    pub fn skipped(check: CheckId, reason: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Skipped, Some(reason.into()))
    }

    /// Record the entities the check failed on, in order, without duplicates.
    pub fn with_failed_on<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for entity in entities {
            let entity = entity.into();
            if !self.failed_on.contains(&entity) {
                self.failed_on.push(entity);
            }
        }
        self
    }

    /// A failure turned into a warning. Other statuses are returned unchanged.
    pub fn downgraded(self) -> Self {
        self.replace_failure(CheckStatus::Warning)
    }

    /// A failure turned into a bypass. Other statuses are returned unchanged.
    pub fn bypassed(self) -> Self {
        self.replace_failure(CheckStatus::Bypass)
    }

    fn replace_failure(self, status: CheckStatus) -> Self {
        if self.status.is_failure() {
            Self { status, ..self }
        } else {
            self
        }
    }

    pub fn check(&self) -> &CheckId {
        &self.check
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn failed_on(&self) -> &[String] {
        &self.failed_on
    }

    /// The failed-on entities rendered as a readable list.
    pub fn failed_on_display(&self) -> String {
        format_entity_list(&self.failed_on)
    }
}
