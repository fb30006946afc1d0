//! Upgrade plans and pre-upgrade check requests.

use super::upgrade_type::UpgradeType;

/// A request to move a cluster's software stack to a target repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePlan {
    cluster_name: String,
    repository: String,
    upgrade_type: UpgradeType,
}

impl UpgradePlan {
    /// Create a plan for `cluster_name` targeting `repository`.
    pub fn new(
        cluster_name: impl Into<String>,
        repository: impl Into<String>,
        upgrade_type: UpgradeType,
    ) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            repository: repository.into(),
            upgrade_type,
        }
    }

    /// Name of the cluster being upgraded.
    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// Identifier of the target repository/version.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Strategy used to apply the upgrade.
    pub fn upgrade_type(&self) -> UpgradeType {
        self.upgrade_type
    }

    /// Copy of this plan with a different upgrade type.
    pub fn with_upgrade_type(mut self, upgrade_type: UpgradeType) -> Self {
        self.upgrade_type = upgrade_type;
        self
    }
}

/// The input every check is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrereqCheckRequest {
    plan: UpgradePlan,
}

impl PrereqCheckRequest {
    /// Create a request for the given plan.
    pub fn new(plan: UpgradePlan) -> Self {
        Self { plan }
    }

    /// The upgrade plan under evaluation.
    pub fn plan(&self) -> &UpgradePlan {
        &self.plan
    }

    /// Shorthand for `plan().upgrade_type()`.
    pub fn upgrade_type(&self) -> UpgradeType {
        self.plan.upgrade_type()
    }

    /// Shorthand for `plan().cluster_name()`.
    pub fn cluster_name(&self) -> &str {
        self.plan.cluster_name()
    }
}
