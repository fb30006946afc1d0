//! Upgrade plans, strategies, and version manifests.
//!
//! - [`UpgradeType`] - Rolling, express, or host-ordered strategy
//! - [`UpgradePlan`] / [`PrereqCheckRequest`] - What is being asked of the checks
//! - [`VersionManifest`] / [`ClusterVersionSummary`] - Which services a target
//!   repository actually updates

pub mod manifest;
pub mod plan;
pub mod upgrade_type;

pub use manifest::{
    ClusterVersionSummary, MpackService, RepositoryCatalog, RepositoryManifest, RepositoryType,
    VersionManifest,
};
pub use plan::{PrereqCheckRequest, UpgradePlan};
pub use upgrade_type::UpgradeType;
