//! Deciding whether a check applies to an upgrade.
//!
//! Host, cluster, and unspecified scopes always apply. A service-scoped check
//! applies only when one of its services is both installed in the cluster and
//! shipped by the target repository. Installation alone is not enough: a patch
//! that only updates `HDFS` must not trigger a check written for `YARN`, even
//! when `YARN` is installed.

use std::collections::BTreeSet;

use super::descriptor::{CheckDescriptor, CheckScope};
use crate::cluster::{Cluster, ClusterLookup};
use crate::error::Result;
use crate::upgrade::{ClusterVersionSummary, UpgradePlan, VersionManifest};

/// Cluster and version data resolved once for a single request.
///
/// Evaluating checks against a snapshot is synchronous and free of lookups,
/// so any number of checks can share one.
#[derive(Debug, Clone)]
pub struct UpgradeSnapshot {
    cluster: Cluster,
    summary: ClusterVersionSummary,
    in_scope: BTreeSet<String>,
}

impl UpgradeSnapshot {
    /// Look up the plan's cluster and version summary.
    ///
    /// # Errors
    ///
    /// Propagates `ClusterNotFound`, `RepositoryNotFound`, or any other
    /// data-access error from the collaborators.
    pub fn resolve(
        plan: &UpgradePlan,
        clusters: &dyn ClusterLookup,
        manifests: &dyn VersionManifest,
    ) -> Result<Self> {
        let cluster = clusters.get_cluster(plan.cluster_name())?;
        let summary = manifests.summarize(plan)?;
        Ok(Self::new(cluster, summary))
    }

    /// Build a snapshot from already-fetched values.
    pub fn new(cluster: Cluster, summary: ClusterVersionSummary) -> Self {
        let available = summary.available_service_names();
        let in_scope = cluster
            .services_by_name()
            .keys()
            .filter(|name| available.contains(*name))
            .cloned()
            .collect();

        Self {
            cluster,
            summary,
            in_scope,
        }
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    pub fn summary(&self) -> &ClusterVersionSummary {
        &self.summary
    }

    /// Services both installed in the cluster and updated by the repository.
    pub fn services_in_scope(&self) -> &BTreeSet<String> {
        &self.in_scope
    }
}

/// Whether `descriptor` applies to the upgrade described by `snapshot`.
pub fn is_applicable(descriptor: &CheckDescriptor, snapshot: &UpgradeSnapshot) -> bool {
    match descriptor.scope() {
        CheckScope::Service => descriptor
            .applicable_services()
            .iter()
            .any(|service| snapshot.services_in_scope().contains(service)),
        CheckScope::Host | CheckScope::Cluster | CheckScope::Unspecified => true,
    }
}

/// Whether the scope can be decided without looking at any service data.
pub fn is_scope_independent(descriptor: &CheckDescriptor) -> bool {
    descriptor.scope() != CheckScope::Service
}
