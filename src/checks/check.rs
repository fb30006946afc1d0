//! Check definitions.
//!
//! This module provides the core traits and types for defining checks:
//!
//! - [`Check`] - The business rule a concrete check implements
//! - [`CheckContext`] - Everything `perform` may read
//! - [`CheckSources`] - The cluster registry and version manifest a check is
//!   wired to at construction
//! - [`UpgradeCheck`] - A descriptor composed with its rule. Applicability,
//!   requiredness, and formatting live here and cannot be overridden by the
//!   rule.

use std::sync::Arc;

use super::applicability::{self, UpgradeSnapshot};
use super::descriptor::{CheckDescriptor, CheckGroup, CheckId, CheckScope};
use super::format::format_entity_list;
use super::requiredness;
use super::result::CheckResult;
use crate::cluster::ClusterLookup;
use crate::error::Result;
use crate::upgrade::{PrereqCheckRequest, UpgradeType, VersionManifest};

/// The rule a concrete check enforces.
pub trait Check: Send + Sync {
    /// Evaluate the rule and report the outcome.
    fn perform(&self, ctx: &CheckContext<'_>) -> Result<CheckResult>;
}

/// Input handed to [`Check::perform`].
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub descriptor: &'a CheckDescriptor,
    pub request: &'a PrereqCheckRequest,
    pub snapshot: &'a UpgradeSnapshot,
}

impl CheckContext<'_> {
    /// Id of the check being performed.
    pub fn check_id(&self) -> CheckId {
        self.descriptor.id().clone()
    }
}

/// External collaborators a check reads from.
#[derive(Clone)]
pub struct CheckSources {
    pub clusters: Arc<dyn ClusterLookup>,
    pub manifests: Arc<dyn VersionManifest>,
}

impl CheckSources {
    pub fn new(clusters: Arc<dyn ClusterLookup>, manifests: Arc<dyn VersionManifest>) -> Self {
        Self {
            clusters,
            manifests,
        }
    }

    /// Resolve the cluster and version summary for a request.
    pub fn snapshot(&self, request: &PrereqCheckRequest) -> Result<UpgradeSnapshot> {
        UpgradeSnapshot::resolve(
            request.plan(),
            self.clusters.as_ref(),
            self.manifests.as_ref(),
        )
    }
}

impl std::fmt::Debug for CheckSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckSources").finish_non_exhaustive()
    }
}

/// A registered check: static metadata plus its rule.
pub struct UpgradeCheck {
    descriptor: CheckDescriptor,
    rule: Box<dyn Check>,
    sources: CheckSources,
}

impl UpgradeCheck {
    pub fn new(descriptor: CheckDescriptor, rule: Box<dyn Check>, sources: CheckSources) -> Self {
        Self {
            descriptor,
            rule,
            sources,
        }
    }

    pub fn descriptor(&self) -> &CheckDescriptor {
        &self.descriptor
    }

    pub fn id(&self) -> &CheckId {
        self.descriptor.id()
    }

    pub fn scope(&self) -> CheckScope {
        self.descriptor.scope()
    }

    pub fn group(&self) -> CheckGroup {
        self.descriptor.group()
    }

    pub fn order(&self) -> f32 {
        self.descriptor.order()
    }

    pub fn applicable_services(&self) -> &std::collections::BTreeSet<String> {
        self.descriptor.applicable_services()
    }

    /// Whether the check applies to the request.
    ///
    /// Only service-scoped checks consult the cluster registry and version
    /// manifest; lookup failures propagate.
    pub fn is_applicable(&self, request: &PrereqCheckRequest) -> Result<bool> {
        if applicability::is_scope_independent(&self.descriptor) {
            return Ok(true);
        }
        let snapshot = self.sources.snapshot(request)?;
        Ok(self.is_applicable_in(&snapshot))
    }

    /// Whether the check applies, given an already-resolved snapshot.
    pub fn is_applicable_in(&self, snapshot: &UpgradeSnapshot) -> bool {
        applicability::is_applicable(&self.descriptor, snapshot)
    }

    /// Whether a failure blocks an upgrade of `upgrade_type`.
    pub fn is_required(&self, upgrade_type: UpgradeType) -> bool {
        requiredness::is_required(&self.descriptor, upgrade_type)
    }

    /// Run the rule against the request.
    pub fn perform(&self, request: &PrereqCheckRequest) -> Result<CheckResult> {
        let snapshot = self.sources.snapshot(request)?;
        self.perform_in(request, &snapshot)
    }

    /// Run the rule against an already-resolved snapshot.
    pub fn perform_in(
        &self,
        request: &PrereqCheckRequest,
        snapshot: &UpgradeSnapshot,
    ) -> Result<CheckResult> {
        self.rule.perform(&CheckContext {
            descriptor: &self.descriptor,
            request,
            snapshot,
        })
    }

    /// Render entities for a message, e.g. `"host1, host2 and host3"`.
    pub fn format_entity_list<I, S>(&self, entities: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        format_entity_list(entities)
    }
}

impl std::fmt::Debug for UpgradeCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpgradeCheck")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{Cluster, InMemoryClusters, ServiceHandle};
    use crate::error::PrereqError;
    use crate::upgrade::{
        MpackService, RepositoryCatalog, RepositoryManifest, RepositoryType, UpgradePlan,
    };
    use std::collections::BTreeSet;

    struct PassingRule;

    impl Check for PassingRule {
        fn perform(&self, ctx: &CheckContext<'_>) -> Result<CheckResult> {
            Ok(CheckResult::pass(ctx.check_id()))
        }
    }

    fn sources(available: &[&str]) -> CheckSources {
        let cluster = Cluster::new("c1")
            .with_service(ServiceHandle::new("SERVICE1", "1.0"))
            .with_service(ServiceHandle::new("SERVICE2", "1.0"))
            .with_service(ServiceHandle::new("SERVICE3", "1.0"));
        let manifest = available.iter().fold(
            RepositoryManifest::new("repo", RepositoryType::Patch),
            |m, name| m.with_service(MpackService::new(*name, "2.0")),
        );

        CheckSources::new(
            Arc::new([cluster].into_iter().collect::<InMemoryClusters>()),
            Arc::new([manifest].into_iter().collect::<RepositoryCatalog>()),
        )
    }

    fn request(cluster: &str) -> PrereqCheckRequest {
        PrereqCheckRequest::new(UpgradePlan::new(cluster, "repo", UpgradeType::Rolling))
    }

    fn check(scope: CheckScope, services: &[&str], sources: CheckSources) -> UpgradeCheck {
        let descriptor = CheckDescriptor::builder("test-check")
            .scope(scope)
            .group(CheckGroup::Default)
            .order(1.0)
            .required_for_all()
            .applicable_services(services.iter().copied())
            .build()
            .unwrap();
        UpgradeCheck::new(descriptor, Box::new(PassingRule), sources)
    }

    #[test]
    fn service_check_applies_through_its_sources() {
        let sources = sources(&["SERVICE1", "SERVICE2"]);

        let one = check(CheckScope::Service, &["SERVICE1"], sources.clone());
        assert!(one.is_applicable(&request("c1")).unwrap());

        let partial = check(
            CheckScope::Service,
            &["SERVICE1", "MISSING_SERVICE"],
            sources.clone(),
        );
        assert!(partial.is_applicable(&request("c1")).unwrap());

        let missing = check(CheckScope::Service, &["MISSING_SERVICE"], sources);
        assert!(!missing.is_applicable(&request("c1")).unwrap());
    }

    #[test]
    fn patch_for_other_service_does_not_apply() {
        let sources = sources(&["SERVICE1"]);

        let service2 = check(CheckScope::Service, &["SERVICE2"], sources.clone());
        assert!(!service2.is_applicable(&request("c1")).unwrap());

        let service1 = check(CheckScope::Service, &["SERVICE1"], sources);
        assert!(service1.is_applicable(&request("c1")).unwrap());
    }

    #[test]
    fn service_check_propagates_unknown_cluster() {
        let service = check(CheckScope::Service, &["SERVICE1"], sources(&["SERVICE1"]));
        let err = service.is_applicable(&request("nope")).unwrap_err();
        assert!(matches!(err, PrereqError::ClusterNotFound { .. }));
    }

    #[test]
    fn host_check_does_not_need_lookups() {
        let host = check(CheckScope::Host, &[], sources(&[]));
        assert!(host.is_applicable(&request("nope")).unwrap());
    }

    #[test]
    fn formatting_is_the_same_for_every_scope() {
        let failed_on = vec!["host1", "host2", "host3"];
        for scope in [
            CheckScope::Host,
            CheckScope::Cluster,
            CheckScope::Service,
            CheckScope::Unspecified,
        ] {
            let c = check(scope, &[], sources(&[]));
            assert_eq!(c.format_entity_list(&failed_on), "host1, host2 and host3");
            assert_eq!(c.format_entity_list(Vec::<String>::new()), "");
        }
    }

    #[test]
    fn perform_reports_the_check_id() {
        let c = check(CheckScope::Cluster, &[], sources(&["SERVICE1"]));
        let result = c.perform(&request("c1")).unwrap();
        assert_eq!(result.check(), &CheckId::new("test-check"));
    }

    #[test]
    fn accessors_expose_descriptor_metadata() {
        let c = check(CheckScope::Service, &["SERVICE1"], sources(&[]));
        assert_eq!(c.scope(), CheckScope::Service);
        assert_eq!(c.group(), CheckGroup::Default);
        assert_eq!(c.order(), 1.0);
        assert_eq!(
            c.applicable_services(),
            &BTreeSet::from(["SERVICE1".to_string()])
        );
        assert!(c.is_required(UpgradeType::HostOrdered));
    }
}
