//! Check registry.
//!
//! The [`CheckRegistry`] stores every registered check, wired to the cluster
//! registry and version manifest it was built with, and hands them out in
//! execution order.

use std::collections::HashMap;

use super::builtin::{
    HostsHeartbeatCheck, ServiceRedundancyCheck, ServicesMaintenanceModeCheck, ServicesUpCheck,
    REDUNDANT_SERVICES,
};
use super::check::{Check, CheckSources, UpgradeCheck};
use super::descriptor::{CheckDescriptor, CheckId};
use crate::error::Result;

/// Registry of all available checks.
#[derive(Debug)]
pub struct CheckRegistry {
    sources: CheckSources,
    checks: HashMap<CheckId, UpgradeCheck>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new(sources: CheckSources) -> Self {
        Self {
            sources,
            checks: HashMap::new(),
        }
    }

    /// Create a registry with all built-in checks.
    pub fn with_builtins(sources: CheckSources) -> Result<Self> {
        let mut registry = Self::new(sources);
        registry.register(HostsHeartbeatCheck::descriptor()?, Box::new(HostsHeartbeatCheck));
        registry.register(ServicesUpCheck::descriptor()?, Box::new(ServicesUpCheck));
        registry.register(
            ServicesMaintenanceModeCheck::descriptor()?,
            Box::new(ServicesMaintenanceModeCheck),
        );
        for service in REDUNDANT_SERVICES {
            let check = ServiceRedundancyCheck::new(service);
            registry.register(check.descriptor()?, Box::new(check));
        }
        Ok(registry)
    }

    /// Register a check. A check with the same id is replaced.
    pub fn register(&mut self, descriptor: CheckDescriptor, rule: Box<dyn Check>) {
        let check = UpgradeCheck::new(descriptor, rule, self.sources.clone());
        self.checks.insert(check.id().clone(), check);
    }

    /// Get a check by ID.
    pub fn get(&self, id: &CheckId) -> Option<&UpgradeCheck> {
        self.checks.get(id)
    }

    /// All checks sorted by group rank, then order, then id.
    pub fn ordered(&self) -> Vec<&UpgradeCheck> {
        let mut checks: Vec<&UpgradeCheck> = self.checks.values().collect();
        checks.sort_by(|a, b| a.descriptor().execution_order(b.descriptor()));
        checks
    }

    /// The collaborators checks in this registry read from.
    pub fn sources(&self) -> &CheckSources {
        &self.sources
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckContext, CheckGroup, CheckResult};
    use crate::cluster::InMemoryClusters;
    use crate::upgrade::RepositoryCatalog;
    use std::sync::Arc;

    struct MockCheck;

    impl Check for MockCheck {
        fn perform(&self, ctx: &CheckContext<'_>) -> Result<CheckResult> {
            Ok(CheckResult::pass(ctx.check_id()))
        }
    }

    fn sources() -> CheckSources {
        CheckSources::new(
            Arc::new(InMemoryClusters::new()),
            Arc::new(RepositoryCatalog::new()),
        )
    }

    fn descriptor(id: &str, group: CheckGroup, order: f32) -> CheckDescriptor {
        CheckDescriptor::builder(id)
            .group(group)
            .order(order)
            .build()
            .unwrap()
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CheckRegistry::new(sources());
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_get() {
        let mut registry = CheckRegistry::new(sources());
        registry.register(
            descriptor("mock", CheckGroup::Default, 1.0),
            Box::new(MockCheck),
        );

        assert!(!registry.is_empty());
        assert!(registry.get(&CheckId::new("mock")).is_some());
        assert!(registry.get(&CheckId::new("unknown")).is_none());
    }

    #[test]
    fn registering_same_id_replaces() {
        let mut registry = CheckRegistry::new(sources());
        registry.register(descriptor("mock", CheckGroup::Default, 1.0), Box::new(MockCheck));
        registry.register(descriptor("mock", CheckGroup::Topology, 3.0), Box::new(MockCheck));

        assert_eq!(registry.len(), 1);
        let check = registry.get(&CheckId::new("mock")).unwrap();
        assert_eq!(check.group(), CheckGroup::Topology);
    }

    #[test]
    fn ordered_follows_group_then_order() {
        let mut registry = CheckRegistry::new(sources());
        registry.register(descriptor("late", CheckGroup::Default, 1.0), Box::new(MockCheck));
        registry.register(descriptor("second", CheckGroup::Liveliness, 2.0), Box::new(MockCheck));
        registry.register(descriptor("first", CheckGroup::Liveliness, 1.0), Box::new(MockCheck));
        registry.register(
            descriptor("repo", CheckGroup::RepositoryVersion, 50.0),
            Box::new(MockCheck),
        );

        let ids: Vec<_> = registry.ordered().iter().map(|c| c.id().as_str()).collect();

        assert_eq!(ids, vec!["repo", "first", "second", "late"]);
    }

    #[test]
    fn registry_with_builtins_has_checks() {
        let registry = CheckRegistry::with_builtins(sources()).unwrap();

        assert_eq!(registry.len(), 5);
        assert!(registry.get(&CheckId::new("hosts-heartbeat")).is_some());
        assert!(registry.get(&CheckId::new("services-up")).is_some());
        assert!(registry
            .get(&CheckId::new("services-maintenance-mode"))
            .is_some());
        assert!(registry
            .get(&CheckId::new("service-redundancy-hive"))
            .is_some());
        assert!(registry
            .get(&CheckId::new("service-redundancy-zookeeper"))
            .is_some());
    }

    #[test]
    fn builtins_run_liveliness_first() {
        let registry = CheckRegistry::with_builtins(sources()).unwrap();
        let ids: Vec<_> = registry.ordered().iter().map(|c| c.id().as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "hosts-heartbeat",
                "services-up",
                "services-maintenance-mode",
                "service-redundancy-hive",
                "service-redundancy-zookeeper",
            ]
        );
    }
}
