//! Static metadata describing a pre-upgrade check.
//!
//! This module provides:
//!
//! - [`CheckId`] - Stable, kebab-case identifier of a check
//! - [`CheckScope`] - Granularity a check is evaluated at
//! - [`CheckGroup`] - Ordering hint shared by related checks
//! - [`CheckDescriptor`] - The validated metadata record, built through
//!   [`CheckDescriptorBuilder`] at registration time

use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::error::{PrereqError, Result};
use crate::upgrade::UpgradeType;

static CHECK_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*$").expect("check id pattern is valid")
});

/// Whether `id` is an acceptable check identifier (lowercase kebab-case).
pub fn is_valid_check_id(id: &str) -> bool {
    CHECK_ID_REGEX.is_match(id)
}

/// Unique identifier for a check.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CheckId(pub String);

impl CheckId {
    /// Create a new check ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Granularity a check is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckScope {
    Host,
    Cluster,
    /// Applies only when the upgrade touches one of the check's services.
    Service,
    /// No scope declared; evaluated like a cluster check.
    #[default]
    Unspecified,
}

impl std::fmt::Display for CheckScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckScope::Host => write!(f, "host"),
            CheckScope::Cluster => write!(f, "cluster"),
            CheckScope::Service => write!(f, "service"),
            CheckScope::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// Ordering hint shared by related checks. Groups run in ascending rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckGroup {
    RepositoryVersion,
    NamenodeHa,
    Topology,
    Liveliness,
    MaintenanceMode,
    MultipleComponentWarning,
    ClientRetryProperty,
    ConfigurationWarning,
    ComponentVersion,
    Kerberos,
    InformationalWarning,
    #[default]
    Default,
}

impl CheckGroup {
    /// Position of the group in the execution order.
    pub fn rank(&self) -> f32 {
        match self {
            CheckGroup::RepositoryVersion => 1.0,
            CheckGroup::NamenodeHa => 2.0,
            CheckGroup::Topology => 3.0,
            CheckGroup::Liveliness => 4.0,
            CheckGroup::MaintenanceMode => 5.0,
            CheckGroup::MultipleComponentWarning => 6.0,
            CheckGroup::ClientRetryProperty => 7.0,
            CheckGroup::ConfigurationWarning => 8.0,
            CheckGroup::ComponentVersion => 9.0,
            CheckGroup::Kerberos => 10.0,
            CheckGroup::InformationalWarning => 100.0,
            CheckGroup::Default => f32::MAX,
        }
    }
}

impl std::fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CheckGroup::RepositoryVersion => "repository_version",
            CheckGroup::NamenodeHa => "namenode_ha",
            CheckGroup::Topology => "topology",
            CheckGroup::Liveliness => "liveliness",
            CheckGroup::MaintenanceMode => "maintenance_mode",
            CheckGroup::MultipleComponentWarning => "multiple_component_warning",
            CheckGroup::ClientRetryProperty => "client_retry_property",
            CheckGroup::ConfigurationWarning => "configuration_warning",
            CheckGroup::ComponentVersion => "component_version",
            CheckGroup::Kerberos => "kerberos",
            CheckGroup::InformationalWarning => "informational_warning",
            CheckGroup::Default => "default",
        };
        write!(f, "{}", name)
    }
}

/// Static metadata of a check.
///
/// Descriptors are constructed once at registration time and are read-only
/// afterwards. `applicable_services` is only consulted for
/// [`CheckScope::Service`]; other scopes carry it without effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckDescriptor {
    id: CheckId,
    description: String,
    scope: CheckScope,
    group: CheckGroup,
    order: f32,
    required_for: BTreeSet<UpgradeType>,
    applicable_services: BTreeSet<String>,
}

impl CheckDescriptor {
    /// Start building a descriptor for `id`.
    pub fn builder(id: impl Into<String>) -> CheckDescriptorBuilder {
        CheckDescriptorBuilder::new(id)
    }

    pub fn id(&self) -> &CheckId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn scope(&self) -> CheckScope {
        self.scope
    }

    pub fn group(&self) -> CheckGroup {
        self.group
    }

    /// Tie-break ordering within the group.
    pub fn order(&self) -> f32 {
        self.order
    }

    /// Upgrade types for which a failure of this check blocks the upgrade.
    pub fn required_for(&self) -> &BTreeSet<UpgradeType> {
        &self.required_for
    }

    /// Services this check is about. For service scope an empty set matches
    /// nothing.
    pub fn applicable_services(&self) -> &BTreeSet<String> {
        &self.applicable_services
    }

    /// Copy of this descriptor targeting a different set of services.
    pub fn with_applicable_services<I, S>(&self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            applicable_services: services.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Execution order: group rank, then order, then id.
    pub fn execution_order(&self, other: &Self) -> Ordering {
        self.group
            .rank()
            .total_cmp(&other.group.rank())
            .then_with(|| self.order.total_cmp(&other.order))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Builder for [`CheckDescriptor`].
#[derive(Debug, Clone)]
pub struct CheckDescriptorBuilder {
    id: String,
    description: String,
    scope: CheckScope,
    group: CheckGroup,
    order: f32,
    required_for: BTreeSet<UpgradeType>,
    applicable_services: BTreeSet<String>,
}

impl CheckDescriptorBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            scope: CheckScope::default(),
            group: CheckGroup::default(),
            order: 1.0,
            required_for: BTreeSet::new(),
            applicable_services: BTreeSet::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn scope(mut self, scope: CheckScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn group(mut self, group: CheckGroup) -> Self {
        self.group = group;
        self
    }

    pub fn order(mut self, order: f32) -> Self {
        self.order = order;
        self
    }

    pub fn required_for(mut self, upgrade_types: impl IntoIterator<Item = UpgradeType>) -> Self {
        self.required_for = upgrade_types.into_iter().collect();
        self
    }

    /// Mark the check as required for every upgrade type.
    pub fn required_for_all(self) -> Self {
        self.required_for(UpgradeType::ALL)
    }

    pub fn applicable_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applicable_services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and build the descriptor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDescriptor` when the id is not lowercase kebab-case or
    /// the order is not a finite number. A service-scoped descriptor without
    /// applicable services is valid.
    pub fn build(self) -> Result<CheckDescriptor> {
        if !is_valid_check_id(&self.id) {
            return Err(PrereqError::InvalidDescriptor {
                check: self.id,
                message: "id must be lowercase kebab-case".to_string(),
            });
        }

        if !self.order.is_finite() {
            return Err(PrereqError::InvalidDescriptor {
                check: self.id,
                message: format!("order must be a finite number, got {}", self.order),
            });
        }

        Ok(CheckDescriptor {
            id: CheckId(self.id),
            description: self.description,
            scope: self.scope,
            group: self.group,
            order: self.order,
            required_for: self.required_for,
            applicable_services: self.applicable_services,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let descriptor = CheckDescriptor::builder("my-check").build().unwrap();

        assert_eq!(descriptor.id(), &CheckId::new("my-check"));
        assert_eq!(descriptor.scope(), CheckScope::Unspecified);
        assert_eq!(descriptor.group(), CheckGroup::Default);
        assert_eq!(descriptor.order(), 1.0);
        assert!(descriptor.required_for().is_empty());
        assert!(descriptor.applicable_services().is_empty());
    }

    #[test]
    fn builder_sets_all_fields() {
        let descriptor = CheckDescriptor::builder("hive-check")
            .description("Checks Hive")
            .scope(CheckScope::Service)
            .group(CheckGroup::MultipleComponentWarning)
            .order(2.5)
            .required_for([UpgradeType::Rolling])
            .applicable_services(["HIVE"])
            .build()
            .unwrap();

        assert_eq!(descriptor.description(), "Checks Hive");
        assert_eq!(descriptor.scope(), CheckScope::Service);
        assert_eq!(descriptor.group(), CheckGroup::MultipleComponentWarning);
        assert_eq!(descriptor.order(), 2.5);
        assert_eq!(
            descriptor.required_for(),
            &BTreeSet::from([UpgradeType::Rolling])
        );
        assert!(descriptor.applicable_services().contains("HIVE"));
    }

    #[test]
    fn required_for_all_covers_every_upgrade_type() {
        let descriptor = CheckDescriptor::builder("all")
            .required_for_all()
            .build()
            .unwrap();
        assert_eq!(descriptor.required_for().len(), UpgradeType::ALL.len());
    }

    #[test]
    fn rejects_non_kebab_case_id() {
        let err = CheckDescriptor::builder("Services Up").build().unwrap_err();
        assert!(matches!(err, PrereqError::InvalidDescriptor { .. }));
        assert!(CheckDescriptor::builder("").build().is_err());
        assert!(CheckDescriptor::builder("1st-check").build().is_err());
    }

    #[test]
    fn rejects_non_finite_order() {
        let err = CheckDescriptor::builder("nan-order")
            .order(f32::NAN)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("finite"));
        assert!(CheckDescriptor::builder("inf-order")
            .order(f32::INFINITY)
            .build()
            .is_err());
    }

    #[test]
    fn service_scope_without_services_is_valid() {
        let descriptor = CheckDescriptor::builder("no-services")
            .scope(CheckScope::Service)
            .build();
        assert!(descriptor.is_ok());
    }

    #[test]
    fn with_applicable_services_leaves_original_untouched() {
        let original = CheckDescriptor::builder("svc")
            .scope(CheckScope::Service)
            .applicable_services(["SERVICE1"])
            .build()
            .unwrap();

        let changed = original.with_applicable_services(["SERVICE2"]);

        assert!(original.applicable_services().contains("SERVICE1"));
        assert!(changed.applicable_services().contains("SERVICE2"));
        assert!(!changed.applicable_services().contains("SERVICE1"));
        assert_eq!(changed.id(), original.id());
    }

    #[test]
    fn execution_order_sorts_by_group_then_order_then_id() {
        let liveliness_2 = CheckDescriptor::builder("b")
            .group(CheckGroup::Liveliness)
            .order(2.0)
            .build()
            .unwrap();
        let liveliness_1 = CheckDescriptor::builder("z")
            .group(CheckGroup::Liveliness)
            .order(1.0)
            .build()
            .unwrap();
        let repository = CheckDescriptor::builder("y")
            .group(CheckGroup::RepositoryVersion)
            .order(9.0)
            .build()
            .unwrap();
        let default_a = CheckDescriptor::builder("a").build().unwrap();
        let default_c = CheckDescriptor::builder("c").build().unwrap();

        let mut all = vec![&default_c, &liveliness_2, &default_a, &repository, &liveliness_1];
        all.sort_by(|a, b| a.execution_order(b));
        let ids: Vec<_> = all.iter().map(|d| d.id().as_str()).collect();

        assert_eq!(ids, vec!["y", "z", "b", "a", "c"]);
    }

    #[test]
    fn group_ranks_are_strictly_increasing() {
        let groups = [
            CheckGroup::RepositoryVersion,
            CheckGroup::NamenodeHa,
            CheckGroup::Topology,
            CheckGroup::Liveliness,
            CheckGroup::MaintenanceMode,
            CheckGroup::MultipleComponentWarning,
            CheckGroup::ClientRetryProperty,
            CheckGroup::ConfigurationWarning,
            CheckGroup::ComponentVersion,
            CheckGroup::Kerberos,
            CheckGroup::InformationalWarning,
            CheckGroup::Default,
        ];
        for pair in groups.windows(2) {
            assert!(pair[0].rank() < pair[1].rank(), "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn check_id_display() {
        assert_eq!(format!("{}", CheckId::new("services-up")), "services-up");
    }

    #[test]
    fn scope_display() {
        assert_eq!(CheckScope::Host.to_string(), "host");
        assert_eq!(CheckScope::Service.to_string(), "service");
        assert_eq!(CheckScope::Unspecified.to_string(), "unspecified");
    }
}
