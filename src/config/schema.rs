//! Inventory schema definitions.
//!
//! This module contains the struct definitions that map to the YAML
//! inventory file format, and the conversions from them into the in-memory
//! cluster registry and version manifest the checks read.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::checks::RunnerOptions;
use crate::cluster::{
    Cluster, HeartbeatState, HostHandle, InMemoryClusters, ServiceHandle, ServiceState,
};
use crate::upgrade::{
    MpackService, RepositoryCatalog, RepositoryManifest, RepositoryType, UpgradePlan, UpgradeType,
};

/// Root structure of an inventory file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Inventory {
    /// Run settings
    pub settings: Settings,

    /// Clusters known to the registry, by name
    pub clusters: BTreeMap<String, ClusterConfig>,

    /// Target repositories, by name
    pub repositories: BTreeMap<String, RepositoryConfig>,

    /// The upgrade to check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanConfig>,
}

/// Settings controlling how checks are run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Report failed checks as bypassed instead of blocking
    #[serde(skip_serializing_if = "is_false")]
    pub bypass_failures: bool,

    /// Skip checks that are not required for the upgrade type
    #[serde(skip_serializing_if = "is_false")]
    pub required_only: bool,

    /// Ids of checks that are never run
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub disabled_checks: BTreeSet<String>,
}

/// A cluster's hosts and installed services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClusterConfig {
    pub hosts: BTreeMap<String, HostConfig>,
    pub services: BTreeMap<String, ServiceConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HostConfig {
    pub heartbeat: HeartbeatState,
    #[serde(skip_serializing_if = "is_false")]
    pub maintenance: bool,
}

/// An installed service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServiceConfig {
    /// Installed version
    pub version: String,
    pub state: ServiceState,
    #[serde(skip_serializing_if = "is_false")]
    pub maintenance: bool,
    /// Hosts running a component of the service
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,
}

/// A target repository and the services it ships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RepositoryConfig {
    #[serde(rename = "type")]
    pub repository_type: RepositoryType,
    pub services: Vec<MpackService>,
}

/// The upgrade being checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanConfig {
    pub cluster: String,
    pub repository: String,
    #[serde(default = "default_upgrade_type")]
    pub upgrade_type: UpgradeType,
}

fn default_upgrade_type() -> UpgradeType {
    UpgradeType::Rolling
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Inventory {
    /// Build the cluster registry described by this inventory.
    pub fn cluster_registry(&self) -> InMemoryClusters {
        self.clusters
            .iter()
            .map(|(name, config)| config.to_cluster(name))
            .collect()
    }

    /// Build the version manifest provider described by this inventory.
    pub fn repository_catalog(&self) -> RepositoryCatalog {
        self.repositories
            .iter()
            .map(|(name, config)| config.to_manifest(name))
            .collect()
    }

    /// The plan, with its upgrade type optionally overridden.
    pub fn upgrade_plan(&self, upgrade_type: Option<UpgradeType>) -> Option<UpgradePlan> {
        self.plan.as_ref().map(|plan| {
            UpgradePlan::new(
                plan.cluster.clone(),
                plan.repository.clone(),
                upgrade_type.unwrap_or(plan.upgrade_type),
            )
        })
    }
}

impl ClusterConfig {
    pub fn to_cluster(&self, name: &str) -> Cluster {
        let cluster = self
            .hosts
            .iter()
            .fold(Cluster::new(name), |cluster, (host, config)| {
                cluster.with_host(
                    HostHandle::new(host.clone())
                        .with_heartbeat(config.heartbeat)
                        .with_maintenance(config.maintenance),
                )
            });

        self.services
            .iter()
            .fold(cluster, |cluster, (service, config)| {
                cluster.with_service(
                    ServiceHandle::new(service.clone(), config.version.clone())
                        .with_state(config.state)
                        .with_maintenance(config.maintenance)
                        .with_hosts(config.hosts.iter().cloned()),
                )
            })
    }
}

impl RepositoryConfig {
    pub fn to_manifest(&self, name: &str) -> RepositoryManifest {
        self.services.iter().fold(
            RepositoryManifest::new(name, self.repository_type),
            |manifest, service| manifest.with_service(service.clone()),
        )
    }
}

impl From<&Settings> for RunnerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            bypass_failures: settings.bypass_failures,
            required_only: settings.required_only,
            disabled_checks: settings.disabled_checks.clone(),
        }
    }
}
