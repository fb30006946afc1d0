//! Version manifests: which services a target repository actually updates.
//!
//! A repository may ship every service of a stack (a standard release) or
//! only a handful of them (a patch). The [`ClusterVersionSummary`] produced
//! for an upgrade plan is the authoritative answer to "what is this upgrade
//! about", independent of what happens to be installed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::plan::UpgradePlan;
use crate::error::{PrereqError, Result};

/// Produces the version summary for an upgrade plan.
///
/// Implementations must be safe for concurrent reads.
pub trait VersionManifest: Send + Sync {
    /// Summarize what the plan's target repository ships.
    fn summarize(&self, plan: &UpgradePlan) -> Result<ClusterVersionSummary>;

    /// Names of the services the plan's target repository updates.
    fn available_service_names(&self, plan: &UpgradePlan) -> Result<BTreeSet<String>> {
        Ok(self.summarize(plan)?.available_service_names())
    }
}

/// Kind of repository an upgrade targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RepositoryType {
    /// A full stack release.
    #[default]
    Standard,
    /// Hotfixes for a subset of services.
    Patch,
    /// A maintenance release for a subset of services.
    Maint,
    /// A single-service release.
    Service,
}

impl RepositoryType {
    /// Whether the repository is expected to touch only part of a stack.
    pub fn is_partial(&self) -> bool {
        !matches!(self, RepositoryType::Standard)
    }
}

impl std::fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryType::Standard => write!(f, "standard"),
            RepositoryType::Patch => write!(f, "patch"),
            RepositoryType::Maint => write!(f, "maint"),
            RepositoryType::Service => write!(f, "service"),
        }
    }
}

/// A service packaged in a registry mpack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct MpackService {
    pub name: String,
    pub version: String,
}

impl MpackService {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The services a repository ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryManifest {
    pub name: String,
    pub repository_type: RepositoryType,
    pub services: Vec<MpackService>,
}

impl RepositoryManifest {
    pub fn new(name: impl Into<String>, repository_type: RepositoryType) -> Self {
        Self {
            name: name.into(),
            repository_type,
            services: Vec::new(),
        }
    }

    pub fn with_service(mut self, service: MpackService) -> Self {
        self.services.push(service);
        self
    }
}

/// Per-plan summary of the services a target repository updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterVersionSummary {
    repository: String,
    repository_type: RepositoryType,
    target_versions: BTreeMap<String, String>,
}

impl ClusterVersionSummary {
    /// Summarize a manifest.
    pub fn from_manifest(manifest: &RepositoryManifest) -> Self {
        Self {
            repository: manifest.name.clone(),
            repository_type: manifest.repository_type,
            target_versions: manifest
                .services
                .iter()
                .map(|s| (s.name.clone(), s.version.clone()))
                .collect(),
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn repository_type(&self) -> RepositoryType {
        self.repository_type
    }

    /// Names of the services the repository updates.
    pub fn available_service_names(&self) -> BTreeSet<String> {
        self.target_versions.keys().cloned().collect()
    }

    /// Version the repository ships for `service`, if it ships it at all.
    pub fn target_version(&self, service: &str) -> Option<&str> {
        self.target_versions.get(service).map(String::as_str)
    }
}

/// Version manifest provider held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct RepositoryCatalog {
    repositories: BTreeMap<String, RepositoryManifest>,
}

impl RepositoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a repository manifest.
    pub fn insert(&mut self, manifest: RepositoryManifest) {
        self.repositories.insert(manifest.name.clone(), manifest);
    }

    pub fn get(&self, name: &str) -> Option<&RepositoryManifest> {
        self.repositories.get(name)
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

impl FromIterator<RepositoryManifest> for RepositoryCatalog {
    fn from_iter<T: IntoIterator<Item = RepositoryManifest>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for manifest in iter {
            catalog.insert(manifest);
        }
        catalog
    }
}

impl VersionManifest for RepositoryCatalog {
    fn summarize(&self, plan: &UpgradePlan) -> Result<ClusterVersionSummary> {
        self.repositories
            .get(plan.repository())
            .map(ClusterVersionSummary::from_manifest)
            .ok_or_else(|| PrereqError::RepositoryNotFound {
                repository: plan.repository().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrade::UpgradeType;

    fn patch_repo() -> RepositoryManifest {
        RepositoryManifest::new("HDP-3.1.5.1-patch", RepositoryType::Patch)
            .with_service(MpackService::new("HDFS", "3.1.5.1"))
    }

    fn standard_repo() -> RepositoryManifest {
        RepositoryManifest::new("HDP-3.1.5", RepositoryType::Standard)
            .with_service(MpackService::new("HDFS", "3.1.5"))
            .with_service(MpackService::new("YARN", "3.1.5"))
            .with_service(MpackService::new("HIVE", "3.1.0"))
    }

    #[test]
    fn summary_lists_only_shipped_services() {
        let catalog: RepositoryCatalog = [patch_repo(), standard_repo()].into_iter().collect();
        let plan = UpgradePlan::new("c1", "HDP-3.1.5.1-patch", UpgradeType::Rolling);

        let names = catalog.available_service_names(&plan).unwrap();

        assert_eq!(names, BTreeSet::from(["HDFS".to_string()]));
    }

    #[test]
    fn summary_exposes_target_versions() {
        let summary = ClusterVersionSummary::from_manifest(&standard_repo());

        assert_eq!(summary.repository(), "HDP-3.1.5");
        assert_eq!(summary.repository_type(), RepositoryType::Standard);
        assert_eq!(summary.target_version("YARN"), Some("3.1.5"));
        assert_eq!(summary.target_version("KAFKA"), None);
    }

    #[test]
    fn unknown_repository_is_data_access_error() {
        let catalog = RepositoryCatalog::new();
        let plan = UpgradePlan::new("c1", "nope", UpgradeType::Express);

        let err = catalog.summarize(&plan).unwrap_err();

        assert!(matches!(err, PrereqError::RepositoryNotFound { .. }));
        assert!(err.is_data_access());
    }

    #[test]
    fn only_standard_repositories_are_complete() {
        assert!(!RepositoryType::Standard.is_partial());
        assert!(RepositoryType::Patch.is_partial());
        assert!(RepositoryType::Maint.is_partial());
        assert!(RepositoryType::Service.is_partial());
    }

    #[test]
    fn mpack_service_deserializes_from_yaml() {
        let service: MpackService =
            serde_yaml::from_str("name: ZOOKEEPER\nversion: 3.4.6").unwrap();
        assert_eq!(service, MpackService::new("ZOOKEEPER", "3.4.6"));
    }
}
