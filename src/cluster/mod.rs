//! Cluster and service registry.
//!
//! The registry is an external collaborator: the engine only needs to resolve
//! a cluster by name and read the hosts and services it knows about. The
//! [`ClusterLookup`] trait is that seam; [`InMemoryClusters`] backs it with
//! data loaded from an inventory file.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{PrereqError, Result};

/// Resolves clusters by name.
///
/// Implementations must be safe for concurrent reads.
pub trait ClusterLookup: Send + Sync {
    /// Look up a cluster, failing with [`PrereqError::ClusterNotFound`] when
    /// the name is unknown.
    fn get_cluster(&self, name: &str) -> Result<Cluster>;
}

/// Lifecycle state reported for an installed service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    /// Installed but not running.
    Installed,
    Starting,
    #[default]
    Started,
    Stopping,
    Unknown,
}

/// Heartbeat state reported for a host agent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HeartbeatState {
    #[default]
    Healthy,
    Unhealthy,
    Lost,
}

/// A service installed in a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHandle {
    pub name: String,
    pub version: String,
    pub state: ServiceState,
    pub maintenance: bool,
    /// Hosts running at least one component of this service.
    pub hosts: Vec<String>,
}

impl ServiceHandle {
    /// A started service with no hosts and no maintenance flag.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            state: ServiceState::Started,
            maintenance: false,
            hosts: Vec::new(),
        }
    }

    pub fn with_state(mut self, state: ServiceState) -> Self {
        self.state = state;
        self
    }

    pub fn with_maintenance(mut self, maintenance: bool) -> Self {
        self.maintenance = maintenance;
        self
    }

    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }
}

/// A host registered with a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostHandle {
    pub name: String,
    pub heartbeat: HeartbeatState,
    pub maintenance: bool,
}

impl HostHandle {
    /// A healthy host outside maintenance.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heartbeat: HeartbeatState::Healthy,
            maintenance: false,
        }
    }

    pub fn with_heartbeat(mut self, heartbeat: HeartbeatState) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    pub fn with_maintenance(mut self, maintenance: bool) -> Self {
        self.maintenance = maintenance;
        self
    }
}

/// A cluster as seen by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    name: String,
    hosts: BTreeMap<String, HostHandle>,
    services: BTreeMap<String, ServiceHandle>,
}

impl Cluster {
    /// Create an empty cluster.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hosts: BTreeMap::new(),
            services: BTreeMap::new(),
        }
    }

    pub fn with_host(mut self, host: HostHandle) -> Self {
        self.hosts.insert(host.name.clone(), host);
        self
    }

    pub fn with_service(mut self, service: ServiceHandle) -> Self {
        self.services.insert(service.name.clone(), service);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Installed services keyed by service name.
    pub fn services_by_name(&self) -> &BTreeMap<String, ServiceHandle> {
        &self.services
    }

    /// Names of every installed service.
    pub fn service_names(&self) -> BTreeSet<String> {
        self.services.keys().cloned().collect()
    }

    /// Registered hosts keyed by host name.
    pub fn hosts(&self) -> &BTreeMap<String, HostHandle> {
        &self.hosts
    }
}

/// Cluster registry held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClusters {
    clusters: BTreeMap<String, Cluster>,
}

impl InMemoryClusters {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a cluster.
    pub fn insert(&mut self, cluster: Cluster) {
        self.clusters.insert(cluster.name.clone(), cluster);
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl FromIterator<Cluster> for InMemoryClusters {
    fn from_iter<T: IntoIterator<Item = Cluster>>(iter: T) -> Self {
        let mut registry = Self::new();
        for cluster in iter {
            registry.insert(cluster);
        }
        registry
    }
}

impl ClusterLookup for InMemoryClusters {
    fn get_cluster(&self, name: &str) -> Result<Cluster> {
        self.clusters
            .get(name)
            .cloned()
            .ok_or_else(|| PrereqError::ClusterNotFound {
                cluster: name.to_string(),
            })
    }
}
