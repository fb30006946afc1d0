//! Inventory loading, parsing, and validation.
//!
//! An inventory is a YAML file describing the clusters, target repositories,
//! and the upgrade plan to check:
//! - Schema definitions in [`schema`]
//! - Loading with local overrides in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use prereq::config::{load_inventory, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("cluster.yml");
//! fs::write(&path, "clusters: { c1: {} }\nrepositories: { r1: { type: patch } }\nplan: { cluster: c1, repository: r1 }").unwrap();
//!
//! let inventory = load_inventory(&path).unwrap();
//! validate(&inventory).unwrap();
//! assert!(inventory.upgrade_plan(None).is_some());
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    load_inventory, load_inventory_value, local_overlay_path, parse_inventory, InventoryPaths,
};
pub use merger::{deep_merge, merge_layers};
pub use schema::{
    ClusterConfig, HostConfig, Inventory, PlanConfig, RepositoryConfig, ServiceConfig, Settings,
};
pub use validator::{validate, validate_inventory, ValidationError};
