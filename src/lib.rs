//! prereq - Pre-upgrade precondition checks for cluster software stacks.
//!
//! Before a cluster is moved to a new stack version, a set of checks decides
//! whether the upgrade may proceed. Each check declares which services it is
//! about and which upgrade types it blocks; the engine decides whether it
//! applies to a given upgrade, runs it, and collects the outcomes.
//!
//! # Modules
//!
//! - [`checks`] - Check descriptors, applicability, the registry, and the runner
//! - [`cli`] - Command-line interface and argument parsing
//! - [`cluster`] - Cluster registry: hosts and installed services
//! - [`config`] - Inventory loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`report`] - Human and JSON report formatters
//! - [`ui`] - Terminal output
//! - [`upgrade`] - Upgrade types, plans, and version manifests
//!
//! # Example
//!
//! ```
//! use prereq::checks::format_entity_list;
//!
//! assert_eq!(format_entity_list(["host1", "host2", "host3"]), "host1, host2 and host3");
//! ```
//!
//! For running checks end to end, see [`checks`].

pub mod checks;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod report;
pub mod ui;
pub mod upgrade;

pub use error::{PrereqError, Result};
