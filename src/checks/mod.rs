//! Pre-upgrade checks.
//!
//! A check pairs a static [`CheckDescriptor`] with a [`Check`] rule. The
//! engine decides whether a check applies to an upgrade, whether its failure
//! blocks that upgrade, and runs it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use prereq::checks::{CheckRegistry, CheckSources, PrecheckRunner, RunnerOptions};
//! use prereq::cluster::{Cluster, InMemoryClusters, ServiceHandle};
//! use prereq::upgrade::{
//!     MpackService, PrereqCheckRequest, RepositoryCatalog, RepositoryManifest,
//!     RepositoryType, UpgradePlan, UpgradeType,
//! };
//!
//! let cluster = Cluster::new("c1").with_service(ServiceHandle::new("HDFS", "3.1.1"));
//! let repo = RepositoryManifest::new("HDP-3.1.5", RepositoryType::Standard)
//!     .with_service(MpackService::new("HDFS", "3.1.5"));
//! let sources = CheckSources::new(
//!     Arc::new([cluster].into_iter().collect::<InMemoryClusters>()),
//!     Arc::new([repo].into_iter().collect::<RepositoryCatalog>()),
//! );
//!
//! let registry = CheckRegistry::with_builtins(sources).unwrap();
//! let runner = PrecheckRunner::new(&registry, RunnerOptions::default());
//! let request = PrereqCheckRequest::new(UpgradePlan::new("c1", "HDP-3.1.5", UpgradeType::Rolling));
//! let report = runner.run(&request).unwrap();
//! assert!(report.is_upgrade_allowed());
//! ```

pub mod applicability;
pub mod builtin;
pub mod check;
pub mod descriptor;
pub mod format;
pub mod registry;
pub mod requiredness;
pub mod result;
pub mod runner;

pub use applicability::{is_applicable, is_scope_independent, UpgradeSnapshot};
pub use check::{Check, CheckContext, CheckSources, UpgradeCheck};
pub use descriptor::{
    is_valid_check_id, CheckDescriptor, CheckDescriptorBuilder, CheckGroup, CheckId, CheckScope,
};
pub use format::format_entity_list;
pub use registry::CheckRegistry;
pub use requiredness::is_required;
pub use result::{CheckResult, CheckStatus};
pub use runner::{CheckOutcome, PrecheckReport, PrecheckRunner, ReportSummary, RunnerOptions};
