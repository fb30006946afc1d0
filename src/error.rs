//! Error types for prereq operations.
//!
//! This module defines [`PrereqError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Lookup failures against the cluster registry or the version manifest are
//!   data-access errors. They always propagate; applicability is never
//!   inferred from a failed lookup.
//! - Descriptor and inventory problems are configuration errors.
//! - A failing `perform` surfaces as [`PrereqError::CheckExecutionFailed`].
//! - Use `anyhow::Error` (via `PrereqError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for prereq operations.
#[derive(Debug, Error)]
pub enum PrereqError {
    /// The cluster registry has no cluster with this name.
    #[error("Cluster not found: {cluster}")]
    ClusterNotFound { cluster: String },

    /// The version manifest provider does not know this repository.
    #[error("Repository not found: {repository}")]
    RepositoryNotFound { repository: String },

    /// An external data source could not be read.
    #[error("Failed to read {source_name}: {message}")]
    DataAccess {
        source_name: String,
        message: String,
    },

    /// A check descriptor was declared with invalid metadata.
    #[error("Invalid check descriptor '{check}': {message}")]
    InvalidDescriptor { check: String, message: String },

    /// Inventory file not found at expected location.
    #[error("Inventory not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse inventory file.
    #[error("Failed to parse inventory at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid inventory structure or values.
    #[error("Invalid inventory: {message}")]
    ConfigValidationError { message: String },

    /// A check's `perform` could not complete.
    #[error("Check '{check}' failed to execute: {message}")]
    CheckExecutionFailed { check: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrereqError {
    /// Whether this error came from a cluster or version-manifest lookup.
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            PrereqError::ClusterNotFound { .. }
                | PrereqError::RepositoryNotFound { .. }
                | PrereqError::DataAccess { .. }
        )
    }
}

/// Result type alias for prereq operations.
pub type Result<T> = std::result::Result<T, PrereqError>;
