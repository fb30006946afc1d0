//! Inventory validation rules.
//!
//! - The plan must reference a known cluster and repository
//! - Hosts listed under a service must be registered with its cluster
//! - Disabled check ids must be well formed

use crate::checks::is_valid_check_id;
use crate::config::schema::Inventory;
use crate::error::{PrereqError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate an inventory and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_inventory(inventory: &Inventory) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_plan(inventory));
    errors.extend(validate_service_hosts(inventory));
    errors.extend(validate_disabled_checks(inventory));

    errors
}

fn validate_plan(inventory: &Inventory) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Some(plan) = &inventory.plan else {
        return errors;
    };

    if !inventory.clusters.contains_key(&plan.cluster) {
        errors.push(ValidationError::new(
            "unknown-cluster",
            format!("Plan references cluster '{}' which does not exist", plan.cluster),
        ));
    }

    if !inventory.repositories.contains_key(&plan.repository) {
        errors.push(ValidationError::new(
            "unknown-repository",
            format!(
                "Plan references repository '{}' which does not exist",
                plan.repository
            ),
        ));
    }

    errors
}

fn validate_service_hosts(inventory: &Inventory) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (cluster_name, cluster) in &inventory.clusters {
        for (service_name, service) in &cluster.services {
            for host in &service.hosts {
                if !cluster.hosts.contains_key(host) {
                    errors.push(ValidationError::new(
                        "unknown-host",
                        format!(
                            "Service '{}' in cluster '{}' lists host '{}' which does not exist",
                            service_name, cluster_name, host
                        ),
                    ));
                }
            }
        }
    }

    errors
}

fn validate_disabled_checks(inventory: &Inventory) -> Vec<ValidationError> {
    inventory
        .settings
        .disabled_checks
        .iter()
        .filter(|id| !is_valid_check_id(id))
        .map(|id| {
            ValidationError::new(
                "invalid-check-id",
                format!("Disabled check '{}' is not a valid check id", id),
            )
        })
        .collect()
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(inventory: &Inventory) -> Result<()> {
    let errors = validate_inventory(inventory);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PrereqError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
