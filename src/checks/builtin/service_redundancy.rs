//! Single-host services.
//!
//! A rolling restart of a service that runs on one host takes it offline.
//! This check warns about such services; it is scoped to a single service so
//! it only runs when the upgrade actually touches that service.

use crate::checks::{Check, CheckContext, CheckDescriptor, CheckGroup, CheckResult, CheckScope};
use crate::error::Result;

const MIN_HOSTS: usize = 2;

/// Warns when `service` runs on fewer than two hosts.
pub struct ServiceRedundancyCheck {
    service: String,
}

impl ServiceRedundancyCheck {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn id(&self) -> String {
        format!("service-redundancy-{}", self.service.to_lowercase())
    }

    pub fn descriptor(&self) -> Result<CheckDescriptor> {
        CheckDescriptor::builder(self.id())
            .description(format!(
                "{} should run on at least {} hosts",
                self.service, MIN_HOSTS
            ))
            .scope(CheckScope::Service)
            .group(CheckGroup::MultipleComponentWarning)
            .order(1.0)
            .applicable_services([self.service.as_str()])
            .build()
    }
}

impl Check for ServiceRedundancyCheck {
    fn perform(&self, ctx: &CheckContext<'_>) -> Result<CheckResult> {
        let hosts = ctx
            .snapshot
            .cluster()
            .services_by_name()
            .get(&self.service)
            .map(|service| service.hosts.len())
            .unwrap_or(0);

        if hosts >= MIN_HOSTS {
            return Ok(CheckResult::pass(ctx.check_id()));
        }

        Ok(CheckResult::warning(
            ctx.check_id(),
            format!(
                "{} runs on {} host(s); it will be unavailable while it restarts",
                self.service, hosts
            ),
        )
        .with_failed_on([self.service.as_str()]))
    }
}
