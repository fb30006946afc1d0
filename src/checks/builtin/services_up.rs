//! Service liveliness.

use crate::checks::{
    format_entity_list, Check, CheckContext, CheckDescriptor, CheckGroup, CheckResult, CheckScope,
};
use crate::cluster::ServiceState;
use crate::error::Result;

/// Fails on upgraded services that are not started.
///
/// Only services the upgrade touches are inspected. Services in maintenance
/// mode are exempt.
pub struct ServicesUpCheck;

impl ServicesUpCheck {
    pub const ID: &'static str = "services-up";

    pub fn descriptor() -> Result<CheckDescriptor> {
        CheckDescriptor::builder(Self::ID)
            .description("All services being upgraded must be started")
            .scope(CheckScope::Cluster)
            .group(CheckGroup::Liveliness)
            .order(2.0)
            .required_for_all()
            .build()
    }
}

impl Check for ServicesUpCheck {
    fn perform(&self, ctx: &CheckContext<'_>) -> Result<CheckResult> {
        let services = ctx.snapshot.cluster().services_by_name();
        let down: Vec<&str> = ctx
            .snapshot
            .services_in_scope()
            .iter()
            .filter_map(|name| services.get(name))
            .filter(|service| !service.maintenance && service.state != ServiceState::Started)
            .map(|service| service.name.as_str())
            .collect();

        if down.is_empty() {
            return Ok(CheckResult::pass(ctx.check_id()));
        }

        Ok(CheckResult::fail(
            ctx.check_id(),
            format!(
                "Services must be started before upgrading: {}",
                format_entity_list(&down)
            ),
        )
        .with_failed_on(down))
    }
}
