//! Host heartbeat liveliness.
//!
//! Every host must be heartbeating with the server before an upgrade starts.
//! Hosts in maintenance mode are exempt.

use crate::checks::{
    format_entity_list, Check, CheckContext, CheckDescriptor, CheckGroup, CheckResult, CheckScope,
};
use crate::cluster::HeartbeatState;
use crate::error::Result;

/// Fails on hosts whose heartbeat has been lost.
pub struct HostsHeartbeatCheck;

impl HostsHeartbeatCheck {
    pub const ID: &'static str = "hosts-heartbeat";

    pub fn descriptor() -> Result<CheckDescriptor> {
        CheckDescriptor::builder(Self::ID)
            .description("All hosts must be heartbeating unless they are in maintenance mode")
            .scope(CheckScope::Host)
            .group(CheckGroup::Liveliness)
            .order(1.0)
            .required_for_all()
            .build()
    }
}

impl Check for HostsHeartbeatCheck {
    fn perform(&self, ctx: &CheckContext<'_>) -> Result<CheckResult> {
        let lost: Vec<&str> = ctx
            .snapshot
            .cluster()
            .hosts()
            .values()
            .filter(|host| !host.maintenance && host.heartbeat == HeartbeatState::Lost)
            .map(|host| host.name.as_str())
            .collect();

        if lost.is_empty() {
            return Ok(CheckResult::pass(ctx.check_id()));
        }

        Ok(CheckResult::fail(
            ctx.check_id(),
            format!("Hosts have lost heartbeat: {}", format_entity_list(&lost)),
        )
        .with_failed_on(lost))
    }
}
