//! Services left in maintenance mode.

use crate::checks::{
    format_entity_list, Check, CheckContext, CheckDescriptor, CheckGroup, CheckResult, CheckScope,
};
use crate::error::Result;

/// Fails on upgraded services that are in maintenance mode.
///
/// Not required for any upgrade type, so the runner reports its failures as
/// warnings.
pub struct ServicesMaintenanceModeCheck;

impl ServicesMaintenanceModeCheck {
    pub const ID: &'static str = "services-maintenance-mode";

    pub fn descriptor() -> Result<CheckDescriptor> {
        CheckDescriptor::builder(Self::ID)
            .description("Services being upgraded should not be in maintenance mode")
            .scope(CheckScope::Cluster)
            .group(CheckGroup::MaintenanceMode)
            .order(1.0)
            .build()
    }
}

impl Check for ServicesMaintenanceModeCheck {
    fn perform(&self, ctx: &CheckContext<'_>) -> Result<CheckResult> {
        let services = ctx.snapshot.cluster().services_by_name();
        let in_maintenance: Vec<&str> = ctx
            .snapshot
            .services_in_scope()
            .iter()
            .filter(|name| services.get(*name).is_some_and(|s| s.maintenance))
            .map(String::as_str)
            .collect();

        if in_maintenance.is_empty() {
            return Ok(CheckResult::pass(ctx.check_id()));
        }

        Ok(CheckResult::fail(
            ctx.check_id(),
            format!(
                "Services are in maintenance mode: {}",
                format_entity_list(&in_maintenance)
            ),
        )
        .with_failed_on(in_maintenance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::builtin::test_support::perform;
    use crate::checks::CheckStatus;
    use crate::cluster::{Cluster, ServiceHandle};
    use crate::upgrade::UpgradeType;

    #[test]
    fn fails_on_services_in_maintenance() {
        let cluster = Cluster::new("c1")
            .with_service(ServiceHandle::new("HDFS", "3.1.1").with_maintenance(true))
            .with_service(ServiceHandle::new("YARN", "3.1.1"));

        let result = perform(
            &ServicesMaintenanceModeCheck,
            ServicesMaintenanceModeCheck::descriptor(),
            cluster,
            &["HDFS", "YARN"],
        );

        assert_eq!(result.status(), CheckStatus::Fail);
        assert_eq!(result.failed_on(), ["HDFS"]);
    }

    #[test]
    fn passes_without_maintenance() {
        let cluster = Cluster::new("c1").with_service(ServiceHandle::new("HDFS", "3.1.1"));
        let result = perform(
            &ServicesMaintenanceModeCheck,
            ServicesMaintenanceModeCheck::descriptor(),
            cluster,
            &["HDFS"],
        );
        assert_eq!(result.status(), CheckStatus::Pass);
    }

    #[test]
    fn is_never_required() {
        let descriptor = ServicesMaintenanceModeCheck::descriptor().unwrap();
        for upgrade_type in UpgradeType::ALL {
            assert!(!crate::checks::is_required(&descriptor, upgrade_type));
        }
    }
}
