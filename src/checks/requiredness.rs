//! Deciding whether a check blocks a given upgrade type.

use super::descriptor::CheckDescriptor;
use crate::upgrade::UpgradeType;

/// Whether a failure of `descriptor` blocks an upgrade of `upgrade_type`.
///
/// A descriptor with no required-for types never blocks.
pub fn is_required(descriptor: &CheckDescriptor, upgrade_type: UpgradeType) -> bool {
    descriptor.required_for().contains(&upgrade_type)
}
