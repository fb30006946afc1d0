//! Upgrade strategies.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Strategy used to apply an upgrade to a cluster.
///
/// Requiredness lookups treat the variant as an opaque tag.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeType {
    /// Services are upgraded one host at a time while the cluster stays up.
    Rolling,
    /// Services are stopped, upgraded, and restarted together.
    Express,
    /// Hosts are upgraded in an operator-supplied order.
    HostOrdered,
}

impl UpgradeType {
    /// Every known upgrade type.
    pub const ALL: [UpgradeType; 3] = [
        UpgradeType::Rolling,
        UpgradeType::Express,
        UpgradeType::HostOrdered,
    ];

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeType::Rolling => "rolling",
            UpgradeType::Express => "express",
            UpgradeType::HostOrdered => "host_ordered",
        }
    }
}

impl std::fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UpgradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "rolling" => Ok(Self::Rolling),
            "express" | "nonrolling" | "non_rolling" => Ok(Self::Express),
            "host_ordered" => Ok(Self::HostOrdered),
            _ => Err(format!("unknown upgrade type: {}", s)),
        }
    }
}
