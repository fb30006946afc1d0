//! Inventory file loading.
//!
//! An inventory at `path/to/cluster.yml` may be accompanied by local
//! overrides at `path/to/cluster.local.yml`. Both are read as raw YAML,
//! deep-merged, and only then deserialized.

use crate::config::merger::merge_layers;
use crate::config::schema::Inventory;
use crate::error::{PrereqError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Paths to the inventory layers in merge order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryPaths {
    /// The inventory named on the command line.
    pub base: PathBuf,

    /// Local overrides beside it, when present.
    pub local: Option<PathBuf>,
}

impl InventoryPaths {
    /// Discover the layers for the inventory at `base`.
    pub fn discover(base: &Path) -> Self {
        let local = local_overlay_path(base).filter(|p| p.is_file());
        Self {
            base: base.to_path_buf(),
            local,
        }
    }

    /// Existing layers in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        std::iter::once(&self.base).chain(&self.local).collect()
    }
}

/// The `.local` sibling of an inventory file: `cluster.yml` becomes
/// `cluster.local.yml`.
pub fn local_overlay_path(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.local.{}", stem, ext),
        None => format!("{}.local", stem),
    };
    Some(path.with_file_name(name))
}

/// Parse YAML content into an [`Inventory`].
///
/// `source_path` is only used for error reporting.
pub fn parse_inventory(content: &str, source_path: &Path) -> Result<Inventory> {
    let value = parse_value(content, source_path)?;
    from_value(value, source_path)
}

/// Load an inventory file as raw YAML for merging.
///
/// An empty document loads as an empty mapping.
pub fn load_inventory_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PrereqError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PrereqError::Io(e)
        }
    })?;

    parse_value(&content, path)
}

/// Load an inventory and its local overrides.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the inventory doesn't exist.
/// Returns `ConfigParseError` if any layer is invalid YAML or the merged
/// document doesn't match the inventory schema.
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    let paths = InventoryPaths::discover(path);

    let layers = paths
        .all_existing()
        .into_iter()
        .map(|layer| {
            debug!(path = %layer.display(), "Loading inventory layer");
            load_inventory_value(layer)
        })
        .collect::<Result<Vec<_>>>()?;

    from_value(merge_layers(&layers), path)
}

fn parse_value(content: &str, source_path: &Path) -> Result<serde_yaml::Value> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| PrereqError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(match value {
        serde_yaml::Value::Null => serde_yaml::Value::Mapping(Default::default()),
        other => other,
    })
}

fn from_value(value: serde_yaml::Value, source_path: &Path) -> Result<Inventory> {
    serde_yaml::from_value(value).map_err(|e| PrereqError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
