//! The `prereq schema` command prints the inventory JSON Schema.

use crate::config::Inventory;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = schemars::schema_for!(Inventory);
        let json = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::from)?;
        ui.output(&json);
        ui.output("\n");
        Ok(CommandResult::success())
    }
}
