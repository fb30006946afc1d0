//! List command implementation.
//!
//! The `prereq list` command lists the registered checks in execution order.

use serde::Serialize;
use std::sync::Arc;

use crate::checks::{
    format_entity_list, CheckDescriptor, CheckRegistry, CheckSources, UpgradeCheck,
};
use crate::cli::args::ListArgs;
use crate::cluster::InMemoryClusters;
use crate::error::Result;
use crate::ui::{PrereqTheme, UserInterface};
use crate::upgrade::RepositoryCatalog;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    #[serde(flatten)]
    descriptor: &'a CheckDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    fn required(&self, check: &UpgradeCheck) -> Option<bool> {
        self.args.upgrade_type.map(|t| check.is_required(t))
    }

    fn describe(&self, check: &UpgradeCheck) -> String {
        let required_for = check.descriptor().required_for();
        let requiredness = match self.required(check) {
            Some(true) => "required".to_string(),
            Some(false) => "optional".to_string(),
            None if required_for.is_empty() => "never required".to_string(),
            None => format!(
                "required for {}",
                format_entity_list(required_for.iter().map(|t| t.as_str()))
            ),
        };

        let mut parts = vec![
            format!("scope {}", check.scope()),
            format!("group {}", check.group()),
            format!("order {}", check.order()),
        ];
        if !check.applicable_services().is_empty() {
            parts.push(format!(
                "services {}",
                format_entity_list(check.applicable_services())
            ));
        }
        parts.push(requiredness);
        parts.join(" · ")
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let sources = CheckSources::new(
            Arc::new(InMemoryClusters::new()),
            Arc::new(RepositoryCatalog::new()),
        );
        let registry = CheckRegistry::with_builtins(sources)?;
        let checks = registry.ordered();

        if self.args.json {
            let entries: Vec<_> = checks
                .iter()
                .map(|check| ListEntry {
                    descriptor: check.descriptor(),
                    required: self.required(check),
                })
                .collect();
            let json = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
            ui.output(&json);
            ui.output("\n");
            return Ok(CommandResult::success());
        }

        let theme = if ui.use_colors() {
            PrereqTheme::new()
        } else {
            PrereqTheme::plain()
        };
        let details = ui.output_mode().shows_details();

        match self.args.upgrade_type {
            Some(upgrade_type) => ui.show_header(&format!("Checks for {} upgrades", upgrade_type)),
            None => ui.show_header("Checks"),
        }

        for check in checks {
            ui.output(&format!(
                "  {} {}\n",
                theme.highlight.apply_to(check.id()),
                theme.dim.apply_to(self.describe(check))
            ));
            if details && !check.descriptor().description().is_empty() {
                ui.output(&format!("      {}\n", check.descriptor().description()));
            }
        }

        Ok(CommandResult::success())
    }
}
