//! Check command implementation.
//!
//! The `prereq check` command loads an inventory, runs every registered check
//! against its upgrade plan, and reports the outcome.

use std::sync::Arc;

use crate::checks::{
    CheckId, CheckRegistry, CheckSources, PrecheckReport, PrecheckRunner, RunnerOptions,
};
use crate::cli::args::CheckArgs;
use crate::config::{load_inventory, validate, Inventory};
use crate::error::Result;
use crate::report::{HumanFormatter, JsonFormatter, OutputFormat, ReportFormatter};
use crate::ui::UserInterface;
use crate::upgrade::PrereqCheckRequest;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Inventory settings with command-line flags applied on top.
    fn runner_options(&self, inventory: &Inventory) -> RunnerOptions {
        let mut options = RunnerOptions::from(&inventory.settings);
        options.required_only |= self.args.required_only;
        options.bypass_failures |= self.args.bypass;
        options
    }

    fn format_report(&self, report: &PrecheckReport, use_color: bool) -> std::io::Result<String> {
        let mut output = Vec::new();
        match self.args.format {
            OutputFormat::Json => JsonFormatter::new().format(report, &mut output)?,
            OutputFormat::Human => HumanFormatter::new(use_color).format(report, &mut output)?,
        }
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let inventory = match load_inventory(&self.args.inventory).and_then(|inventory| {
            validate(&inventory)?;
            Ok(inventory)
        }) {
            Ok(inventory) => inventory,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(CommandResult::UNUSABLE_INPUT));
            }
        };

        let Some(plan) = inventory.upgrade_plan(self.args.upgrade_type) else {
            ui.error(&format!(
                "Inventory {} has no upgrade plan",
                self.args.inventory.display()
            ));
            return Ok(CommandResult::failure(CommandResult::UNUSABLE_INPUT));
        };

        let sources = CheckSources::new(
            Arc::new(inventory.cluster_registry()),
            Arc::new(inventory.repository_catalog()),
        );
        let registry = CheckRegistry::with_builtins(sources)?;
        let options = self.runner_options(&inventory);

        for id in &options.disabled_checks {
            if registry.get(&CheckId::new(id.as_str())).is_none() {
                ui.warning(&format!("Disabled check '{}' is not registered", id));
            }
        }

        let request = PrereqCheckRequest::new(plan);
        let report = match PrecheckRunner::new(&registry, options).run(&request) {
            Ok(report) => report,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(CommandResult::UNUSABLE_INPUT));
            }
        };

        let rendered = self.format_report(&report, ui.use_colors())?;
        ui.output(&rendered);

        if report.is_upgrade_allowed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(CommandResult::BLOCKED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HEALTHY: &str = r#"
clusters:
  c1:
    hosts:
      host1: {}
      host2: {}
    services:
      HDFS: { version: "3.1.1", hosts: [host1, host2] }
      ZOOKEEPER: { version: "3.4.6", hosts: [host1, host2] }
repositories:
  HDP-3.1.5:
    type: standard
    services:
      - { name: HDFS, version: "3.1.5" }
      - { name: ZOOKEEPER, version: "3.4.9" }
plan:
  cluster: c1
  repository: HDP-3.1.5
"#;

    fn args(path: &Path) -> CheckArgs {
        CheckArgs {
            inventory: path.to_path_buf(),
            upgrade_type: None,
            required_only: false,
            bypass: false,
            format: OutputFormat::Human,
        }
    }

    fn write(temp: &TempDir, content: &str) -> std::path::PathBuf {
        let path = temp.path().join("cluster.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn healthy_cluster_succeeds() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, HEALTHY);
        let mut ui = MockUI::new();

        let result = CheckCommand::new(args(&path)).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.output_text().contains("Upgrade can proceed"));
    }

    #[test]
    fn stopped_service_blocks() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, &HEALTHY.replace("version: \"3.1.1\",", "version: \"3.1.1\", state: installed,"));
        let mut ui = MockUI::new();

        let result = CheckCommand::new(args(&path)).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, CommandResult::BLOCKED);
        assert!(ui.output_text().contains("Services must be started before upgrading: HDFS"));
    }

    #[test]
    fn bypass_flag_lets_upgrade_proceed() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, &HEALTHY.replace("version: \"3.1.1\",", "version: \"3.1.1\", state: installed,"));
        let mut ui = MockUI::new();
        let mut args = args(&path);
        args.bypass = true;

        let result = CheckCommand::new(args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.output_text().contains("BYPASS"));
    }

    #[test]
    fn json_format_outputs_report() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, HEALTHY);
        let mut ui = MockUI::new();
        let mut args = args(&path);
        args.format = OutputFormat::Json;
        args.upgrade_type = Some(crate::upgrade::UpgradeType::Express);

        CheckCommand::new(args).execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(ui.output_text()).unwrap();
        assert_eq!(json["upgrade_type"], "express");
        assert_eq!(json["upgrade_allowed"], true);
    }

    #[test]
    fn invalid_inventory_is_unusable() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, &HEALTHY.replace("cluster: c1", "cluster: c9"));
        let mut ui = MockUI::new();

        let result = CheckCommand::new(args(&path)).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, CommandResult::UNUSABLE_INPUT);
        assert!(ui.errors()[0].contains("c9"));
    }

    #[test]
    fn missing_plan_is_unusable() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "clusters: { c1: {} }");
        let mut ui = MockUI::new();

        let result = CheckCommand::new(args(&path)).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, CommandResult::UNUSABLE_INPUT);
        assert!(ui.errors()[0].contains("no upgrade plan"));
    }

    #[test]
    fn warns_about_unknown_disabled_checks() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            &format!("{}\nsettings:\n  disabled_checks: [no-such-check]\n", HEALTHY),
        );
        let mut ui = MockUI::new();

        CheckCommand::new(args(&path)).execute(&mut ui).unwrap();

        assert_eq!(ui.warnings(), &["Disabled check 'no-such-check' is not registered"]);
    }

    #[test]
    fn flags_extend_inventory_settings() {
        let mut inventory = Inventory::default();
        inventory.settings.bypass_failures = true;
        let mut args = args(Path::new("unused.yml"));
        args.required_only = true;

        let options = CheckCommand::new(args).runner_options(&inventory);

        assert!(options.bypass_failures);
        assert!(options.required_only);
    }
}
