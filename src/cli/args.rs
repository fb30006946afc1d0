//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::report::OutputFormat;
use crate::upgrade::UpgradeType;

/// prereq - Pre-upgrade precondition checks for cluster software stacks.
#[derive(Debug, Parser)]
#[command(name = "prereq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show check descriptions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run pre-upgrade checks against an inventory
    Check(CheckArgs),

    /// List registered checks in execution order
    List(ListArgs),

    /// Print the JSON Schema of the inventory file
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Inventory file describing clusters, repositories, and the plan
    #[arg(value_name = "INVENTORY")]
    pub inventory: PathBuf,

    /// Override the plan's upgrade type
    #[arg(short = 't', long, value_enum, env = "PREREQ_UPGRADE_TYPE")]
    pub upgrade_type: Option<UpgradeType>,

    /// Skip checks that are not required for the upgrade type
    #[arg(long)]
    pub required_only: bool,

    /// Report failed checks as bypassed instead of blocking
    #[arg(long)]
    pub bypass: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Mark each check as required or optional for this upgrade type
    #[arg(short = 't', long, value_enum)]
    pub upgrade_type: Option<UpgradeType>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
