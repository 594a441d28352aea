//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (`--json`, `--verbose`, `--debug`) are inherited by all
//! subcommands. Every subcommand takes the solution document and the run
//! options in `RunArgs`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::entities::ToolchainRequirement;
use crate::domain::value_objects::LoadPacksPolicy;

/// ctxplan - context resolution and build planning for embedded solutions
#[derive(Parser, Debug)]
#[command(name = "ctxplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Log progress of each context
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log resolution details
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve contexts into build plans and update the build index
    Resolve {
        #[command(flatten)]
        run: RunArgs,
    },

    /// List information about the solution
    #[command(subcommand)]
    List(ListCommand),
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// Contexts of the solution
    Contexts {
        #[command(flatten)]
        run: RunArgs,

        /// Only contexts whose identifier contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Packs required by the selected contexts
    Packs {
        #[command(flatten)]
        run: RunArgs,

        /// Only packs that are not installed
        #[arg(short, long)]
        missing: bool,
    },

    /// Available, referenced and compatible layers per context
    Layers {
        #[command(flatten)]
        run: RunArgs,

        /// Record compatible layers in the build index
        #[arg(long)]
        update_idx: bool,
    },

    /// Installed toolchains
    Toolchains {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Unresolved component dependencies
    Dependencies {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Component configuration files
    Configs {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Components shipped by the packs of the selected contexts
    Components {
        #[command(flatten)]
        run: RunArgs,

        /// Only components whose entry contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Boards of the inventory
    Boards {
        #[command(flatten)]
        run: RunArgs,

        /// Only boards whose entry contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Devices of the inventory
    Devices {
        #[command(flatten)]
        run: RunArgs,

        /// Only devices whose entry contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
}

impl ListCommand {
    pub fn run_args(&self) -> &RunArgs {
        match self {
            ListCommand::Contexts { run, .. }
            | ListCommand::Packs { run, .. }
            | ListCommand::Layers { run, .. }
            | ListCommand::Toolchains { run }
            | ListCommand::Dependencies { run }
            | ListCommand::Configs { run }
            | ListCommand::Components { run, .. }
            | ListCommand::Boards { run, .. }
            | ListCommand::Devices { run, .. } => run,
        }
    }
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Solution document (*.csolution.yml)
    pub solution: PathBuf,

    /// Inventory of installed packs, toolchains, boards and devices
    #[arg(short, long, value_name = "FILE")]
    pub inventory: Option<PathBuf>,

    /// Context pattern `project[.build][+target]` (repeatable)
    #[arg(short, long = "context", value_name = "PATTERN")]
    pub contexts: Vec<String>,

    /// Pack loading policy: latest, all or required
    #[arg(short, long, value_parser = parse_policy)]
    pub load: Option<LoadPacksPolicy>,

    /// Additional layer search path (repeatable)
    #[arg(short = 'L', long = "layer-path", value_name = "PATH")]
    pub layer_paths: Vec<PathBuf>,

    /// Force a toolchain, e.g. GCC or GCC@12.2.0
    #[arg(short, long, value_parser = parse_toolchain)]
    pub toolchain: Option<ToolchainRequirement>,

    /// Use and update the saved context set
    #[arg(short = 'S', long)]
    pub context_set: bool,

    /// Fail contexts whose packs differ from the build index
    #[arg(long)]
    pub frozen_packs: bool,

    /// List contexts in declaration order instead of sorted
    #[arg(long)]
    pub yml_order: bool,

    /// Root of the out/ and tmp/ directories
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

fn parse_policy(value: &str) -> Result<LoadPacksPolicy, String> {
    value.parse::<LoadPacksPolicy>().map_err(|e| e.to_string())
}

fn parse_toolchain(value: &str) -> Result<ToolchainRequirement, String> {
    ToolchainRequirement::parse(value).map_err(|e| e.to_string())
}
