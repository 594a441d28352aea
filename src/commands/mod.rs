//! Command handlers
//!
//! Each handler returns `Ok(true)` on success and `Ok(false)` when the
//! command ran but the outcome should fail the process.

mod list;
mod resolve;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{warn, Level};

use ctxplan::application::ResolveOptions;
use ctxplan::config::Config;
use ctxplan::domain::entities::Solution;
use ctxplan::domain::services::Inventories;
use ctxplan::domain::value_objects::ContextOrder;
use ctxplan::infrastructure::{FsLayerDiscovery, StaticInventory};
use ctxplan::presentation::{open_solution, Cli, Commands, OutputFormat, RunArgs};

pub fn dispatch(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Resolve { run } => {
            let session = Session::open(cli, run)?;
            resolve::cmd_resolve(&session)
        }
        Commands::List(list) => {
            let session = Session::open(cli, list.run_args())?;
            list::cmd_list(&session, list)
        }
    }
}

/// Everything a command needs, assembled from the solution, the config and
/// the command line.
pub struct Session {
    pub solution: Solution,
    pub inventory: StaticInventory,
    pub layers: FsLayerDiscovery,
    pub options: ResolveOptions,
    /// Order of `list contexts`; everything else follows declaration order.
    pub list_order: ContextOrder,
    pub format: OutputFormat,
    pub cancel: Arc<AtomicBool>,
}

impl Session {
    fn open(cli: &Cli, run: &RunArgs) -> Result<Self> {
        let solution_dir = run
            .solution
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (config, warnings) =
            Config::load_for_solution(&solution_dir).context("failed to load configuration")?;

        let level = if cli.debug {
            Level::DEBUG
        } else if cli.verbose {
            Level::INFO
        } else {
            config.output.verbosity.log_level()
        };
        ctxplan::init_tracing(cli.json, level);

        for warning in &warnings {
            warn!(
                key = %warning.key,
                file = %warning.file.display(),
                line = ?warning.line,
                suggestion = ?warning.suggestion,
                "unknown config key"
            );
        }

        let inventory_file = run.inventory.as_deref().or(config.inventory.file.as_deref());
        let (solution, inventory) = open_solution(&run.solution, inventory_file)?;

        let options = apply_args(ResolveOptions::from_config(&config), run, solution.directory());
        let list_order = if run.yml_order {
            ContextOrder::Yml
        } else {
            config.selection.order()
        };

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            warn!(error = %e, "failed to install Ctrl-C handler");
        }

        Ok(Self {
            solution,
            inventory,
            layers: FsLayerDiscovery::new(),
            options,
            list_order,
            format: OutputFormat::from_flag(cli.json),
            cancel,
        })
    }

    pub fn inventories(&self) -> Inventories<'_> {
        Inventories {
            packs: &self.inventory,
            toolchains: &self.inventory,
            devices: &self.inventory,
            layers: &self.layers,
        }
    }
}

/// Command line flags override the configuration.
fn apply_args(mut options: ResolveOptions, run: &RunArgs, solution_dir: &Path) -> ResolveOptions {
    options.patterns = run.contexts.clone();
    if let Some(load) = run.load {
        options.policy = load;
    }
    if let Some(toolchain) = &run.toolchain {
        options.toolchain = Some(toolchain.clone());
    }
    options.layer_search_paths.extend(run.layer_paths.iter().cloned());
    options.layer_search_paths = options
        .layer_search_paths
        .iter()
        .map(|p| solution_dir.join(p))
        .collect();
    options.use_context_set |= run.context_set;
    options.frozen |= run.frozen_packs;
    if let Some(output) = &run.output {
        options.output_dir = Some(output.clone());
    }
    options
}

/// Print a value as pretty JSON on stdout.
pub fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
