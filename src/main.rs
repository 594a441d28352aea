//! ctxplan CLI
//!
//! Usage: ctxplan <COMMAND> <SOLUTION> [OPTIONS]
//!
//! Commands:
//!   resolve  Resolve contexts into build plans
//!   list     List contexts, packs, layers, toolchains, dependencies or configs

mod commands;

use std::process::ExitCode;

use clap::Parser;

use ctxplan::presentation::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::dispatch(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
