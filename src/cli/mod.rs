//! Command-line interface layer.
//!
//! - `args`: clap argument definitions
//! - `commands`: `extract` and `init` implementations
//! - `output`: catalog serialization to a file or stdout
//! - `report`: diagnostics on stderr
//! - `logging`: tracing subscriber setup

use anyhow::Result;

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod logging;
pub mod output;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
