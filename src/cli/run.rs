//! Command dispatch for the intlx CLI.
use std::env;

use anyhow::{Context, Result};

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            init(&cwd)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
