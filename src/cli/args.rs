//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract messages from source files into one merged catalog
//! - `init`: Initialize intlx configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::extract::DEFAULT_ID_INTERPOLATION_PATTERN;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractCommand {
    /// Source files or glob patterns (reads standard input when omitted)
    pub files: Vec<String>,

    /// Write the catalog to this file instead of standard output
    #[arg(long)]
    pub out_file: Option<PathBuf>,

    /// Derive ids for messages without one, e.g. "[sha512:contenthash:base64:6]"
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = DEFAULT_ID_INTERPOLATION_PATTERN
    )]
    pub id_interpolation_pattern: Option<String>,

    /// Extra functions taking a message descriptor (repeatable)
    #[arg(long = "additional-function-names", value_name = "NAME")]
    pub additional_function_names: Vec<String>,

    /// Extra components taking message descriptor props (repeatable)
    #[arg(long = "additional-component-names", value_name = "NAME")]
    pub additional_component_names: Vec<String>,

    /// Keep whitespace in default messages as written
    #[arg(long)]
    pub preserve_whitespace: bool,

    /// Stop at the first file that fails to extract
    #[arg(long)]
    pub throws: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract messages and merge them into one scope-aware catalog
    Extract(ExtractCommand),
    /// Initialize a new .intlxrc.json configuration file
    Init,
}
