use std::{
    collections::HashSet,
    env,
    io::{self, IsTerminal, Read},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use colored::Colorize;
use glob::glob;
use tracing::debug;

use super::super::{args::ExtractCommand, exit_status::ExitStatus, output, report};
use crate::{
    config::{Config, load_config},
    core::{
        extract::{ExtractOptions, IdResolver, InterpolatedId},
        pipeline::{PipelineOptions, STDIN_FILE_NAME, run_files, run_source},
    },
};

/// Effective settings: CLI arguments take priority over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSettings {
    pub out_file: Option<PathBuf>,
    pub id_interpolation_pattern: Option<String>,
    pub additional_function_names: Vec<String>,
    pub additional_component_names: Vec<String>,
    pub preserve_whitespace: bool,
    pub throws: bool,
}

impl ExtractSettings {
    pub fn resolve(cmd: &ExtractCommand, config: &Config) -> Self {
        let merge = |from_config: &[String], from_cli: &[String]| {
            let mut names = from_config.to_vec();
            names.extend(from_cli.iter().filter(|n| !from_config.contains(*n)).cloned());
            names
        };

        Self {
            out_file: cmd
                .out_file
                .clone()
                .or_else(|| config.out_file.as_ref().map(PathBuf::from)),
            id_interpolation_pattern: cmd
                .id_interpolation_pattern
                .clone()
                .or_else(|| config.id_interpolation_pattern.clone()),
            additional_function_names: merge(
                &config.additional_function_names,
                &cmd.additional_function_names,
            ),
            additional_component_names: merge(
                &config.additional_component_names,
                &cmd.additional_component_names,
            ),
            preserve_whitespace: cmd.preserve_whitespace || config.preserve_whitespace,
            throws: cmd.throws,
        }
    }

    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        let resolver = match &self.id_interpolation_pattern {
            Some(pattern) => {
                let resolver = InterpolatedId::new(pattern.as_str())
                    .with_context(|| format!("Invalid --id-interpolation-pattern \"{}\"", pattern))?;
                Some(Arc::new(resolver) as Arc<dyn IdResolver>)
            }
            None => None,
        };

        Ok(PipelineOptions {
            extract: ExtractOptions::default()
                .with_additional(
                    &self.additional_function_names,
                    &self.additional_component_names,
                )
                .with_preserve_whitespace(self.preserve_whitespace),
            resolver,
            throws: self.throws,
        })
    }
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Expand glob arguments and drop ignored or repeated files.
///
/// Literal paths are kept as given, even when missing, so that they surface
/// as extraction errors instead of disappearing silently.
pub fn expand_inputs(inputs: &[String], config: &Config, verbose: bool) -> Result<Vec<String>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for input in inputs {
        let candidates: Vec<String> = if is_glob_pattern(input) {
            let mut matched: Vec<String> = glob(input)
                .with_context(|| format!("Invalid glob pattern: \"{}\"", input))?
                .flatten()
                .filter(|path| path.is_file())
                .map(|path| path.to_string_lossy().into_owned())
                .collect();
            matched.sort();
            if matched.is_empty() && verbose {
                eprintln!(
                    "{} Pattern matched no files: {}",
                    "warning:".bold().yellow(),
                    input
                );
            }
            matched
        } else {
            vec![input.clone()]
        };

        for file in candidates {
            if config.is_ignored(&file) {
                debug!(file = %file, "ignored by config");
                continue;
            }
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }

    Ok(files)
}

fn read_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!(
            "{} Reading source file from TTY.",
            "warning:".bold().yellow()
        );
    }

    let mut code = String::new();
    stdin
        .lock()
        .read_to_string(&mut code)
        .context("Failed to read standard input")?;
    Ok(code)
}

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let loaded = load_config(&cwd)?;
    if loaded.from_file {
        debug!("using config file");
    }

    let settings = ExtractSettings::resolve(&cmd, &loaded.config);
    let options = settings.pipeline_options()?;

    let result = if cmd.files.is_empty() {
        run_source(read_stdin()?, STDIN_FILE_NAME, &options)?
    } else {
        let files = expand_inputs(&cmd.files, &loaded.config, cmd.verbose)?;
        run_files(&files, &options)?
    };

    let messages = result.aggregate.messages();
    match &settings.out_file {
        Some(path) => output::write_file(messages, path)?,
        None => output::write_stdout(messages)?,
    }

    report::print(&result, cmd.verbose);

    Ok(if result.has_errors() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}
