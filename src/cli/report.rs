//! Report formatting and printing utilities.
//!
//! Diagnostics go to stderr so that the catalog on stdout stays valid JSON.
//! Separate from core logic to allow intlx to be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::{AggregateStats, Conflict, FileError, PipelineOutput, SkippedMessage};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print every diagnostic for a finished run to stderr.
pub fn print(output: &PipelineOutput, verbose: bool) {
    print_to(output, verbose, &mut io::stderr().lock());
}

pub fn print_to<W: Write>(output: &PipelineOutput, verbose: bool, writer: &mut W) {
    print_file_errors_to(&output.file_errors, verbose, writer);
    print_skipped_to(&output.skipped, writer);
    if verbose {
        print_conflicts_to(output.aggregate.conflicts(), writer);
        print_summary_to(
            output.files_processed,
            output.aggregate.len(),
            &output.aggregate.stats(),
            output.file_errors.len(),
            writer,
        );
    }
}

/// Print files that could not be extracted.
///
/// Without `verbose`, only a count is shown.
pub fn print_file_errors_to<W: Write>(errors: &[FileError], verbose: bool, writer: &mut W) {
    if errors.is_empty() {
        return;
    }

    if verbose {
        for err in errors {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "error:".bold().red(),
                err.file_path,
                err.message
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be extracted (use {} for details)",
            "error:".bold().red(),
            errors.len(),
            "-v".cyan()
        );
    }
}

pub fn print_skipped_to<W: Write>(skipped: &[SkippedMessage], writer: &mut W) {
    for message in skipped {
        let _ = writeln!(
            writer,
            "{} {}:{}:{} message has no id; pass {} to generate one",
            "warning:".bold().yellow(),
            message.file_path,
            message.line,
            message.col,
            "--id-interpolation-pattern".cyan()
        );
    }
}

/// Print identifiers that collided across unrelated scopes.
pub fn print_conflicts_to<W: Write>(conflicts: &[Conflict], writer: &mut W) {
    for conflict in conflicts {
        let _ = writeln!(
            writer,
            "{} id {} is shared across unrelated {}s",
            "warning:".bold().yellow(),
            format!("\"{}\"", conflict.id).bold(),
            conflict.scope.label()
        );
        let _ = writeln!(writer, "  {} kept {}", "-->".blue(), conflict.kept_file);
        let _ = writeln!(
            writer,
            "  {} ignored {}",
            "-->".blue(),
            conflict.discarded_file
        );
    }
}

pub fn print_summary_to<W: Write>(
    files: usize,
    messages: usize,
    stats: &AggregateStats,
    failed_files: usize,
    writer: &mut W,
) {
    let headline = format!(
        "Extracted {} {} from {} {}",
        messages,
        if messages == 1 { "message" } else { "messages" },
        files,
        if files == 1 { "file" } else { "files" }
    );
    let details = format!(
        "{} merged, {} demoted to application, {} cross-scope conflicts",
        stats.merged,
        stats.demoted_features,
        stats.discarded_apps + stats.discarded_packages
    );

    if failed_files == 0 {
        let _ = writeln!(
            writer,
            "{} {} ({})",
            SUCCESS_MARK.green(),
            headline.green(),
            details
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({}, {} failed)",
            FAILURE_MARK.red(),
            headline.red(),
            details,
            failed_files
        );
    }
}
