//! Extraction and aggregation pipeline.
//!
//! 1. **Extraction**: every input file is parsed and walked in parallel with rayon.
//!    Each file produces either a complete list of descriptors or an error.
//! 2. **Annotation**: missing ids are resolved, scopes are derived from the path.
//! 3. **Aggregation**: batches are folded strictly in input order.
//!
//! Only extraction runs concurrently. The fold depends on everything folded
//! before it, so it is a sequential reduce over finished batches.

use std::{sync::Arc, time::Instant};

use anyhow::Result;
use rayon::prelude::*;
use swc_common::SourceMap;
use tracing::debug;

use crate::core::{
    aggregate::Aggregate,
    data::{Description, ExtractedMessage, FileBatch, MessageDescriptor},
    extract::{ExtractOptions, IdResolver, extract_file, extract_source},
    scope::classify,
};

/// File name used for source read from standard input.
pub const STDIN_FILE_NAME: &str = "<stdin>";

#[derive(Clone, Default)]
pub struct PipelineOptions {
    pub extract: ExtractOptions,
    pub resolver: Option<Arc<dyn IdResolver>>,
    /// Abort on the first failing file instead of skipping it.
    pub throws: bool,
}

/// A file that could not be read, parsed or annotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub file_path: String,
    pub message: String,
}

/// A descriptor without an id that could not be given one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMessage {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub aggregate: Aggregate,
    pub file_errors: Vec<FileError>,
    pub skipped: Vec<SkippedMessage>,
    pub files_processed: usize,
}

impl PipelineOutput {
    pub fn has_errors(&self) -> bool {
        !self.file_errors.is_empty()
    }
}

/// Turn one file's extracted messages into a scope-annotated batch.
///
/// Messages without an id go through `resolver`; without one they are
/// returned as skipped and left out of the batch.
pub fn build_batch(
    file_path: &str,
    extracted: Vec<ExtractedMessage>,
    resolver: Option<&dyn IdResolver>,
) -> Result<(FileBatch, Vec<SkippedMessage>)> {
    let scopes = classify(file_path);
    let mut messages = Vec::with_capacity(extracted.len());
    let mut skipped = Vec::new();

    for message in extracted {
        let id = match (message.id, resolver) {
            (Some(id), _) => id,
            (None, Some(resolver)) => resolver.resolve(
                message.default_message.as_deref(),
                message.description.as_ref().map(Description::as_content),
                file_path,
            )?,
            (None, None) => {
                skipped.push(SkippedMessage {
                    file_path: file_path.to_string(),
                    line: message.line,
                    col: message.col,
                });
                continue;
            }
        };

        messages.push(MessageDescriptor {
            id,
            default_message: message.default_message,
            description: message.description,
            source_file: file_path.to_string(),
            app_scope: scopes.app.clone(),
            feature_scope: scopes.feature.clone(),
            package_scope: scopes.package.clone(),
            is_duplicate: false,
        });
    }

    Ok((FileBatch::new(file_path, messages), skipped))
}

/// Extract and aggregate `files`, in the order given.
pub fn run_files(files: &[String], options: &PipelineOptions) -> Result<PipelineOutput> {
    let source_map: Arc<SourceMap> = Default::default();
    let start = Instant::now();

    let extracted: Vec<Result<Vec<ExtractedMessage>>> = files
        .par_iter()
        .map(|file| extract_file(file, Arc::clone(&source_map), &options.extract))
        .collect();

    debug!(
        files = files.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "extraction finished"
    );

    fold_results(files.iter().map(String::as_str).zip(extracted), options)
}

/// Extract and aggregate a single in-memory source, such as standard input.
pub fn run_source(code: String, file_path: &str, options: &PipelineOptions) -> Result<PipelineOutput> {
    let extracted = extract_source(code, file_path, Default::default(), &options.extract);
    fold_results([(file_path, extracted)], options)
}

fn fold_results<'a>(
    results: impl IntoIterator<Item = (&'a str, Result<Vec<ExtractedMessage>>)>,
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    let mut output = PipelineOutput::default();
    let resolver = options.resolver.as_deref();

    for (file_path, result) in results {
        output.files_processed += 1;

        let batch = result.and_then(|extracted| build_batch(file_path, extracted, resolver));
        match batch {
            Ok((batch, skipped)) => {
                debug!(file = file_path, messages = batch.messages.len(), "folding batch");
                output.skipped.extend(skipped);
                output.aggregate = output.aggregate.fold_batch(batch);
            }
            Err(e) if options.throws => {
                return Err(e.context(format!("Failed to extract messages from {}", file_path)));
            }
            Err(e) => output.file_errors.push(FileError {
                file_path: file_path.to_string(),
                message: format!("{:#}", e),
            }),
        }
    }

    Ok(output)
}
