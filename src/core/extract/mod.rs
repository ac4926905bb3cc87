//! Per-file message extraction.
//!
//! A file is parsed with swc, walked by [`MessageCollector`], and every
//! descriptor found is returned in source order. Identifier resolution and
//! scope annotation happen afterwards, in the pipeline.

pub mod collector;
pub mod id;

use std::{fs, sync::Arc};

use anyhow::{Context, Result};
use swc_common::SourceMap;
use swc_ecma_visit::VisitWith;

pub use collector::{ExtractOptions, MessageCollector};
pub use id::{DEFAULT_ID_INTERPOLATION_PATTERN, IdResolver, InterpolatedId};

use crate::core::{data::ExtractedMessage, parsers::source::parse_source};

/// Extract every message descriptor from a source string.
pub fn extract_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
    options: &ExtractOptions,
) -> Result<Vec<ExtractedMessage>> {
    let parsed = parse_source(code, file_path, source_map)?;
    let mut collector = MessageCollector::new(parsed.source_map, options);
    parsed.module.visit_with(&mut collector);
    Ok(collector.messages)
}

/// Read and extract a file from disk.
pub fn extract_file(
    file_path: &str,
    source_map: Arc<SourceMap>,
    options: &ExtractOptions,
) -> Result<Vec<ExtractedMessage>> {
    let code = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))?;
    extract_source(code, file_path, source_map, options)
}
