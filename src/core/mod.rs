//! Core extraction and aggregation engine.
//!
//! ## Module Structure
//!
//! - `data`: Message descriptors, scopes and per-file batches
//! - `parsers`: swc-based source parsing
//! - `extract`: AST visitor and identifier resolution
//! - `scope`: Path-based scope classification
//! - `aggregate`: Scope-aware merge of all batches into one catalog
//! - `pipeline`: Parallel extraction followed by the ordered fold

pub mod aggregate;
pub mod data;
pub mod extract;
pub mod parsers;
pub mod pipeline;
pub mod scope;

pub use aggregate::{Aggregate, AggregateStats, Conflict, DemotedScope, FoldOutcome, aggregate};
pub use data::{Description, ExtractedMessage, FileBatch, MessageDescriptor, Scopes};
pub use pipeline::{FileError, PipelineOptions, PipelineOutput, SkippedMessage};
