//! Core data types shared by the extractor, the classifier and the aggregator.
//!
//! ## Module Structure
//!
//! - `message`: Message-related types (ExtractedMessage, MessageDescriptor, Description, FileBatch, Scopes)

pub mod message;

pub use message::{Description, ExtractedMessage, FileBatch, MessageDescriptor, Scopes};
