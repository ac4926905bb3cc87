//! intlx - react-intl message extraction with scope-aware merging
//!
//! intlx extracts message descriptors (`defineMessages`, `formatMessage`,
//! `<FormattedMessage>`) from many source files and folds them into a single
//! catalog keyed by message id. Ids that repeat inside one application are
//! merged; ids that collide across unrelated applications or shared packages
//! are flagged instead of silently merged.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, scope classification and aggregation

pub mod cli;
pub mod config;
pub mod core;
