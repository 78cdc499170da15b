//! Template merge engine
//!
//! Placeholder scanning, content substitution, table materialization and
//! the orchestrator that sequences them over a document body.

pub mod content;
pub mod merge;
pub mod options;
pub mod scanner;
pub mod table;
pub mod traverse;

pub use merge::{merge, merge_in_place, merge_with_options, MergeOutput, MergeStage, Merger};
pub use options::MergeOptions;
pub use scanner::{scan_content, scan_tables, Placeholder, PlaceholderKind};
