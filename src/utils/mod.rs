//! Utility modules
//!
//! This module contains:
//! - Error types and result types
//! - Merge diagnostics and reports

pub mod error;
pub mod report;

// Re-export commonly used items
pub use error::{MergeError, MergeResult};
pub use report::{DiagnosticKind, MergeDiagnostic, MergeReport};
