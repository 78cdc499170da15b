//! Diagnostics for placeholders that could not be honored.
//!
//! None of these abort a merge; they are collected so callers can see what
//! was blanked or skipped.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A path did not resolve, or a table placeholder sat too deep to expand;
    /// output degraded to blank text, an empty table or the untouched marker
    UnresolvedPlaceholder,
    /// Existing table had no usable template row or column mapping
    TemplateRowMismatch,
    /// Table placeholder in a body paragraph or top-level cell had no
    /// following table; a table is generated in its place
    MissingTargetTable,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnresolvedPlaceholder => write!(f, "unresolved placeholder"),
            DiagnosticKind::TemplateRowMismatch => write!(f, "template row mismatch"),
            DiagnosticKind::MissingTargetTable => write!(f, "missing target table"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Normalized data path of the placeholder, when one applies
    pub path: Option<String>,
}

impl MergeDiagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Informational kinds do not count against strict mode.
    pub fn is_informational(&self) -> bool {
        self.kind == DiagnosticKind::MissingTargetTable
    }
}

impl fmt::Display for MergeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "[{}] {}: {}", self.kind, path, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

/// Counts and diagnostics gathered over one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub content_placeholders: usize,
    pub tables_synthesized: usize,
    pub tables_populated: usize,
    pub diagnostics: Vec<MergeDiagnostic>,
}

impl MergeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and mirror it to the log.
    pub fn push(&mut self, diagnostic: MergeDiagnostic) {
        if diagnostic.is_informational() {
            log::info!("{}", diagnostic);
        } else {
            log::warn!("{}", diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.iter().all(MergeDiagnostic::is_informational)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}
