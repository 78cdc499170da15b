//! Document package boundary.
//!
//! The engine works on an in-memory [`Document`]; a package is whatever
//! knows how to produce one from storage and write it back. The bundled
//! [`JsonPackage`] keeps the tree as JSON on disk.

use std::fs;
use std::path::{Path, PathBuf};

use docmerge_ir::Document;

use crate::utils::error::{MergeError, MergeResult};

/// Source and sink of a document tree.
pub trait DocumentPackage {
    /// Load the document tree. A missing body is a structural error.
    fn load(&self) -> MergeResult<Document>;

    /// Persist a (merged) document tree.
    fn save(&self, document: &Document) -> MergeResult<()>;
}

/// A document tree stored as JSON.
#[derive(Debug, Clone)]
pub struct JsonPackage {
    path: PathBuf,
}

impl JsonPackage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentPackage for JsonPackage {
    fn load(&self) -> MergeResult<Document> {
        let source = fs::read_to_string(&self.path).map_err(|e| {
            MergeError::structural(format!(
                "cannot open document {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let document = document_from_json(&source)?;
        if document.body().is_none() {
            return Err(MergeError::structural(format!(
                "{} has no document body",
                self.path.display()
            )));
        }
        Ok(document)
    }

    fn save(&self, document: &Document) -> MergeResult<()> {
        let json = document_to_json(document)?;
        fs::write(&self.path, json).map_err(|e| {
            MergeError::structural(format!(
                "cannot write document {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

pub fn document_from_json(source: &str) -> MergeResult<Document> {
    serde_json::from_str(source)
        .map_err(|e| MergeError::structural(format!("invalid document tree: {}", e)))
}

pub fn document_to_json(document: &Document) -> MergeResult<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| MergeError::structural(format!("cannot serialize document tree: {}", e)))
}

/// Output name for a merged copy: `<stem>_merged.<ext>`.
pub fn merged_file_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{}_merged.{}", stem, ext.to_string_lossy()),
        None => format!("{}_merged", stem),
    };
    input.with_file_name(name)
}
