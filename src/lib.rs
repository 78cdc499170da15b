//! # Docmerge
//!
//! Merge an XML data tree into a rich-text document template.
//!
//! Templates carry textual placeholders inside ordinary paragraphs:
//!
//! - `<# <Content Select="./Applicant/FirstName" /> #>` is replaced inline
//!   with the text of the selected element.
//! - `<# <Table Select="./IncomesSources" /> #>` turns the children of the
//!   selected element into table rows, either by filling the next table in
//!   the document (cloning its template row) or by generating a new table
//!   in place.
//!
//! ## Example
//!
//! ```
//! use docmerge::{merge, DataTree};
//! use docmerge::ir::{Block, Document, Paragraph};
//!
//! let data = DataTree::from_xml(
//!     "<Data><Applicant><FirstName>Jane</FirstName></Applicant></Data>",
//! ).unwrap();
//! let template = Document::new(vec![Block::Paragraph(Paragraph::from_text(
//!     "Dear <# <Content Select=\"./Applicant/FirstName\" /> #>,",
//! ))]);
//!
//! let merged = merge(template, &data).unwrap();
//! let first = merged.body().unwrap().blocks[0].as_paragraph().unwrap();
//! assert_eq!(first.text(), "Dear Jane,");
//! ```

pub mod core;
pub mod data;
pub mod package;
pub mod sample;
pub mod utils;

pub use docmerge_ir as ir;

pub use crate::core::{
    merge, merge_in_place, merge_with_options, scan_content, scan_tables, MergeOptions,
    MergeOutput, MergeStage, Merger, Placeholder, PlaceholderKind,
};
pub use data::{normalize_path, DataContent, DataNode, DataTree};
pub use package::{merged_file_name, DocumentPackage, JsonPackage};
pub use sample::sample_template;
pub use utils::{DiagnosticKind, MergeDiagnostic, MergeError, MergeReport, MergeResult};

/// Load a data file and merge it into a packaged document.
///
/// The package is read, merged and written back to `output`.
pub fn merge_package<P, Q>(
    template: &P,
    data_path: impl AsRef<std::path::Path>,
    output: &Q,
    options: &MergeOptions,
) -> MergeResult<MergeReport>
where
    P: DocumentPackage + ?Sized,
    Q: DocumentPackage + ?Sized,
{
    let data = DataTree::from_path(data_path)?;
    let mut document = template.load()?;
    let report = merge_in_place(&mut document, &data, options)?;
    output.save(&document)?;
    Ok(report)
}
