//! Merge orchestration.
//!
//! A merge runs two passes over the body:
//!
//! 1. Table placeholders, found anywhere in the body. A placeholder followed
//!    by a table later in document order fills that table; one with no
//!    following table is left for the next pass.
//! 2. Content placeholders in body paragraphs and in the paragraphs of
//!    cells of top-level tables. Table placeholders still present here get a
//!    freshly synthesized table.
//!
//! The two passes deliberately walk to different depths.

use std::fmt;

use docmerge_ir::{Block, Body, Document};

use super::content::substitute_content;
use super::options::MergeOptions;
use super::scanner::scan_tables;
use super::table::synthesize::table_rows;
use super::table::{populate_table, split_around_tables, PopulateOutcome};
use super::traverse::{block_at, block_at_mut, flatten, BlockKind, BlockPath};
use crate::data::{normalize_path, DataTree};
use crate::utils::error::{MergeError, MergeResult};
use crate::utils::report::{DiagnosticKind, MergeDiagnostic, MergeReport};

/// Table nesting reached by the content pass.
const CONTENT_PASS_DEPTH: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStage {
    Idle,
    TablePlaceholdersResolved,
    ContentPlaceholdersResolved,
    Done,
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStage::Idle => write!(f, "idle"),
            MergeStage::TablePlaceholdersResolved => write!(f, "table placeholders resolved"),
            MergeStage::ContentPlaceholdersResolved => write!(f, "content placeholders resolved"),
            MergeStage::Done => write!(f, "done"),
        }
    }
}

/// A merged document together with what happened along the way.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub document: Document,
    pub report: MergeReport,
}

/// Where a table placeholder's rows go.
#[derive(Debug, Clone)]
enum TableTarget {
    Following(BlockPath),
    /// The target sat in a template row that has since been removed
    Detached,
    Missing,
}

#[derive(Debug, Clone)]
struct PendingTable {
    paragraph: Option<BlockPath>,
    literal: String,
    path: String,
    target: TableTarget,
}

/// Single-use merge state over one data tree.
pub struct Merger<'d> {
    data: &'d DataTree,
    options: MergeOptions,
    report: MergeReport,
    stage: MergeStage,
}

impl<'d> Merger<'d> {
    pub fn new(data: &'d DataTree, options: MergeOptions) -> Self {
        Self {
            data,
            options,
            report: MergeReport::new(),
            stage: MergeStage::Idle,
        }
    }

    pub fn stage(&self) -> MergeStage {
        self.stage
    }

    fn advance(&mut self, next: MergeStage) {
        log::debug!("merge stage: {} -> {}", self.stage, next);
        self.stage = next;
    }

    /// Run both passes over `document` and return the collected report.
    ///
    /// A merger runs once; afterwards [`Merger::stage`] tells how far it
    /// got, which is short of `Done` when strict mode rejected the result.
    pub fn run(&mut self, document: &mut Document) -> MergeResult<MergeReport> {
        if self.stage != MergeStage::Idle {
            return Err(MergeError::structural(format!(
                "merger already used (stage: {})",
                self.stage
            )));
        }
        let body = document
            .body_mut()
            .ok_or_else(|| MergeError::structural("document has no body"))?;

        self.resolve_table_placeholders(body);
        self.advance(MergeStage::TablePlaceholdersResolved);

        self.resolve_content_placeholders(body);
        self.advance(MergeStage::ContentPlaceholdersResolved);

        if self.options.strict && !self.report.is_clean() {
            let failed = self
                .report
                .diagnostics
                .iter()
                .filter(|d| !d.is_informational())
                .count();
            return Err(MergeError::structural(format!(
                "strict mode: {} placeholder(s) could not be honored",
                failed
            )));
        }
        self.advance(MergeStage::Done);
        Ok(std::mem::take(&mut self.report))
    }

    // ------------------------------------------------------------------
    // Table pass: full depth
    // ------------------------------------------------------------------

    fn resolve_table_placeholders(&mut self, body: &mut Body) {
        let mut pending = self.collect_table_placeholders(&body.blocks);

        for index in 0..pending.len() {
            let item = pending[index].clone();
            let table_path = match item.target {
                TableTarget::Missing => {
                    self.report.push(missing_target(&item));
                    continue;
                }
                TableTarget::Detached => None,
                TableTarget::Following(path) => Some(path),
            };

            let mut inserted = None;
            if let Some(table_path) = &table_path {
                inserted = self.fill_table(&mut body.blocks, table_path, &item.path);
            }

            if let Some(paragraph_path) = &item.paragraph {
                strip_placeholder(&mut body.blocks, paragraph_path, &item.literal);
            }

            if let (Some(table_path), Some(added)) = (table_path, inserted) {
                for later in pending.iter_mut().skip(index + 1) {
                    later.rebase(&table_path, added);
                }
            }
        }
    }

    fn collect_table_placeholders(&self, blocks: &[Block]) -> Vec<PendingTable> {
        let flat = flatten(blocks);
        let mut pending = Vec::new();
        for (position, entry) in flat.iter().enumerate() {
            if entry.kind != BlockKind::Paragraph {
                continue;
            }
            let Some(paragraph) = block_at(blocks, &entry.path).and_then(Block::as_paragraph) else {
                continue;
            };
            let text = paragraph.text();
            for placeholder in scan_tables(&text) {
                log::info!(
                    "found table placeholder {:?} at index {}",
                    placeholder.literal,
                    position
                );
                let target = flat[position + 1..]
                    .iter()
                    .find(|later| later.kind == BlockKind::Table)
                    .map(|table| TableTarget::Following(table.path.clone()))
                    .unwrap_or(TableTarget::Missing);
                pending.push(PendingTable {
                    paragraph: Some(entry.path.clone()),
                    literal: placeholder.literal,
                    path: placeholder.path,
                    target,
                });
            }
        }
        pending
    }

    /// Populate the table at `table_path`; returns the number of rows
    /// inserted when the table changed shape.
    fn fill_table(
        &mut self,
        blocks: &mut [Block],
        table_path: &BlockPath,
        raw_path: &str,
    ) -> Option<usize> {
        let rows = table_rows(self.data, raw_path, &mut self.report);
        let table = block_at_mut(blocks, table_path)?.as_table_mut()?;
        match populate_table(table, &rows, &self.options) {
            PopulateOutcome::Populated { rows: added } => {
                self.report.tables_populated += 1;
                Some(added)
            }
            PopulateOutcome::NoData => {
                log::info!(
                    "no data rows for {}; table left unchanged",
                    normalize_path(raw_path)
                );
                None
            }
            PopulateOutcome::Mismatch(reason) => {
                self.report.push(
                    MergeDiagnostic::new(DiagnosticKind::TemplateRowMismatch, reason)
                        .with_path(normalize_path(raw_path)),
                );
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Content pass: body paragraphs plus one level of table cells
    // ------------------------------------------------------------------

    fn resolve_content_placeholders(&mut self, body: &mut Body) {
        let mut index = 0;
        while index < body.blocks.len() {
            if let Block::Table(table) = &mut body.blocks[index] {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        self.resolve_paragraphs(&mut cell.blocks);
                    }
                }
                index += 1;
            } else {
                index += self.resolve_paragraph_at(&mut body.blocks, index);
            }
        }
    }

    /// Cell-level pass; nested tables are not entered.
    fn resolve_paragraphs(&mut self, blocks: &mut Vec<Block>) {
        let mut index = 0;
        while index < blocks.len() {
            index += self.resolve_paragraph_at(blocks, index);
        }
    }

    /// Resolve the paragraph at `index` and return how many blocks now occupy
    /// its place, so callers skip over any generated tables.
    fn resolve_paragraph_at(&mut self, blocks: &mut Vec<Block>, index: usize) -> usize {
        let Some(paragraph) = blocks[index].as_paragraph_mut() else {
            return 1;
        };
        substitute_content(paragraph, self.data, &mut self.report);

        let text = paragraph.text();
        let tables = scan_tables(&text);
        if tables.is_empty() {
            return 1;
        }
        let replacement =
            split_around_tables(&text, &tables, self.data, &self.options, &mut self.report);
        let produced = replacement.len();
        blocks.splice(index..=index, replacement);
        produced
    }
}

impl PendingTable {
    fn rebase(&mut self, table: &BlockPath, added: usize) {
        self.paragraph = self
            .paragraph
            .take()
            .and_then(|p| p.rebase_after_populate(table, added));
        if let TableTarget::Following(path) = &self.target {
            self.target = match path.rebase_after_populate(table, added) {
                Some(path) => TableTarget::Following(path),
                None => TableTarget::Detached,
            };
        }
    }
}

/// Diagnostic for a table placeholder with no following table.
///
/// The content pass only reaches cells of top-level tables, so a placeholder
/// nested any deeper is never synthesized and stays as text.
fn missing_target(item: &PendingTable) -> MergeDiagnostic {
    let nested = item
        .paragraph
        .as_ref()
        .is_some_and(|p| p.steps.len() > CONTENT_PASS_DEPTH);
    let diagnostic = if nested {
        MergeDiagnostic::new(
            DiagnosticKind::UnresolvedPlaceholder,
            "no table follows the placeholder and it is too deeply nested to generate one",
        )
    } else {
        MergeDiagnostic::new(
            DiagnosticKind::MissingTargetTable,
            "no table follows the placeholder",
        )
    };
    diagnostic.with_path(normalize_path(&item.path))
}

/// Remove a consumed placeholder's text from its paragraph.
fn strip_placeholder(blocks: &mut [Block], path: &BlockPath, literal: &str) {
    let Some(paragraph) = block_at_mut(blocks, path).and_then(Block::as_paragraph_mut) else {
        return;
    };
    let remaining = paragraph.text().replace(literal, "");
    if remaining.trim().is_empty() {
        paragraph.clear_runs();
    } else {
        paragraph.set_text(remaining);
    }
}

/// Merge `data` into `document` with default options.
pub fn merge(document: Document, data: &DataTree) -> MergeResult<Document> {
    merge_with_options(document, data, &MergeOptions::default()).map(|out| out.document)
}

/// Merge `data` into `document`, returning the document and its report.
pub fn merge_with_options(
    mut document: Document,
    data: &DataTree,
    options: &MergeOptions,
) -> MergeResult<MergeOutput> {
    let report = merge_in_place(&mut document, data, options)?;
    Ok(MergeOutput { document, report })
}

/// Merge into a borrowed document.
///
/// On error the document may already be partly rewritten; callers that need
/// all-or-nothing behavior should merge a copy.
pub fn merge_in_place(
    document: &mut Document,
    data: &DataTree,
    options: &MergeOptions,
) -> MergeResult<MergeReport> {
    Merger::new(data, options.clone()).run(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmerge_ir::{Cell, Paragraph, Row, Table};
    use pretty_assertions::assert_eq;

    fn data() -> DataTree {
        DataTree::from_xml("<Data><Name>Jane</Name><M><Item><A>1</A></Item></M></Data>")
            .unwrap()
    }

    fn nested(text: &str) -> Document {
        let inner = Table::new(vec![Row::new(vec![Cell::from_text(text)])]);
        let outer = Table::new(vec![Row::new(vec![Cell::new(vec![Block::Table(inner)])])]);
        Document::new(vec![Block::Table(outer)])
    }

    #[test]
    fn test_stage_reaches_done() {
        let mut document = Document::new(vec![Block::Paragraph(Paragraph::from_text(
            "<# <Content Select=\"./Name\" /> #>",
        ))]);
        let data = data();
        let mut merger = Merger::new(&data, MergeOptions::default());
        assert_eq!(merger.stage(), MergeStage::Idle);
        merger.run(&mut document).unwrap();
        assert_eq!(merger.stage(), MergeStage::Done);

        let err = merger.run(&mut document).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_strict_failure_stops_before_done() {
        let mut document = Document::new(vec![Block::Paragraph(Paragraph::from_text(
            "<# <Content Select=\"./Missing\" /> #>",
        ))]);
        let data = data();
        let mut merger = Merger::new(&data, MergeOptions::strict());
        assert!(merger.run(&mut document).is_err());
        assert_eq!(merger.stage(), MergeStage::ContentPlaceholdersResolved);
    }

    #[test]
    fn test_shallow_missing_target_is_informational() {
        let mut document = Document::new(vec![Block::Table(Table::new(vec![Row::new(vec![
            Cell::from_text("<# <Table Select=\"./M\" /> #>"),
        ])]))]);
        let report = merge_in_place(&mut document, &data(), &MergeOptions::strict()).unwrap();
        assert_eq!(report.count(DiagnosticKind::MissingTargetTable), 1);
        assert_eq!(report.tables_synthesized, 1);
    }

    #[test]
    fn test_deep_missing_target_is_unresolved() {
        let mut document = nested("<# <Table Select=\"./M\" /> #>");
        let report = merge_in_place(&mut document, &data(), &MergeOptions::default()).unwrap();
        assert_eq!(report.count(DiagnosticKind::MissingTargetTable), 0);
        assert_eq!(report.count(DiagnosticKind::UnresolvedPlaceholder), 1);
        assert_eq!(report.diagnostics[0].path.as_deref(), Some("M"));
        assert_eq!(report.tables_synthesized, 0);

        let mut document = nested("<# <Table Select=\"./M\" /> #>");
        let err = merge_in_place(&mut document, &data(), &MergeOptions::strict()).unwrap_err();
        assert!(err.to_string().contains("strict mode"));
    }
}
