//! Fresh table synthesis for Table placeholders with no table to fill.

use docmerge_ir::{Block, Cell, Paragraph, Row, Table};
use indexmap::IndexMap;

use super::{header_shading, table_borders};
use crate::core::options::MergeOptions;
use crate::core::scanner::Placeholder;
use crate::data::{normalize_path, DataNode, DataTree};
use crate::utils::report::{DiagnosticKind, MergeDiagnostic, MergeReport};

/// Build a table from a list of data elements.
///
/// Columns are the child names of the first element. The first row is a
/// shaded header; each element then contributes one row, with blanks where
/// it lacks a column. An empty list yields a table with no rows.
pub fn synthesize_table(rows: &[&DataNode], options: &MergeOptions) -> Table {
    let Some(first) = rows.first() else {
        return Table::empty();
    };
    let columns = first.child_names();

    let mut table = Table::new(Vec::with_capacity(rows.len() + 1));
    table.properties = table_borders(options.table_border_size);

    let shading = header_shading(&options.header_fill);
    table.rows.push(Row::new(
        columns
            .iter()
            .map(|name| Cell::styled(shading.clone(), name.as_str()))
            .collect(),
    ));

    for element in rows {
        table.rows.push(Row::from_texts(columns.iter().map(|column| {
            element
                .first_child(column)
                .map(DataNode::scalar_value)
                .unwrap_or_default()
        })));
    }
    table
}

/// Replace a paragraph's text with the blocks it expands to.
///
/// Text before each placeholder becomes its own paragraph, followed by the
/// synthesized table; whatever trails the last placeholder becomes a final
/// paragraph. Blank fragments are dropped. Repeated markers produce one
/// table, at their first occurrence.
pub fn split_around_tables(
    text: &str,
    placeholders: &[Placeholder],
    data: &DataTree,
    options: &MergeOptions,
    report: &mut MergeReport,
) -> Vec<Block> {
    log::info!("found {} table placeholders in paragraph", placeholders.len());

    let mut tables: IndexMap<&str, Table> = IndexMap::new();
    for placeholder in placeholders {
        if tables.contains_key(placeholder.literal.as_str()) {
            continue;
        }
        let rows = table_rows(data, &placeholder.path, report);
        log::info!(
            "will replace table placeholder {:?} with generated table (path: {})",
            placeholder.literal,
            normalize_path(&placeholder.path)
        );
        tables.insert(placeholder.literal.as_str(), synthesize_table(&rows, options));
        report.tables_synthesized += 1;
    }

    let mut blocks = Vec::with_capacity(tables.len() * 2 + 1);
    let mut rest = text;
    for (literal, table) in tables {
        let Some(at) = rest.find(literal) else {
            continue;
        };
        let before = &rest[..at];
        if !before.trim().is_empty() {
            blocks.push(Block::Paragraph(Paragraph::from_text(before)));
        }
        blocks.push(Block::Table(table));
        rest = &rest[at + literal.len()..];
    }
    if !rest.trim().is_empty() {
        blocks.push(Block::Paragraph(Paragraph::from_text(rest)));
    }
    blocks
}

/// Data rows for a table placeholder, recording a diagnostic when the path
/// does not resolve at all.
pub(crate) fn table_rows<'d>(
    data: &'d DataTree,
    raw_path: &str,
    report: &mut MergeReport,
) -> Vec<&'d DataNode> {
    match data.resolve_node(raw_path) {
        Some(container) => container.children().collect(),
        None => {
            report.push(
                MergeDiagnostic::new(
                    DiagnosticKind::UnresolvedPlaceholder,
                    "table placeholder has no data",
                )
                .with_path(normalize_path(raw_path)),
            );
            Vec::new()
        }
    }
}
