//! Filling an existing table from its template row.
//!
//! The first row of the table is a header and is left alone. The second row
//! is the template: cells whose text starts with `./` name the data column
//! rendered at that position. The template row is removed and one row per
//! data element is inserted in its place, each carrying the template's
//! row and cell styling.
//!
//! Every generated row goes in directly after the header, so the finished
//! table lists the data elements last-to-first.

use docmerge_ir::{Cell, Properties, Row, Table};
use indexmap::IndexMap;

use super::{cell_borders, COLUMN_PREFIX};
use crate::core::options::MergeOptions;
use crate::data::DataNode;

/// Index of the header row; generated rows are inserted right after it.
const HEADER_ROW: usize = 0;
const TEMPLATE_ROW: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopulateOutcome {
    /// Template row replaced by this many generated rows
    Populated { rows: usize },
    /// Nothing to insert; table untouched
    NoData,
    /// Template row unusable; table untouched
    Mismatch(String),
}

/// Styling captured from the template row before it is removed.
struct TemplateRow {
    properties: Properties,
    cell_properties: Vec<Properties>,
    /// Data column rendered at each cell position
    columns: Vec<Option<String>>,
}

impl TemplateRow {
    /// Map template cells to the column names present on the first data
    /// element. When two cells name the same column, the later cell wins.
    fn capture(row: &Row, first: &DataNode) -> Result<Self, String> {
        let texts: Vec<String> = row
            .cells
            .iter()
            .map(|cell| cell.text().trim().to_string())
            .collect();
        if !texts.iter().any(|t| t.starts_with(COLUMN_PREFIX)) {
            return Err("template row does not contain placeholder cells".to_string());
        }

        let available = first.child_names();
        let mut mapping: IndexMap<&str, usize> = IndexMap::new();
        for (position, text) in texts.iter().enumerate() {
            if let Some(column) = text.strip_prefix(COLUMN_PREFIX) {
                if available.iter().any(|name| name == column) {
                    mapping.insert(column, position);
                }
            }
        }
        if mapping.is_empty() {
            return Err("could not map data columns to template cells".to_string());
        }

        let mut columns = vec![None; texts.len()];
        for (column, position) in mapping {
            columns[position] = Some(column.to_string());
        }

        Ok(Self {
            properties: row.properties.clone(),
            cell_properties: row.cells.iter().map(|c| c.properties.clone()).collect(),
            columns,
        })
    }

    fn render(&self, element: &DataNode, options: &MergeOptions) -> Row {
        let cells = self
            .columns
            .iter()
            .zip(&self.cell_properties)
            .map(|(column, captured)| {
                let value = column
                    .as_deref()
                    .and_then(|name| element.first_child(name))
                    .map(DataNode::scalar_value)
                    .unwrap_or_default();
                let properties = if captured.is_empty() {
                    cell_borders(options.cell_border_size)
                } else {
                    captured.clone()
                };
                Cell::styled(properties, value)
            })
            .collect();
        Row {
            properties: self.properties.clone(),
            cells,
        }
    }
}

/// Replace the template row of `table` with one row per data element.
pub fn populate_table(
    table: &mut Table,
    elements: &[&DataNode],
    options: &MergeOptions,
) -> PopulateOutcome {
    let Some(first) = elements.first() else {
        return PopulateOutcome::NoData;
    };
    if table.rows.len() <= TEMPLATE_ROW {
        return PopulateOutcome::Mismatch(
            "table does not have enough rows to identify the template row".to_string(),
        );
    }

    let template = match TemplateRow::capture(&table.rows[TEMPLATE_ROW], first) {
        Ok(template) => template,
        Err(reason) => return PopulateOutcome::Mismatch(reason),
    };
    table.rows.remove(TEMPLATE_ROW);

    for element in elements {
        table
            .rows
            .insert(HEADER_ROW + 1, template.render(element, options));
    }

    log::info!("updated table with {} rows of data", elements.len());
    PopulateOutcome::Populated {
        rows: elements.len(),
    }
}
