//! Table materialization
//!
//! Two strategies turn a list of data elements into table rows:
//!
//! - [`synthesize`]: build a fresh table whose columns are the child names
//!   of the first element, and put it where the placeholder paragraph was.
//! - [`populate`]: fill an existing table by cloning the styling of its
//!   template row (the second row) once per data element.

pub mod populate;
pub mod synthesize;

pub use populate::{populate_table, PopulateOutcome};
pub use synthesize::{split_around_tables, synthesize_table};

use docmerge_ir::Properties;

/// Prefix marking a template cell as a column reference.
pub const COLUMN_PREFIX: &str = "./";

const TABLE_EDGES: [&str; 6] = [
    "border-top",
    "border-bottom",
    "border-left",
    "border-right",
    "border-inside-h",
    "border-inside-v",
];

const CELL_EDGES: [&str; 4] = ["border-top", "border-bottom", "border-left", "border-right"];

fn single_border(size: u32) -> String {
    format!("single:{}", size)
}

/// Single-line borders on every table edge, including inside rules.
pub(crate) fn table_borders(size: u32) -> Properties {
    TABLE_EDGES
        .iter()
        .fold(Properties::new(), |props, edge| props.with(*edge, single_border(size)))
}

/// Thin single-line border around one cell.
pub(crate) fn cell_borders(size: u32) -> Properties {
    CELL_EDGES
        .iter()
        .fold(Properties::new(), |props, edge| props.with(*edge, single_border(size)))
}

/// Light shading used on synthesized header cells.
pub(crate) fn header_shading(fill: &str) -> Properties {
    Properties::new()
        .with("shading-fill", fill)
        .with("shading-pattern", "clear")
}

#[cfg(test)]
mod tests;
