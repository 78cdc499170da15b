//! Regression tests for table materialization

use super::*;
use crate::core::options::MergeOptions;
use crate::core::scanner::scan_tables;
use crate::data::DataTree;
use crate::utils::report::{DiagnosticKind, MergeReport};
use docmerge_ir::{Block, Cell, Paragraph, Row, Table};
use pretty_assertions::assert_eq;

fn incomes() -> DataTree {
    DataTree::from_xml(
        "<Data>\
           <IncomesSources>\
             <Income><Source>Salary</Source><Amount>1000</Amount></Income>\
             <Income><Source>Rent</Source><Amount>250</Amount></Income>\
           </IncomesSources>\
           <Ledger>\
             <Entry><Source>A</Source><Amount>1</Amount></Entry>\
             <Entry><Source>B</Source><Amount>2</Amount></Entry>\
             <Entry><Source>C</Source><Amount>3</Amount></Entry>\
           </Ledger>\
           <Ragged>\
             <Item><Name>first</Name><Note>n1</Note></Item>\
             <Item><Note>only note</Note><Extra>ignored</Extra></Item>\
           </Ragged>\
         </Data>",
    )
    .unwrap()
}

fn template_table(template_cells: &[&str]) -> Table {
    Table::new(vec![
        Row::from_texts(["Source", "Amount"]),
        Row::from_texts(template_cells.iter().copied()),
        Row::from_texts(["Total", "1253"]),
    ])
}

fn texts(table: &Table) -> Vec<Vec<String>> {
    table.rows.iter().map(Row::texts).collect()
}

// ============================================================================
// Synthesis
// ============================================================================

#[test]
fn test_synthesize_header_and_rows_in_data_order() {
    let data = incomes();
    let rows = data.resolve_node_list("./IncomesSources");
    let table = synthesize_table(&rows, &MergeOptions::default());

    assert_eq!(
        texts(&table),
        vec![
            vec!["Source", "Amount"],
            vec!["Salary", "1000"],
            vec!["Rent", "250"],
        ]
    );
    assert_eq!(table.properties.get("border-inside-v"), Some("single:12"));
    for cell in &table.rows[0].cells {
        assert_eq!(cell.properties.get("shading-fill"), Some("DDDDDD"));
    }
    assert!(table.rows[1].cells[0].properties.is_empty());
}

#[test]
fn test_synthesize_columns_come_from_first_element() {
    let data = incomes();
    let rows = data.resolve_node_list("Ragged");
    let table = synthesize_table(&rows, &MergeOptions::default());
    assert_eq!(
        texts(&table),
        vec![
            vec!["Name", "Note"],
            vec!["first", "n1"],
            vec!["", "only note"],
        ]
    );
}

#[test]
fn test_synthesize_empty_list_has_no_rows() {
    let table = synthesize_table(&[], &MergeOptions::default());
    assert_eq!(table, Table::empty());
}

#[test]
fn test_synthesize_respects_options() {
    let data = incomes();
    let rows = data.resolve_node_list("IncomesSources");
    let options = MergeOptions::default()
        .with_header_fill("EEEEEE")
        .with_table_border_size(8);
    let table = synthesize_table(&rows, &options);
    assert_eq!(table.properties.get("border-top"), Some("single:8"));
    assert_eq!(table.rows[0].cells[1].properties.get("shading-fill"), Some("EEEEEE"));
}

#[test]
fn test_split_keeps_surrounding_text() {
    let data = incomes();
    let text = "Incomes: <# <Table Select=\"./IncomesSources\" /> #> (monthly)";
    let placeholders = scan_tables(text);
    let mut report = MergeReport::new();
    let options = MergeOptions::default();
    let blocks = split_around_tables(text, &placeholders, &data, &options, &mut report);

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0], Block::Paragraph(Paragraph::from_text("Incomes: ")));
    assert_eq!(blocks[1].as_table().map(|t| t.rows.len()), Some(3));
    assert_eq!(blocks[2], Block::Paragraph(Paragraph::from_text(" (monthly)")));
    assert_eq!(report.tables_synthesized, 1);
}

#[test]
fn test_split_drops_blank_fragments() {
    let data = incomes();
    let text = "  <# <Table Select=\"./IncomesSources\" /> #>\t";
    let placeholders = scan_tables(text);
    let mut report = MergeReport::new();
    let options = MergeOptions::default();
    let blocks = split_around_tables(text, &placeholders, &data, &options, &mut report);
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].is_table());
}

#[test]
fn test_split_two_placeholders_in_one_paragraph() {
    let data = incomes();
    let text = "A <# <Table Select=\"IncomesSources\" /> #> B <# <Table Select=\"Ledger\" /> #>";
    let placeholders = scan_tables(text);
    let mut report = MergeReport::new();
    let options = MergeOptions::default();
    let blocks = split_around_tables(text, &placeholders, &data, &options, &mut report);

    assert_eq!(blocks.len(), 4);
    assert_eq!(blocks[0].as_paragraph().map(Paragraph::text).as_deref(), Some("A "));
    assert_eq!(blocks[1].as_table().map(|t| t.rows.len()), Some(3));
    assert_eq!(blocks[2].as_paragraph().map(Paragraph::text).as_deref(), Some(" B "));
    assert_eq!(blocks[3].as_table().map(|t| t.rows.len()), Some(4));
}

#[test]
fn test_split_unresolved_path_yields_empty_table() {
    let data = incomes();
    let text = "<# <Table Select=\"./Nope\" /> #>";
    let placeholders = scan_tables(text);
    let mut report = MergeReport::new();
    let options = MergeOptions::default();
    let blocks = split_around_tables(text, &placeholders, &data, &options, &mut report);
    assert_eq!(blocks, vec![Block::Table(Table::empty())]);
    assert_eq!(report.count(DiagnosticKind::UnresolvedPlaceholder), 1);
}

// ============================================================================
// Population
// ============================================================================

#[test]
fn test_populate_inserts_rows_in_reverse_data_order() {
    let data = incomes();
    let rows = data.resolve_node_list("Ledger");
    let mut table = template_table(&["./Source", "./Amount"]);

    let outcome = populate_table(&mut table, &rows, &MergeOptions::default());
    assert_eq!(outcome, PopulateOutcome::Populated { rows: 3 });
    assert_eq!(
        texts(&table),
        vec![
            vec!["Source", "Amount"],
            vec!["C", "3"],
            vec!["B", "2"],
            vec!["A", "1"],
            vec!["Total", "1253"],
        ]
    );
}

#[test]
fn test_populate_copies_template_styling() {
    let data = incomes();
    let rows = data.resolve_node_list("IncomesSources");
    let mut table = template_table(&["./Source", "./Amount"]);
    table.rows[1].properties.set("height", "400");
    table.rows[1].cells[0].properties.set("shading-fill", "FFF2CC");

    populate_table(&mut table, &rows, &MergeOptions::default());

    for row in &table.rows[1..3] {
        assert_eq!(row.properties.get("height"), Some("400"));
        assert_eq!(row.cells[0].properties.get("shading-fill"), Some("FFF2CC"));
        // No captured style: thin default border
        assert_eq!(row.cells[1].properties.get("border-left"), Some("single:4"));
        assert_eq!(row.cells[1].properties.get("shading-fill"), None);
    }
}

#[test]
fn test_populate_unmapped_cells_render_blank() {
    let data = incomes();
    let rows = data.resolve_node_list("IncomesSources");
    let mut table = Table::new(vec![
        Row::from_texts(["Source", "Note", "Amount"]),
        Row::from_texts(["./Source", "static text", "./Missing"]),
    ]);

    populate_table(&mut table, &rows, &MergeOptions::default());
    assert_eq!(
        texts(&table),
        vec![
            vec!["Source", "Note", "Amount"],
            vec!["Rent", "", ""],
            vec!["Salary", "", ""],
        ]
    );
}

#[test]
fn test_populate_template_text_is_trimmed() {
    let data = incomes();
    let rows = data.resolve_node_list("IncomesSources");
    let mut table = Table::new(vec![
        Row::from_texts(["Source"]),
        Row::new(vec![Cell::new(vec![
            Block::Paragraph(Paragraph::from_text("  ./Sou")),
            Block::Paragraph(Paragraph::from_text("rce ")),
        ])]),
    ]);
    let outcome = populate_table(&mut table, &rows, &MergeOptions::default());
    assert_eq!(outcome, PopulateOutcome::Populated { rows: 2 });
    assert_eq!(texts(&table)[1], vec!["Rent"]);
}

#[test]
fn test_populate_duplicate_column_later_cell_wins() {
    let data = incomes();
    let rows = data.resolve_node_list("IncomesSources");
    let mut table = Table::new(vec![
        Row::from_texts(["A", "B"]),
        Row::from_texts(["./Source", "./Source"]),
    ]);
    populate_table(&mut table, &rows, &MergeOptions::default());
    assert_eq!(texts(&table)[1], vec!["", "Rent"]);
}

#[test]
fn test_populate_without_prefixed_cells_is_noop() {
    let data = incomes();
    let rows = data.resolve_node_list("IncomesSources");
    let mut table = template_table(&["Source", "Amount"]);
    let before = table.clone();

    let outcome = populate_table(&mut table, &rows, &MergeOptions::default());
    assert!(matches!(outcome, PopulateOutcome::Mismatch(_)));
    assert_eq!(table, before);
}

#[test]
fn test_populate_without_mapping_is_noop() {
    let data = incomes();
    let rows = data.resolve_node_list("IncomesSources");
    let mut table = template_table(&["./Foo", "./Bar"]);
    let before = table.clone();

    let outcome = populate_table(&mut table, &rows, &MergeOptions::default());
    assert_eq!(
        outcome,
        PopulateOutcome::Mismatch("could not map data columns to template cells".to_string())
    );
    assert_eq!(table, before);
}

#[test]
fn test_populate_needs_two_rows() {
    let data = incomes();
    let rows = data.resolve_node_list("IncomesSources");
    let mut table = Table::new(vec![Row::from_texts(["./Source"])]);
    let outcome = populate_table(&mut table, &rows, &MergeOptions::default());
    assert!(matches!(outcome, PopulateOutcome::Mismatch(_)));
    assert_eq!(table.rows.len(), 1);
}

#[test]
fn test_populate_empty_data_is_noop() {
    let mut table = template_table(&["./Source", "./Amount"]);
    let before = table.clone();
    assert_eq!(
        populate_table(&mut table, &[], &MergeOptions::default()),
        PopulateOutcome::NoData
    );
    assert_eq!(table, before);
}

#[test]
fn test_table_rows_reports_only_missing_paths() {
    let data = DataTree::from_xml("<Data><Empty/><List><I>1</I></List></Data>").unwrap();
    let mut report = MergeReport::new();

    assert_eq!(synthesize::table_rows(&data, "./List", &mut report).len(), 1);
    assert!(synthesize::table_rows(&data, "./Empty", &mut report).is_empty());
    assert!(report.diagnostics.is_empty());

    assert!(synthesize::table_rows(&data, "./Missing", &mut report).is_empty());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::UnresolvedPlaceholder);
}
