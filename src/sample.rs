//! A ready-made template exercising both placeholder kinds.

use docmerge_ir::{Block, Document, Paragraph, Properties, Run};

fn content(label: &str, paths: &[&str]) -> Block {
    let markers: Vec<String> = paths
        .iter()
        .map(|p| format!("<# <Content Select=\"./{}\" /> #>", p))
        .collect();
    Block::Paragraph(Paragraph::from_text(format!("{}: {}", label, markers.join(" "))))
}

fn table(path: &str) -> Block {
    Block::Paragraph(Paragraph::from_text(format!("<# <Table Select=\"./{}\" /> #>", path)))
}

fn heading(text: &str) -> Block {
    Block::Paragraph(Paragraph::from_text(text))
}

fn party(role: &str) -> Vec<Block> {
    vec![
        heading(&format!("{} INFORMATION", role.to_uppercase())),
        content("Name", &[&format!("{role}/FirstName"), &format!("{role}/LastName")]),
        content("Address", &[&format!("{role}/CurrentAddress")]),
        content("Phone", &[&format!("{role}/PhoneNumber")]),
        content("Email", &[&format!("{role}/EmailAddress")]),
    ]
}

/// Court filing template with applicant and respondent details and two
/// generated income tables.
pub fn sample_template() -> Document {
    let title = Paragraph::new(vec![Run::styled(
        Properties::new().with("bold", "true"),
        "Sample Document with XML Placeholders",
    )]);

    let mut blocks = vec![
        Block::Paragraph(title),
        content("Court", &["CourtName"]),
        content("Address", &["CourtAddress"]),
    ];
    blocks.extend(party("Applicant"));
    blocks.extend(party("Respondent"));
    blocks.extend([
        heading("INCOME SOURCES"),
        table("IncomesSources"),
        heading("OTHER BENEFITS"),
        table("IncomesOther"),
    ]);
    Document::new(blocks)
}
