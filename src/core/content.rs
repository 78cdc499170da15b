//! Inline substitution of Content placeholders.

use docmerge_ir::Paragraph;
use indexmap::IndexMap;

use super::scanner::scan_content;
use crate::data::{normalize_path, DataTree};
use crate::utils::report::{DiagnosticKind, MergeDiagnostic, MergeReport};

/// Replace every Content placeholder in `paragraph` with its resolved value.
///
/// The rewritten paragraph holds a single default-formatted run; run-level
/// formatting of the original text is dropped. Paragraphs without a
/// placeholder are left as they are. Returns the number of placeholders
/// consumed.
pub fn substitute_content(
    paragraph: &mut Paragraph,
    data: &DataTree,
    report: &mut MergeReport,
) -> usize {
    let text = paragraph.text();
    let matches = scan_content(&text);
    if matches.is_empty() {
        return 0;
    }
    log::info!("found {} content placeholders in paragraph", matches.len());

    // Keyed by literal: a repeated marker resolves once, and replacements
    // apply in scan order.
    let mut replacements: IndexMap<String, String> = IndexMap::new();
    for placeholder in &matches {
        let path = normalize_path(&placeholder.path);
        let value = match data.resolve_node(&placeholder.path) {
            Some(node) => node.scalar_value(),
            None => {
                report.push(
                    MergeDiagnostic::new(
                        DiagnosticKind::UnresolvedPlaceholder,
                        "content placeholder replaced with blank text",
                    )
                    .with_path(path.clone()),
                );
                String::new()
            }
        };
        log::info!("will replace {:?} with {:?} (path: {})", placeholder.literal, value, path);
        replacements.insert(placeholder.literal.clone(), value);
    }

    let mut combined = text;
    for (literal, value) in &replacements {
        combined = combined.replace(literal.as_str(), value);
    }
    paragraph.set_text(combined);
    report.content_placeholders += matches.len();
    matches.len()
}
