//! Placeholder recognition in flattened paragraph text.
//!
//! Two markers are understood:
//!
//! ```text
//! <# <Content Select="./Applicant/FirstName" /> #>
//! <# <Table Select="./IncomesSources" /> #>
//! ```
//!
//! Matching runs against the concatenated text of a paragraph, so a marker
//! split across several runs is still found.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONTENT_PLACEHOLDER: Regex =
        Regex::new(r#"<#\s*<Content\s+Select\s*=\s*["'](.*?)["']\s*/>\s*#>"#).unwrap();
    static ref TABLE_PLACEHOLDER: Regex =
        Regex::new(r#"<#\s*<Table\s+Select\s*=\s*["'](.*?)["']\s*/>\s*#>"#).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Content,
    Table,
}

impl PlaceholderKind {
    fn pattern(self) -> &'static Regex {
        match self {
            PlaceholderKind::Content => &CONTENT_PLACEHOLDER,
            PlaceholderKind::Table => &TABLE_PLACEHOLDER,
        }
    }
}

/// One marker found in a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    /// Exact matched text, used as the literal replacement key
    pub literal: String,
    /// Path between the quotes, untrimmed
    pub path: String,
    /// Byte range of `literal` in the scanned text
    pub span: Range<usize>,
}

/// All markers of `kind` in `text`, in order of appearance.
pub fn scan(text: &str, kind: PlaceholderKind) -> Vec<Placeholder> {
    kind.pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let path = caps.get(1)?;
            Some(Placeholder {
                kind,
                literal: whole.as_str().to_string(),
                path: path.as_str().to_string(),
                span: whole.range(),
            })
        })
        .collect()
}

pub fn scan_content(text: &str) -> Vec<Placeholder> {
    scan(text, PlaceholderKind::Content)
}

pub fn scan_tables(text: &str) -> Vec<Placeholder> {
    scan(text, PlaceholderKind::Table)
}

/// Whether `text` holds any marker of either kind.
pub fn has_placeholders(text: &str) -> bool {
    CONTENT_PLACEHOLDER.is_match(text) || TABLE_PLACEHOLDER.is_match(text)
}
