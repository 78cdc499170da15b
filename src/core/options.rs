//! Merge configuration.

/// Options controlling generated table styling and failure policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Shading fill (hex RGB) for header cells of synthesized tables
    pub header_fill: String,
    /// Border size for synthesized tables, in eighths of a point
    pub table_border_size: u32,
    /// Border size for populated cells whose template cell had no style
    pub cell_border_size: u32,
    /// Fail the merge when any placeholder could not be honored
    pub strict: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            header_fill: "DDDDDD".to_string(),
            table_border_size: 12,
            cell_border_size: 4,
            strict: false,
        }
    }
}

impl MergeOptions {
    /// Options that turn blanked or skipped placeholders into an error.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_header_fill(mut self, fill: impl Into<String>) -> Self {
        self.header_fill = fill.into();
        self
    }

    pub fn with_table_border_size(mut self, size: u32) -> Self {
        self.table_border_size = size;
        self
    }

    pub fn with_cell_border_size(mut self, size: u32) -> Self {
        self.cell_border_size = size;
        self
    }
}
