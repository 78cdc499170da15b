//! Path expressions over the data tree.
//!
//! A path is a `/`-separated descent from the root. At each step the first
//! child element with that name is taken. Authors type these inside a word
//! processor, which likes to break lines and insert spaces mid-path, so all
//! whitespace is squeezed out before walking.

use lazy_static::lazy_static;
use regex::Regex;

use super::{DataNode, DataTree};

lazy_static! {
    static ref SLASH_SPACING: Regex = Regex::new(r"\s*/\s*").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Canonical form of a path expression.
///
/// Trims, strips one leading `./`, then removes whitespace around slashes
/// and finally any whitespace left inside segments.
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix("./").unwrap_or(trimmed);
    let squeezed = SLASH_SPACING.replace_all(stripped, "/");
    let normalized = WHITESPACE.replace_all(&squeezed, "").into_owned();
    log::debug!("normalized path {:?} to {:?}", raw, normalized);
    normalized
}

fn segments(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split('/').filter(|s| !s.is_empty())
}

impl DataTree {
    /// Walk a path from the root, first match per segment.
    ///
    /// An empty path addresses the root itself.
    pub fn resolve_node(&self, path: &str) -> Option<&DataNode> {
        let normalized = normalize_path(path);
        let mut current = self.root();
        for segment in segments(&normalized) {
            match current.first_child(segment) {
                Some(next) => current = next,
                None => {
                    log::debug!("data element not found: {} in path {}", segment, normalized);
                    return None;
                }
            }
        }
        Some(current)
    }

    /// Scalar value at `path`, or the empty string when it does not resolve.
    pub fn resolve_scalar(&self, path: &str) -> String {
        self.resolve_node(path)
            .map(DataNode::scalar_value)
            .unwrap_or_default()
    }

    /// Direct children of the container at `path`, in document order.
    ///
    /// Empty when the path does not resolve or the container is empty.
    pub fn resolve_node_list(&self, path: &str) -> Vec<&DataNode> {
        self.resolve_node(path)
            .map(|container| container.children().collect())
            .unwrap_or_default()
    }
}
