//! Data tree the templates are merged against.
//!
//! A [`DataTree`] is an ordered element tree loaded from XML. Siblings may
//! share a name, which is how lists are expressed. Path lookups always take
//! the first matching child.

mod path;
mod reader;

pub use path::normalize_path;

use std::path::Path;

use crate::utils::error::{MergeError, MergeResult};

/// Content of an element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataContent {
    Element(DataNode),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataNode {
    /// Qualified name as written in the source
    pub name: String,
    pub content: Vec<DataContent>,
}

impl DataNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
        }
    }

    /// Builder-style child element.
    pub fn with_child(mut self, child: DataNode) -> Self {
        self.content.push(DataContent::Element(child));
        self
    }

    /// Builder-style text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(DataContent::Text(text.into()));
        self
    }

    /// Name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Direct child elements, in document order.
    pub fn children(&self) -> impl Iterator<Item = &DataNode> {
        self.content.iter().filter_map(|c| match c {
            DataContent::Element(node) => Some(node),
            DataContent::Text(_) => None,
        })
    }

    /// First direct child element with the given name.
    pub fn first_child(&self, name: &str) -> Option<&DataNode> {
        self.children().find(|c| c.name == name)
    }

    /// Local names of the direct child elements, in document order.
    pub fn child_names(&self) -> Vec<String> {
        self.children().map(|c| c.local_name().to_string()).collect()
    }

    /// Concatenated text of this node and all descendants.
    pub fn scalar_value(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for item in &self.content {
            match item {
                DataContent::Text(text) => out.push_str(text),
                DataContent::Element(node) => node.collect_text(out),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTree {
    root: DataNode,
}

impl DataTree {
    pub fn new(root: DataNode) -> Self {
        Self { root }
    }

    /// Parse an XML document. No partial tree is returned on failure.
    pub fn from_xml(xml: &str) -> MergeResult<Self> {
        reader::read_tree(xml).map(Self::new)
    }

    /// Read and parse an XML file.
    pub fn from_path(path: impl AsRef<Path>) -> MergeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MergeError::data_load(format!(
                "{} not found",
                path.display()
            )));
        }
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }

    pub fn root(&self) -> &DataNode {
        &self.root
    }
}

impl std::str::FromStr for DataTree {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataTree::from_xml(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_value_concatenates_descendants_in_order() {
        let node = DataNode::new("Applicant")
            .with_text("Ms ")
            .with_child(DataNode::new("FirstName").with_text("Jane"))
            .with_text(" ")
            .with_child(DataNode::new("LastName").with_text("Doe"));
        assert_eq!(node.scalar_value(), "Ms Jane Doe");
    }

    #[test]
    fn first_child_picks_first_of_repeated_names() {
        let node = DataNode::new("Incomes")
            .with_child(DataNode::new("Income").with_text("a"))
            .with_child(DataNode::new("Income").with_text("b"));
        assert_eq!(node.first_child("Income").map(DataNode::scalar_value).as_deref(), Some("a"));
        assert_eq!(node.children().count(), 2);
    }

    #[test]
    fn local_name_strips_prefix() {
        assert_eq!(DataNode::new("ns:Source").local_name(), "Source");
        assert_eq!(DataNode::new("Source").local_name(), "Source");
    }

    #[test]
    fn missing_file_is_data_load_error() {
        let err = DataTree::from_path("/definitely/not/here/data.xml").unwrap_err();
        assert!(err.is_data_load());
        assert!(err.to_string().contains("not found"));
    }
}
