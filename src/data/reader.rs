//! XML loading for the data tree.

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use super::{DataContent, DataNode};
use crate::utils::error::{MergeError, MergeResult};

/// Build a [`DataNode`] tree from XML source.
///
/// Whitespace-only text between elements is dropped; all other text and
/// CDATA sections are kept in document order.
pub(super) fn read_tree(xml: &str) -> MergeResult<DataNode> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<DataNode> = Vec::new();
    let mut root: Option<DataNode> = None;

    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().map_err(|e| {
            MergeError::data_load_at(format!("malformed XML: {}", e), position)
        })?;

        match event {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(MergeError::data_load_at(
                        "document has more than one root element",
                        position,
                    ));
                }
                stack.push(DataNode::new(element_name(e.name(), position)?));
            }
            Event::Empty(e) => {
                let node = DataNode::new(element_name(e.name(), position)?);
                attach(&mut stack, &mut root, node, position)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    MergeError::data_load_at("closing tag without opening tag", position)
                })?;
                attach(&mut stack, &mut root, node, position)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                if text.trim().is_empty() {
                    continue;
                }
                push_text(&mut stack, text.into_owned(), position)?;
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let text = std::str::from_utf8(&bytes).map_err(|err| {
                    MergeError::data_load_at(format!("CDATA is not UTF-8: {}", err), position)
                })?;
                push_text(&mut stack, text.to_string(), position)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(MergeError::data_load(format!(
            "unexpected end of input, <{}> is not closed",
            open.name
        )));
    }

    root.ok_or_else(|| MergeError::data_load("document has no root element"))
}

fn element_name(name: QName<'_>, position: u64) -> MergeResult<String> {
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|err| {
            MergeError::data_load_at(format!("element name is not UTF-8: {}", err), position)
        })
}

fn attach(
    stack: &mut [DataNode],
    root: &mut Option<DataNode>,
    node: DataNode,
    position: u64,
) -> MergeResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.content.push(DataContent::Element(node)),
        None if root.is_some() => {
            return Err(MergeError::data_load_at(
                "document has more than one root element",
                position,
            ));
        }
        None => *root = Some(node),
    }
    Ok(())
}

fn push_text(stack: &mut [DataNode], text: String, position: u64) -> MergeResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.content.push(DataContent::Text(text));
            Ok(())
        }
        None => Err(MergeError::data_load_at(
            "text content outside the root element",
            position,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_nested_elements_and_text() {
        let root = read_tree(
            r#"<?xml version="1.0"?>
<Data>
  <Applicant>
    <FirstName>Jane</FirstName>
    <LastName>Doe</LastName>
  </Applicant>
</Data>"#,
        )
        .unwrap();
        assert_eq!(root.name, "Data");
        let applicant = root.first_child("Applicant").unwrap();
        assert_eq!(applicant.child_names(), vec!["FirstName", "LastName"]);
        assert_eq!(applicant.scalar_value(), "JaneDoe");
    }

    #[test]
    fn unescapes_entities_and_keeps_cdata() {
        let root = read_tree("<D><A>Smith &amp; Sons</A><B><![CDATA[<raw>]]></B></D>").unwrap();
        assert_eq!(root.first_child("A").unwrap().scalar_value(), "Smith & Sons");
        assert_eq!(root.first_child("B").unwrap().scalar_value(), "<raw>");
    }

    #[test]
    fn empty_elements_are_children() {
        let root = read_tree("<D><A/><B>x</B></D>").unwrap();
        assert_eq!(root.child_names(), vec!["A", "B"]);
        assert_eq!(root.first_child("A").unwrap().scalar_value(), "");
    }

    #[test]
    fn rejects_malformed_sources() {
        for bad in [
            "",
            "<!-- only a comment -->",
            "<A><B></A>",
            "<A>",
            "<A/><B/>",
            "stray<A/>",
        ] {
            let err = read_tree(bad).unwrap_err();
            assert!(err.is_data_load(), "expected data load error for {:?}", bad);
        }
    }
}
