//! A small XML element tree built on `quick-xml`.
//!
//! Only what the loader needs is kept: element names, child order, and
//! text content. Attributes, comments and processing instructions are
//! dropped while parsing.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::{LoadError, LoadResult};

/// A node in a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its children in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Local name, without any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|el| el.name == name)
    }

    pub fn children_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.child_elements().filter(move |el| el.name == name)
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// First element called `name` in document order, including `self`.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(name))
    }

    /// Every element called `name` in document order, without descending
    /// into elements for which `skip` returns true.
    pub fn find_all<'a>(
        &'a self,
        name: &str,
        skip: &dyn Fn(&XmlElement) -> bool,
        found: &mut Vec<&'a XmlElement>,
    ) {
        if skip(self) {
            return;
        }
        if self.name == name {
            found.push(self);
        }
        for child in self.child_elements() {
            child.find_all(name, skip, found);
        }
    }

    fn push(&mut self, node: XmlNode) {
        self.children.push(node);
    }
}

/// Parses `text` into its root element.
///
/// Text content is kept exactly as written, whitespace included. Unbalanced
/// or mismatched tags are an error.
pub fn parse_xml(text: &str) -> LoadResult<XmlElement> {
    let mut reader = Reader::from_str(text);

    let mut root: Option<XmlElement> = None;
    let mut stack: Vec<XmlElement> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(start) => {
                stack.push(XmlElement::new(local_name(start.name().as_ref())));
            }
            Event::Empty(empty) => {
                let element = XmlElement::new(local_name(empty.name().as_ref()));
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(LoadError::Xml("unexpected closing tag".into()));
                };
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let content = text.unescape()?;
                if !content.is_empty() {
                    if let Some(parent) = stack.last_mut() {
                        parent.push(XmlNode::Text(content.into_owned()));
                    }
                }
            }
            Event::CData(cdata) => {
                if let Some(parent) = stack.last_mut() {
                    let content = String::from_utf8_lossy(&cdata).into_owned();
                    parent.push(XmlNode::Text(content));
                }
            }
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(LoadError::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| LoadError::Xml("document has no root element".into()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> LoadResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push(XmlNode::Element(element));
    } else if root.is_some() {
        return Err(LoadError::Xml("multiple root elements".into()));
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn local_name(qualified: &[u8]) -> String {
    let name = String::from_utf8_lossy(qualified);
    match name.rfind(':') {
        Some(pos) => name[pos + 1..].to_string(),
        None => name.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let root = parse_xml(
            r#"<?xml version="1.0"?>
            <table>
                <row><column> 5 </column><column>a &amp; b</column><column/></row>
            </table>"#,
        )
        .unwrap();

        assert_eq!(root.name(), "table");
        let row = root.child("row").unwrap();
        let values: Vec<String> = row.children_by_name("column").map(XmlElement::text).collect();
        assert_eq!(values, vec![" 5 ", "a & b", ""]);
    }

    #[test]
    fn test_text_keeps_whitespace() {
        let root = parse_xml(
            "<row><column>  padded  </column><column>x <![CDATA[y]]> z</column>\
             <column>a <!-- note --> b</column></row>",
        )
        .unwrap();
        let values: Vec<String> = root.children_by_name("column").map(XmlElement::text).collect();
        assert_eq!(values, vec!["  padded  ", "x y z", "a  b"]);
    }

    #[test]
    fn test_find_all_skips_subtrees() {
        let root = parse_xml("<g><m><row/></m><d><row/><row/></d></g>").unwrap();
        let mut rows = Vec::new();
        root.find_all("row", &|el| el.name() == "m", &mut rows);
        assert_eq!(rows.len(), 2);
        assert_eq!(root.find("m").map(XmlElement::name), Some("m"));
    }

    #[test]
    fn test_cdata_and_prefixes() {
        let root = parse_xml("<g:grid xmlns:g=\"x\"><v><![CDATA[<b>]]></v></g:grid>").unwrap();
        assert_eq!(root.name(), "grid");
        assert_eq!(root.child("v").unwrap().text(), "<b>");
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(parse_xml("<a><b></a>"), Err(LoadError::Xml(_))));
        assert!(matches!(parse_xml("<a>"), Err(LoadError::Xml(_))));
        assert!(matches!(parse_xml(""), Err(LoadError::Xml(_))));
    }
}
