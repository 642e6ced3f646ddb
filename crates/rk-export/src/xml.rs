//! In-memory XML element tree and serialization

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::attributes::AttributeSet;
use crate::error::ExportError;

/// An XML element with ordered attributes and child elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: AttributeSet,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: AttributeSet::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attributes(name: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes = self.attributes.set(name, value);
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute)
    }

    /// First direct child with the given tag
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children with the given tag
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All descendants with the given tag, document order
    pub fn descendants_named(&self, name: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            out.extend(child.descendants_named(name));
        }
        out
    }

    /// Serialize with two-space indentation
    pub fn to_xml_string(&self, declaration: bool) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        let mut writer = Writer::new_with_indent(Cursor::new(&mut buffer), b' ', 2);

        if declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(|e| ExportError::Xml(format!("failed to write declaration: {e}")))?;
        }
        write_element(&mut writer, self)?;

        let mut text = String::from_utf8(buffer)
            .map_err(|e| ExportError::Xml(format!("invalid UTF-8 in output: {e}")))?;
        text.push('\n');
        Ok(text)
    }
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), ExportError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in element.attributes.iter() {
        start.push_attribute((key, value));
    }

    if element.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| ExportError::Xml(format!("failed to write {}: {e}", element.name)))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| ExportError::Xml(format!("failed to write {}: {e}", element.name)))?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| ExportError::Xml(format!("failed to close {}: {e}", element.name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_nested_elements() {
        let root = XmlElement::new("mujoco")
            .attr("model", "base")
            .child(XmlElement::new("compiler").attr("angle", "radian"))
            .child(XmlElement::new("worldbody").child(XmlElement::new("body").attr("name", "base")));

        let xml = root.to_xml_string(false).unwrap();
        assert!(xml.starts_with("<mujoco model=\"base\">"));
        assert!(xml.contains("  <compiler angle=\"radian\"/>"));
        assert!(xml.contains("    <body name=\"base\"/>"));
        assert!(xml.trim_end().ends_with("</mujoco>"));
    }

    #[test]
    fn test_declaration_and_escaping() {
        let root = XmlElement::new("robot").attr("name", "a<b");
        let xml = root.to_xml_string(true).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("a&lt;b"));
    }

    #[test]
    fn test_descendant_lookup() {
        let root = XmlElement::new("worldbody").child(
            XmlElement::new("body")
                .attr("name", "a")
                .child(XmlElement::new("body").attr("name", "b")),
        );

        let bodies = root.descendants_named("body");
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[1].get("name"), Some("b"));
        assert_eq!(root.find_all("body").count(), 1);
    }
}
